use async_trait::async_trait;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct GenParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// JSON schema the model is asked to conform to.
    pub response_schema: serde_json::Value,
}

#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the raw model output for a prompt. Callers parse and verify.
    async fn generate(&self, prompt: &str, params: &GenParams) -> anyhow::Result<String>;
    async fn ping(&self) -> anyhow::Result<()>;
    fn info(&self) -> ProviderInfo;
}
