use async_trait::async_trait;
use irys::{IrysClient, Tag, UploadReceipt};

#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload_json(
        &self,
        payload: &serde_json::Value,
        tags: &[Tag],
    ) -> Result<UploadReceipt, irys::IrysError>;
}

#[async_trait]
impl Uploader for IrysClient {
    async fn upload_json(
        &self,
        payload: &serde_json::Value,
        tags: &[Tag],
    ) -> Result<UploadReceipt, irys::IrysError> {
        self.upload(payload, tags).await
    }
}
