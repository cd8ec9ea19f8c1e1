use std::sync::Arc;

use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::provider::{GenParams, TextProvider};
use crate::types::{DatasetRecord, SyntheticOutput, VerificationStatus};

const MAX_OUTPUT_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.9;

pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "synthetic_transcription": { "type": "string" },
            "medical_specialty": { "type": "string" },
            "explanation": { "type": "string" }
        },
        "required": ["synthetic_transcription", "medical_specialty", "explanation"]
    })
}

fn build_prompt(input_text: &str) -> String {
    format!(
        "You are generating privacy-safe synthetic medical transcription data. \
         Given the source transcription below, produce a new synthetic \
         transcription that preserves clinical structure but shares no \
         identifying details, classify its medical specialty, and explain the \
         transformation.\n\nSource transcription:\n{input_text}\n\n\
         Respond with a JSON object containing exactly these fields: \
         synthetic_transcription, medical_specialty, explanation."
    )
}

/// Issues `n` independent generation calls through a bounded fan-out and
/// assembles the outcomes in request order. A call that fails outright or
/// returns nothing usable is dropped; output that parses but misses required
/// fields is kept with a failed verification status.
pub async fn generate_samples(
    provider: Arc<dyn TextProvider>,
    input_text: &str,
    n: usize,
    concurrency: usize,
) -> Vec<DatasetRecord> {
    let params = GenParams {
        max_output_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
        response_schema: response_schema(),
    };

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut set = JoinSet::new();

    for i in 0..n {
        let provider = provider.clone();
        let semaphore = semaphore.clone();
        let prompt = build_prompt(input_text);
        let params = params.clone();
        let input = input_text.to_string();

        set.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            match provider.generate(&prompt, &params).await {
                Ok(raw) => Some((i, verify_output(&input, &raw)?)),
                Err(e) => {
                    warn!(sample = i, error = %e, "generation call failed");
                    None
                }
            }
        });
    }

    let mut slots: Vec<Option<DatasetRecord>> = vec![None; n];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Some((i, record))) => slots[i] = Some(record),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "generation task panicked"),
        }
    }

    slots.into_iter().flatten().collect()
}

/// Parses raw model output. Empty or non-JSON output is skipped; JSON with
/// missing or empty required fields becomes a failed verification record.
fn verify_output(input_text: &str, raw: &str) -> Option<DatasetRecord> {
    if raw.trim().is_empty() {
        warn!("empty generation output, skipping sample");
        return None;
    }
    let value: serde_json::Value = match serde_json::from_str(raw.trim()) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparseable generation output, skipping sample");
            return None;
        }
    };

    let field = |name: &str| -> String {
        value
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string()
    };
    let output = SyntheticOutput {
        synthetic_transcription: field("synthetic_transcription"),
        medical_specialty: field("medical_specialty"),
        explanation: field("explanation"),
    };

    let verified = !output.synthetic_transcription.is_empty()
        && !output.medical_specialty.is_empty()
        && !output.explanation.is_empty();

    Some(DatasetRecord {
        original_text: input_text.to_string(),
        synthetic_output: output,
        verification_status: if verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Failed
        },
        signature: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StubProvider;

    const VALID_BODY: &str = r#"{
        "synthetic_transcription": "Patient presents with intermittent chest pain.",
        "medical_specialty": "Cardiology",
        "explanation": "Structure preserved, identifiers replaced."
    }"#;

    #[tokio::test]
    async fn test_all_well_formed_responses_verify() {
        let provider = Arc::new(StubProvider::new(VALID_BODY));
        let records = generate_samples(provider, "source text", 3, 4).await;

        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.verification_status, VerificationStatus::Verified);
            assert_eq!(record.original_text, "source text");
            assert!(record.signature.is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_field_fails_verification_but_is_kept() {
        let provider = Arc::new(StubProvider::new(
            r#"{"synthetic_transcription": "text", "medical_specialty": ""}"#,
        ));
        let records = generate_samples(provider, "src", 1, 1).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verification_status, VerificationStatus::Failed);
        assert!(records[0].signature.is_empty());
        assert!(records[0].synthetic_output.explanation.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_is_skipped() {
        let provider = Arc::new(StubProvider::new(""));
        let records = generate_samples(provider, "src", 2, 2).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_response_is_skipped() {
        let provider = Arc::new(StubProvider::new("sorry, I cannot do that"));
        let records = generate_samples(provider, "src", 2, 2).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_failing_provider_drops_samples_without_aborting() {
        let provider = Arc::new(StubProvider::failing());
        let records = generate_samples(provider, "src", 3, 2).await;
        assert!(records.is_empty());
    }
}
