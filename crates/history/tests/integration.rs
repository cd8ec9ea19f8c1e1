use chrono::Utc;
use history::{FileHistory, HistoryEntry, HistoryStore, InMemoryHistory};
use serde_json::json;

fn sample_entry(input: &str) -> HistoryEntry {
    HistoryEntry {
        input_text: input.to_string(),
        data: vec![json!({"synthetic_transcription": "s", "medical_specialty": "m"})],
        metadata: json!({"sample_count": 1}),
        created_at: Utc::now(),
        content_url: "https://gateway.example/content".to_string(),
        metadata_url: "https://gateway.example/meta".to_string(),
        token_id: None,
        transaction_hash: None,
    }
}

fn temp_log_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("history_test_{}.ndjson", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_missing_file_reads_empty() {
    let store = FileHistory::new(temp_log_path());
    let entries = store.list().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_append_adds_exactly_one_entry() {
    let path = temp_log_path();
    let store = FileHistory::new(path.clone());

    store.append(sample_entry("first")).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);

    store.append(sample_entry("second")).await.unwrap();
    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].input_text, "first");
    assert_eq!(entries[1].input_text, "second");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_entry_round_trip() {
    let path = temp_log_path();
    let store = FileHistory::new(path.clone());

    let mut entry = sample_entry("round trip");
    entry.token_id = Some("7".to_string());
    entry.transaction_hash = Some("0xabc".to_string());
    store.append(entry.clone()).await.unwrap();

    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], entry);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_concurrent_appends_lose_nothing() {
    let path = temp_log_path();
    let store = std::sync::Arc::new(FileHistory::new(path.clone()));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append(sample_entry(&format!("writer {i}"))).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 20);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_in_memory_store() {
    let store = InMemoryHistory::new();
    assert!(store.list().await.unwrap().is_empty());

    store.append(sample_entry("mem")).await.unwrap();
    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].input_text, "mem");
}
