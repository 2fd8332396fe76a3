use super::{PagedSource, channel, spaced_records, test_config, thread_ids};
use crate::capture::{Capture, CaptureSource};
use crate::collector::{Collector, CollectorConfig};
use crate::source::{ChannelSource, TEXT_CHANNEL};

async fn collected_capture() -> Capture {
    let source = PagedSource::default()
        .with_records("c", spaced_records("m", 5, 10))
        .with_records("t1", spaced_records("t", 2, 10))
        .with_info(channel("c", Some("general"), TEXT_CHANNEL))
        .with_thread("c", channel("t1", Some("topic"), 11));
    let config = CollectorConfig {
        thread_ids: thread_ids(&["t1"]),
        ..test_config(100)
    };

    let collection = Collector::new(source, config).collect("c", 1).await;
    Capture::from_collections([&collection])
}

#[tokio::test]
async fn test_capture_file_round_trip() {
    let capture = collected_capture().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.json");

    capture.save(&path).unwrap();
    let loaded = Capture::load(&path).unwrap();

    assert_eq!(loaded.message_count(), 7);
    assert_eq!(loaded.channels["c"].channel_name, "general");
    assert_eq!(loaded.threads["t1"].parent_id, "c");
    assert_eq!(loaded.channels["c"].messages, capture.channels["c"].messages);
}

#[tokio::test]
async fn test_capture_file_layout() {
    let capture = collected_capture().await;
    let value = serde_json::to_value(&capture).unwrap();

    assert_eq!(value["channels"]["c"]["channel_name"], "general");
    assert_eq!(value["threads"]["t1"]["thread_name"], "topic");
    assert_eq!(value["threads"]["t1"]["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_capture_source_replays_through_collector() {
    let capture = collected_capture().await;
    let config = CollectorConfig {
        thread_ids: thread_ids(&["t1"]),
        ..test_config(2)
    };
    let collector = Collector::new(CaptureSource::new(capture.clone()), config);

    let replayed = collector.collect("c", 1).await;

    assert_eq!(replayed.channel_name, "general");
    assert_eq!(replayed.messages, capture.channels["c"].messages);
    assert_eq!(replayed.threads.len(), 1);
    assert_eq!(replayed.threads[0].thread_name, "topic");
    assert_eq!(replayed.total_messages(), 7);
}

#[tokio::test]
async fn test_capture_source_pages_newest_first() {
    let source = CaptureSource::new(collected_capture().await);

    let first = source.messages("c", 2, None).await;
    let ids: Vec<_> = first.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["m0", "m1"]);

    let next = source.messages("c", 2, Some("m1")).await;
    assert_eq!(next[0]["id"], "m2");

    assert!(source.messages("c", 2, Some("unknown")).await.is_empty());
    assert!(source.messages("missing", 2, None).await.is_empty());
}

#[test]
fn test_missing_capture_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Capture::load(dir.path().join("absent.json")).is_err());
}
