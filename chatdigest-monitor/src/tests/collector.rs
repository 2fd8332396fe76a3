use super::{
    EndlessSource, PagedSource, channel, record, spaced_records, test_config, thread_ids,
};
use crate::collector::{Collector, CollectorConfig};
use crate::source::TEXT_CHANNEL;

#[tokio::test]
async fn test_threshold_keeps_qualifying_part_of_straddling_page() {
    // ages in hours: 1, 5, 10 | 20, 30, 40
    let records = [1, 5, 10, 20, 30, 40]
        .iter()
        .map(|hours| record(&format!("m{hours}"), "hello", hours * 60))
        .collect();
    let source = PagedSource::default().with_records("c", records);
    let collector = Collector::new(source, test_config(3));

    let collection = collector.collect("c", 1).await;

    let ids: Vec<_> = collection.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m20", "m10", "m5", "m1"]);
    assert_eq!(collector.source().requests(), 2);
}

#[tokio::test]
async fn test_request_cap_holds_against_endless_source() {
    let config = CollectorConfig {
        max_requests: 5,
        ..test_config(10)
    };
    let collector = Collector::new(EndlessSource::default(), config);

    let collection = collector.collect("c", 1).await;

    assert_eq!(
        collector
            .source()
            .requests
            .load(std::sync::atomic::Ordering::SeqCst),
        5
    );
    assert_eq!(collection.messages.len(), 50);
}

#[test]
fn test_window_beyond_calendar_range_starts_at_earliest_time() {
    assert_eq!(
        crate::collector::window_threshold(u32::MAX),
        chrono::NaiveDateTime::MIN
    );
}

#[tokio::test]
async fn test_huge_window_keeps_whole_history() {
    let source = PagedSource::default().with_records("c", spaced_records("m", 30, 60 * 24 * 30));
    let collector = Collector::new(source, test_config(10));

    let collection = collector.collect("c", u32::MAX).await;

    assert_eq!(collection.messages.len(), 30);
}

#[tokio::test]
async fn test_three_days_of_history_with_one_day_window() {
    // 250 messages, one every 17 minutes, spanning about 71 hours
    let source = PagedSource::default().with_records("c", spaced_records("m", 250, 17));
    let collector = Collector::new(source, test_config(25));

    let collection = collector.collect("c", 1).await;

    // ages 0..=1428 minutes fall inside the last 1440
    assert_eq!(collection.messages.len(), 85);
    let requests = collector.source().requests();
    assert!(requests >= 3);
    assert!(requests < 500);

    let threshold = crate::collector::window_threshold(1);
    assert!(collection.messages.iter().all(|m| m.timestamp >= threshold - chrono::Duration::minutes(1)));
}

#[tokio::test]
async fn test_messages_are_chronological() {
    let source = PagedSource::default().with_records("c", spaced_records("m", 7, 1));
    let collector = Collector::new(source, test_config(2));

    let collection = collector.collect("c", 1).await;

    assert_eq!(collection.messages.len(), 7);
    assert!(
        collection
            .messages
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    );
    assert_eq!(collection.messages.last().unwrap().id, "m0");
}

#[tokio::test]
async fn test_empty_source_stops_after_one_request() {
    let collector = Collector::new(PagedSource::default(), test_config(100));

    let collection = collector.collect("42", 1).await;

    assert!(collection.is_empty());
    assert_eq!(collection.channel_name, "Channel 42");
    assert_eq!(collector.source().requests(), 1);
}

#[tokio::test]
async fn test_records_without_content_are_skipped() {
    let records = vec![
        record("a", "kept", 1),
        record("b", "", 2),
        serde_json::json!({"id": "c", "timestamp": super::minutes_ago(3)}),
        record("d", "also kept", 4),
    ];
    let source = PagedSource::default()
        .with_records("c", records)
        .with_info(channel("c", Some("general"), TEXT_CHANNEL));
    let collector = Collector::new(source, test_config(100));

    let collection = collector.collect("c", 1).await;

    assert_eq!(collection.channel_name, "general");
    let ids: Vec<_> = collection.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["d", "a"]);
}

#[tokio::test]
async fn test_page_without_last_id_stops_paging() {
    let records = vec![
        record("a", "first", 1),
        serde_json::json!({"content": "no id", "timestamp": super::minutes_ago(2)}),
        record("b", "never fetched", 3),
    ];
    let source = PagedSource::default().with_records("c", records);
    let collector = Collector::new(source, test_config(2));

    let collection = collector.collect("c", 1).await;

    assert_eq!(collection.messages.len(), 2);
    assert_eq!(collector.source().requests(), 1);
}

#[tokio::test]
async fn test_only_configured_threads_are_collected() {
    let source = PagedSource::default()
        .with_records("c", spaced_records("m", 2, 5))
        .with_records("t1", spaced_records("t", 3, 5))
        .with_records("t2", spaced_records("x", 3, 5))
        .with_thread("c", channel("t1", None, 11))
        .with_thread("c", channel("t2", Some("ignored"), 11));
    let config = CollectorConfig {
        thread_ids: thread_ids(&["t1"]),
        ..test_config(100)
    };
    let collector = Collector::new(source, config);

    let collection = collector.collect("c", 1).await;

    assert_eq!(collection.threads.len(), 1);
    let thread = &collection.threads[0];
    assert_eq!(thread.thread_id, "t1");
    assert_eq!(thread.thread_name, "Thread t1");
    assert_eq!(thread.parent_id, "c");
    assert_eq!(thread.messages.len(), 3);
    assert_eq!(collection.total_messages(), 5);
    assert!(!collector.source().requested_scopes().contains(&"t2".to_string()));
}

#[tokio::test]
async fn test_threads_are_skipped_without_configured_ids() {
    let source = PagedSource::default()
        .with_records("c", spaced_records("m", 2, 5))
        .with_thread("c", channel("t1", Some("topic"), 11));
    let collector = Collector::new(source, test_config(100));

    let collection = collector.collect("c", 1).await;

    assert!(collection.threads.is_empty());
    assert!(collector.source().requested_scopes().iter().all(|scope| scope == "c"));
}
