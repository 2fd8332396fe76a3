
use chatdigest_common::Summary;
use chrono::NaiveDate;

fn summary(content: &str) -> Summary {
    Summary::generated_at(
        content.to_string(),
        "100",
        "general",
        42,
        "Anthropic",
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap(),
    )
}
