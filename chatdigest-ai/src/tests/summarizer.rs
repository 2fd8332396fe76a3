use std::sync::Mutex;

use super::message;
use crate::{AiError, AiResult, PromptType, Summarizer, prompts, provider_name_of};

struct ScriptedSummarizer {
    answer: Option<&'static str>,
    budget: usize,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedSummarizer {
    fn answering(answer: Option<&'static str>) -> Self {
        Self {
            answer,
            budget: 10_000,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Summarizer for ScriptedSummarizer {
    fn max_input_chars(&self) -> usize {
        self.budget
    }

    async fn complete(&self, system: &str, user: &str) -> AiResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        self.answer
            .map(str::to_string)
            .ok_or_else(|| AiError::Api("scripted failure".to_string()))
    }
}

#[test]
fn test_provider_name_strips_suffix() {
    assert_eq!(provider_name_of::<ScriptedSummarizer>(), "Scripted");
    assert_eq!(
        provider_name_of::<crate::claude::AnthropicSummarizer>(),
        "Anthropic"
    );
    assert_eq!(
        provider_name_of::<crate::deepseek::DeepSeekSummarizer>(),
        "DeepSeek"
    );
}

#[tokio::test]
async fn test_generate_summary_returns_answer() {
    let summarizer = ScriptedSummarizer::answering(Some("digest"));
    let messages = vec![message("1", "alice", "hello", 9)];

    let summary = summarizer.generate_summary(&messages, "lobby", None).await;

    assert_eq!(summary.as_deref(), Some("digest"));
    let calls = summarizer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, prompts::GENERAL.system);
    assert!(calls[0].1.contains("[2024-03-10 09:00:00] alice: hello"));
    assert!(calls[0].1.contains("#lobby"));
}

#[tokio::test]
async fn test_generate_summary_skips_empty_input() {
    let summarizer = ScriptedSummarizer::answering(Some("digest"));

    assert_eq!(summarizer.generate_summary(&[], "lobby", None).await, None);
    assert!(summarizer.calls().is_empty());
}

#[tokio::test]
async fn test_generate_summary_swallows_errors() {
    let summarizer = ScriptedSummarizer::answering(None);
    let messages = vec![message("1", "alice", "hello", 9)];

    assert_eq!(summarizer.generate_summary(&messages, "lobby", None).await, None);
    assert_eq!(summarizer.calls().len(), 1);
}

#[tokio::test]
async fn test_generate_summary_rejects_blank_answer() {
    let summarizer = ScriptedSummarizer::answering(Some("   \n"));
    let messages = vec![message("1", "alice", "hello", 9)];

    assert_eq!(summarizer.generate_summary(&messages, "lobby", None).await, None);
}

#[tokio::test]
async fn test_generate_summary_uses_inferred_prompt() {
    let summarizer = ScriptedSummarizer::answering(Some("digest"));
    let messages = vec![message("1", "alice", "gm", 9)];

    summarizer.generate_summary(&messages, "yield-farming", None).await;
    summarizer
        .generate_summary(&messages, "yield-farming", Some(PromptType::Technical))
        .await;

    let calls = summarizer.calls();
    assert_eq!(calls[0].0, prompts::DEFI.system);
    assert_eq!(calls[1].0, prompts::TECHNICAL.system);
}

#[tokio::test]
async fn test_generate_summary_truncates_to_budget() {
    let mut summarizer = ScriptedSummarizer::answering(Some("digest"));
    summarizer.budget = 40;
    let messages = vec![
        message("1", "alice", "this is the oldest message", 8),
        message("2", "bob", "newest", 9),
    ];

    summarizer.generate_summary(&messages, "lobby", None).await;

    let user = &summarizer.calls()[0].1;
    assert!(user.contains("[2024-03-10 09:00:00] bob: newest"));
    assert!(!user.contains("oldest"));
}
