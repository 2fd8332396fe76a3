use crate::prompts::{self, PromptTemplate, PromptType};

#[test]
fn test_infer_by_keyword() {
    assert_eq!(PromptType::infer("defi-strategies"), Some(PromptType::Defi));
    assert_eq!(PromptType::infer("BTC-Talk"), Some(PromptType::Crypto));
    assert_eq!(PromptType::infer("dev-chat"), Some(PromptType::Technical));
    assert_eq!(PromptType::infer("game-night"), Some(PromptType::Gaming));
    assert_eq!(PromptType::infer("general"), None);
}

#[test]
fn test_infer_prefers_earlier_topics() {
    // "stable" is a DeFi keyword, "coin" a crypto one
    assert_eq!(PromptType::infer("stablecoin"), Some(PromptType::Defi));
    // "eth" matches inside "ethereum-dev" before the technical keyword
    assert_eq!(PromptType::infer("ethereum-dev"), Some(PromptType::Crypto));
}

#[test]
fn test_infer_matches_substrings() {
    // "lp" inside "help"
    assert_eq!(PromptType::infer("help"), Some(PromptType::Defi));
    // "play" inside "display"
    assert_eq!(PromptType::infer("display"), Some(PromptType::Gaming));
}

#[test]
fn test_select_explicit_type_wins() {
    let template = PromptTemplate::select("defi-yield", Some(PromptType::Gaming));
    assert_eq!(template, &prompts::GAMING);
}

#[test]
fn test_select_falls_back_to_general() {
    assert_eq!(PromptTemplate::select("random", None), &prompts::GENERAL);
    assert_eq!(PromptTemplate::select("All Channels", None), &prompts::GENERAL);
}

#[test]
fn test_render_substitutes_placeholders() {
    let rendered = prompts::GENERAL.render("[t] a: hello", "lobby");

    assert!(rendered.contains("#lobby"));
    assert!(rendered.contains("[t] a: hello"));
    assert!(!rendered.contains("{text}"));
    assert!(!rendered.contains("{channel_name}"));
}

#[test]
fn test_render_does_not_expand_placeholders_inside_text() {
    let rendered = prompts::DEFI.render("someone typed {channel_name}", "farm");
    assert!(rendered.contains("someone typed {channel_name}"));
}

#[test]
fn test_every_template_has_text_placeholder() {
    for prompt_type in [
        PromptType::General,
        PromptType::Defi,
        PromptType::Crypto,
        PromptType::Technical,
        PromptType::Gaming,
    ] {
        assert!(prompt_type.template().user.contains("{text}"));
    }
}
