use chatdigest_common::Message;

/// Chronological transcript, one `[time] author: content` line per message.
pub fn format_messages(messages: &[Message]) -> String {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by_key(|m| m.timestamp);

    sorted
        .iter()
        .map(|m| m.formatted_line())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep at most `max_chars` characters from the end of `text`.
///
/// The oldest lines go first; a line cut in half by the budget is dropped
/// entirely unless it is the only line left.
pub fn truncate_to_suffix(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }

    let start = text
        .char_indices()
        .nth(total - max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut suffix = &text[start..];
    let starts_on_line = start == 0 || text[..start].ends_with('\n');
    if !starts_on_line && let Some(newline) = suffix.find('\n') {
        suffix = &suffix[newline + 1..];
    }

    tracing::warn!(
        from = total,
        to = suffix.chars().count(),
        "truncating transcript to fit the input budget"
    );

    suffix
}
