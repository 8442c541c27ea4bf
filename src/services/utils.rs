/// Keeps the first `max_chars` characters of `text` for a log line.
///
/// A cut text ends in `…`, which counts toward `max_chars`. Cuts always fall on a
/// char boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.char_indices().nth(max_chars).is_none() {
        return text.to_string();
    }
    match max_chars.checked_sub(1) {
        None => String::new(),
        Some(keep) => {
            let cut = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
            format!("{}…", &text[..cut])
        }
    }
}

/// Length of the prompt/reply previews written to the log.
pub const LOG_PREVIEW_CHARS: usize = 80;
