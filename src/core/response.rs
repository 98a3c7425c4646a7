//! Message chunking and label utilities for Discord limits
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord button label limit
pub const BUTTON_LABEL_LIMIT: usize = 80;
/// Buttons per action row
pub const BUTTONS_PER_ROW: usize = 5;
/// Action rows per message
pub const MAX_ROWS: usize = 5;
/// Most buttons a single message can carry
pub const MAX_CHOICES: usize = BUTTONS_PER_ROW * MAX_ROWS;

/// Chunk text into pieces that fit a size limit (UTF-8 safe, line-aware)
///
/// Prefers splitting at newlines so a reminder listing never breaks
/// mid-entry unless a single line is itself too long.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line_with_newline = format!("{line}\n");
        if current.len() + line_with_newline.len() > max_size {
            if !current.is_empty() {
                chunks.push(current.trim_end().to_string());
                current = String::new();
            }
            if line_with_newline.len() > max_size {
                chunks.extend(chunk_long_line(line, max_size));
            } else {
                current = line_with_newline;
            }
        } else {
            current.push_str(&line_with_newline);
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end().to_string());
    }
    chunks
}

fn chunk_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if current.len() + ch.len_utf8() > max_size && !current.is_empty() {
            result.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Truncate a button label on a char boundary, adding ellipsis if needed
pub fn truncate_label(label: &str) -> String {
    if label.len() <= BUTTON_LABEL_LIMIT {
        return label.to_string();
    }
    let mut end = BUTTON_LABEL_LIMIT - 3;
    while end > 0 && !label.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &label[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_no_chunk() {
        assert_eq!(chunk_text("hello", 100), vec!["hello"]);
    }

    #[test]
    fn test_chunk_respects_lines() {
        let result = chunk_text("line1\nline2\nline3", 12);
        assert!(result.len() >= 2);
        for chunk in &result {
            assert!(!chunk.ends_with('\n'));
        }
    }

    #[test]
    fn test_chunk_handles_long_lines() {
        let result = chunk_text(&"a".repeat(100), 30);
        assert_eq!(result.len(), 4);
        for chunk in &result {
            assert!(chunk.len() <= 30);
        }
    }

    #[test]
    fn test_message_limit_with_multibyte() {
        let text = "Erinnerung für Ärzte 世界\n".repeat(200);
        for chunk in chunk_for_message(&text) {
            assert!(chunk.len() <= MESSAGE_LIMIT);
            assert!(!chunk.is_empty());
        }
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("1. Dentist"), "1. Dentist");

        let long = "é".repeat(60);
        let truncated = truncate_label(&long);
        assert!(truncated.len() <= BUTTON_LABEL_LIMIT);
        assert!(truncated.ends_with("..."));
    }
}
