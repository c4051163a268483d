//! Prompt templating and answer extraction

/// Marker that introduces the answer in the Q/A prompt format
pub const ANSWER_MARKER: &str = "A:";

/// Build the completion prompt for a question
pub fn build_prompt(question: &str) -> String {
    format!("Q: {}\n{}", question, ANSWER_MARKER)
}

/// Isolate the answer in raw generated text.
///
/// The text after the last `A:` is kept, so any extra Q/A turns the model
/// invents are dropped. Without a marker the whole text is used. The result
/// is always trimmed and may be empty.
pub fn extract_answer(raw: &str) -> String {
    match raw.rfind(ANSWER_MARKER) {
        Some(pos) => raw[pos + ANSWER_MARKER.len()..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt() {
        assert_eq!(
            build_prompt("Where is Taj Mahal?"),
            "Q: Where is Taj Mahal?\nA:"
        );
    }

    #[test]
    fn test_single_marker() {
        assert_eq!(extract_answer("Q: X\nA: 42"), "42");
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(extract_answer("no marker here"), "no marker here");
        assert_eq!(extract_answer("  padded \n"), "padded");
    }

    #[test]
    fn test_last_marker_wins() {
        assert_eq!(extract_answer("Q: X\nA: first\nQ: Y\nA: second"), "second");
    }

    #[test]
    fn test_marker_at_end_gives_empty_answer() {
        assert_eq!(extract_answer("Q: X\nA:"), "");
        assert_eq!(extract_answer("Q: X\nA:   \n"), "");
    }

    #[test]
    fn test_marker_inside_words_counts() {
        // The marker is matched as a plain substring
        assert_eq!(extract_answer("Q: X\nA: see NASA: moon"), "moon");
    }

    #[test]
    fn test_multibyte_text_around_marker() {
        assert_eq!(extract_answer("Q: café?\nA: crème brûlée ☕"), "crème brûlée ☕");
    }

    #[test]
    fn test_prompt_round_trips_through_extractor() {
        let raw = format!("{} Agra, India.\n", build_prompt("Where is Taj Mahal?"));
        assert_eq!(extract_answer(&raw), "Agra, India.");
    }
}
