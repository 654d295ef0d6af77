/// Single-line edit buffer for new wheel entries.
#[derive(Debug, Clone)]
pub struct TextInput {
    buffer: String,
    max_chars: usize,
}

impl TextInput {
    pub fn new(max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            max_chars,
        }
    }

    /// Inserts typed text, dropping control characters and anything past the
    /// length limit.
    pub fn insert_str(&mut self, text: &str) {
        let room = self.max_chars.saturating_sub(self.char_count());
        self.buffer
            .extend(text.chars().filter(|c| !c.is_control()).take(room));
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Takes the trimmed text if there is any; blank input stays put.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.buffer.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.buffer.clear();
        Some(text)
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn caps_input_at_limit_counting_characters() {
        let mut input = TextInput::new(50);
        input.insert_str(&"ă".repeat(30));
        input.insert_str(&"b".repeat(30));
        assert_eq!(input.char_count(), 50);
        assert!(input.text().ends_with(&"b".repeat(20)));
    }

    #[test]
    fn control_characters_are_dropped() {
        let mut input = TextInput::new(50);
        input.insert_str("a\r\tb\u{8}");
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn submit_returns_trimmed_text_and_clears() {
        let mut input = TextInput::new(50);
        input.insert_str("  Minh  ");
        assert_eq!(input.submit(), Some("Minh".to_string()));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut input = TextInput::new(50);
        input.insert_str("   ");
        assert_eq!(input.submit(), None);
        assert_eq!(input.text(), "   ");
        assert!(input.is_blank());
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut input = TextInput::new(50);
        input.insert_str("Hân");
        input.backspace();
        assert_eq!(input.text(), "Hâ");
        input.backspace();
        input.backspace();
        input.backspace();
        assert_eq!(input.text(), "");
    }
}
