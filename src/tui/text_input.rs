use crate::util::unicode::{
    byte_offset_to_display_col, next_grapheme_boundary, prev_grapheme_boundary,
};

/// Single-line text field with a grapheme-aware cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Byte offset into `text`, always on a grapheme boundary
    cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        byte_offset_to_display_col(&self.text, self.cursor)
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> TextInput {
        let mut input = TextInput::default();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut input = typed("helo");
        input.move_left();
        input.insert_char('l');
        input.end();
        input.insert_char('!');
        assert_eq!(input.text(), "hello!");
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = typed("abc");
        input.backspace();
        assert_eq!(input.text(), "ab");
        input.home();
        input.delete();
        assert_eq!(input.text(), "b");
        input.backspace(); // at start: nothing
        assert_eq!(input.text(), "b");
        input.end();
        input.delete(); // at end: nothing
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut input = typed("e\u{0301}");
        assert_eq!(input.cursor(), 3);
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.move_right();
        assert_eq!(input.cursor(), 3);
        input.backspace();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn cursor_col_counts_wide_chars() {
        let input = typed("你好");
        assert_eq!(input.cursor_col(), 4);
    }

    #[test]
    fn insert_str_and_clear() {
        let mut input = TextInput::default();
        input.insert_str("pasted text");
        assert_eq!(input.cursor(), 11);
        input.clear();
        assert_eq!(input, TextInput::default());
    }
}
