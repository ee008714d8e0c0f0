//! Multi-line text editor used for the prompt field.
//!
//! The cursor is a byte offset into the text. Rendering word-wraps each
//! logical line to the viewport and keeps the cursor's visual line in view.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::Theme;

/// Rough viewport height used before the first render knows the real one.
const ESTIMATED_VIEWPORT: usize = 4;

#[derive(Debug, Default)]
pub struct TextArea {
    text: String,
    cursor: usize,
    /// First visible logical line.
    scroll: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.ensure_cursor_visible();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.ensure_cursor_visible();
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.ensure_cursor_visible();
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let prev = self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.text.remove(prev);
        self.cursor = prev;
        self.ensure_cursor_visible();
    }

    /// Delete the word before the cursor, plus any whitespace after it.
    pub fn delete_word(&mut self) {
        self.clamp_cursor();
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end_matches(|c: char| c == ' ' || c == '\t');
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
        self.ensure_cursor_visible();
    }

    /// (line, column) of a byte offset, both zero-based.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let before = &self.text[..offset.min(self.text.len())];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map(|p| offset - p - 1).unwrap_or(offset);
        (line, col)
    }

    /// Byte offset of the start of logical line `line`.
    fn line_start(&self, line: usize) -> usize {
        self.text
            .split('\n')
            .take(line)
            .map(|l| l.len() + 1)
            .sum()
    }

    /// Clamp `col` within `line` to a char boundary.
    fn offset_in_line(&self, line: usize, col: usize) -> usize {
        let start = self.line_start(line);
        let content = self.text[start..].split('\n').next().unwrap_or("");
        let mut col = col.min(content.len());
        while !content.is_char_boundary(col) {
            col -= 1;
        }
        start + col
    }

    /// Move up one line. Returns false when already on the first line.
    pub fn cursor_up(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line == 0 {
            return false;
        }
        self.cursor = self.offset_in_line(line - 1, col);
        self.ensure_cursor_visible();
        true
    }

    /// Move down one line. Returns false when already on the last line.
    pub fn cursor_down(&mut self) -> bool {
        let (line, col) = self.line_col(self.cursor);
        if line + 1 >= self.text.split('\n').count() {
            return false;
        }
        self.cursor = self.offset_in_line(line + 1, col);
        self.ensure_cursor_visible();
        true
    }

    fn ensure_cursor_visible(&mut self) {
        let (line, _) = self.line_col(self.cursor);
        if line < self.scroll {
            self.scroll = line;
        }
        if line >= self.scroll + ESTIMATED_VIEWPORT {
            self.scroll = line + 1 - ESTIMATED_VIEWPORT;
        }
    }

    /// Render inside `block`. Unfocused, the text is shown plainly (or the
    /// placeholder when empty); focused, a block cursor is drawn.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        block: Block,
        focused: bool,
        placeholder: &str,
    ) {
        if self.text.is_empty() && !focused {
            let paragraph = Paragraph::new(Span::styled(placeholder.to_string(), Theme::dim()))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        if !focused {
            let paragraph = Paragraph::new(self.text.as_str())
                .style(Theme::normal())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll as u16, 0))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let inner = block.inner(area);
        let viewport_height = inner.height as usize;
        let wrap_width = if inner.width > 0 {
            inner.width as usize
        } else {
            80
        };

        let (visual, cursor_line) = self.visual_lines(wrap_width);

        let mut scroll = self.scroll.min(cursor_line);
        if viewport_height > 0 && cursor_line >= scroll + viewport_height {
            scroll = cursor_line + 1 - viewport_height;
        }

        let lines: Vec<Line> = visual
            .iter()
            .skip(scroll)
            .take(viewport_height)
            .map(|vl| match vl.cursor_col {
                Some(col) => cursor_line_spans(&vl.text, col),
                None => Line::from(Span::styled(vl.text.clone(), Theme::normal())),
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    /// Wrap every logical line, marking where the cursor lands. Returns the
    /// visual lines and the index of the one holding the cursor.
    fn visual_lines(&self, width: usize) -> (Vec<VisualLine>, usize) {
        let (cursor_logical, cursor_col) = self.line_col(self.cursor);
        let mut visual = Vec::new();
        let mut cursor_line = 0;

        for (li, logical) in self.text.split('\n').enumerate() {
            let segments = wrap_line(logical, width);
            let count = segments.len();
            let mut offset = 0;
            for (si, segment) in segments.into_iter().enumerate() {
                let len = segment.len();
                let last = si + 1 == count;
                let holds_cursor = li == cursor_logical
                    && cursor_col >= offset
                    && (cursor_col < offset + len || (last && cursor_col == offset + len));
                if holds_cursor {
                    cursor_line = visual.len();
                }
                visual.push(VisualLine {
                    text: segment,
                    cursor_col: holds_cursor.then(|| cursor_col - offset),
                });
                offset += len;
            }
        }

        (visual, cursor_line)
    }
}

struct VisualLine {
    text: String,
    cursor_col: Option<usize>,
}

fn cursor_line_spans(text: &str, col: usize) -> Line<'static> {
    let col = col.min(text.len());
    let (before, after) = text.split_at(col);
    let mut rest = after.chars();
    let under = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
    Line::from(vec![
        Span::styled(before.to_string(), Theme::normal()),
        Span::styled(under, Theme::cursor()),
        Span::styled(rest.as_str().to_string(), Theme::normal()),
    ])
}

/// Word-wrap a single logical line to `max_width` bytes. Breaks at the last
/// space when one falls in the latter two thirds of the line, otherwise hard
/// breaks on a char boundary. Always returns at least one segment.
pub fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.len() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut remaining = text;

    while remaining.len() > max_width {
        let mut hard = max_width;
        while !remaining.is_char_boundary(hard) {
            hard -= 1;
        }
        if hard == 0 {
            hard = remaining.chars().next().map(char::len_utf8).unwrap_or(1);
        }

        let break_pos = match remaining[..hard].rfind(' ') {
            Some(pos) if pos > max_width / 3 => pos + 1,
            _ => hard,
        };

        let (line, rest) = remaining.split_at(break_pos);
        lines.push(line.to_string());
        remaining = rest;
    }
    if !remaining.is_empty() {
        lines.push(remaining.to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_with(text: &str) -> TextArea {
        let mut area = TextArea::new();
        area.set_text(text);
        area
    }

    #[test]
    fn typing_and_backspace() {
        let mut area = TextArea::new();
        for c in "héllo".chars() {
            area.insert_char(c);
        }
        assert_eq!(area.text(), "héllo");
        area.delete_char();
        area.delete_char();
        area.delete_char();
        area.delete_char();
        assert_eq!(area.text(), "h");
        area.delete_char();
        area.delete_char();
        assert!(area.is_empty());
    }

    #[test]
    fn delete_word_removes_last_word() {
        let mut area = area_with("eco friendly sneakers  ");
        area.delete_word();
        assert_eq!(area.text(), "eco friendly ");
        area.delete_word();
        assert_eq!(area.text(), "eco ");
        area.delete_word();
        assert_eq!(area.text(), "");
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let mut area = area_with("ab");
        area.cursor = 1;
        area.insert_str("XY");
        assert_eq!(area.text(), "aXYb");
        assert_eq!(area.cursor, 3);
    }

    #[test]
    fn vertical_movement_keeps_column() {
        let mut area = area_with("first line\nab\nthird line");
        assert!(area.cursor_up());
        assert_eq!(area.line_col(area.cursor), (1, 2));
        assert!(area.cursor_up());
        assert_eq!(area.line_col(area.cursor), (0, 2));
        assert!(!area.cursor_up());
        assert!(area.cursor_down());
        assert!(area.cursor_down());
        assert!(!area.cursor_down());
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut area = TextArea::new();
        for _ in 0..10 {
            area.insert_char('x');
            area.insert_char('\n');
        }
        let (line, _) = area.line_col(area.cursor);
        assert!(line >= area.scroll);
        assert!(line < area.scroll + ESTIMATED_VIEWPORT);
    }

    #[test]
    fn wrap_prefers_spaces() {
        let lines = wrap_line("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick ", "brown fox ", "jumps"]);
        assert_eq!(lines.concat(), "the quick brown fox jumps");
    }

    #[test]
    fn wrap_hard_breaks_long_words_on_char_boundaries() {
        let lines = wrap_line("ééééé", 3);
        assert!(lines.iter().all(|l| !l.is_empty()));
        assert_eq!(lines.concat(), "ééééé");
        assert_eq!(wrap_line("", 5), vec![String::new()]);
    }

    #[test]
    fn cursor_lands_on_one_visual_line() {
        let area = area_with("abcdefghij");
        let (visual, cursor_line) = area.visual_lines(4);
        assert_eq!(visual.len(), 3);
        assert_eq!(cursor_line, 2);
        assert_eq!(visual.iter().filter(|v| v.cursor_col.is_some()).count(), 1);
        assert_eq!(visual[2].cursor_col, Some(2));
    }
}
