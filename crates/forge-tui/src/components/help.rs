//! Help overlay with the keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(vertical[1]);

        horizontal[1]
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            _ if action.is_background() => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 58, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help · Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::focused_border());

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("Up / Down / j / k", "Previous / next field"),
            key_line("Left / Right / h / l", "Change the selected option"),
            key_line("Enter / g", "Generate content"),
            key_line("c / y", "Copy generated content"),
            key_line("PageUp / PageDown", "Scroll generated content"),
            key_line("Esc", "Close this help"),
            Line::from(""),
            Line::from(Span::styled("── In the prompt editor ──", Theme::header())),
            Line::from(""),
            key_line("Ctrl+S / Ctrl+Enter", "Generate content"),
            key_line("Alt+Enter", "Generate content"),
            key_line("Enter", "New line"),
            key_line("Ctrl+W", "Delete word"),
            key_line("Ctrl+V", "Paste from clipboard"),
            key_line("Up / Down", "Move cursor between lines"),
            key_line("Esc / Tab", "Leave the editor"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<24}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_do_not_close_help() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        help.handle_action(&Action::Tick);
        help.handle_action(&Action::SetStatus("Content generated".into()));
        assert!(help.visible);

        help.handle_action(&Action::Escape);
        assert!(!help.visible);
    }
}
