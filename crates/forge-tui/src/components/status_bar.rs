//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Whether a generation is in flight.
    pub busy: bool,
    /// Model name shown next to the badge.
    pub model: String,
}

impl StatusBarComponent {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            message: "Describe what you need, then press ctrl+s to generate.".to_string(),
            busy: false,
            model: model.into(),
        }
    }

    fn badge(&self) -> (&'static str, Style) {
        if self.busy {
            ("Busy", Style::default().fg(Theme::warning()))
        } else {
            ("Idle", Theme::muted())
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        let hints = "q·?·tab·c";
        let hints_len = hints.len() + 1;

        let (badge, badge_style) = self.badge();
        let badge_len = badge.len() + 2;
        let model_len = self.model.chars().count() + 2;

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(model_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg: String = if self.message.chars().count() > msg_budget {
            if msg_budget > 3 {
                let kept: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{}...", kept)
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        let used = badge_len + model_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), badge_style),
            Span::styled(format!(" {} ", self.model), Theme::dim()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::muted()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
