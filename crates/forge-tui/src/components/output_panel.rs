//! Generated content panel with the copy indicator.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use forge_core::GenerationOutcome;

use crate::action::Action;
use crate::components::{spinner, Component};
use crate::session::SessionState;
use crate::theme::Theme;

/// Lines moved per PageUp/PageDown.
const PAGE: u16 = 5;

/// Widths (percent of the panel) of the loading placeholder bars.
const SKELETON_BARS: [u16; 7] = [92, 100, 78, 0, 96, 84, 60];

#[derive(Default)]
pub struct OutputPanelComponent {
    text: Option<String>,
    busy: bool,
    copied: bool,
    scroll: u16,
    tick: usize,
}

impl OutputPanelComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the session state. A new result resets the scroll position.
    pub fn sync(&mut self, state: &SessionState) {
        let text = match state.last_outcome {
            Some(GenerationOutcome::Success(ref text)) => Some(text.clone()),
            _ => None,
        };
        if text != self.text {
            self.scroll = 0;
            self.text = text;
        }
        self.busy = state.is_busy;
        self.copied = state.clipboard_confirmed;
    }

    fn title_hint(&self) -> Line<'static> {
        if self.copied {
            Line::from(Span::styled(" ✓ Copied! ", Theme::copied()))
        } else if self.text.is_some() {
            Line::from(vec![
                Span::styled(" [c]", Theme::key_hint()),
                Span::styled(" Copy ", Theme::muted()),
            ])
        } else {
            Line::default()
        }
    }

    fn loading_lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", spinner(self.tick)), Theme::key_hint()),
                Span::styled("Forging your content...", Theme::muted()),
            ]),
            Line::default(),
        ];
        for percent in SKELETON_BARS {
            let bar = (width as usize * percent as usize) / 100;
            lines.push(Line::from(Span::styled(" ".repeat(bar), Theme::skeleton())));
            lines.push(Line::default());
        }
        lines
    }
}

impl Component for OutputPanelComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE);
                None
            }
            Action::PageDown => {
                if self.text.is_some() {
                    self.scroll = self.scroll.saturating_add(PAGE);
                }
                None
            }
            Action::Tick => {
                if self.busy {
                    self.tick = self.tick.wrapping_add(1);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Generated Content ")
            .title_style(Theme::title())
            .title_top(self.title_hint().right_aligned())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);

        if self.busy {
            let paragraph = Paragraph::new(self.loading_lines(inner.width)).block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        if let Some(ref text) = self.text {
            let paragraph = Paragraph::new(text.as_str())
                .style(Theme::normal())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let top_pad = inner.height.saturating_sub(2) / 2;
        let mut lines: Vec<Line> = (0..top_pad).map(|_| Line::default()).collect();
        lines.push(Line::from(Span::styled(
            "Your generated content will appear here.",
            Theme::muted(),
        )));
        lines.push(Line::from(Span::styled(
            "Fill out the form and press Enter to generate!",
            Theme::dim(),
        )));
        let placeholder = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(outcome: Option<GenerationOutcome>) -> SessionState {
        SessionState {
            last_outcome: outcome,
            ..SessionState::default()
        }
    }

    #[test]
    fn failure_is_not_shown_as_output() {
        let mut panel = OutputPanelComponent::new();
        panel.sync(&state_with(Some(GenerationOutcome::Failure("nope".into()))));
        assert_eq!(panel.text, None);
    }

    #[test]
    fn new_result_resets_scroll() {
        let mut panel = OutputPanelComponent::new();
        panel.sync(&state_with(Some(GenerationOutcome::Success("one".into()))));
        panel.handle_action(&Action::PageDown);
        assert_eq!(panel.scroll, PAGE);

        panel.sync(&state_with(Some(GenerationOutcome::Success("one".into()))));
        assert_eq!(panel.scroll, PAGE);

        panel.sync(&state_with(Some(GenerationOutcome::Success("two".into()))));
        assert_eq!(panel.scroll, 0);
    }

    #[test]
    fn copy_hint_tracks_confirmation() {
        let mut panel = OutputPanelComponent::new();
        let mut state = state_with(Some(GenerationOutcome::Success("text".into())));
        state.clipboard_confirmed = true;
        panel.sync(&state);
        assert!(panel.copied);

        state.clipboard_confirmed = false;
        panel.sync(&state);
        assert!(!panel.copied);
    }
}
