//! The generation form: content type, prompt, tone and length, plus the
//! generate button and the last validation or generation error.
//!
//! The form keeps a copy of the session's field values for rendering. Edits
//! are emitted as `Set*` actions so the session stays the single owner of
//! the state; the App re-syncs the form afterwards.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use forge_core::{ContentType, GenerationOutcome, Length, Tone};

use crate::action::{Action, Field};
use crate::components::text_area::TextArea;
use crate::components::{spinner, Component};
use crate::session::SessionState;
use crate::theme::Theme;

const PROMPT_PLACEHOLDER: &str =
    "e.g., \"A new line of eco-friendly sneakers made from recycled materials.\"";

pub struct ContentFormComponent {
    focused: Field,
    content_type: ContentType,
    prompt: TextArea,
    tone: Tone,
    length: Length,
    busy: bool,
    /// Failure text from the last outcome, shown under the button.
    error: Option<String>,
    tick: usize,
}

impl ContentFormComponent {
    pub fn new() -> Self {
        Self {
            focused: Field::Prompt,
            content_type: ContentType::default(),
            prompt: TextArea::new(),
            tone: Tone::default(),
            length: Length::default(),
            busy: false,
            error: None,
            tick: 0,
        }
    }

    pub fn focused(&self) -> Field {
        self.focused
    }

    /// Whether raw keys should go to the prompt editor.
    pub fn wants_input(&self) -> bool {
        self.focused == Field::Prompt
    }

    /// Mirror the session state.
    pub fn sync(&mut self, state: &SessionState) {
        self.content_type = state.content_type;
        self.tone = state.tone;
        self.length = state.length;
        self.busy = state.is_busy;
        self.prompt.set_text(&state.prompt);
        self.error = match state.last_outcome {
            Some(GenerationOutcome::Failure(ref message)) => Some(message.clone()),
            _ => None,
        };
    }

    fn prompt_changed(&self) -> Option<Action> {
        Some(Action::SetPrompt(self.prompt.text().to_string()))
    }

    fn cycle(&self, forward: bool) -> Option<Action> {
        match self.focused {
            Field::ContentType => Some(Action::SetContentType(if forward {
                self.content_type.next()
            } else {
                self.content_type.prev()
            })),
            Field::Tone => Some(Action::SetTone(if forward {
                self.tone.next()
            } else {
                self.tone.prev()
            })),
            Field::Length => Some(Action::SetLength(if forward {
                self.length.next()
            } else {
                self.length.prev()
            })),
            Field::Prompt => None,
        }
    }

    fn block(&self, field: Field) -> Block<'static> {
        let focused = self.focused == field;
        Block::default()
            .title(field.label())
            .title_style(if focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(if focused {
                Theme::focused_border()
            } else {
                Theme::border()
            })
    }

    fn render_content_type(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ContentType::all()
            .iter()
            .map(|ct| Line::from(ct.label()))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.content_type.index())
            .style(Theme::tab_inactive())
            .highlight_style(Theme::tab_active())
            .divider(Span::styled("│", Theme::dim()))
            .block(self.block(Field::ContentType));

        frame.render_widget(tabs, area);
    }

    fn render_selector(
        &self,
        field: Field,
        label: &str,
        position: (usize, usize),
        frame: &mut Frame,
        area: Rect,
    ) {
        let focused = self.focused == field;
        let arrow = if focused {
            Theme::key_hint()
        } else {
            Theme::dim()
        };
        let line = Line::from(vec![
            Span::styled(" ‹ ", arrow),
            Span::styled(
                label.to_string(),
                if focused {
                    Theme::selected()
                } else {
                    Theme::normal()
                },
            ),
            Span::styled(" › ", arrow),
            Span::styled(format!(" {}/{}", position.0 + 1, position.1), Theme::dim()),
        ]);

        frame.render_widget(Paragraph::new(line).block(self.block(field)), area);
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let (label, hint) = if self.busy {
            (format!(" {} Generating... ", spinner(self.tick)), "")
        } else if self.wants_input() {
            (" ✦ Generate Content ".to_string(), "  ctrl+s")
        } else {
            (" ✦ Generate Content ".to_string(), "  enter")
        };

        let line = Line::from(vec![
            Span::styled(label, Theme::button(self.busy)),
            Span::styled(hint, Theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for ContentFormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ContentFormComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::FocusNext => {
                self.focused = self.focused.next();
                None
            }
            Action::FocusPrev => {
                self.focused = self.focused.prev();
                None
            }
            Action::Escape if self.focused == Field::Prompt => {
                self.focused = Field::Tone;
                None
            }
            Action::CycleNext => self.cycle(true),
            Action::CyclePrev => self.cycle(false),
            Action::Tick => {
                if self.busy {
                    self.tick = self.tick.wrapping_add(1);
                }
                None
            }

            // ── Prompt editing ──────────────────────────────────
            _ if self.focused != Field::Prompt => None,
            Action::CharInput(c) => {
                self.prompt.insert_char(*c);
                self.prompt_changed()
            }
            Action::NewlineInput => {
                self.prompt.insert_char('\n');
                self.prompt_changed()
            }
            Action::BackspaceInput => {
                self.prompt.delete_char();
                self.prompt_changed()
            }
            Action::DeleteWord => {
                self.prompt.delete_word();
                self.prompt_changed()
            }
            Action::PasteBulk(text) if !text.is_empty() => {
                self.prompt.insert_str(text);
                self.prompt_changed()
            }
            Action::ScrollUp => {
                if !self.prompt.cursor_up() {
                    self.focused = Field::ContentType;
                }
                None
            }
            Action::ScrollDown => {
                if !self.prompt.cursor_down() {
                    self.focused = Field::Tone;
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let error_height = if self.error.is_some() { 3 } else { 0 };
        let chunks = Layout::vertical([
            Constraint::Length(3),            // Content type
            Constraint::Min(5),               // Prompt
            Constraint::Length(3),            // Tone + length
            Constraint::Length(1),            // Spacer
            Constraint::Length(1),            // Generate button
            Constraint::Length(error_height), // Error
        ])
        .split(area);

        self.render_content_type(frame, chunks[0]);

        self.prompt.render(
            frame,
            chunks[1],
            self.block(Field::Prompt),
            self.focused == Field::Prompt,
            PROMPT_PLACEHOLDER,
        );

        let selectors = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.render_selector(
            Field::Tone,
            self.tone.label(),
            (self.tone.index(), Tone::all().len()),
            frame,
            selectors[0],
        );
        self.render_selector(
            Field::Length,
            self.length.label(),
            (self.length.index(), Length::all().len()),
            frame,
            selectors[1],
        );

        self.render_button(frame, chunks[4]);

        if let Some(ref error) = self.error {
            let paragraph = Paragraph::new(Span::styled(error.clone(), Theme::error_text()))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunks[5]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_on(field: Field) -> ContentFormComponent {
        let mut form = ContentFormComponent::new();
        form.focused = field;
        form
    }

    #[test]
    fn typing_emits_prompt_updates() {
        let mut form = form_on(Field::Prompt);
        form.handle_action(&Action::CharInput('h'));
        let action = form.handle_action(&Action::CharInput('i'));
        assert!(matches!(action, Some(Action::SetPrompt(ref p)) if p == "hi"));

        let action = form.handle_action(&Action::BackspaceInput);
        assert!(matches!(action, Some(Action::SetPrompt(ref p)) if p == "h"));
    }

    #[test]
    fn text_input_is_ignored_off_the_prompt() {
        let mut form = form_on(Field::Tone);
        assert!(form.handle_action(&Action::CharInput('x')).is_none());
        assert!(form.prompt.is_empty());
    }

    #[test]
    fn cycling_emits_selector_changes() {
        let mut form = form_on(Field::Tone);
        assert!(matches!(
            form.handle_action(&Action::CycleNext),
            Some(Action::SetTone(Tone::Casual))
        ));

        let mut form = form_on(Field::ContentType);
        assert!(matches!(
            form.handle_action(&Action::CyclePrev),
            Some(Action::SetContentType(ContentType::SocialMediaCaption))
        ));

        let mut form = form_on(Field::Length);
        assert!(matches!(
            form.handle_action(&Action::CycleNext),
            Some(Action::SetLength(Length::Long))
        ));

        let mut form = form_on(Field::Prompt);
        assert!(form.handle_action(&Action::CycleNext).is_none());
    }

    #[test]
    fn sync_mirrors_session_state() {
        let mut form = ContentFormComponent::new();
        let state = SessionState {
            content_type: ContentType::BlogPost,
            prompt: "eco sneakers".into(),
            tone: Tone::Witty,
            length: Length::Short,
            is_busy: true,
            last_outcome: Some(GenerationOutcome::Failure("boom".into())),
            clipboard_confirmed: false,
        };
        form.sync(&state);

        assert_eq!(form.content_type, ContentType::BlogPost);
        assert_eq!(form.prompt.text(), "eco sneakers");
        assert_eq!(form.tone, Tone::Witty);
        assert_eq!(form.length, Length::Short);
        assert!(form.busy);
        assert_eq!(form.error.as_deref(), Some("boom"));
    }

    #[test]
    fn arrows_leave_the_prompt_at_its_edges() {
        let mut form = form_on(Field::Prompt);
        form.handle_action(&Action::ScrollDown);
        assert_eq!(form.focused(), Field::Tone);

        let mut form = form_on(Field::Prompt);
        form.handle_action(&Action::ScrollUp);
        assert_eq!(form.focused(), Field::ContentType);
    }
}
