//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use forge_client::ContentGenerator;
use forge_core::{ContentType, Length, Tone};

use crate::action::{Action, InputMode};
use crate::clipboard::ClipboardSink;
use crate::components::content_form::ContentFormComponent;
use crate::components::help::HelpComponent;
use crate::components::output_panel::OutputPanelComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::session::Session;
use crate::theme::Theme;

/// Below this width the form and output are stacked instead of side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

/// Main application state.
pub struct App {
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// Action bus. The session's background tasks hold clones of `tx`.
    tx: mpsc::UnboundedSender<Action>,
    rx: Option<mpsc::UnboundedReceiver<Action>>,

    session: Session,

    // Components
    form: ContentFormComponent,
    output: OutputPanelComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(generator: Arc<ContentGenerator>, clipboard: Box<dyn ClipboardSink>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Action>();
        let status_bar = StatusBarComponent::new(generator.model());
        Self {
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            session: Session::new(generator, clipboard, tx.clone()),
            tx,
            rx: Some(rx),
            form: ContentFormComponent::new(),
            output: OutputPanelComponent::new(),
            status_bar,
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the prompt from CLI args.
    pub fn set_initial_prompt(&mut self, prompt: String) {
        self.session.set_prompt(prompt);
        self.sync_views();
    }

    pub fn set_initial_content_type(&mut self, content_type: ContentType) {
        self.session.set_content_type(content_type);
        self.sync_views();
    }

    pub fn set_initial_tone(&mut self, tone: Tone) {
        self.session.set_tone(tone);
        self.sync_views();
    }

    pub fn set_initial_length(&mut self, length: Length) {
        self.session.set_length(length);
        self.sync_views();
    }

    /// Replace the status bar message (e.g. a startup warning).
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_bar.message = message.into();
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("the app is already running"))?;

        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Start the event handler with the shared input mode flag.
        let event_tx = self.tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        self.sync_input_mode();
        info!("TUI started");

        let result = self.event_loop(&mut terminal, &mut rx).await;

        // Abandon any in-flight generation before leaving.
        self.session.shutdown();

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            match rx.recv().await {
                Some(action) => {
                    self.handle_action(&action);
                    if self.should_quit {
                        return Ok(());
                    }
                }
                None => return Ok(()),
            }
        }
    }

    /// Apply one action from the bus, then re-sync views and input mode.
    fn handle_action(&mut self, action: &Action) {
        self.dispatch(action);
        self.sync_views();
        self.sync_input_mode();
    }

    /// Route an action to the session and components, following any chained
    /// actions they return. Views are synced by the caller once the whole
    /// chain has run, so a half-applied edit is never written back.
    fn dispatch(&mut self, action: &Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::PasteInput => {
                if self.form.wants_input() {
                    match self.session.read_clipboard() {
                        Ok(text) => self.dispatch(&Action::PasteBulk(text)),
                        Err(e) => {
                            warn!("Paste failed: {}", e);
                            self.dispatch(&Action::SetStatus(format!("Paste failed: {}", e)));
                        }
                    }
                }
                return;
            }
            _ => {}
        }

        // While help is open, keys only close it.
        let help_was_open = self.help.visible;
        self.help.handle_action(action);
        if help_was_open && !action.is_background() {
            return;
        }

        let from_form = self.form.handle_action(action);
        let from_session = self.session.handle_action(action);
        self.output.handle_action(action);
        self.status_bar.handle_action(action);

        for chained in [from_form, from_session].into_iter().flatten() {
            self.dispatch(&chained);
        }
    }

    fn sync_views(&mut self) {
        let state = self.session.state();
        self.form.sync(state);
        self.output.sync(state);
        self.status_bar.busy = state.is_busy;
    }

    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        if self.help.visible {
            return InputMode::Normal;
        }
        if self.form.wants_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_header(frame, chunks[0]);

        let panes = if chunks[1].width >= SIDE_BY_SIDE_MIN_WIDTH {
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .spacing(1)
                .split(chunks[1])
        } else {
            Layout::vertical([Constraint::Min(18), Constraint::Min(8)]).split(chunks[1])
        };
        self.form.render(frame, panes[0]);
        self.output.render(frame, panes[1]);

        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.help.render(frame, area);
    }

    fn render_header(&self, frame: &mut ratatui::Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" ✦ AI Content Forge", Theme::title()),
            Span::styled(
                "  Generate marketing copy, blog posts and social media captions",
                Theme::dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
