//! Main TUI application state and logic

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::client::PackClient;
use crate::form;
use crate::model::{sort_packs, EvalOutcome, EvalRequest, Pack};
use crate::ui::results::{ResultRow, ResultsList};

/// Toast shown when validation fails, same wording as the web client.
const VALIDATION_TOAST: &str = "You must specify both a pack and an expression.";

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Field flash timing: attack style for the first 20ms, combined style
/// until 50ms, then the sustained error style until the next validation.
const FLASH_ATTACK: Duration = Duration::from_millis(20);
const FLASH_HOLD: Duration = Duration::from_millis(50);

/// Which widget is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Selector,
    Expression,
    Results,
}

impl Focus {
    /// Move focus to the next widget (selector -> expression -> results)
    pub fn next(self) -> Self {
        match self {
            Focus::Selector => Focus::Expression,
            Focus::Expression => Focus::Results,
            Focus::Results => Focus::Selector,
        }
    }

    /// Move focus to the previous widget
    pub fn prev(self) -> Self {
        match self {
            Focus::Selector => Focus::Results,
            Focus::Expression => Focus::Selector,
            Focus::Results => Focus::Expression,
        }
    }
}

/// Visual stage of a field's error flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Idle,
    Attack,
    Hold,
    Sustain,
}

/// Error decoration on one form field.
///
/// Raised when validation flags the field, cleared at the start of the next
/// validation, so the sustained style stays visible until the user tries
/// again.
#[derive(Debug, Default)]
pub struct FieldFlash {
    raised_at: Option<Instant>,
}

impl FieldFlash {
    pub fn raise(&mut self) {
        self.raised_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.raised_at = None;
    }

    pub fn phase(&self) -> FlashPhase {
        self.phase_at(Instant::now())
    }

    fn phase_at(&self, now: Instant) -> FlashPhase {
        match self.raised_at {
            None => FlashPhase::Idle,
            Some(raised) => {
                let elapsed = now.saturating_duration_since(raised);
                if elapsed < FLASH_ATTACK {
                    FlashPhase::Attack
                } else if elapsed < FLASH_HOLD {
                    FlashPhase::Hold
                } else {
                    FlashPhase::Sustain
                }
            }
        }
    }
}

/// A transient notification.
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    expires_at: Instant,
}

/// Messages sent back from worker threads.
#[derive(Debug)]
pub enum WorkerEvent {
    PacksLoaded(Vec<Pack>),
    PacksFailed(String),
    EvalFinished {
        expression: String,
        outcome: EvalOutcome,
    },
}

/// The main application state
pub struct App {
    client: Arc<PackClient>,

    /// Loaded packs, already sorted; slot 0 of the selector is always the
    /// placeholder, so `selected_pack == n + 1` points at `packs[n]`.
    packs: Vec<Pack>,
    selected_pack: usize,

    /// Expression input buffer and cursor (in characters).
    input: String,
    cursor: usize,

    results: ResultsList,
    selected_row: usize,
    results_scroll: usize,

    focus: Focus,
    pack_flash: FieldFlash,
    expr_flash: FieldFlash,
    toast: Option<Toast>,

    /// Status message to display
    status_message: String,

    /// Evaluations currently in flight; never cancelled, rows land in
    /// arrival order.
    in_flight: usize,
    loading_packs: bool,

    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,

    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new app talking to the given server.
    pub fn new(client: PackClient) -> Self {
        let (tx, rx) = mpsc::channel();
        App {
            client: Arc::new(client),
            packs: Vec::new(),
            selected_pack: 0,
            input: String::new(),
            cursor: 0,
            results: ResultsList::new("Results"),
            selected_row: 0,
            results_scroll: 0,
            focus: Focus::Selector,
            pack_flash: FieldFlash::default(),
            expr_flash: FieldFlash::default(),
            toast: None,
            status_message: String::from("Ready"),
            in_flight: 0,
            loading_packs: false,
            tx,
            rx,
            should_quit: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.reload_packs();

        loop {
            self.drain_worker_events();
            self.expire_toast();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so worker events and toast expiry are
            // picked up without a keypress.
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Kick off a pack list fetch on a worker thread.
    pub fn reload_packs(&mut self) {
        if self.loading_packs {
            return;
        }
        self.loading_packs = true;
        self.status_message = String::from("Loading packs…");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = match client.fetch_packs() {
                Ok(packs) => WorkerEvent::PacksLoaded(packs),
                Err(e) => WorkerEvent::PacksFailed(e.to_string()),
            };
            let _ = tx.send(event);
        });
    }

    /// Validate the form and, when valid, submit it on a worker thread.
    pub fn submit(&mut self) {
        self.pack_flash.clear();
        self.expr_flash.clear();

        let submission = form::validate(self.pack_value(), &self.input);
        if submission.err() {
            if submission.pack_missing {
                self.pack_flash.raise();
            }
            if submission.expression_missing {
                self.expr_flash.raise();
            }
            self.raise_toast(VALIDATION_TOAST.to_string());
            return;
        }

        // Capture the raw expression with this request so the rendered row
        // always shows the text that produced it, even when submissions
        // overlap.
        let raw_expression = self.input.clone();
        let request = EvalRequest {
            pack: submission.pack,
            expression: submission.expression,
        };
        info!("submitting expression against pack {}", request.pack);

        self.in_flight += 1;
        self.status_message = String::from("Submitted");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = match client.eval(&request) {
                Ok(outcome) => outcome,
                Err(e) => EvalOutcome::TransportError(e.to_string()),
            };
            let _ = tx.send(WorkerEvent::EvalFinished {
                expression: raw_expression,
                outcome,
            });
        });
    }

    /// Apply any finished worker results.
    fn drain_worker_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                WorkerEvent::PacksLoaded(mut packs) => {
                    sort_packs(&mut packs);
                    self.loading_packs = false;
                    self.status_message = format!("Loaded {} pack(s)", packs.len());
                    debug!("pack list refreshed: {} entries", packs.len());
                    self.packs = packs;
                    // Rebuilding the option list resets the selection to
                    // the placeholder.
                    self.selected_pack = 0;
                }
                WorkerEvent::PacksFailed(msg) => {
                    warn!("pack list fetch failed: {msg}");
                    self.loading_packs = false;
                    self.status_message = String::from("Pack list unavailable");
                    self.raise_toast(format!("Could not load packs: {msg}"));
                }
                WorkerEvent::EvalFinished {
                    expression,
                    outcome,
                } => {
                    debug!("eval finished: {outcome:?}");
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.results.push_front(ResultRow::new(outcome, expression));
                    self.selected_row = 0;
                    self.status_message = format!("{} result(s)", self.results.len());
                }
            }
        }
    }

    fn raise_toast(&mut self, message: String) {
        self.toast = Some(Toast {
            message,
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if Instant::now() >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    /// Currently selected pack id, empty string for the placeholder.
    fn pack_value(&self) -> &str {
        match self.selected_pack.checked_sub(1) {
            Some(i) => self.packs.get(i).map(|p| p.id.as_str()).unwrap_or(""),
            None => "",
        }
    }

    /// Currently selected pack title, if any.
    fn pack_title(&self) -> Option<&str> {
        self.selected_pack
            .checked_sub(1)
            .and_then(|i| self.packs.get(i))
            .map(|p| p.title.as_str())
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
            }
            _ => match self.focus {
                Focus::Selector => self.handle_selector_key(key),
                Focus::Expression => self.handle_expression_key(key),
                Focus::Results => self.handle_results_key(key),
            },
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_pack = self.selected_pack.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_pack < self.packs.len() {
                    self.selected_pack += 1;
                }
            }
            KeyCode::Enter => self.submit(),
            _ => self.handle_common_key(key),
        }
    }

    fn handle_expression_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_cursor();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                let at = self.byte_cursor();
                if at < self.input.len() {
                    self.input.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor < self.input.chars().count() {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_row + 1 < self.results.len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.results.toggle_expanded(self.selected_row);
            }
            _ => self.handle_common_key(key),
        }
    }

    /// Shortcuts shared by the non-text widgets.
    fn handle_common_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.reload_packs(),
            KeyCode::Char('c') => self.clear_results(),
            _ => {}
        }
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.selected_row = 0;
        self.results_scroll = 0;
        self.status_message = String::from("Results cleared");
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_cursor();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    fn byte_cursor(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Form row on top, results below, status bar at the bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let form_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);

        super::panes::render_pack_selector(
            frame,
            form_row[0],
            self.pack_title(),
            self.packs.len(),
            self.selected_pack,
            self.focus == Focus::Selector,
            self.pack_flash.phase(),
        );

        super::panes::render_expression_field(
            frame,
            form_row[1],
            &self.input,
            self.cursor,
            self.focus == Focus::Expression,
            self.expr_flash.phase(),
        );

        super::panes::render_results(
            frame,
            chunks[1],
            &self.results,
            self.selected_row,
            self.focus == Focus::Results,
            &mut self.results_scroll,
        );

        super::panes::render_status_bar(
            frame,
            chunks[2],
            &self.status_message,
            self.in_flight,
            self.focus,
        );

        if let Some(toast) = &self.toast {
            super::panes::render_toast(frame, chunks[1], &toast.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        // Port 9 is discard; nothing is contacted unless a worker runs.
        let client = PackClient::new("http://127.0.0.1:9", None).unwrap();
        App::new(client)
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        app.tx
            .send(WorkerEvent::PacksLoaded(vec![
                Pack::new("a", "Arcana"),
                Pack::new("z", "Zoology"),
            ]))
            .unwrap();
        app.drain_worker_events();
        app
    }

    #[test]
    fn loaded_packs_are_sorted_and_selection_resets() {
        let mut app = loaded_app();
        assert_eq!(app.packs[0].title, "Zoology");
        assert_eq!(app.selected_pack, 0);
        assert_eq!(app.pack_value(), "");

        app.selected_pack = 2;
        assert_eq!(app.pack_value(), "a");

        // A reload rebuilds the option list and drops the selection.
        app.tx
            .send(WorkerEvent::PacksLoaded(vec![Pack::new("m", "Monsters")]))
            .unwrap();
        app.drain_worker_events();
        assert_eq!(app.selected_pack, 0);
        assert_eq!(app.packs.len(), 1);
    }

    #[test]
    fn invalid_submission_flashes_and_toasts_without_sending() {
        let mut app = test_app();
        app.submit();

        assert_eq!(app.in_flight, 0);
        assert_ne!(app.pack_flash.phase(), FlashPhase::Idle);
        assert_ne!(app.expr_flash.phase(), FlashPhase::Idle);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some(VALIDATION_TOAST)
        );
    }

    #[test]
    fn only_the_offending_field_flashes() {
        let mut app = loaded_app();
        app.selected_pack = 1;
        app.submit();

        assert_eq!(app.pack_flash.phase(), FlashPhase::Idle);
        assert_ne!(app.expr_flash.phase(), FlashPhase::Idle);
    }

    #[test]
    fn flashes_clear_on_the_next_validation() {
        let mut app = loaded_app();
        app.submit(); // both fields empty -> both flash
        app.selected_pack = 1;
        app.input = String::from("1d6");
        app.submit();
        assert_eq!(app.pack_flash.phase(), FlashPhase::Idle);
        assert_eq!(app.expr_flash.phase(), FlashPhase::Idle);
    }

    #[test]
    fn rows_keep_their_own_expression_across_interleaving() {
        let mut app = test_app();
        app.tx
            .send(WorkerEvent::EvalFinished {
                expression: "first".into(),
                outcome: EvalOutcome::Value("1".into()),
            })
            .unwrap();
        app.tx
            .send(WorkerEvent::EvalFinished {
                expression: "second".into(),
                outcome: EvalOutcome::Value("2".into()),
            })
            .unwrap();
        app.drain_worker_events();

        // Arrival order, newest first, each row with its own expression.
        assert_eq!(app.results.rows()[0].expression, "second");
        assert_eq!(app.results.rows()[0].header, "2");
        assert_eq!(app.results.rows()[1].expression, "first");
        assert_eq!(app.results.rows()[1].header, "1");
    }

    #[test]
    fn pack_failure_surfaces_as_toast() {
        let mut app = test_app();
        app.loading_packs = true;
        app.tx
            .send(WorkerEvent::PacksFailed("connection refused".into()))
            .unwrap();
        app.drain_worker_events();
        assert!(!app.loading_packs);
        let toast = app.toast.as_ref().map(|t| t.message.as_str()).unwrap();
        assert!(toast.contains("connection refused"));
    }

    #[test]
    fn toast_expires_after_its_deadline() {
        let mut app = test_app();
        app.toast = Some(Toast {
            message: "old".into(),
            expires_at: Instant::now() - Duration::from_millis(1),
        });
        app.expire_toast();
        assert!(app.toast.is_none());
    }

    #[test]
    fn flash_phases_follow_the_timing_windows() {
        let mut flash = FieldFlash::default();
        assert_eq!(flash.phase(), FlashPhase::Idle);

        flash.raise();
        let raised = flash.raised_at.unwrap();
        assert_eq!(flash.phase_at(raised), FlashPhase::Attack);
        assert_eq!(
            flash.phase_at(raised + Duration::from_millis(30)),
            FlashPhase::Hold
        );
        assert_eq!(
            flash.phase_at(raised + Duration::from_millis(60)),
            FlashPhase::Sustain
        );

        flash.clear();
        assert_eq!(flash.phase(), FlashPhase::Idle);
    }

    #[test]
    fn expression_editing_handles_multibyte_input() {
        let mut app = test_app();
        app.focus = Focus::Expression;
        for c in "dés".chars() {
            app.insert_char(c);
        }
        assert_eq!(app.input, "dés");
        app.cursor = 2; // between é and s
        app.insert_char('e');
        assert_eq!(app.input, "dées");
    }

    #[test]
    fn clear_results_shortcut_strips_all_rows() {
        let mut app = test_app();
        app.tx
            .send(WorkerEvent::EvalFinished {
                expression: "x".into(),
                outcome: EvalOutcome::Value("1".into()),
            })
            .unwrap();
        app.drain_worker_events();
        assert_eq!(app.results.len(), 1);

        app.focus = Focus::Results;
        app.handle_key_event(KeyEvent::from(KeyCode::Char('c')));
        assert!(app.results.is_empty());
        assert_eq!(app.results.header(), "Results");
    }
}
