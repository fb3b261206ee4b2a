//! Main TUI application state and logic

use crate::playback::{clamp_speed, MAX_SPEED, MIN_SPEED};
use crate::registry::{registry, AlgorithmDescriptor, InputMap};
use crate::session::{Action, Session};
use crate::trace::value::Value;
use crate::ui::panes::problems::{sidebar_rows, Expanded, SidebarRow, DEFAULT_EXPANDED};
use crate::ui::panes::{self, inputs::editable_text, InputEdit, SourceScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Upper bound on how long the loop blocks waiting for a key
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Space presses closer together than this are key repeat
const SPACE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Multiplier applied by `[` and `]`
const SPEED_STEP: f64 = 1.5;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Problems,
    Source,
    Inputs,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: problems -> source -> inputs)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Problems => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Inputs,
            FocusedPane::Inputs => FocusedPane::Problems,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Problems => FocusedPane::Inputs,
            FocusedPane::Source => FocusedPane::Problems,
            FocusedPane::Inputs => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The current session revision
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into the visible sidebar rows
    pub problem_cursor: usize,

    /// Sidebar categories currently expanded
    pub expanded: Expanded,

    /// Index into the current problem's inputs
    pub input_cursor: usize,

    /// Open input editor, if any
    pub input_edit: Option<InputEdit>,

    pub source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session) -> Self {
        let selected = session.descriptor().id;
        let mut expanded: Expanded = DEFAULT_EXPANDED.into_iter().collect();
        expanded.extend(registry().category_of(selected).map(|c| c.id));
        let problem_cursor = sidebar_rows(registry(), &expanded)
            .iter()
            .position(|row| matches!(row, SidebarRow::Problem(p) if p.id == selected))
            .unwrap_or(0);

        let status_message = if session.trace().is_empty() {
            String::from("Inputs do not fit this problem")
        } else {
            String::from("Ready!")
        };

        App {
            session,
            focused_pane: FocusedPane::Problems,
            problem_cursor,
            expanded,
            input_cursor: 0,
            input_edit: None,
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Wake up in time for the autoplay deadline
            let timeout = self
                .session
                .playback()
                .next_deadline()
                .map(|due| due.saturating_duration_since(Instant::now()))
                .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            self.tick();
        }

        Ok(())
    }

    /// Let a due autoplay timer advance the cursor
    pub fn tick(&mut self) {
        if self.session.playback().next_deadline().is_none() {
            return;
        }
        let was_playing = self.session.playback().is_playing();
        self.dispatch(Action::Tick);
        if was_playing && !self.session.playback().is_playing() {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Replace the session with the revision produced by `action`
    pub fn dispatch(&mut self, action: Action) {
        self.session = self.session.apply(action, Instant::now());
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Sidebar | listing + explanation | visualizers + inputs
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Percentage(40),
                Constraint::Min(0),
            ])
            .split(main_chunks[0]);

        let middle_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[1]);

        let input_height = self.session.inputs().len() as u16 + 2;
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(input_height)])
            .split(columns[2]);

        let descriptor = self.session.descriptor();
        let entry = self.session.current();

        panes::render_problems_pane(
            frame,
            columns[0],
            registry(),
            &self.expanded,
            self.problem_cursor,
            descriptor.id,
            self.focused_pane == FocusedPane::Problems,
        );

        panes::render_source_pane(
            frame,
            middle_rows[0],
            descriptor.title,
            descriptor.code,
            entry.map_or(0, |e| e.line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_explanation_pane(frame, middle_rows[1], entry);

        panes::render_visualizer_pane(frame, right_rows[0], &descriptor.visual, entry);

        panes::render_inputs_pane(
            frame,
            right_rows[1],
            self.session.inputs(),
            self.input_cursor,
            self.input_edit.as_ref(),
            self.focused_pane == FocusedPane::Inputs,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.session.playback(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_edit.is_some() {
            self.handle_edit_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.dispatch(Action::StepBackward);
                self.status_message = if self.session.playback().is_at_start() {
                    "At first step".to_string()
                } else {
                    "Stepped backward".to_string()
                };
            }
            KeyCode::Right => {
                self.dispatch(Action::StepForward);
                self.status_message = if self.session.playback().is_at_end() {
                    "At last step".to_string()
                } else {
                    "Stepped forward".to_string()
                };
            }
            KeyCode::Backspace => {
                self.dispatch(Action::Reset);
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (with debounce to absorb key repeat)
                if self.last_space_press.elapsed() >= SPACE_DEBOUNCE {
                    self.last_space_press = Instant::now();
                    self.dispatch(Action::TogglePlay);
                    self.status_message = if self.session.playback().is_playing() {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Char('[') => self.change_speed(SPEED_STEP),
            KeyCode::Char(']') => self.change_speed(1.0 / SPEED_STEP),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => match self.focused_pane {
                FocusedPane::Problems => self.activate_sidebar_row(),
                FocusedPane::Inputs => self.open_editor(),
                FocusedPane::Source => {}
            },
            KeyCode::Char('+') | KeyCode::Char('=') if self.focused_pane == FocusedPane::Inputs => {
                self.bump_input(1);
            }
            KeyCode::Char('-') if self.focused_pane == FocusedPane::Inputs => {
                self.bump_input(-1);
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Problems => {
                let count = sidebar_rows(registry(), &self.expanded).len();
                self.problem_cursor = step_index(self.problem_cursor, delta, count);
            }
            FocusedPane::Inputs => {
                let count = self.session.inputs().len();
                self.input_cursor = step_index(self.input_cursor, delta, count);
            }
            FocusedPane::Source => {
                // Scrolling up makes the current line move down visually
                if let Some(row) = self.source_scroll.target_line_row {
                    self.source_scroll.target_line_row = Some(if delta < 0 {
                        row.saturating_add(1)
                    } else {
                        row.saturating_sub(1)
                    });
                }
            }
        }
    }

    fn change_speed(&mut self, factor: f64) {
        let current = self.session.playback().speed();
        let speed = clamp_speed(current.mul_f64(factor));
        self.dispatch(Action::SetSpeed(speed));
        self.status_message = match speed {
            s if s == MIN_SPEED => format!("Fastest speed ({}ms)", s.as_millis()),
            s if s == MAX_SPEED => format!("Slowest speed ({}ms)", s.as_millis()),
            s => format!("Speed {}ms per step", s.as_millis()),
        };
    }

    /// Enter on the sidebar: toggle a category or load a problem
    fn activate_sidebar_row(&mut self) {
        let row = sidebar_rows(registry(), &self.expanded)
            .get(self.problem_cursor)
            .copied();
        match row {
            Some(SidebarRow::Category(category)) => {
                // rows above a header never change, so the cursor stays on it
                if !self.expanded.remove(category.id) {
                    self.expanded.insert(category.id);
                }
            }
            Some(SidebarRow::Problem(descriptor)) => self.select_problem(descriptor),
            None => {}
        }
    }

    fn select_problem(&mut self, descriptor: &'static AlgorithmDescriptor) {
        if descriptor.id == self.session.descriptor().id {
            return;
        }
        info!(problem = descriptor.id, "switching problem");
        self.dispatch(Action::SelectProblem(descriptor));
        self.input_cursor = 0;
        self.source_scroll = SourceScrollState::default();
        self.status_message = format!("Loaded {}", descriptor.title);
    }

    fn selected_input(&self) -> Option<(String, Value)> {
        self.session
            .inputs()
            .iter()
            .nth(self.input_cursor)
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    fn bump_input(&mut self, delta: i64) {
        let Some((key, value)) = self.selected_input() else {
            return;
        };
        let Some(n) = value.as_number() else {
            self.status_message = format!("{} is not a number; press Enter to edit", key);
            return;
        };
        self.set_input(key, Value::Number(n.saturating_add(delta)));
    }

    fn open_editor(&mut self) {
        if let Some((key, value)) = self.selected_input() {
            self.input_edit = Some(InputEdit {
                buffer: editable_text(&value),
                key,
            });
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = self.input_edit.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.input_edit = None;
                self.status_message = "Edit cancelled".to_string();
            }
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            KeyCode::Char(c) => edit.buffer.push(c),
            KeyCode::Enter => {
                if let Some(edit) = self.input_edit.take() {
                    self.commit_edit(edit);
                }
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self, edit: InputEdit) {
        let Some(kind) = self.session.inputs().get(&edit.key).map(Value::kind) else {
            return;
        };
        match Value::parse(&edit.buffer, kind) {
            Ok(value) => self.set_input(edit.key, value),
            Err(e) => {
                debug!(error = %e, "rejected input edit");
                self.status_message = e.to_string();
                // keep the editor open so the text can be fixed
                self.input_edit = Some(edit);
            }
        }
    }

    fn set_input(&mut self, key: String, value: Value) {
        let shown = value.to_string();
        let label = key.clone();
        self.dispatch(Action::SetInput { key, value });
        self.status_message = if self.session.trace().is_empty() {
            format!("{} = {} does not fit this problem", label, shown)
        } else {
            format!("{} = {} ({} steps)", label, shown, self.session.trace().len())
        };
    }

    /// Inputs currently in effect
    pub fn inputs(&self) -> &InputMap {
        self.session.inputs()
    }
}

/// Move `index` by `delta` within `0..count`, wrapping at both ends
fn step_index(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(count as isize) as usize
}
