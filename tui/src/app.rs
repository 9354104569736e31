//! TUI application state and logic.
//!
//! The reducer in `tuido_core` owns the session state; this module owns
//! everything host-side: the terminal lifecycle, the keymap, the selection
//! cursor, and the worker threads that execute API calls. Keystrokes are
//! first translated to an `Action` by the pure `plan_key`, then applied,
//! which keeps the keymap testable without a terminal or a network.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tuido_core::{ApiCall, ApiEvent, AppState, Command, Filter, TodoClient};

use crate::event::{Event, EventHandler};
use crate::transport;
use crate::ui::{self, Terminal};
use crate::views;

/// Launch the TUI for one user's session.
pub fn run(api_url: &str, user_id: i64) -> Result<()> {
    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(250);
    let mut app = App::new(api_url, user_id, events.sender());

    // Run the main loop with panic safety so the terminal is restored
    // even if a draw or handler panics.
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, &events)));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// What a keystroke resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Feed a command to the reducer.
    Dispatch(Command),
    EnterInsert,
    LeaveInsert,
    SelectNext,
    SelectPrev,
    Quit,
}

/// Translate a keystroke into an `Action`, given the state it acts on.
///
/// Pure: reads the current mode, input text, selected todo and filter, and
/// never touches them. Unmapped keys resolve to `None`.
pub fn plan_key(
    key: KeyEvent,
    mode: InputMode,
    input: &str,
    selected: Option<i64>,
    filter: Filter,
) -> Option<Action> {
    // Ctrl+C quits from any mode.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),

            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),

            KeyCode::Char(' ') | KeyCode::Char('x') => {
                selected.map(|id| Action::Dispatch(Command::Toggle(id)))
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                selected.map(|id| Action::Dispatch(Command::Delete(id)))
            }

            KeyCode::Char('a') | KeyCode::Char('i') => Some(Action::EnterInsert),

            KeyCode::Char('h') | KeyCode::Left => {
                Some(Action::Dispatch(Command::SetFilter(filter.prev())))
            }
            KeyCode::Char('l') | KeyCode::Right => {
                Some(Action::Dispatch(Command::SetFilter(filter.next())))
            }
            KeyCode::Char('1') => Some(Action::Dispatch(Command::SetFilter(Filter::All))),
            KeyCode::Char('2') => Some(Action::Dispatch(Command::SetFilter(Filter::Active))),
            KeyCode::Char('3') => Some(Action::Dispatch(Command::SetFilter(Filter::Completed))),

            KeyCode::Char('C') => Some(Action::Dispatch(Command::ClearCompleted)),
            KeyCode::Char('r') => Some(Action::Dispatch(Command::Load)),

            _ => None,
        },
        InputMode::Insert => match key.code {
            KeyCode::Esc => Some(Action::LeaveInsert),
            // Submit keeps insert mode so several todos can be entered
            // back to back.
            KeyCode::Enter => Some(Action::Dispatch(Command::Submit)),
            KeyCode::Backspace => {
                let mut text = input.to_string();
                text.pop();
                Some(Action::Dispatch(Command::SetInput(text)))
            }
            KeyCode::Char(c) => {
                let mut text = input.to_string();
                text.push(c);
                Some(Action::Dispatch(Command::SetInput(text)))
            }
            _ => None,
        },
    }
}

/// Host-side application: the reducer state plus view concerns.
pub struct App {
    state: AppState,
    client: TodoClient,
    agent: ureq::Agent,
    events_tx: mpsc::Sender<Event>,
    mode: InputMode,
    selected: usize,
    should_quit: bool,
}

impl App {
    pub fn new(api_url: &str, user_id: i64, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            state: AppState::new(user_id),
            client: TodoClient::new(api_url),
            agent: transport::agent(),
            events_tx,
            mode: InputMode::Normal,
            selected: 0,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        // Fetch the user's todos right away; the first frames render the
        // loading placeholder until the completion arrives.
        let calls = self.state.dispatch(Command::Load);
        self.issue(calls);

        while !self.should_quit {
            terminal.draw(|frame| views::draw(frame, self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Api(event) => self.handle_api(event),
                Event::Resize(_, _) => {}
                Event::Tick => {}
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = plan_key(
            key,
            self.mode,
            self.state.input(),
            self.selected_id(),
            self.state.filter(),
        );
        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn handle_api(&mut self, event: ApiEvent) {
        self.state.complete(event);
        self.clamp_selection();
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Dispatch(command) => {
                let calls = self.state.dispatch(command);
                self.issue(calls);
                self.clamp_selection();
            }
            Action::EnterInsert => self.mode = InputMode::Insert,
            Action::LeaveInsert => self.mode = InputMode::Normal,
            Action::SelectNext => self.select_next(),
            Action::SelectPrev => self.select_prev(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Execute each call on its own worker thread; completions come back
    /// through the event channel.
    fn issue(&self, calls: Vec<ApiCall>) {
        for call in calls {
            let agent = self.agent.clone();
            let client = self.client.clone();
            let user_id = self.state.user_id();
            let tx = self.events_tx.clone();
            thread::spawn(move || {
                let event = transport::run_call(&agent, &client, user_id, call);
                let _ = tx.send(Event::Api(event));
            });
        }
    }

    fn selected_id(&self) -> Option<i64> {
        self.state.visible_todos().get(self.selected).map(|t| t.id)
    }

    fn select_next(&mut self) {
        let len = self.state.visible_todos().len();
        if len != 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn select_prev(&mut self) {
        let len = self.state.visible_todos().len();
        if len != 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Keep the cursor inside the visible list after it shrinks.
    fn clamp_selection(&mut self) {
        let len = self.state.visible_todos().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }
}
