use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todo_core::{apply_all, Action, Event, Task, ViewPolicy, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// Screen-only state wrapped around the shared [`ViewState`].
pub struct App {
    pub view: ViewState,
    pub focus: Focus,
    pub selected: usize,
    pub should_quit: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub backend: String,
    policy: ViewPolicy,
}

impl App {
    pub fn new(backend: String, policy: ViewPolicy) -> Self {
        Self {
            view: ViewState::new(),
            focus: Focus::Input,
            selected: 0,
            should_quit: false,
            last_refresh: None,
            backend,
            policy,
        }
    }

    pub fn apply(&mut self, events: Vec<Event>) {
        let before = self.view.last_fetch_ticket;
        let fetched = events
            .iter()
            .any(|e| matches!(e, Event::TasksFetched { .. }));
        self.view = apply_all(std::mem::take(&mut self.view), events, &self.policy);
        if fetched && self.view.last_fetch_ticket != before {
            self.last_refresh = Some(Local::now());
        }
        self.selected = self.selected.min(self.view.tasks.len().saturating_sub(1));
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.view.tasks.get(self.selected)
    }

    /// Map a key press to an action for the store, if any. Editing,
    /// selection and focus changes are handled here directly.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter => Action::add_from_input(&self.view.pending_input),
            KeyCode::Char(c) => {
                let mut input = self.view.pending_input.clone();
                input.push(c);
                self.apply(vec![Event::InputChanged(input)]);
                None
            }
            KeyCode::Backspace => {
                let mut input = self.view.pending_input.clone();
                input.pop();
                self.apply(vec![Event::InputChanged(input)]);
                None
            }
            KeyCode::Down => {
                self.focus = Focus::List;
                None
            }
            _ => None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == 0 {
                    self.focus = Focus::Input;
                } else {
                    self.selected -= 1;
                }
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.view.tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.selected_task().map(Action::toggle),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.selected_task().map(|t| Action::Delete(t.id))
            }
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('i') | KeyCode::Char('a') => {
                self.focus = Focus::Input;
                None
            }
            _ => None,
        }
    }
}
