//! Application state and the command/completion reducer.
//!
//! # Design
//! All session state lives in one `AppState` owned by the host. The host
//! drives it through exactly two entry points: `dispatch` takes a user
//! intent (`Command`), mutates the state, and returns the `ApiCall` effects
//! the host must execute; `complete` takes an `ApiEvent` once a call has
//! finished and folds the result back in. Neither entry point performs I/O,
//! so every transition is testable with plain function calls.
//!
//! Local mutation is confirmation-driven: apart from the loading flag and
//! the input text, the todo collection changes only in completion handlers,
//! after the server has acknowledged the operation. In-flight calls are
//! never cancelled and are uncoordinated, with one exception: list requests
//! carry a sequence stamp so that a completion from a superseded load can
//! be recognized and discarded.

use std::fmt;

use crate::error::ApiError;
use crate::types::{NewTodo, Todo};

/// Display filter over the todo collection.
///
/// View state only: filtering recomputes from the full collection on every
/// render and never mutates what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Completed,
}

impl Filter {
    /// Every filter, in display order.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn next(&self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn prev(&self) -> Filter {
        match self {
            Filter::All => Filter::Completed,
            Filter::Active => Filter::All,
            Filter::Completed => Filter::Active,
        }
    }
}

/// User-visible error banner.
///
/// At most one banner is shown at a time. A banner is cleared when the same
/// category of operation next succeeds; there is no dismiss interaction.
/// `UpdateFailed` completes the set but is never raised: a failed toggle is
/// dropped without notice (see `AppState::complete`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    LoadFailed,
    AddFailed,
    DeleteFailed,
    UpdateFailed,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Banner::LoadFailed => "Unable to load todos",
            Banner::AddFailed => "Unable to add a todo",
            Banner::DeleteFailed => "Unable to delete a todo",
            Banner::UpdateFailed => "Unable to update a todo",
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A user intent, fed to `AppState::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the todo collection from the server.
    Load,
    /// Replace the input text (controlled-input style).
    SetInput(String),
    /// Submit the current input as a new todo.
    Submit,
    /// Flip the completed flag of the todo with this id.
    Toggle(i64),
    /// Delete the todo with this id.
    Delete(i64),
    /// Change the display filter.
    SetFilter(Filter),
    /// Drop every completed todo from the local collection.
    ClearCompleted,
}

/// A side effect the host must execute: build the request via `TodoClient`,
/// run the round-trip, parse, and feed the outcome back as an `ApiEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List { seq: u64 },
    Create { draft: NewTodo },
    Update { todo: Todo },
    Delete { id: i64 },
}

/// The outcome of an executed `ApiCall`, fed to `AppState::complete`.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded {
        seq: u64,
        result: Result<Vec<Todo>, ApiError>,
    },
    Created {
        result: Result<Todo, ApiError>,
    },
    Updated {
        id: i64,
        result: Result<Todo, ApiError>,
    },
    Deleted {
        id: i64,
        result: Result<(), ApiError>,
    },
}

/// The whole application state for one user's session.
#[derive(Debug)]
pub struct AppState {
    user_id: i64,
    todos: Vec<Todo>,
    input: String,
    filter: Filter,
    loading: bool,
    banner: Option<Banner>,
    load_seq: u64,
}

impl AppState {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            todos: Vec::new(),
            input: String::new(),
            filter: Filter::All,
            loading: false,
            banner: None,
            load_seq: 0,
        }
    }

    /// Apply a user intent and return the API calls it requires.
    ///
    /// The returned calls must each be executed exactly once and their
    /// outcomes fed back through `complete`.
    pub fn dispatch(&mut self, command: Command) -> Vec<ApiCall> {
        match command {
            Command::Load => {
                // The stamp ties the eventual completion to this load; any
                // earlier in-flight list response becomes stale.
                self.loading = true;
                self.load_seq += 1;
                vec![ApiCall::List { seq: self.load_seq }]
            }
            Command::SetInput(text) => {
                self.input = text;
                Vec::new()
            }
            Command::Submit => {
                if self.input.trim().is_empty() {
                    return Vec::new();
                }
                // Trimming is only the emptiness check; the title goes out
                // untrimmed. The input is cleared when the create succeeds,
                // and nothing stops a second submit before then.
                let draft = NewTodo {
                    user_id: self.user_id,
                    title: self.input.clone(),
                    completed: false,
                };
                vec![ApiCall::Create { draft }]
            }
            Command::Toggle(id) => {
                let todo = match self.todos.iter().find(|t| t.id == id) {
                    Some(todo) => todo,
                    None => return Vec::new(),
                };
                let mut flipped = todo.clone();
                flipped.completed = !flipped.completed;
                // The local flag stays as-is until the server confirms.
                vec![ApiCall::Update { todo: flipped }]
            }
            Command::Delete(id) => vec![ApiCall::Delete { id }],
            Command::SetFilter(filter) => {
                self.filter = filter;
                Vec::new()
            }
            Command::ClearCompleted => {
                // Local removal only: the server copies stay, and the next
                // load brings them back.
                self.todos.retain(|t| !t.completed);
                Vec::new()
            }
        }
    }

    /// Fold a request completion back into the state. Never issues calls.
    pub fn complete(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded { seq, result } => {
                if seq != self.load_seq {
                    return;
                }
                match result {
                    Ok(todos) => {
                        self.todos = todos;
                        self.loading = false;
                        self.clear_banner(Banner::LoadFailed);
                    }
                    // `loading` stays set on failure; dispatching a fresh
                    // `Load` is the way out.
                    Err(_) => self.banner = Some(Banner::LoadFailed),
                }
            }
            ApiEvent::Created { result } => match result {
                Ok(todo) => {
                    self.todos.push(todo);
                    self.input.clear();
                    self.clear_banner(Banner::AddFailed);
                }
                Err(_) => self.banner = Some(Banner::AddFailed),
            },
            ApiEvent::Updated { id, result } => {
                // A failed update is dropped without a banner; a todo that
                // vanished locally in the meantime is left vanished.
                if let Ok(updated) = result {
                    if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                        *slot = updated;
                    }
                }
            }
            ApiEvent::Deleted { id, result } => match result {
                Ok(()) => {
                    self.todos.retain(|t| t.id != id);
                    self.clear_banner(Banner::DeleteFailed);
                }
                Err(_) => self.banner = Some(Banner::DeleteFailed),
            },
        }
    }

    fn clear_banner(&mut self, category: Banner) {
        if self.banner == Some(category) {
            self.banner = None;
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// The todos passing the active filter, recomputed on every call.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// The count shown in the footer: the full collection size, regardless
    /// of completion state or the active filter.
    pub fn items_left(&self) -> usize {
        self.todos.len()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn banner(&self) -> Option<Banner> {
        self.banner
    }

    /// The footer renders only while the collection is non-empty.
    pub fn show_footer(&self) -> bool {
        !self.todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: i64 = 10682;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            user_id: USER,
            title: title.to_string(),
            completed,
        }
    }

    /// Dispatch `Load` and return the stamp of the emitted list call.
    fn start_load(state: &mut AppState) -> u64 {
        let calls = state.dispatch(Command::Load);
        match calls.as_slice() {
            [ApiCall::List { seq }] => *seq,
            other => panic!("expected a single list call, got {other:?}"),
        }
    }

    /// A state that has successfully loaded the given todos.
    fn loaded_state(todos: Vec<Todo>) -> AppState {
        let mut state = AppState::new(USER);
        let seq = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq,
            result: Ok(todos),
        });
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = AppState::new(USER);
        assert_eq!(state.user_id(), USER);
        assert!(state.todos().is_empty());
        assert_eq!(state.input(), "");
        assert_eq!(state.filter(), Filter::All);
        assert!(!state.is_loading());
        assert!(state.banner().is_none());
        assert!(!state.show_footer());
    }

    #[test]
    fn load_sets_loading_and_stamps_the_call() {
        let mut state = AppState::new(USER);
        assert_eq!(start_load(&mut state), 1);
        assert!(state.is_loading());
        assert_eq!(start_load(&mut state), 2);
    }

    #[test]
    fn loaded_success_replaces_the_collection() {
        let state = loaded_state(vec![todo(1, "A", false), todo(2, "B", true)]);
        assert_eq!(state.todos().len(), 2);
        assert!(!state.is_loading());
        assert!(state.show_footer());
    }

    #[test]
    fn loaded_failure_sets_banner_and_keeps_loading() {
        let mut state = AppState::new(USER);
        let seq = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq,
            result: Err(ApiError::Transport("connection refused".to_string())),
        });
        assert_eq!(state.banner(), Some(Banner::LoadFailed));
        assert!(state.is_loading());
    }

    #[test]
    fn reload_success_clears_banner_and_loading() {
        let mut state = AppState::new(USER);
        let seq = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq,
            result: Err(ApiError::Transport("connection refused".to_string())),
        });
        let seq = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq,
            result: Ok(vec![todo(1, "A", false)]),
        });
        assert!(state.banner().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.todos().len(), 1);
    }

    #[test]
    fn stale_loaded_success_is_discarded() {
        let mut state = AppState::new(USER);
        let first = start_load(&mut state);
        let second = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq: first,
            result: Ok(vec![todo(1, "stale", false)]),
        });
        assert!(state.todos().is_empty());
        assert!(state.is_loading());
        state.complete(ApiEvent::Loaded {
            seq: second,
            result: Ok(vec![todo(2, "fresh", false)]),
        });
        assert_eq!(state.todos().len(), 1);
        assert_eq!(state.todos()[0].id, 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_loaded_failure_is_discarded() {
        let mut state = AppState::new(USER);
        let first = start_load(&mut state);
        let _second = start_load(&mut state);
        state.complete(ApiEvent::Loaded {
            seq: first,
            result: Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        });
        assert!(state.banner().is_none());
    }

    #[test]
    fn set_input_replaces_text() {
        let mut state = AppState::new(USER);
        let calls = state.dispatch(Command::SetInput("Buy milk".to_string()));
        assert!(calls.is_empty());
        assert_eq!(state.input(), "Buy milk");
    }

    #[test]
    fn submit_with_empty_input_is_noop() {
        let mut state = AppState::new(USER);
        assert!(state.dispatch(Command::Submit).is_empty());
    }

    #[test]
    fn submit_with_whitespace_input_is_noop() {
        let mut state = AppState::new(USER);
        state.dispatch(Command::SetInput("   ".to_string()));
        assert!(state.dispatch(Command::Submit).is_empty());
        assert_eq!(state.input(), "   ");
    }

    #[test]
    fn submit_sends_untrimmed_title_and_keeps_input() {
        let mut state = AppState::new(USER);
        state.dispatch(Command::SetInput("  Buy milk  ".to_string()));
        let calls = state.dispatch(Command::Submit);
        match calls.as_slice() {
            [ApiCall::Create { draft }] => {
                assert_eq!(draft.user_id, USER);
                assert_eq!(draft.title, "  Buy milk  ");
                assert!(!draft.completed);
            }
            other => panic!("expected a single create call, got {other:?}"),
        }
        assert_eq!(state.input(), "  Buy milk  ");
    }

    #[test]
    fn submit_twice_sends_two_creates() {
        let mut state = AppState::new(USER);
        state.dispatch(Command::SetInput("Buy milk".to_string()));
        assert_eq!(state.dispatch(Command::Submit).len(), 1);
        assert_eq!(state.dispatch(Command::Submit).len(), 1);
    }

    #[test]
    fn created_success_appends_and_clears_input() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        state.dispatch(Command::SetInput("Buy milk".to_string()));
        state.dispatch(Command::Submit);
        state.complete(ApiEvent::Created {
            result: Ok(todo(2, "Buy milk", false)),
        });
        assert_eq!(state.todos().len(), 2);
        assert_eq!(state.todos()[1].id, 2);
        assert_eq!(state.input(), "");
    }

    #[test]
    fn created_failure_sets_banner_and_keeps_input() {
        let mut state = AppState::new(USER);
        state.dispatch(Command::SetInput("Buy milk".to_string()));
        state.dispatch(Command::Submit);
        state.complete(ApiEvent::Created {
            result: Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        });
        assert_eq!(state.banner(), Some(Banner::AddFailed));
        assert_eq!(state.input(), "Buy milk");
        assert!(state.todos().is_empty());
    }

    #[test]
    fn created_success_clears_add_banner() {
        let mut state = AppState::new(USER);
        state.complete(ApiEvent::Created {
            result: Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        });
        assert_eq!(state.banner(), Some(Banner::AddFailed));
        state.complete(ApiEvent::Created {
            result: Ok(todo(1, "A", false)),
        });
        assert!(state.banner().is_none());
    }

    #[test]
    fn success_leaves_other_categories_banner_in_place() {
        let mut state = AppState::new(USER);
        state.complete(ApiEvent::Deleted {
            id: 1,
            result: Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        });
        assert_eq!(state.banner(), Some(Banner::DeleteFailed));
        state.complete(ApiEvent::Created {
            result: Ok(todo(1, "A", false)),
        });
        assert_eq!(state.banner(), Some(Banner::DeleteFailed));
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        assert!(state.dispatch(Command::Toggle(99)).is_empty());
    }

    #[test]
    fn toggle_emits_update_with_flipped_flag() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        let calls = state.dispatch(Command::Toggle(1));
        match calls.as_slice() {
            [ApiCall::Update { todo }] => {
                assert_eq!(todo.id, 1);
                assert!(todo.completed);
            }
            other => panic!("expected a single update call, got {other:?}"),
        }
        // Unconfirmed, so the stored flag is untouched.
        assert!(!state.todos()[0].completed);
    }

    #[test]
    fn updated_success_replaces_matching_todo() {
        let mut state = loaded_state(vec![todo(1, "A", false), todo(2, "B", false)]);
        state.complete(ApiEvent::Updated {
            id: 1,
            result: Ok(todo(1, "A", true)),
        });
        assert!(state.todos()[0].completed);
        assert!(!state.todos()[1].completed);
    }

    #[test]
    fn updated_failure_changes_nothing() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        state.complete(ApiEvent::Updated {
            id: 1,
            result: Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        });
        assert!(!state.todos()[0].completed);
        assert!(state.banner().is_none());
    }

    #[test]
    fn updated_success_for_vanished_todo_is_noop() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        state.complete(ApiEvent::Updated {
            id: 2,
            result: Ok(todo(2, "B", true)),
        });
        assert_eq!(state.todos().len(), 1);
        assert_eq!(state.todos()[0].id, 1);
    }

    #[test]
    fn delete_emits_call_unconditionally() {
        let mut state = AppState::new(USER);
        let calls = state.dispatch(Command::Delete(99));
        assert_eq!(calls, vec![ApiCall::Delete { id: 99 }]);
    }

    #[test]
    fn deleted_success_removes_exactly_the_matching_todo() {
        let mut state = loaded_state(vec![todo(1, "A", false), todo(2, "B", true)]);
        state.complete(ApiEvent::Deleted {
            id: 1,
            result: Ok(()),
        });
        assert_eq!(state.todos().len(), 1);
        assert_eq!(state.todos()[0].id, 2);
    }

    #[test]
    fn deleted_failure_sets_banner() {
        let mut state = loaded_state(vec![todo(1, "A", false)]);
        state.complete(ApiEvent::Deleted {
            id: 1,
            result: Err(ApiError::NotFound),
        });
        assert_eq!(state.banner(), Some(Banner::DeleteFailed));
        assert_eq!(state.todos().len(), 1);
    }

    #[test]
    fn deleted_success_clears_delete_banner() {
        let mut state = loaded_state(vec![todo(1, "A", false), todo(2, "B", false)]);
        state.complete(ApiEvent::Deleted {
            id: 1,
            result: Err(ApiError::NotFound),
        });
        state.complete(ApiEvent::Deleted {
            id: 2,
            result: Ok(()),
        });
        assert!(state.banner().is_none());
    }

    #[test]
    fn set_filter_replaces_filter() {
        let mut state = AppState::new(USER);
        assert!(state.dispatch(Command::SetFilter(Filter::Active)).is_empty());
        assert_eq!(state.filter(), Filter::Active);
    }

    #[test]
    fn visible_todos_applies_the_filter() {
        let mut state = loaded_state(vec![
            todo(1, "A", false),
            todo(2, "B", true),
            todo(3, "C", false),
        ]);
        assert_eq!(state.visible_todos().len(), 3);
        state.dispatch(Command::SetFilter(Filter::Active));
        let ids: Vec<i64> = state.visible_todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        state.dispatch(Command::SetFilter(Filter::Completed));
        let ids: Vec<i64> = state.visible_todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn clear_completed_removes_only_completed_and_emits_nothing() {
        let mut state = loaded_state(vec![
            todo(1, "A", false),
            todo(2, "B", true),
            todo(3, "C", true),
        ]);
        let calls = state.dispatch(Command::ClearCompleted);
        assert!(calls.is_empty());
        let ids: Vec<i64> = state.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn footer_counts_the_full_collection() {
        let mut state = loaded_state(vec![todo(1, "A", false), todo(2, "B", true)]);
        state.dispatch(Command::SetFilter(Filter::Completed));
        let ids: Vec<i64> = state.visible_todos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(state.items_left(), 2);
        assert!(state.show_footer());
    }

    #[test]
    fn filter_cycles_in_display_order() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Active.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
        assert_eq!(Filter::All.prev(), Filter::Completed);
        assert_eq!(Filter::Active.prev(), Filter::All);
        assert_eq!(Filter::Completed.prev(), Filter::Active);
    }

    #[test]
    fn banner_messages() {
        assert_eq!(Banner::LoadFailed.message(), "Unable to load todos");
        assert_eq!(Banner::AddFailed.message(), "Unable to add a todo");
        assert_eq!(Banner::DeleteFailed.message(), "Unable to delete a todo");
        assert_eq!(Banner::UpdateFailed.to_string(), "Unable to update a todo");
    }
}
