use strum::Display;

use crate::models::{DeleteReceipt, Task, TaskId};

/// A user intent dispatched by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Refresh,
    Add(String),
    SetCompletion { id: TaskId, completed: bool },
    Delete(TaskId),
}

impl Action {
    /// Builds an `Add` from the input row. Blank input is the one thing the
    /// screen refuses to submit; the text itself is sent untouched.
    pub fn add_from_input(input: &str) -> Option<Action> {
        if input.trim().is_empty() {
            None
        } else {
            Some(Action::Add(input.to_string()))
        }
    }

    /// Flip the completion flag of a task currently on screen.
    pub fn toggle(task: &Task) -> Action {
        Action::SetCompletion {
            id: task.id,
            completed: !task.completed,
        }
    }
}

/// Something that happened, folded into the view state by [`crate::state::apply`].
#[derive(Debug, Clone, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    InputChanged(String),
    TasksFetched { ticket: u64, tasks: Vec<Task> },
    FetchFailed { ticket: u64 },
    /// `task` is `None` when the store accepted the insert without echoing
    /// the row.
    ///
    /// On mutation events `ticket` is taken when the list is patched locally
    /// and is 0 otherwise.
    TaskAdded { ticket: u64, task: Option<Task> },
    AddFailed,
    /// `task` is `None` when the update matched no row.
    TaskUpdated { ticket: u64, id: TaskId, task: Option<Task> },
    TaskDeleted { ticket: u64, receipt: DeleteReceipt },
    /// An update or delete failed; nothing changes.
    MutationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_not_submitted() {
        assert_eq!(Action::add_from_input(""), None);
        assert_eq!(Action::add_from_input("   \t"), None);
        assert_eq!(
            Action::add_from_input(" Buy milk "),
            Some(Action::Add(" Buy milk ".to_string()))
        );
    }

    #[test]
    fn test_toggle_inverts_completion() {
        let task = Task {
            id: 7,
            task: "Walk dog".to_string(),
            completed: false,
        };
        assert_eq!(
            Action::toggle(&task),
            Action::SetCompletion {
                id: 7,
                completed: true
            }
        );
    }

    #[test]
    fn test_action_display_names() {
        assert_eq!(Action::Refresh.to_string(), "refresh");
        assert_eq!(Action::Delete(3).to_string(), "delete");
        assert_eq!(
            Action::SetCompletion {
                id: 1,
                completed: true
            }
            .to_string(),
            "set_completion"
        );
    }
}
