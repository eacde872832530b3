use strum::{Display, EnumString};

use crate::events::Event;
use crate::models::Task;

/// How the list is brought back in line with the server after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Reconcile {
    /// Reload the whole list.
    #[default]
    Refetch,
    /// Patch the local list with the record the server echoed back.
    Patch,
}

/// What happens to the pending input when an insert fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum InputOnFailure {
    #[default]
    Clear,
    Retain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewPolicy {
    pub reconcile: Reconcile,
    pub input_on_add_failure: InputOnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Server order, never re-sorted locally.
    pub tasks: Vec<Task>,
    pub pending_input: String,
    /// Ticket of the newest fetch applied so far; 0 before the first one.
    pub last_fetch_ticket: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.pending_input = input.into();
        self
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

/// Fold one event into the state.
pub fn apply(mut state: ViewState, event: Event, policy: &ViewPolicy) -> ViewState {
    match event {
        Event::InputChanged(input) => {
            state.pending_input = input;
        }
        Event::TasksFetched { ticket, tasks } => {
            // Responses can land out of order; only a newer request may win.
            if ticket > state.last_fetch_ticket {
                state.tasks = tasks;
                state.last_fetch_ticket = ticket;
            }
        }
        Event::FetchFailed { .. } | Event::MutationFailed => {}
        Event::TaskAdded { ticket, task } => {
            state.pending_input.clear();
            if policy.reconcile == Reconcile::Patch {
                if let Some(task) = task {
                    upsert(&mut state.tasks, task);
                }
                mark_patched(&mut state, ticket);
            }
        }
        Event::AddFailed => {
            if policy.input_on_add_failure == InputOnFailure::Clear {
                state.pending_input.clear();
            }
        }
        Event::TaskUpdated { ticket, id, task } => {
            if policy.reconcile == Reconcile::Patch {
                match task {
                    Some(task) => upsert(&mut state.tasks, task),
                    None => state.tasks.retain(|t| t.id != id),
                }
                mark_patched(&mut state, ticket);
            }
        }
        Event::TaskDeleted { ticket, receipt } => {
            if policy.reconcile == Reconcile::Patch {
                state.tasks.retain(|t| t.id != receipt.id);
                mark_patched(&mut state, ticket);
            }
        }
    }
    state
}

pub fn apply_all(
    state: ViewState,
    events: impl IntoIterator<Item = Event>,
    policy: &ViewPolicy,
) -> ViewState {
    events
        .into_iter()
        .fold(state, |state, event| apply(state, event, policy))
}

/// A patched list is as fresh as a fetch issued at the same moment, so any
/// fetch issued earlier must lose to it.
fn mark_patched(state: &mut ViewState, ticket: u64) {
    state.last_fetch_ticket = state.last_fetch_ticket.max(ticket);
}

fn upsert(tasks: &mut Vec<Task>, task: Task) {
    match tasks.iter_mut().find(|t| t.id == task.id) {
        Some(existing) => *existing = task,
        None => tasks.push(task),
    }
}
