use todo_core::{
    apply_all, Action, Event, FetchSequencer, Reconcile, TaskError, TaskId, ViewPolicy, ViewState,
};

use crate::service::TaskService;

/// Turns user actions into view-state events. Failures are logged here and
/// come back as no-op events.
#[derive(Clone)]
pub struct TaskController {
    service: TaskService,
    sequencer: FetchSequencer,
    policy: ViewPolicy,
}

impl TaskController {
    pub fn new(service: TaskService, policy: ViewPolicy) -> Self {
        Self {
            service,
            sequencer: FetchSequencer::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &ViewPolicy {
        &self.policy
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }

    /// Run an action against the store and report what happened, in order.
    pub async fn perform(&self, action: Action) -> Vec<Event> {
        tracing::debug!(%action, "performing action");
        match action {
            Action::Refresh => vec![self.refresh().await],
            Action::Add(text) => self.add(&text).await,
            Action::SetCompletion { id, completed } => self.set_completion(id, completed).await,
            Action::Delete(id) => self.delete(id).await,
        }
    }

    /// [`perform`](Self::perform) and fold the events into `state`.
    pub async fn run(&self, state: ViewState, action: Action) -> ViewState {
        let events = self.perform(action).await;
        apply_all(state, events, &self.policy)
    }

    /// Initial load of a fresh screen.
    pub async fn mount(&self) -> ViewState {
        self.run(ViewState::new(), Action::Refresh).await
    }

    async fn refresh(&self) -> Event {
        let ticket = self.sequencer.issue();
        match self.service.list_tasks().await {
            Ok(tasks) => Event::TasksFetched { ticket, tasks },
            Err(err) => {
                log_failure(&err);
                Event::FetchFailed { ticket }
            }
        }
    }

    async fn add(&self, text: &str) -> Vec<Event> {
        match self.service.add_task(text).await {
            Ok(task) => {
                // Without an echoed row there is nothing to patch with.
                let reload = self.policy.reconcile == Reconcile::Refetch || task.is_none();
                let ticket = self.patch_ticket();
                self.then_reload(Event::TaskAdded { ticket, task }, reload).await
            }
            Err(err) => {
                log_failure(&err);
                vec![Event::AddFailed]
            }
        }
    }

    async fn set_completion(&self, id: TaskId, completed: bool) -> Vec<Event> {
        match self.service.set_completion(id, completed).await {
            Ok(task) => {
                let reload = self.policy.reconcile == Reconcile::Refetch;
                let ticket = self.patch_ticket();
                self.then_reload(Event::TaskUpdated { ticket, id, task }, reload).await
            }
            Err(err) => {
                log_failure(&err);
                vec![Event::MutationFailed]
            }
        }
    }

    async fn delete(&self, id: TaskId) -> Vec<Event> {
        match self.service.delete_task(id).await {
            Ok(receipt) => {
                let reload = self.policy.reconcile == Reconcile::Refetch;
                let ticket = self.patch_ticket();
                self.then_reload(Event::TaskDeleted { ticket, receipt }, reload).await
            }
            Err(err) => {
                log_failure(&err);
                vec![Event::MutationFailed]
            }
        }
    }

    /// Taken once the mutation has answered, so fetches issued before that
    /// point cannot overwrite the patched list.
    fn patch_ticket(&self) -> u64 {
        match self.policy.reconcile {
            Reconcile::Patch => self.sequencer.issue(),
            Reconcile::Refetch => 0,
        }
    }

    async fn then_reload(&self, event: Event, reload: bool) -> Vec<Event> {
        let mut events = vec![event];
        if reload {
            events.push(self.refresh().await);
        }
        events
    }
}

fn log_failure(err: &TaskError) {
    tracing::error!(operation = err.operation(), error = %err, "task request failed");
}
