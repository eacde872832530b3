mod common;

use std::sync::Arc;

use common::{controller_with, task};
use todo_client::memory::StoreOp;
use todo_client::MemoryTaskStore;
use todo_core::{Action, InputOnFailure, Reconcile, StoreError, ViewPolicy, ViewState};

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[tokio::test]
async fn test_mount_fetches_once() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Buy milk", false)]));
    let controller = controller_with(&store, ViewPolicy::default());

    let state = controller.mount().await;

    assert_eq!(state.tasks, vec![task(1, "Buy milk", false)]);
    assert!(state.pending_input.is_empty());
    assert_eq!(store.calls(StoreOp::Select), 1);
}

#[tokio::test]
async fn test_buy_milk_lifecycle() {
    let store = Arc::new(MemoryTaskStore::new());
    let controller = controller_with(&store, ViewPolicy::default());
    let state = controller.mount().await;
    assert!(state.tasks.is_empty());

    // Add
    let state = controller
        .run(state.with_input("Buy milk"), Action::Add("Buy milk".to_string()))
        .await;
    assert_eq!(state.tasks, vec![task(1, "Buy milk", false)]);
    assert!(state.pending_input.is_empty());

    // Complete
    let state = controller
        .run(state, Action::SetCompletion { id: 1, completed: true })
        .await;
    assert_eq!(state.tasks, vec![task(1, "Buy milk", true)]);

    // Delete
    let state = controller.run(state, Action::Delete(1)).await;
    assert!(state.tasks.is_empty());

    // mount + one reload per mutation
    assert_eq!(store.calls(StoreOp::Select), 4);
}

#[tokio::test]
async fn test_each_successful_mutation_reloads_exactly_once() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Walk dog", false)]));
    let controller = controller_with(&store, ViewPolicy::default());
    let state = controller.mount().await;

    for action in [
        Action::Add("Buy milk".to_string()),
        Action::SetCompletion { id: 1, completed: true },
        Action::Delete(2),
    ] {
        let before = store.calls(StoreOp::Select);
        controller.run(state.clone(), action).await;
        assert_eq!(store.calls(StoreOp::Select), before + 1);
    }
}

#[tokio::test]
async fn test_failed_add_clears_input_and_skips_reload() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Walk dog", false)]));
    let controller = controller_with(&store, ViewPolicy::default());
    let state = controller.mount().await.with_input("Buy milk");

    store.fail_next(StoreOp::Insert, unavailable());
    let after = controller
        .run(state.clone(), Action::Add("Buy milk".to_string()))
        .await;

    assert!(after.pending_input.is_empty());
    assert_eq!(after.tasks, state.tasks);
    assert_eq!(store.calls(StoreOp::Select), 1);
}

#[tokio::test]
async fn test_failed_add_can_keep_input_for_retry() {
    let store = Arc::new(MemoryTaskStore::new());
    let policy = ViewPolicy {
        input_on_add_failure: InputOnFailure::Retain,
        ..ViewPolicy::default()
    };
    let controller = controller_with(&store, policy);

    store.fail_next(StoreOp::Insert, unavailable());
    let state = controller
        .run(
            ViewState::new().with_input("Buy milk"),
            Action::Add("Buy milk".to_string()),
        )
        .await;
    assert_eq!(state.pending_input, "Buy milk");

    let state = controller.run(state, Action::Add("Buy milk".to_string())).await;
    assert!(state.pending_input.is_empty());
    assert_eq!(state.tasks, vec![task(1, "Buy milk", false)]);
}

#[tokio::test]
async fn test_failed_update_and_delete_preserve_state() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Buy milk", false)]));
    let controller = controller_with(&store, ViewPolicy::default());
    let state = controller.mount().await.with_input("draft");

    store.fail_next(StoreOp::Update, unavailable());
    let after_update = controller
        .run(state.clone(), Action::SetCompletion { id: 1, completed: true })
        .await;
    assert_eq!(after_update, state);

    store.fail_next(StoreOp::Delete, unavailable());
    let after_delete = controller.run(state.clone(), Action::Delete(1)).await;
    assert_eq!(after_delete, state);

    assert_eq!(store.calls(StoreOp::Select), 1);
    assert_eq!(store.snapshot(), vec![task(1, "Buy milk", false)]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_stale_list() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Buy milk", false)]));
    let controller = controller_with(&store, ViewPolicy::default());
    let state = controller.mount().await;

    store.fail_next(StoreOp::Select, unavailable());
    let after = controller.run(state.clone(), Action::Refresh).await;

    assert_eq!(after.tasks, state.tasks);
}

#[tokio::test]
async fn test_add_then_list_round_trip() {
    let store = Arc::new(MemoryTaskStore::new());
    let controller = controller_with(&store, ViewPolicy::default());

    let added = controller.service().add_task("Água e pão").await.unwrap();
    let listed = controller.service().list_tasks().await.unwrap();

    let added = added.expect("memory store echoes inserted rows");
    assert_eq!(added.task, "Água e pão");
    assert!(!added.completed);
    assert!(listed.contains(&added));
}

#[tokio::test]
async fn test_deleting_twice_is_not_an_error() {
    let store = Arc::new(MemoryTaskStore::with_tasks([("Buy milk", false)]));
    let controller = controller_with(&store, ViewPolicy::default());

    let first = controller.service().delete_task(1).await.unwrap();
    let second = controller.service().delete_task(1).await.unwrap();

    assert_eq!(first.affected, 1);
    assert_eq!(second.affected, 0);
}

#[tokio::test]
async fn test_update_of_missing_id_matches_nothing() {
    let store = Arc::new(MemoryTaskStore::new());
    let controller = controller_with(&store, ViewPolicy::default());

    let updated = controller.service().set_completion(42, true).await.unwrap();
    assert_eq!(updated, None);
}

#[tokio::test]
async fn test_patch_mode_never_reloads() {
    let store = Arc::new(MemoryTaskStore::new());
    let policy = ViewPolicy {
        reconcile: Reconcile::Patch,
        ..ViewPolicy::default()
    };
    let controller = controller_with(&store, policy);
    let state = controller.mount().await;

    let state = controller
        .run(state.with_input("Buy milk"), Action::Add("Buy milk".to_string()))
        .await;
    let state = controller.run(state, Action::Add("Walk dog".to_string())).await;
    let state = controller
        .run(state, Action::SetCompletion { id: 2, completed: true })
        .await;
    assert_eq!(
        state.tasks,
        vec![task(1, "Buy milk", false), task(2, "Walk dog", true)]
    );
    assert!(state.pending_input.is_empty());

    let state = controller.run(state, Action::Delete(1)).await;
    assert_eq!(state.tasks, vec![task(2, "Walk dog", true)]);
    assert_eq!(state.tasks, store.snapshot());

    // Only the mount fetched.
    assert_eq!(store.calls(StoreOp::Select), 1);
}
