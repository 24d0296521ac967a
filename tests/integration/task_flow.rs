//! Integration tests for the create/toggle/delete flow against a live
//! store service.
//!
//! Each test starts an in-process store service on an OS-assigned port,
//! connects the client's store coordinator to it, and drives the same
//! command/event cycle the TUI main loop runs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::app::App;
use taskdeck::store::{StoreClientConfig, StoreCommand, StoreEvent, spawn_store};
use taskdeck::tasks::TaskItem;
use taskdeck_proto::task::TaskId;
use taskdeck_store::service;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts the store service in-process and returns its WebSocket URL.
async fn start_store() -> String {
    let (addr, _handle) = service::start_server("127.0.0.1:0")
        .await
        .expect("failed to start store service");
    format!("ws://{addr}/ws")
}

/// Connects the store coordinator and consumes the initial
/// `ConnectionStatus` event.
async fn connect(url: &str) -> (mpsc::Sender<StoreCommand>, mpsc::Receiver<StoreEvent>) {
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(url.to_string()))
        .await
        .expect("store connection failed");
    let first = next_event(&mut evt_rx).await;
    assert_eq!(first, StoreEvent::ConnectionStatus { connected: true });
    (cmd_tx, evt_rx)
}

/// Receives the next store event, failing the test on timeout.
async fn next_event(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for store event")
        .expect("event channel closed")
}

/// Applies an event to the app, dispatching the follow-up command if one
/// is due (the same wiring the TUI main loop performs).
async fn apply(app: &mut App, cmd_tx: &mpsc::Sender<StoreCommand>, event: StoreEvent) {
    if let Some(follow_up) = app.apply_store_event(event) {
        cmd_tx.send(follow_up).await.expect("command channel closed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initial_refresh_replaces_demo_data() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;

    let mut app = App::new();
    assert_eq!(app.tasks.len(), 3); // placeholder data

    cmd_tx.send(StoreCommand::Refresh).await.unwrap();
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;

    // The store is empty, so the placeholder list is gone.
    assert!(app.tasks.is_empty());
    assert!(app.tasks.upcoming().is_empty());
    assert!(app.tasks.completed().is_empty());
}

#[tokio::test]
async fn added_task_appears_in_upcoming_with_store_id() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;
    let mut app = App::new();

    cmd_tx
        .send(StoreCommand::Create {
            name: "Buy milk".to_string(),
        })
        .await
        .unwrap();

    // Create confirmation carries the store-assigned id and answers with
    // a refresh.
    let event = next_event(&mut evt_rx).await;
    let StoreEvent::Created(ref task) = event else {
        panic!("expected Created, got {event:?}");
    };
    assert_eq!(task.name, "Buy milk");
    assert!(!task.done);
    let assigned_id = task.id;
    apply(&mut app, &cmd_tx, event).await;

    // The refresh lands and the new task shows up in the upcoming view.
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    let upcoming = app.tasks.upcoming();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, assigned_id);
    assert_eq!(upcoming[0].name, "Buy milk");
}

#[tokio::test]
async fn toggle_moves_task_between_views() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;
    let mut app = App::new();

    // Seed one task and load it.
    cmd_tx
        .send(StoreCommand::Create {
            name: "Wash the car".to_string(),
        })
        .await
        .unwrap();
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;

    // Toggle it done through the item surface.
    let item = TaskItem::from_task(app.tasks.upcoming()[0]);
    cmd_tx.send(item.toggle_command()).await.unwrap();

    let event = next_event(&mut evt_rx).await;
    assert_eq!(event, StoreEvent::Updated);
    apply(&mut app, &cmd_tx, event).await;

    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    assert!(app.tasks.upcoming().is_empty());
    assert_eq!(app.tasks.completed().len(), 1);
    assert!(app.tasks.completed()[0].done);

    // Toggle it back: the update must carry the inverted flag again.
    let item = TaskItem::from_task(app.tasks.completed()[0]);
    let StoreCommand::Update { done, .. } = item.toggle_command() else {
        panic!("expected Update command");
    };
    assert!(!done);
}

#[tokio::test]
async fn delete_removes_task_entirely() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;
    let mut app = App::new();

    cmd_tx
        .send(StoreCommand::Create {
            name: "doomed".to_string(),
        })
        .await
        .unwrap();
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    assert_eq!(app.tasks.len(), 1);

    let item = TaskItem::from_task(app.tasks.upcoming()[0]);
    cmd_tx.send(item.delete_command()).await.unwrap();

    let event = next_event(&mut evt_rx).await;
    assert_eq!(event, StoreEvent::Deleted);
    apply(&mut app, &cmd_tx, event).await;

    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    assert!(app.tasks.is_empty());
}

#[tokio::test]
async fn empty_name_is_submitted_unvalidated() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;

    cmd_tx
        .send(StoreCommand::Create {
            name: String::new(),
        })
        .await
        .unwrap();

    let event = next_event(&mut evt_rx).await;
    let StoreEvent::Created(task) = event else {
        panic!("expected Created, got {event:?}");
    };
    assert!(task.name.is_empty());
    assert!(!task.done);
}

#[tokio::test]
async fn store_ids_are_stable_across_refreshes() {
    let url = start_store().await;
    let (cmd_tx, mut evt_rx) = connect(&url).await;
    let mut app = App::new();

    for name in ["first", "second"] {
        cmd_tx
            .send(StoreCommand::Create {
                name: name.to_string(),
            })
            .await
            .unwrap();
        let event = next_event(&mut evt_rx).await;
        apply(&mut app, &cmd_tx, event).await;
        let event = next_event(&mut evt_rx).await;
        apply(&mut app, &cmd_tx, event).await;
    }

    let ids: Vec<TaskId> = app.tasks.all().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TaskId::from_raw(0), TaskId::from_raw(1)]);

    // Another refresh returns the same ids in the same order.
    cmd_tx.send(StoreCommand::Refresh).await.unwrap();
    let event = next_event(&mut evt_rx).await;
    apply(&mut app, &cmd_tx, event).await;
    let again: Vec<TaskId> = app.tasks.all().iter().map(|t| t.id).collect();
    assert_eq!(again, ids);
}
