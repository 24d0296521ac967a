//! Integration tests wiring key events through the app to a live store.
//!
//! Drives the same path the TUI main loop runs: a key event produces a
//! store command, the command round-trips through the store service, and
//! the resulting events flow back into the app state.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::app::{App, PanelFocus};
use taskdeck::store::{StoreClientConfig, StoreCommand, StoreEvent, spawn_store};
use taskdeck_store::service;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Receives the next store event, failing the test on timeout.
async fn next_event(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for store event")
        .expect("event channel closed")
}

/// Dispatches a key event and forwards any resulting command to the store.
async fn press(app: &mut App, cmd_tx: &mpsc::Sender<StoreCommand>, code: KeyCode) {
    if let Some(cmd) = app.handle_key_event(key(code)) {
        cmd_tx.send(cmd).await.expect("command channel closed");
    }
}

/// Applies the next `events` store events to the app, dispatching
/// follow-up refreshes like the main loop does.
async fn settle(
    app: &mut App,
    cmd_tx: &mpsc::Sender<StoreCommand>,
    rx: &mut mpsc::Receiver<StoreEvent>,
    events: usize,
) {
    for _ in 0..events {
        let event = next_event(rx).await;
        if let Some(follow_up) = app.apply_store_event(event) {
            cmd_tx.send(follow_up).await.expect("command channel closed");
        }
    }
}

#[tokio::test]
async fn typed_task_reaches_the_store_and_the_upcoming_panel() {
    let (addr, _handle) = service::start_server("127.0.0.1:0").await.unwrap();
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(format!("ws://{addr}/ws")))
        .await
        .unwrap();

    let mut app = App::new();
    settle(&mut app, &cmd_tx, &mut evt_rx, 1).await; // ConnectionStatus

    for c in "Buy milk".chars() {
        press(&mut app, &cmd_tx, KeyCode::Char(c)).await;
    }
    press(&mut app, &cmd_tx, KeyCode::Enter).await;

    // Input cleared as soon as the submit happened, before confirmation.
    assert!(app.input.is_empty());

    settle(&mut app, &cmd_tx, &mut evt_rx, 2).await; // Created + Loaded

    let upcoming = app.tasks.upcoming();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].name, "Buy milk");
}

#[tokio::test]
async fn enter_on_panel_row_toggles_done_at_the_store() {
    let (addr, _handle) = service::start_server("127.0.0.1:0").await.unwrap();
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(format!("ws://{addr}/ws")))
        .await
        .unwrap();

    let mut app = App::new();
    settle(&mut app, &cmd_tx, &mut evt_rx, 1).await; // ConnectionStatus

    // Create one task through the input line.
    for c in "Feed the dog".chars() {
        press(&mut app, &cmd_tx, KeyCode::Char(c)).await;
    }
    press(&mut app, &cmd_tx, KeyCode::Enter).await;
    settle(&mut app, &cmd_tx, &mut evt_rx, 2).await; // Created + Loaded

    // Focus the upcoming panel and toggle the row.
    app.focus = PanelFocus::Upcoming;
    press(&mut app, &cmd_tx, KeyCode::Enter).await;
    settle(&mut app, &cmd_tx, &mut evt_rx, 2).await; // Updated + Loaded

    assert!(app.tasks.upcoming().is_empty());
    assert_eq!(app.tasks.completed().len(), 1);
    assert_eq!(app.tasks.completed()[0].name, "Feed the dog");
}

#[tokio::test]
async fn delete_key_removes_row_after_confirmation() {
    let (addr, _handle) = service::start_server("127.0.0.1:0").await.unwrap();
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(format!("ws://{addr}/ws")))
        .await
        .unwrap();

    let mut app = App::new();
    settle(&mut app, &cmd_tx, &mut evt_rx, 1).await; // ConnectionStatus

    for c in "doomed".chars() {
        press(&mut app, &cmd_tx, KeyCode::Char(c)).await;
    }
    press(&mut app, &cmd_tx, KeyCode::Enter).await;
    settle(&mut app, &cmd_tx, &mut evt_rx, 2).await; // Created + Loaded
    assert_eq!(app.tasks.len(), 1);

    app.focus = PanelFocus::Upcoming;
    press(&mut app, &cmd_tx, KeyCode::Char('d')).await;
    settle(&mut app, &cmd_tx, &mut evt_rx, 2).await; // Deleted + Loaded

    assert!(app.tasks.is_empty());
}
