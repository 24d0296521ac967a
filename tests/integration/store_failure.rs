//! Integration tests for store failure semantics.
//!
//! Every store failure must be absorbed: the event channel reports it, the
//! snapshot stays as it was, and nothing panics. There is no retry.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::app::App;
use taskdeck::store::{StoreClientConfig, StoreCommand, StoreEvent, StoreOp, spawn_store};
use taskdeck_proto::task::{Task, TaskId};
use taskdeck_store::service;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Receives the next store event, failing the test on timeout.
async fn next_event(rx: &mut mpsc::Receiver<StoreEvent>) -> StoreEvent {
    timeout(EVENT_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for store event")
        .expect("event channel closed")
}

/// Starts a server that completes the WebSocket handshake and then drops
/// the connection, for exercising mid-session transport loss.
async fn start_vanishing_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            let ws = tokio_tungstenite::accept_async(stream).await;
            drop(ws);
        }
    });
    format!("ws://{addr}")
}

#[tokio::test]
async fn unreachable_store_fails_spawn() {
    // Port 9 (discard) is assumed closed; connection must be refused.
    let result = spawn_store(StoreClientConfig::new("ws://127.0.0.1:9/ws".to_string())).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn rejected_mutation_reports_failure_and_keeps_snapshot() {
    let (addr, _handle) = service::start_server("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{addr}/ws");
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(url)).await.unwrap();
    assert_eq!(
        next_event(&mut evt_rx).await,
        StoreEvent::ConnectionStatus { connected: true }
    );

    let mut app = App::new();
    let before: Vec<Task> = app.tasks.all().to_vec();

    // The store has no task 99; the update is rejected server-side.
    cmd_tx
        .send(StoreCommand::Update {
            id: TaskId::from_raw(99),
            name: "ghost".to_string(),
            done: true,
        })
        .await
        .unwrap();

    let event = next_event(&mut evt_rx).await;
    let StoreEvent::Failed { op, ref reason } = event else {
        panic!("expected Failed, got {event:?}");
    };
    assert_eq!(op, StoreOp::Update);
    assert!(reason.contains("not found"), "got: {reason}");

    // Applying the failure never mutates the snapshot or asks for a refresh.
    let follow_up = app.apply_store_event(event);
    assert_eq!(follow_up, None);
    assert_eq!(app.tasks.all(), before.as_slice());
}

#[tokio::test]
async fn rejected_create_keeps_prior_list() {
    let (addr, _handle) = service::start_server("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{addr}/ws");
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(url)).await.unwrap();
    assert_eq!(
        next_event(&mut evt_rx).await,
        StoreEvent::ConnectionStatus { connected: true }
    );

    // Over-long names are the one thing the store rejects at create.
    cmd_tx
        .send(StoreCommand::Create {
            name: "x".repeat(300),
        })
        .await
        .unwrap();

    let event = next_event(&mut evt_rx).await;
    let StoreEvent::Failed { op, .. } = event else {
        panic!("expected Failed, got {event:?}");
    };
    assert_eq!(op, StoreOp::Create);

    // The store never recorded it.
    cmd_tx.send(StoreCommand::Refresh).await.unwrap();
    let event = next_event(&mut evt_rx).await;
    assert_eq!(event, StoreEvent::Loaded(vec![]));
}

#[tokio::test]
async fn transport_loss_reports_failure_then_disconnect() {
    let url = start_vanishing_server().await;
    let (cmd_tx, mut evt_rx) = spawn_store(StoreClientConfig::new(url)).await.unwrap();
    assert_eq!(
        next_event(&mut evt_rx).await,
        StoreEvent::ConnectionStatus { connected: true }
    );

    let mut app = App::new();
    let before: Vec<Task> = app.tasks.all().to_vec();

    cmd_tx.send(StoreCommand::Refresh).await.unwrap();

    let event = next_event(&mut evt_rx).await;
    let StoreEvent::Failed { op, .. } = event else {
        panic!("expected Failed, got {event:?}");
    };
    assert_eq!(op, StoreOp::List);
    app.apply_store_event(event);

    let event = next_event(&mut evt_rx).await;
    assert_eq!(event, StoreEvent::ConnectionStatus { connected: false });
    app.apply_store_event(event);

    // The prior snapshot still renders; nothing was cleared.
    assert_eq!(app.tasks.all(), before.as_slice());
    assert!(!app.is_connected);
}
