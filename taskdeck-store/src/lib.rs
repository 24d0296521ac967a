//! `TaskDeck` store service library.
//!
//! Exposes the task store service for use in tests and embedding.
//! The service accepts WebSocket connections and answers each
//! [`taskdeck_proto::store::StoreRequest`] frame with exactly one
//! [`taskdeck_proto::store::StoreResponse`].

pub mod config;
pub mod service;
pub mod store;
