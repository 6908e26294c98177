//! # hwbot-proto
//!
//! Shared contracts for the hwbot crates.
//!
//! This crate holds the seams between the poll loop and its outbound
//! collaborators:
//! - [`Notifier`] — the send-text primitive the loop calls on a status change
//! - [`DeliveryError`] — what a notifier reports when a message was not delivered

mod notifier;

pub use notifier::{DeliveryError, Notifier};
