//! HTTP handlers for the chat relay.

pub mod chat;
pub mod health;
