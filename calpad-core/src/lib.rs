//! Core types for the calpad ecosystem.
//!
//! This crate provides everything shared by the calpad CLI and the reminder
//! scheduler:
//! - `Event` and the date-indexed `EventStore` with JSON persistence
//! - `action` module for the assistant's JSON reply protocol
//! - `dispatch` module applying action batches to the store

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod store;

pub use event::Event;
pub use store::EventStore;
