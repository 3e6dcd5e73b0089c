//! Application layer wiring events to state changes.
//!
//! This module defines the `PageEngine`, the primary entry point of the
//! interaction layer, and the `DispatchTable` that decides which actions an
//! incoming event produces. Delayed actions flow through the scheduler port
//! rather than being slept on, which keeps the whole layer deterministic.

pub mod dispatch;
pub mod engine;
