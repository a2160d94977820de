//! Scheduling and daily-closing reconciliation engine for multi-tenant business units.
//!
//! This crate provides the domain core for expanding work-schedule templates into
//! concrete employee shifts, recording overlap-safe partial revenue entries,
//! driving the daily-closing approval state machine, and reviewing post-hoc
//! adjustment requests. Persistence is consumed through the repository traits
//! in [`repository`]; no storage technology is assumed.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
