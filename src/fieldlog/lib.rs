//! # Fieldlog Architecture
//!
//! Fieldlog is a **UI-agnostic record-keeping library** for robotic
//! infrastructure inspection runs, with a CLI client on top. The library is
//! the product; the CLI is just one caller.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic: upsert merge rule, attempt          │
//! │    numbering, clears, export                                │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The record store
//!
//! A project code maps to a dated folder `<code>_<YYYYMMDD>` holding one
//! flat `jobs.csv`. Rows are identified by `(task_number, attempt_number)`
//! compared as strings; `upsert_run` is the only mutation entrypoint and is
//! always safe to re-invoke with the same key. Every mutation reads the full
//! table, edits it in memory, and rewrites it atomically; tables stay small
//! (a few thousand rows at most).
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! The same core could back a desktop form or an HTTP endpoint unchanged.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The run-record row type, field conventions, merge rule
//! - [`config`]: Configuration management
//! - [`link`]: ArcGIS link coordinate extraction
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod link;
pub mod model;
pub mod store;
