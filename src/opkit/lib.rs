//! # Opkit Architecture
//!
//! Opkit is a **UI-agnostic engine** for big pasted id lists: split them into
//! tokens, run a reversible transform over every token, and hand the result back
//! one fixed-size page at a time. The terminal client in `cli/` is one consumer;
//! a desktop or web front end would drive the same [`api::OpkitApi`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, runs the interactive shell             │
//! │  - The ONLY place that knows about stdout/stdin/clipboard   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Cloneable handle over one shared session                 │
//! │  - Takes the session lock, dispatches to a command          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Computes the new blob, swaps it in, renders the page     │
//! │  - Works on the locked SessionState, never fails on text    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (tokenize, transform, codec, batch, pager)          │
//! │  - Pure functions over &str                                 │
//! │  - Session store (store/) holds the two buffers             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! raw text ─▶ tokenize ─▶ batch (transform per token) ─▶ new blob ─▶ pager ─▶ page
//! ```
//!
//! ## Key Principle: Best-Effort Pass-Through
//!
//! Pasted lists are messy. A token a transform cannot handle (a word given to the
//! encoder, a foreign id given to the decoder) is kept as-is and counted, never
//! turned into an error. Errors ([`error::OpkitError`]) only exist for startup
//! concerns: reading config, building the codec, talking to the clipboard.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Session state and the lock around it
//! - [`tokenize`]: Token splitting and delimiter inference
//! - [`transform`]: Per-token transforms and the transform catalogue
//! - [`codec`]: Reversible numeric id encoding
//! - [`batch`]: Chunked application of a transform over a blob
//! - [`pager`]: Page cursors and code-point slicing
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod batch;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod pager;
pub mod store;
pub mod tokenize;
pub mod transform;
