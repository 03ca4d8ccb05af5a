//! # Core Session Logic
//!
//! This module contains Bobacom's session state machine.
//! It knows nothing about terminals or devices.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Reader    │
//!     │  Adapter   │                          │   task     │
//!     │ (ratatui)  │                          │ (device)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`transcript`], [`viewport`], [`input`]: the pieces `App` is made of
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod input;
pub mod state;
pub mod transcript;
pub mod viewport;
