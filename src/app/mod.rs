//! Application layer coordinating session, collection, and user actions.
//!
//! This module defines the interaction layer sitting between the shell
//! (main.rs) and the domain/storage/remote layers: the central state
//! container, the mode types, and the controller through which every user
//! action flows.
//!
//! # Architecture
//!
//! The layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input -> Controller call -> Authorization gate -> Remote I/O
//!                     |                                      |
//!               State mutations  <----- outcome as notice ---+
//! ```
//!
//! # Modules
//!
//! - [`controller`]: The interaction controller orchestrating all operations
//! - [`modes`]: Form and notice mode types
//! - [`state`]: Central application state container and transient notices

pub mod controller;
pub mod modes;
pub mod state;

pub use controller::Controller;
pub use modes::{FormMode, NoticeKind};
pub use state::{AppState, Notice, NOTICE_TTL};
