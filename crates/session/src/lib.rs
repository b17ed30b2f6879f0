//! Session Management
//!
//! Turn-by-turn orchestration of a reminiscence session: oracle calls,
//! progress updates, completion and summary.

#![warn(missing_docs)]

pub mod config;
pub mod completion;
pub mod context;
pub mod controller;

pub use config::{CompletionRule, SessionConfig};
pub use completion::{CompletionPolicy, Corroborated, OracleFlag};
pub use context::{SessionContext, SessionState};
pub use controller::{SessionController, SessionError, TurnInput, TurnOutcome};
