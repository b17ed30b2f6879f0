//! Oracle collaborator abstraction for Memini.
//!
//! The oracle is the external reasoning service that judges coverage,
//! writes replies, detects topics and summarizes sessions. This crate
//! provides the trait the session engine talks to and a deterministic
//! scripted implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod scripted;

pub use trait_::{Oracle, OracleError, OracleRequest, Result};
pub use scripted::{ScriptedOracle, ScriptedReply, RecordedRequest};
