//! Core of an operator console for a MosDNS forwarder.
//!
//! Reads go through [`fetch::ResilientFetch`], which never fails: an
//! unreachable backend yields fixed sample data flagged `is_real = false`.
//! [`orchestrator::ViewDataOrchestrator`] decides what each screen fetches
//! and keeps exactly one poll timer alive, and [`advisor`] wraps an AI text
//! provider for config review and chat.

pub mod advisor;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod gateway;
pub mod logging;
pub mod orchestrator;
pub mod scheduler;
pub mod settings;
