//! The core of SRX session-log flow triage.
//! Pull flow attributes out of free-form syslog lines, classify them against
//! a target address, and accumulate deduplicated per-host traffic views.
pub mod aggregate;
pub mod classify;
pub mod containers;
pub mod core;
pub mod extract;
pub mod utils;
