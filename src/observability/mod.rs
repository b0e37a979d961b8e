//! Tracing setup for the client.
//!
//! All diagnostics go through the `tracing` macros; this module wires up the
//! subscriber once at startup. Log lines are written to stderr so they never
//! interleave with the catalog output on stdout.

pub mod init;

pub use init::init_tracing;
