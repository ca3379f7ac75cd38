//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → init logging/metrics → bind → serve
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast to server task → stop accepting, drain, exit
//!
//! Signals (signals.rs):
//!     SIGINT → trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
