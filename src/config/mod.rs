//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → env.rs (environment overlay, env wins)
//!     → HolaConfig (immutable for the process lifetime)
//!     → shared via Arc to all subsystems
//!
//! Downstream endpoint settings are the exception: they are re-read from
//! the environment behind a short staleness window (see downstream::resolver),
//! so the chaining endpoint follows config changes at runtime.
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow running with no config file at all
//! - Environment variables override file values (container-first deployment)
//! - The overlay is a pure function over key/value pairs, testable without
//!   touching the process environment

pub mod env;
pub mod loader;
pub mod schema;

pub use schema::DownstreamConfig;
pub use schema::GreetingConfig;
pub use schema::HolaConfig;
