//! Hola — greeting microservice with a resilient chained call.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                    HOLA                      │
//!                        │                                              │
//!   GET /hola-chaining   │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│   trace   │──▶│ greeting  │  │
//!                        │  │ server │   │ extract + │   │ composer  │  │
//!                        │  └────────┘   │   span    │   └─────┬─────┘  │
//!                        │               └───────────┘         │        │
//!                        │                                     ▼        │
//!                        │                          ┌────────────────┐  │
//!                        │                          │   downstream   │  │
//!   JSON array response  │                          │ resolver + 500 │◀─┼── aloha
//!   ◀────────────────────┼──────────────────────────│  ms bounded    │  │   service
//!                        │                          │ call, fallback │  │
//!                        │                          └────────────────┘  │
//!                        │                                              │
//!                        │  ┌────────────────────────────────────────┐  │
//!                        │  │          Cross-Cutting Concerns        │  │
//!                        │  │  config │ security │ observability │   │  │
//!                        │  │         │          │   lifecycle       │  │
//!                        │  └────────────────────────────────────────┘  │
//!                        └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod downstream;
pub mod greeting;
pub mod http;
pub mod trace;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::HolaConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
