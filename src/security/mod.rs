//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Request ingress:
//!     headers → IdentityResolver::resolve() → Option<Identity>
//!     → stored in request extensions
//!
//! /hola-secured:
//!     Some(identity) → greet identity.name()
//!     None           → 401 Unauthorized
//! ```
//!
//! # Design Decisions
//! - Identity is resolved once at ingress, never inside handlers
//! - One variant per identity source; handlers only see `name()`
//! - Authentication absence is the single user-visible failure path in
//!   this service

pub mod identity;

pub use identity::{Identity, IdentityResolver};
