//! Wire types for the remote test-automation and accessibility APIs.
//!
//! This crate contains the serde-serializable shapes of the four resources the
//! gate reads: the build list, a single build's status, the sessions of a
//! build, and the accessibility report of one scan.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * Lenient: Optional fields the service sometimes omits decode to `None`
//! * Stable: Changes only when the remote payloads change
//!
//! The polling and aggregation logic built on top of these types lives in
//! `a11y-gate`.

pub mod build;
pub mod envelope;
pub mod id;
pub mod report;
pub mod session;

pub use build::*;
pub use envelope::*;
pub use id::*;
pub use report::*;
pub use session::*;
