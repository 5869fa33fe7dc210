//! Proximity Core - Domain types and identification rules.
//!
//! This crate provides the domain model shared by all Proximity components:
//! - `service` - Resolution service (HTTP surface, Postgres, cache)
//! - `integration-tests` - End-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no database access,
//! no HTTP clients. Every value and entity type validates itself on
//! construction and exposes a standalone `validate()` for defense in depth.
//!
//! # Modules
//!
//! - [`types`] - Beacon readings, devices, customers, and locations
//! - [`confidence`] - Signal-strength to confidence mapping
//! - [`identity`] - The `CustomerIdentity` aggregate and its domain rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod confidence;
pub mod identity;
pub mod types;

pub use confidence::{ConfidenceModel, LinearRssi};
pub use identity::{CustomerIdentity, IdentityError, MIN_CONFIDENCE};
pub use types::*;
