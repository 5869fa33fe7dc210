//! Proximity Service - beacon-to-customer identity resolution.
//!
//! # Architecture
//!
//! - [`resolver`] - the orchestration core: reading validation, beacon
//!   lookup, confidence gating, customer lookup-or-create, aggregate
//!   construction, persistence
//! - [`ports`] - repository and cache contracts the resolver compiles
//!   against
//! - [`db`] - `PostgreSQL` implementations of the repository contracts
//! - [`cache`] - in-process identity cache (1 hour TTL)
//! - [`routes`] - thin axum HTTP surface
//! - [`config`] / [`state`] / [`error`] - service plumbing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod ports;
pub mod resolver;
pub mod routes;
pub mod state;
