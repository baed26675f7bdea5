//! Motorstand Core - Shared types library.
//!
//! This crate provides common types used across all Motorstand components:
//! - `storefront` - Public catalog site with the backoffice route subtree
//! - `integration-tests` - End-to-end tests against a stub sheet API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, the canonical vehicle record, users, reservations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
