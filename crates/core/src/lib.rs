//! Shopify Gateway Core - Shared types library.
//!
//! This crate provides the types shared by the gateway and its tests:
//! - Typed upstream identifiers for the resources the gateway touches
//! - The discount request and the fixed-shape upstream payloads built from it
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Upstream
//! resources are otherwise relayed as opaque JSON, so only the shapes the
//! gateway has to build or read itself live here.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids and discount payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
