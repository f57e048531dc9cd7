//! Shopify Gateway library.
//!
//! A JSON control panel that relays each request to the matching Shopify
//! REST Admin API endpoint and hands back the upstream reply. The crate is
//! exposed as a library so the router can be exercised in tests against a
//! stub upstream.
//!
//! # Security
//!
//! This crate holds the store's HIGH PRIVILEGE Admin API access token and
//! performs destructive operations (bulk product deletion) without any
//! authentication of its own. Only expose it on a private network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
