//! Nowcast API Service Library
//!
//! This crate provides the HTTP server and the refresh poller around
//! the nowcast engine: it fetches the DWD RV composite on a fixed
//! cadence and answers point precipitation queries from the currently
//! published snapshot set.

pub mod handlers;
pub mod ingest;
pub mod state;
