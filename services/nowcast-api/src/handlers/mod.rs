//! HTTP request handlers for the nowcast API.

pub mod health;
pub mod point;
