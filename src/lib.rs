//! Tileforms Library
//!
//! This library provides the core functionality of tileforms: tile models,
//! projection of tiles into JSON Forms schemas, editor selection, field
//! validation, edit sessions, and the CLI and web API built on them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod forms;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
