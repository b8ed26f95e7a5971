//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the screen lifecycle core:
//! - Logging and tracing infrastructure
//! - Screen configuration
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the lifecycle bridge
//! depends on. It establishes the logging conventions and the fail-fast
//! configuration builder used by every screen.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
