//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `LifecycleRegistry` / `HostLifecycleOwner`: in-process lifecycle
//!   authority for windows and test harnesses
//! - `ConsoleLogger`: `LoggerSink` writing text or JSON lines to stdout
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ConsoleLogger, HostLifecycleOwner};
//! use bridge_traits::LifecycleState;
//!
//! let window = HostLifecycleOwner::new("MainWindow");
//! let sink = ConsoleLogger::default();
//!
//! // Hand both to the core, then drive the window:
//! window.move_to(LifecycleState::Resumed);
//! ```

mod console;
mod lifecycle;

pub use console::{ConsoleFormat, ConsoleLogger};
pub use lifecycle::{HostLifecycleOwner, LifecycleRegistry};
