//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and the host
//! runtime that owns screens. The host manages when a screen exists and which
//! lifecycle phase it is in; the core subscribes to those transitions and
//! writes them to a host log.
//!
//! ## Traits
//!
//! ### Lifecycle
//! - [`LifecycleOwner`](lifecycle::LifecycleOwner) - Screen/window handle with a stable identity
//! - [`Lifecycle`](lifecycle::Lifecycle) - Observer registry of one owner
//! - [`LifecycleObserver`](lifecycle::LifecycleObserver) - Receives phase transitions
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ In Progress |
//! | Android  | TBD                 | 📋 Planned |
//! | iOS      | TBD                 | 📋 Planned |
//!
//! ## Error Handling
//!
//! Fallible bridge operations use [`BridgeError`](error::BridgeError).
//! Subscribing and unsubscribing lifecycle observers is total and does not
//! return errors.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` on native targets. Observers are
//! invoked synchronously on whichever thread the host emits phases from.
//!
//! ## Examples
//!
//! ### Implementing LifecycleOwner
//!
//! ```ignore
//! use bridge_traits::lifecycle::{Lifecycle, LifecycleOwner, OwnerId};
//!
//! pub struct ActivityHandle {
//!     id: OwnerId,
//!     lifecycle: PlatformLifecycle,
//! }
//!
//! impl LifecycleOwner for ActivityHandle {
//!     fn owner_id(&self) -> OwnerId {
//!         self.id
//!     }
//!
//!     fn lifecycle(&self) -> &dyn Lifecycle {
//!         &self.lifecycle
//!     }
//! }
//! ```

pub mod error;
pub mod lifecycle;
pub mod platform;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use lifecycle::{
    Lifecycle, LifecycleObserver, LifecycleOwner, LifecyclePhase, LifecycleState, OwnerId,
};
pub use time::{Clock, LogEntry, LogLevel, LoggerSink, SystemClock};
