//! # Core Lifecycle Module
//!
//! Observes host lifecycle owners and logs their phase transitions.
//!
//! ## Overview
//!
//! - [`bridge`]: scoped observer registration ([`observe`], [`Subscription`])
//!   and the identity-keyed [`LifecycleBridge`]
//! - [`screen`]: the [`Screen`] element and its [`ScreenLifecycleLogger`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_lifecycle::Screen;
//! use core_runtime::config::ScreenConfig;
//!
//! let config = ScreenConfig::builder()
//!     .screen_name("MainScreen")
//!     .logger_sink(sink)
//!     .build()?;
//!
//! let screen = Screen::mount(config, activity.clone());
//! // Host emits ON_CREATE, ON_START, ... -> "MainScreen: ON_CREATE", ...
//! screen.unmount();
//! ```

pub mod bridge;
pub mod screen;

pub use bridge::{observe, Activation, LifecycleBridge, LifecycleCallback, Subscription};
pub use screen::{Screen, ScreenLifecycleLogger};

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::{ConsoleLogger, HostLifecycleOwner};
