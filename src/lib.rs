//! Workspace facade crate.
//!
//! Exposes feature flags that map to the individual workspace crates so a
//! host application can depend on `lifecycle-workspace` alone.
//!
//! - `desktop-shims` (default): pulls in `core-lifecycle` and `core-runtime`
//!   with the desktop `ConsoleLogger` and `HostLifecycleOwner` available.

#[cfg(feature = "desktop-shims")]
pub use core_lifecycle::{
    observe, Activation, ConsoleLogger, HostLifecycleOwner, LifecycleBridge, Screen,
    ScreenLifecycleLogger, Subscription,
};

#[cfg(feature = "desktop-shims")]
pub use core_runtime::{config::ScreenConfig, logging};
