//! # Screen Configuration Module
//!
//! Provides configuration for a screen that logs its lifecycle.
//!
//! ## Overview
//!
//! A [`ScreenConfig`] names the screen, decides how its lifecycle lines look
//! and carries the `LoggerSink` they are written to. It is built with
//! [`ScreenConfigBuilder`], which validates eagerly so a misconfigured screen
//! fails before it is mounted.
//!
//! ## Required Dependencies
//!
//! - `LoggerSink` - Destination of lifecycle lines
//!
//! `Clock` defaults to [`SystemClock`] and only needs injecting when
//! timestamps must be pinned.
//!
//! When the `desktop-shims` feature is enabled, a `ConsoleLogger` is injected
//! automatically if no sink is provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ScreenConfig;
//! use std::sync::Arc;
//!
//! let config = ScreenConfig::builder()
//!     .screen_name("MainScreen")
//!     .log_tag("TAG")
//!     .logger_sink(Arc::new(MyLogcatSink))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::lifecycle::LifecyclePhase;
use bridge_traits::time::{Clock, LogLevel, LoggerSink, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;

/// Tag used when none is configured.
pub const DEFAULT_LOG_TAG: &str = "TAG";

/// Message written for phases outside the named set.
pub const DEFAULT_UNKNOWN_EVENT_MESSAGE: &str = "bye bye";

/// Configuration of one lifecycle-logging screen.
#[derive(Clone)]
pub struct ScreenConfig {
    /// Name prefixed to every line, e.g. `MainScreen`
    pub screen_name: String,

    /// Host log tag (Logcat tag, OSLog category, console target)
    pub log_tag: String,

    /// Level lifecycle lines are written at
    pub log_level: LogLevel,

    /// Text written instead of an event code for unknown phases
    pub unknown_event_message: String,

    /// Per-phase text replacing the event code, e.g. `onCreate`
    pub phase_labels: HashMap<LifecyclePhase, String>,

    /// Where lifecycle lines go
    pub logger_sink: Arc<dyn LoggerSink>,

    /// Timestamp source for lifecycle lines
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ScreenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenConfig")
            .field("screen_name", &self.screen_name)
            .field("log_tag", &self.log_tag)
            .field("log_level", &self.log_level)
            .field("unknown_event_message", &self.unknown_event_message)
            .field("phase_labels", &self.phase_labels)
            .field("logger_sink", &"LoggerSink { ... }")
            .field("clock", &"Clock { ... }")
            .finish()
    }
}

impl ScreenConfig {
    /// Creates a new builder for constructing a `ScreenConfig`.
    pub fn builder() -> ScreenConfigBuilder {
        ScreenConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Screen name is not blank
    /// - Log tag is not empty and contains no whitespace
    /// - Unknown-event message and phase labels are not blank
    pub fn validate(&self) -> Result<()> {
        if self.screen_name.trim().is_empty() {
            return Err(Error::Config("Screen name cannot be empty".to_string()));
        }

        if self.log_tag.is_empty() {
            return Err(Error::Config("Log tag cannot be empty".to_string()));
        }

        if self.log_tag.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "Log tag '{}' must not contain whitespace",
                self.log_tag
            )));
        }

        if self.unknown_event_message.trim().is_empty() {
            return Err(Error::Config(
                "Unknown event message cannot be empty".to_string(),
            ));
        }

        if let Some((phase, _)) = self
            .phase_labels
            .iter()
            .find(|(_, label)| label.trim().is_empty())
        {
            return Err(Error::Config(format!("Label for {} cannot be empty", phase)));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn logger_sink_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "LoggerSink".to_string(),
        message: "LoggerSink implementation is required for lifecycle logging. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ConsoleLogger. \
                 Android: inject a Logcat-backed sink. \
                 iOS: inject an OSLog-backed sink."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_logger_sink(level: LogLevel) -> Result<Arc<dyn LoggerSink>> {
    use bridge_desktop::ConsoleLogger;

    let sink: Arc<dyn LoggerSink> = Arc::new(ConsoleLogger::new(level));
    Ok(sink)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_logger_sink(_level: LogLevel) -> Result<Arc<dyn LoggerSink>> {
    Err(logger_sink_missing_error())
}

/// Builder for constructing [`ScreenConfig`] instances.
#[derive(Default)]
pub struct ScreenConfigBuilder {
    screen_name: Option<String>,
    log_tag: Option<String>,
    log_level: Option<LogLevel>,
    unknown_event_message: Option<String>,
    phase_labels: HashMap<LifecyclePhase, String>,
    logger_sink: Option<Arc<dyn LoggerSink>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ScreenConfigBuilder {
    /// Sets the screen name (required).
    pub fn screen_name(mut self, name: impl Into<String>) -> Self {
        self.screen_name = Some(name.into());
        self
    }

    /// Sets the host log tag. Defaults to [`DEFAULT_LOG_TAG`].
    pub fn log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = Some(tag.into());
        self
    }

    /// Sets the level lifecycle lines are written at. Defaults to `Debug`.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Sets the text written for unknown phases.
    /// Defaults to [`DEFAULT_UNKNOWN_EVENT_MESSAGE`].
    pub fn unknown_event_message(mut self, message: impl Into<String>) -> Self {
        self.unknown_event_message = Some(message.into());
        self
    }

    /// Writes `label` instead of the event code for `phase`.
    pub fn phase_label(mut self, phase: LifecyclePhase, label: impl Into<String>) -> Self {
        self.phase_labels.insert(phase, label.into());
        self
    }

    /// Sets the sink lifecycle lines are written to.
    pub fn logger_sink(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.logger_sink = Some(sink);
        self
    }

    /// Sets the timestamp source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the screen name is missing or a field is invalid
    /// - [`Error::CapabilityMissing`] if no sink was given and no desktop
    ///   default is available
    pub fn build(self) -> Result<ScreenConfig> {
        let screen_name = self.screen_name.ok_or_else(|| {
            Error::Config("Screen name is required. Use .screen_name() to set it.".to_string())
        })?;

        let log_level = self.log_level.unwrap_or(LogLevel::Debug);

        let logger_sink = match self.logger_sink {
            Some(sink) => sink,
            None => provide_default_logger_sink(log_level)?,
        };

        let config = ScreenConfig {
            screen_name,
            log_tag: self.log_tag.unwrap_or_else(|| DEFAULT_LOG_TAG.to_string()),
            log_level,
            unknown_event_message: self
                .unknown_event_message
                .unwrap_or_else(|| DEFAULT_UNKNOWN_EVENT_MESSAGE.to_string()),
            phase_labels: self.phase_labels,
            logger_sink,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        };

        config.validate()?;

        Ok(config)
    }
}
