//! Screen-level lifecycle logging.
//!
//! [`ScreenLifecycleLogger`] turns `(screen, phase)` pairs into one host log
//! line each. [`Screen`] is the element that owns a bridge for as long as it
//! is mounted.

use crate::bridge::{Activation, LifecycleBridge};
use bridge_traits::lifecycle::{LifecycleOwner, LifecyclePhase, OwnerId};
use bridge_traits::time::LogEntry;
use core_runtime::config::ScreenConfig;
use std::sync::Arc;
use tracing::{debug, warn};

/// Writes a line such as `MainScreen: ON_RESUME` for every phase.
#[derive(Debug, Clone)]
pub struct ScreenLifecycleLogger {
    config: ScreenConfig,
}

impl ScreenLifecycleLogger {
    pub fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    pub fn screen_name(&self) -> &str {
        &self.config.screen_name
    }

    /// Text of the line written for `phase`.
    ///
    /// A configured phase label wins over the event code and the
    /// unknown-event message.
    pub fn line_for(&self, phase: LifecyclePhase) -> String {
        let label = match (self.config.phase_labels.get(&phase), phase) {
            (Some(label), _) => label.as_str(),
            (None, LifecyclePhase::Unknown) => self.config.unknown_event_message.as_str(),
            (None, known) => known.as_code(),
        };
        format!("{}: {}", self.config.screen_name, label)
    }

    /// Write one entry for `phase` to the configured sink.
    ///
    /// Sink failures are reported through `tracing` and otherwise ignored.
    pub fn record(&self, owner: OwnerId, phase: LifecyclePhase) {
        let entry = LogEntry::new(
            self.config.log_level,
            self.config.log_tag.clone(),
            self.line_for(phase),
        )
        .with_field("screen", self.config.screen_name.clone())
        .with_field("phase", phase.as_code())
        .with_field("owner", owner.to_string())
        .with_timestamp(self.config.clock.now());

        if let Err(err) = self.config.logger_sink.log(entry) {
            warn!(
                screen = %self.config.screen_name,
                phase = %phase,
                error = %err,
                "Failed to write lifecycle line"
            );
        }
    }
}

/// A mounted screen observing its owner's lifecycle.
///
/// Call [`recompose`](Self::recompose) as often as the UI redraws; the
/// subscription only changes when the owner does. Unmounting or dropping the
/// screen removes the observer.
#[derive(Debug)]
pub struct Screen {
    logger: Arc<ScreenLifecycleLogger>,
    bridge: LifecycleBridge,
}

impl Screen {
    pub fn mount(config: ScreenConfig, owner: Arc<dyn LifecycleOwner>) -> Self {
        let logger = Arc::new(ScreenLifecycleLogger::new(config));
        let forward = Arc::clone(&logger);
        let mut bridge = LifecycleBridge::new(move |source, phase| {
            forward.record(source.owner_id(), phase);
        });

        debug!(screen = %logger.screen_name(), owner = %owner.owner_id(), "Mounting screen");
        bridge.activate(owner);

        Self { logger, bridge }
    }

    /// Re-run the screen with the owner currently in scope.
    pub fn recompose(&mut self, owner: Arc<dyn LifecycleOwner>) -> Activation {
        self.bridge.activate(owner)
    }

    pub fn owner_id(&self) -> Option<OwnerId> {
        self.bridge.owner_id()
    }

    pub fn logger(&self) -> &ScreenLifecycleLogger {
        &self.logger
    }

    pub fn unmount(mut self) {
        debug!(screen = %self.logger.screen_name(), "Unmounting screen");
        self.bridge.deactivate();
    }
}
