//! Lifecycle logging demonstration
//!
//! Drives a desktop owner through a typical activity lifetime while a
//! `MainScreen` logs each transition.
//!
//! Run with:
//! ```bash
//! cargo run -p core-lifecycle --example main_screen
//!
//! # JSON lines instead of text
//! cargo run -p core-lifecycle --example main_screen -- json
//! ```

use bridge_desktop::{ConsoleLogger, HostLifecycleOwner};
use bridge_traits::lifecycle::{LifecyclePhase, LifecycleState};
use bridge_traits::time::{LogLevel, LoggerSink};
use core_lifecycle::Screen;
use core_runtime::config::ScreenConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let json = env::args().nth(1).as_deref() == Some("json");

    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(LogLevel::Debug),
    )?;

    let console = if json {
        ConsoleLogger::new(LogLevel::Debug).json()
    } else {
        ConsoleLogger::new(LogLevel::Debug)
    };
    let sink: Arc<dyn LoggerSink> = Arc::new(console);

    let config = ScreenConfig::builder()
        .screen_name("MainScreen")
        .log_tag("TAG")
        .phase_label(LifecyclePhase::Created, "onCreate")
        .logger_sink(sink)
        .build()?;

    let activity = HostLifecycleOwner::new("MainActivity");
    let screen = Screen::mount(config, activity.clone());

    info!("Activity launched");
    activity.move_to(LifecycleState::Resumed);

    info!("Activity sent to background");
    activity.move_to(LifecycleState::Created);

    info!("Activity returned to foreground");
    activity.move_to(LifecycleState::Resumed);

    info!("Host broadcast an unrecognised event");
    activity.emit_code("ON_ANY");

    info!("Activity finishing");
    activity.move_to(LifecycleState::Destroyed);

    screen.unmount();
    info!(observers = activity.registry().observer_count(), "Screen unmounted");

    Ok(())
}
