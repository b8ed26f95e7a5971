//! Lifecycle Owners and Observers
//!
//! Contract between the core and the host runtime that owns screens and
//! windows. The host decides when an owner is created, started, paused and
//! destroyed; the core only observes those transitions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::platform::PlatformSendSync;

/// Stable identity of a lifecycle owner.
///
/// Two handles that refer to the same owner report the same id, which is
/// what the core keys subscriptions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Transition event emitted by a lifecycle owner.
///
/// Within one activation cycle phases arrive in the order
/// `Created → Started → Resumed → Paused → Stopped → Destroyed`; an owner may
/// loop through `Started … Stopped` several times before it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
    /// Any event outside the six named phases.
    Unknown,
}

impl LifecyclePhase {
    /// Map a host event code (e.g. `"ON_RESUME"`) to a phase.
    ///
    /// Unrecognised codes become [`LifecyclePhase::Unknown`] rather than an
    /// error so that no host event is ever dropped.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ON_CREATE" => Self::Created,
            "ON_START" => Self::Started,
            "ON_RESUME" => Self::Resumed,
            "ON_PAUSE" => Self::Paused,
            "ON_STOP" => Self::Stopped,
            "ON_DESTROY" => Self::Destroyed,
            _ => Self::Unknown,
        }
    }

    /// Host event code for this phase.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Created => "ON_CREATE",
            Self::Started => "ON_START",
            Self::Resumed => "ON_RESUME",
            Self::Paused => "ON_PAUSE",
            Self::Stopped => "ON_STOP",
            Self::Destroyed => "ON_DESTROY",
            Self::Unknown => "ON_ANY",
        }
    }

    /// State an owner is in right after emitting this phase.
    ///
    /// `Unknown` does not move the owner and yields `None`.
    pub fn target_state(&self) -> Option<LifecycleState> {
        match self {
            Self::Created | Self::Stopped => Some(LifecycleState::Created),
            Self::Started | Self::Paused => Some(LifecycleState::Started),
            Self::Resumed => Some(LifecycleState::Resumed),
            Self::Destroyed => Some(LifecycleState::Destroyed),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

// Serialized as host event codes so unknown codes survive deserialization.
impl Serialize for LifecyclePhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for LifecyclePhase {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

/// Resting state of a lifecycle owner between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Terminal state; no further phases are expected.
    Destroyed,
    /// Constructed but not yet created.
    Initialized,
    Created,
    Started,
    Resumed,
}

impl LifecycleState {
    /// Phases a host emits, in order, to move from `self` to `target`.
    ///
    /// Nothing leaves `Destroyed`, and an owner that was never created goes
    /// nowhere downward.
    pub fn events_towards(self, target: LifecycleState) -> Vec<LifecyclePhase> {
        let mut events = Vec::new();
        let mut current = self;

        while current < target {
            let step = match current {
                Self::Destroyed => break,
                Self::Initialized => LifecyclePhase::Created,
                Self::Created => LifecyclePhase::Started,
                Self::Started => LifecyclePhase::Resumed,
                Self::Resumed => break,
            };
            events.push(step);
            current = match step.target_state() {
                Some(next) => next,
                None => break,
            };
        }

        while current > target {
            let step = match current {
                Self::Resumed => LifecyclePhase::Paused,
                Self::Started => LifecyclePhase::Stopped,
                Self::Created => LifecyclePhase::Destroyed,
                Self::Initialized | Self::Destroyed => break,
            };
            events.push(step);
            current = match step.target_state() {
                Some(next) => next,
                None => break,
            };
        }

        events
    }

    /// Whether the owner has reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// Receives phase transitions from a [`Lifecycle`].
///
/// Hosts invoke observers synchronously on the thread that emits the phase.
pub trait LifecycleObserver: PlatformSendSync {
    fn on_state_changed(&self, source: &dyn LifecycleOwner, phase: LifecyclePhase);
}

/// Host-side lifecycle authority of one owner.
///
/// # Platform Support
///
/// - **Android**: `androidx.lifecycle.Lifecycle` of an Activity or Fragment
/// - **iOS**: scene / view controller appearance callbacks
/// - **Desktop**: window create/focus/minimize/close events
///
/// Observer identity is the `Arc` allocation: removing an observer removes
/// the registration made with that same `Arc`, never a different one.
pub trait Lifecycle: PlatformSendSync {
    /// Register an observer. Returns `false` if it was already registered.
    fn add_observer(&self, observer: Arc<dyn LifecycleObserver>) -> bool;

    /// Remove a previously added observer. Returns `false` if it was not
    /// registered.
    fn remove_observer(&self, observer: &Arc<dyn LifecycleObserver>) -> bool;

    /// Current resting state.
    fn current_state(&self) -> LifecycleState;
}

/// Entity whose existence and phase are managed by the host.
pub trait LifecycleOwner: PlatformSendSync {
    fn owner_id(&self) -> OwnerId;

    fn lifecycle(&self) -> &dyn Lifecycle;
}
