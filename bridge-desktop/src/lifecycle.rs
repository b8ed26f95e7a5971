//! In-process lifecycle authority for desktop hosts.

use bridge_traits::lifecycle::{
    Lifecycle, LifecycleObserver, LifecycleOwner, LifecyclePhase, LifecycleState, OwnerId,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace, warn};

/// Observer registry and state machine for one lifecycle owner.
///
/// Mirrors what mobile hosts provide natively: observers are notified in
/// registration order, an observer added late receives the phases needed to
/// catch up with the current state, and an observer is only ever registered
/// once. No lock is held while observers run, so an observer may add or
/// remove observers (including itself) from inside its callback.
pub struct LifecycleRegistry {
    owner: Weak<dyn LifecycleOwner>,
    inner: Mutex<RegistryState>,
    replay_on_subscribe: bool,
}

struct RegistryState {
    state: LifecycleState,
    observers: Vec<Arc<dyn LifecycleObserver>>,
}

impl LifecycleRegistry {
    /// Create a registry for `owner` in the `Initialized` state.
    ///
    /// The owner is held weakly; the registry is normally a field of the
    /// owner itself.
    pub fn new(owner: Weak<dyn LifecycleOwner>) -> Self {
        Self {
            owner,
            inner: Mutex::new(RegistryState {
                state: LifecycleState::Initialized,
                observers: Vec::new(),
            }),
            replay_on_subscribe: true,
        }
    }

    /// Enable or disable catch-up delivery to newly added observers.
    pub fn with_replay(mut self, replay: bool) -> Self {
        self.replay_on_subscribe = replay;
        self
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    pub fn is_registered(&self, observer: &Arc<dyn LifecycleObserver>) -> bool {
        self.lock()
            .observers
            .iter()
            .any(|existing| Arc::ptr_eq(existing, observer))
    }

    /// Record `phase` and dispatch it to every registered observer.
    ///
    /// `Unknown` phases are dispatched without changing the state.
    pub fn handle_event(&self, phase: LifecyclePhase) {
        let observers = {
            let mut inner = self.lock();
            if let Some(next) = phase.target_state() {
                inner.state = next;
            }
            inner.observers.clone()
        };

        let Some(owner) = self.owner.upgrade() else {
            warn!(phase = %phase, "Lifecycle owner dropped; phase not dispatched");
            return;
        };

        trace!(
            owner = %owner.owner_id(),
            phase = %phase,
            observers = observers.len(),
            "Dispatching lifecycle phase"
        );

        for observer in observers {
            // Removed by an earlier observer during this dispatch.
            if !self.is_registered(&observer) {
                continue;
            }
            observer.on_state_changed(owner.as_ref(), phase);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Lifecycle for LifecycleRegistry {
    fn add_observer(&self, observer: Arc<dyn LifecycleObserver>) -> bool {
        let current = {
            let mut inner = self.lock();
            if inner
                .observers
                .iter()
                .any(|existing| Arc::ptr_eq(existing, &observer))
            {
                debug!("Observer already registered; ignoring");
                return false;
            }
            inner.observers.push(Arc::clone(&observer));
            inner.state
        };

        if !self.replay_on_subscribe {
            return true;
        }

        let catch_up = LifecycleState::Initialized.events_towards(current);
        if catch_up.is_empty() {
            return true;
        }

        if let Some(owner) = self.owner.upgrade() {
            for phase in catch_up {
                if !self.is_registered(&observer) {
                    break;
                }
                observer.on_state_changed(owner.as_ref(), phase);
            }
        }

        true
    }

    fn remove_observer(&self, observer: &Arc<dyn LifecycleObserver>) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner
            .observers
            .retain(|existing| !Arc::ptr_eq(existing, observer));
        before != inner.observers.len()
    }

    fn current_state(&self) -> LifecycleState {
        self.lock().state
    }
}

/// Desktop screen or window handle driving its own [`LifecycleRegistry`].
pub struct HostLifecycleOwner {
    id: OwnerId,
    name: String,
    registry: LifecycleRegistry,
}

impl HostLifecycleOwner {
    /// Create an owner whose registry replays catch-up phases to late observers.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::build(name.into(), OwnerId::new(), true)
    }

    /// Create an owner that reports an existing id, as a host does when it
    /// recreates a screen after a configuration change.
    pub fn with_id(name: impl Into<String>, id: OwnerId) -> Arc<Self> {
        Self::build(name.into(), id, true)
    }

    /// Create an owner whose registry only forwards phases emitted after an
    /// observer was added.
    pub fn without_replay(name: impl Into<String>) -> Arc<Self> {
        Self::build(name.into(), OwnerId::new(), false)
    }

    fn build(name: String, id: OwnerId, replay: bool) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let owner: Weak<dyn LifecycleOwner> = weak.clone();
            Self {
                id,
                name,
                registry: LifecycleRegistry::new(owner).with_replay(replay),
            }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &LifecycleRegistry {
        &self.registry
    }

    /// Emit a single phase.
    pub fn emit(&self, phase: LifecyclePhase) {
        debug!(owner = %self.name, phase = %phase, "Emitting lifecycle phase");
        self.registry.handle_event(phase);
    }

    /// Emit a phase reported by the platform as an event code.
    pub fn emit_code(&self, code: &str) {
        self.emit(LifecyclePhase::from_code(code));
    }

    /// Drive the owner to `state`, emitting each intermediate phase.
    pub fn move_to(&self, state: LifecycleState) {
        for phase in self.registry.current_state().events_towards(state) {
            self.emit(phase);
        }
    }
}

impl LifecycleOwner for HostLifecycleOwner {
    fn owner_id(&self) -> OwnerId {
        self.id
    }

    fn lifecycle(&self) -> &dyn Lifecycle {
        &self.registry
    }
}

impl std::fmt::Debug for HostLifecycleOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostLifecycleOwner")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.registry.current_state())
            .field("observers", &self.registry.observer_count())
            .finish()
    }
}
