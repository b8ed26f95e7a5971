//! Behavioural tests for the lifecycle bridge
//!
//! This test suite verifies:
//! - Phases are forwarded completely and in order
//! - At most one observer is registered per bridge
//! - Teardown removes the observer on every exit path
//! - Owner replacement releases the old owner first
//! - Unknown host events are forwarded, not dropped
//! - Activation touches nothing but the observer registry

use bridge_desktop::HostLifecycleOwner;
use bridge_traits::lifecycle::{
    Lifecycle, LifecycleObserver, LifecycleOwner, LifecyclePhase, LifecycleState, OwnerId,
};
use core_lifecycle::{observe, Activation, LifecycleBridge};
use mockall::mock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

// ============================================================================
// Helpers
// ============================================================================

type Seen = Arc<Mutex<Vec<(OwnerId, LifecyclePhase)>>>;

fn recording_bridge() -> (Seen, LifecycleBridge) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let bridge = LifecycleBridge::new(move |source, phase| {
        sink.lock().unwrap().push((source.owner_id(), phase));
    });
    (seen, bridge)
}

fn phases(seen: &Seen) -> Vec<LifecyclePhase> {
    seen.lock().unwrap().iter().map(|(_, phase)| *phase).collect()
}

// ============================================================================
// Mock host lifecycle
// ============================================================================

mock! {
    pub HostLifecycle {}

    impl Lifecycle for HostLifecycle {
        fn add_observer(&self, observer: Arc<dyn LifecycleObserver>) -> bool;
        fn remove_observer(&self, observer: &Arc<dyn LifecycleObserver>) -> bool;
        fn current_state(&self) -> LifecycleState;
    }
}

struct MockOwner {
    id: OwnerId,
    lifecycle: MockHostLifecycle,
}

impl LifecycleOwner for MockOwner {
    fn owner_id(&self) -> OwnerId {
        self.id
    }

    fn lifecycle(&self) -> &dyn Lifecycle {
        &self.lifecycle
    }
}

type Captured = Arc<Mutex<Option<Arc<dyn LifecycleObserver>>>>;

/// Owner expecting exactly one add and one matching remove, and no state query.
fn strict_mock_owner() -> (Arc<MockOwner>, Captured) {
    strict_mock_owner_with_id(OwnerId::new())
}

fn strict_mock_owner_with_id(id: OwnerId) -> (Arc<MockOwner>, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));
    let mut lifecycle = MockHostLifecycle::new();

    let on_add = Arc::clone(&captured);
    lifecycle
        .expect_add_observer()
        .times(1)
        .returning(move |observer| {
            *on_add.lock().unwrap() = Some(observer);
            true
        });

    let on_remove = Arc::clone(&captured);
    lifecycle
        .expect_remove_observer()
        .withf(move |observer| {
            on_remove
                .lock()
                .unwrap()
                .as_ref()
                .is_some_and(|added| Arc::ptr_eq(added, observer))
        })
        .times(1)
        .returning(|_| true);

    lifecycle.expect_current_state().never();

    let owner = Arc::new(MockOwner {
        id,
        lifecycle,
    });
    (owner, captured)
}

// ============================================================================
// Forwarding completeness
// ============================================================================

#[test]
fn test_forwards_every_phase_in_order() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());

    let emitted = [
        LifecyclePhase::Created,
        LifecyclePhase::Started,
        LifecyclePhase::Resumed,
        LifecyclePhase::Paused,
        LifecyclePhase::Stopped,
        LifecyclePhase::Started,
        LifecyclePhase::Resumed,
        LifecyclePhase::Paused,
        LifecyclePhase::Stopped,
        LifecyclePhase::Destroyed,
    ];
    for phase in emitted {
        owner.emit(phase);
    }

    assert_eq!(phases(&seen), emitted.to_vec());
    assert!(seen
        .lock()
        .unwrap()
        .iter()
        .all(|(id, _)| *id == owner.owner_id()));
}

#[test]
fn test_forwards_repeated_phases_without_dedup() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());

    owner.emit(LifecyclePhase::Created);
    owner.emit(LifecyclePhase::Created);
    owner.emit(LifecyclePhase::Unknown);
    owner.emit(LifecyclePhase::Unknown);

    assert_eq!(
        phases(&seen),
        vec![
            LifecyclePhase::Created,
            LifecyclePhase::Created,
            LifecyclePhase::Unknown,
            LifecyclePhase::Unknown
        ]
    );
}

#[test]
fn test_forwarding_through_mock_host() {
    let (owner, captured) = strict_mock_owner();
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());

    let observer = captured
        .lock()
        .unwrap()
        .clone()
        .expect("observer registered on activation");
    observer.on_state_changed(owner.as_ref(), LifecyclePhase::Created);
    observer.on_state_changed(owner.as_ref(), LifecyclePhase::Started);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (owner.id, LifecyclePhase::Created),
            (owner.id, LifecyclePhase::Started)
        ]
    );

    assert!(bridge.deactivate());
}

// ============================================================================
// Exactly one subscription
// ============================================================================

#[test]
fn test_single_observer_after_activation() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (_seen, mut bridge) = recording_bridge();

    assert_eq!(bridge.activate(owner.clone()), Activation::Subscribed);
    assert_eq!(owner.registry().observer_count(), 1);
}

#[test]
fn test_repeated_activation_registers_once() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();

    for _ in 0..5 {
        bridge.activate(owner.clone());
    }
    assert_eq!(owner.registry().observer_count(), 1);

    owner.emit(LifecyclePhase::Created);
    assert_eq!(phases(&seen), vec![LifecyclePhase::Created]);
}

#[test]
fn test_repeated_activation_on_mock_host_adds_once() {
    // times(1) on add/remove is checked when the mock drops
    let (owner, _captured) = strict_mock_owner();
    let (_seen, mut bridge) = recording_bridge();

    assert_eq!(bridge.activate(owner.clone()), Activation::Subscribed);
    assert_eq!(bridge.activate(owner.clone()), Activation::Unchanged);
    assert_eq!(bridge.activate(owner.clone()), Activation::Unchanged);
    drop(bridge);
}

#[test]
fn test_independent_bridges_each_register() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (first_seen, mut first) = recording_bridge();
    let (second_seen, mut second) = recording_bridge();

    first.activate(owner.clone());
    second.activate(owner.clone());
    assert_eq!(owner.registry().observer_count(), 2);

    first.deactivate();
    owner.emit(LifecyclePhase::Created);

    assert!(phases(&first_seen).is_empty());
    assert_eq!(phases(&second_seen), vec![LifecyclePhase::Created]);
}

// ============================================================================
// Clean teardown
// ============================================================================

#[test]
fn test_deactivate_removes_observer_and_silences_callback() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());
    owner.emit(LifecyclePhase::Created);

    assert!(bridge.deactivate());
    assert_eq!(owner.registry().observer_count(), 0);

    owner.emit(LifecyclePhase::Started);
    owner.emit(LifecyclePhase::Resumed);
    assert_eq!(phases(&seen), vec![LifecyclePhase::Created]);
}

#[test]
fn test_dropping_bridge_removes_observer() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());

    drop(bridge);

    assert_eq!(owner.registry().observer_count(), 0);
    owner.emit(LifecyclePhase::Created);
    assert!(phases(&seen).is_empty());
}

#[test]
fn test_teardown_regardless_of_owner_phase() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (_seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());
    owner.move_to(LifecycleState::Resumed);

    assert!(bridge.deactivate());
    assert_eq!(owner.registry().observer_count(), 0);
    assert_eq!(owner.lifecycle().current_state(), LifecycleState::Resumed);
}

#[test]
fn test_teardown_on_unwinding() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let inner = owner.clone();

    let result = panic::catch_unwind(AssertUnwindSafe(move || {
        let _subscription = observe(inner, |_, _| {});
        panic!("composition aborted");
    }));

    assert!(result.is_err());
    assert_eq!(owner.registry().observer_count(), 0);
}

#[test]
fn test_mock_host_remove_matches_added_observer() {
    // withf on remove_observer asserts pointer identity with the added observer
    let (owner, captured) = strict_mock_owner();
    let subscription = observe(owner.clone(), |_, _| {});
    assert!(captured.lock().unwrap().is_some());
    subscription.dispose();
}

// ============================================================================
// Owner swap
// ============================================================================

#[test]
fn test_owner_swap_moves_the_observer() {
    let first = HostLifecycleOwner::new("First");
    let second = HostLifecycleOwner::new("Second");
    let (seen, mut bridge) = recording_bridge();

    bridge.activate(first.clone());
    let outcome = bridge.activate(second.clone());

    assert_eq!(
        outcome,
        Activation::Replaced {
            previous: first.owner_id()
        }
    );
    assert_eq!(first.registry().observer_count(), 0);
    assert_eq!(second.registry().observer_count(), 1);

    first.emit(LifecyclePhase::Created);
    second.emit(LifecyclePhase::Created);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(second.owner_id(), LifecyclePhase::Created)]
    );
}

#[test]
fn test_old_owner_released_before_new_owner_observed() {
    let first = HostLifecycleOwner::new("First");
    let second = HostLifecycleOwner::new("Second");
    second.move_to(LifecycleState::Resumed);

    // Catch-up from `second` arrives during activation; `first` must already
    // have zero observers by then.
    let first_probe = first.clone();
    let observed_counts = Arc::new(Mutex::new(Vec::new()));
    let counts = Arc::clone(&observed_counts);
    let mut bridge = LifecycleBridge::new(move |source, _| {
        if source.owner_id() != first_probe.owner_id() {
            counts
                .lock()
                .unwrap()
                .push(first_probe.registry().observer_count());
        }
    });

    bridge.activate(first.clone());
    bridge.activate(second.clone());

    let counts = observed_counts.lock().unwrap();
    assert_eq!(counts.len(), 3);
    assert!(counts.iter().all(|count| *count == 0));
}

#[test]
fn test_recreated_owner_with_same_id_is_swapped() {
    let first = HostLifecycleOwner::new("MainActivity");
    let recreated = HostLifecycleOwner::with_id("MainActivity", first.owner_id());
    let (seen, mut bridge) = recording_bridge();

    bridge.activate(first.clone());
    let outcome = bridge.activate(recreated.clone());

    assert_eq!(
        outcome,
        Activation::Replaced {
            previous: first.owner_id()
        }
    );
    assert_eq!(first.registry().observer_count(), 0);
    assert_eq!(recreated.registry().observer_count(), 1);

    first.emit(LifecyclePhase::Created);
    assert!(phases(&seen).is_empty());
    recreated.emit(LifecyclePhase::Created);
    assert_eq!(phases(&seen), vec![LifecyclePhase::Created]);
}

#[test]
fn test_mock_owners_sharing_an_id_each_add_and_remove_once() {
    // times(1) on both mocks is checked when they drop
    let id = OwnerId::new();
    let (first, first_captured) = strict_mock_owner_with_id(id);
    let (second, second_captured) = strict_mock_owner_with_id(id);
    let (_seen, mut bridge) = recording_bridge();

    assert_eq!(bridge.activate(first.clone()), Activation::Subscribed);
    assert_eq!(
        bridge.activate(second.clone()),
        Activation::Replaced { previous: id }
    );
    assert!(first_captured.lock().unwrap().is_some());
    assert!(second_captured.lock().unwrap().is_some());

    assert!(bridge.deactivate());
}

#[test]
fn test_swap_back_and_forth() {
    let first = HostLifecycleOwner::new("First");
    let second = HostLifecycleOwner::new("Second");
    let (_seen, mut bridge) = recording_bridge();

    bridge.activate(first.clone());
    bridge.activate(second.clone());
    bridge.activate(first.clone());

    assert_eq!(first.registry().observer_count(), 1);
    assert_eq!(second.registry().observer_count(), 0);
    assert_eq!(bridge.owner_id(), Some(first.owner_id()));
}

// ============================================================================
// Unknown phases
// ============================================================================

#[test]
fn test_unknown_codes_forwarded_as_unknown() {
    let owner = HostLifecycleOwner::new("MainActivity");
    let (seen, mut bridge) = recording_bridge();
    bridge.activate(owner.clone());

    owner.emit_code("ON_CREATE");
    owner.emit_code("ON_ANY");
    owner.emit_code("ON_PICTURE_IN_PICTURE");

    assert_eq!(
        phases(&seen),
        vec![
            LifecyclePhase::Created,
            LifecyclePhase::Unknown,
            LifecyclePhase::Unknown
        ]
    );
}

// ============================================================================
// Side effects
// ============================================================================

#[test]
fn test_activation_leaves_owner_state_alone() {
    let owner = HostLifecycleOwner::without_replay("MainActivity");
    owner.move_to(LifecycleState::Started);
    let (seen, mut bridge) = recording_bridge();

    bridge.activate(owner.clone());
    assert_eq!(owner.lifecycle().current_state(), LifecycleState::Started);

    bridge.deactivate();
    assert_eq!(owner.lifecycle().current_state(), LifecycleState::Started);
    assert!(phases(&seen).is_empty());
}

#[test]
fn test_subscribes_to_destroyed_owner_without_validation() {
    let owner = HostLifecycleOwner::new("MainActivity");
    owner.move_to(LifecycleState::Resumed);
    owner.move_to(LifecycleState::Destroyed);
    let (seen, mut bridge) = recording_bridge();

    assert_eq!(bridge.activate(owner.clone()), Activation::Subscribed);
    assert_eq!(owner.registry().observer_count(), 1);
    assert!(phases(&seen).is_empty());
}
