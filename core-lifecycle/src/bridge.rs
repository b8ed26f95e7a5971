//! # Lifecycle Bridge
//!
//! Subscribes a callback to a host [`Lifecycle`](bridge_traits::Lifecycle) for as long as a scope
//! holds the returned [`Subscription`].
//!
//! ## Guarantees
//!
//! - One observer is registered per subscription, and dropping (or
//!   [`Subscription::dispose`]) removes exactly that observer, once.
//! - Every phase the owner emits is forwarded synchronously, unfiltered and
//!   in emission order.
//! - [`LifecycleBridge`] keeps at most one subscription. Re-activating with
//!   the same owner is a no-op; a different owner releases the old
//!   subscription before the new one is made.
//! - Owners are compared by allocation, not by [`OwnerId`]. A host that
//!   rebuilds an owner under the same id is a different owner.
//!
//! The bridge does not check the owner's state before subscribing. What a
//! host does for an owner that is already destroyed is up to the host.
//!
//! ## Usage
//!
//! ```ignore
//! use core_lifecycle::bridge::observe;
//!
//! let subscription = observe(Arc::clone(&owner), |source, phase| {
//!     tracing::debug!(owner = %source.owner_id(), %phase, "phase changed");
//! });
//!
//! // ... owner emits phases ...
//!
//! drop(subscription); // observer removed
//! ```

use bridge_traits::lifecycle::{LifecycleObserver, LifecycleOwner, LifecyclePhase, OwnerId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callback invoked with the emitting owner and the phase.
pub type LifecycleCallback = dyn Fn(&dyn LifecycleOwner, LifecyclePhase) + Send + Sync;

/// Observer registered on the host; forwards straight to the callback.
struct ForwardingObserver {
    on_event: Arc<LifecycleCallback>,
}

impl LifecycleObserver for ForwardingObserver {
    fn on_state_changed(&self, source: &dyn LifecycleOwner, phase: LifecyclePhase) {
        (self.on_event)(source, phase);
    }
}

/// Live registration of one observer on one owner.
///
/// Removing the observer happens in `Drop`, so every exit path of the
/// enclosing scope releases it.
#[must_use = "dropping a Subscription removes the observer immediately"]
pub struct Subscription {
    owner: Arc<dyn LifecycleOwner>,
    observer: Option<Arc<dyn LifecycleObserver>>,
}

impl Subscription {
    pub fn owner(&self) -> &Arc<dyn LifecycleOwner> {
        &self.owner
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner.owner_id()
    }

    /// Whether this subscription is registered on `owner` itself.
    pub fn is_for(&self, owner: &Arc<dyn LifecycleOwner>) -> bool {
        same_owner(&self.owner, owner)
    }

    /// Remove the observer now instead of at end of scope.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(observer) = self.observer.take() {
            let removed = self.owner.lifecycle().remove_observer(&observer);
            debug!(
                owner = %self.owner.owner_id(),
                removed,
                "Lifecycle observer removed"
            );
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("owner", &self.owner.owner_id().to_string())
            .field("active", &self.observer.is_some())
            .finish()
    }
}

// Data pointers only; vtable pointers of the same object may differ.
fn same_owner(a: &Arc<dyn LifecycleOwner>, b: &Arc<dyn LifecycleOwner>) -> bool {
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

/// Register `on_event` against `owner` until the returned handle is dropped.
pub fn observe<F>(owner: Arc<dyn LifecycleOwner>, on_event: F) -> Subscription
where
    F: Fn(&dyn LifecycleOwner, LifecyclePhase) + Send + Sync + 'static,
{
    subscribe(owner, Arc::new(on_event))
}

fn subscribe(owner: Arc<dyn LifecycleOwner>, on_event: Arc<LifecycleCallback>) -> Subscription {
    let observer: Arc<dyn LifecycleObserver> = Arc::new(ForwardingObserver { on_event });
    let added = owner.lifecycle().add_observer(Arc::clone(&observer));
    debug!(owner = %owner.owner_id(), added, "Lifecycle observer registered");

    Subscription {
        owner,
        observer: Some(observer),
    }
}

/// Outcome of [`LifecycleBridge::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Nothing was active; a subscription was made.
    Subscribed,
    /// Already subscribed to this owner; nothing changed.
    Unchanged,
    /// The previous owner was released and the new one subscribed.
    Replaced { previous: OwnerId },
}

/// Keeps a single subscription keyed by owner reference.
///
/// Models an element that may be re-run many times (every redraw calls
/// [`activate`](Self::activate)) while only subscribing on real owner
/// changes. Dropping the bridge releases the subscription.
pub struct LifecycleBridge {
    on_event: Arc<LifecycleCallback>,
    subscription: Option<Subscription>,
}

impl LifecycleBridge {
    pub fn new<F>(on_event: F) -> Self
    where
        F: Fn(&dyn LifecycleOwner, LifecyclePhase) + Send + Sync + 'static,
    {
        Self::from_shared(Arc::new(on_event))
    }

    pub fn from_shared(on_event: Arc<LifecycleCallback>) -> Self {
        Self {
            on_event,
            subscription: None,
        }
    }

    /// Subscribe to `owner` unless already subscribed to it.
    pub fn activate(&mut self, owner: Arc<dyn LifecycleOwner>) -> Activation {
        let owner_id = owner.owner_id();

        let previous = match self.subscription.take() {
            Some(current) if current.is_for(&owner) => {
                self.subscription = Some(current);
                return Activation::Unchanged;
            }
            Some(current) => {
                let previous = current.owner_id();
                // Old owner must be released before the new one is observed.
                current.dispose();
                debug!(previous = %previous, owner = %owner_id, "Lifecycle owner replaced");
                Some(previous)
            }
            None => None,
        };

        self.subscription = Some(subscribe(owner, Arc::clone(&self.on_event)));

        match previous {
            Some(previous) => Activation::Replaced { previous },
            None => Activation::Subscribed,
        }
    }

    /// Release the subscription, whatever phase the owner is in.
    ///
    /// Returns `false` if nothing was active.
    pub fn deactivate(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.dispose();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn owner_id(&self) -> Option<OwnerId> {
        self.subscription.as_ref().map(Subscription::owner_id)
    }
}

impl fmt::Debug for LifecycleBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleBridge")
            .field("subscription", &self.subscription)
            .finish()
    }
}
