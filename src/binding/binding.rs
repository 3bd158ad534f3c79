use super::BindingError;
use crate::standin::{Notifier, StandIn};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    current: Arc<T>,
    generation: u64,
    view: Option<StandIn<T>>,
}

// What a change displaces. Dropped only after the slot lock is released,
// since the last reference to an old instance runs its `Drop` there.
type Displaced<T> = (Arc<T>, Option<StandIn<T>>);

impl<T> Slot<T> {
    fn advance(&mut self, next: Arc<T>) -> (u64, Displaced<T>) {
        let previous = std::mem::replace(&mut self.current, next);
        let previous_view = self.view.take();
        self.generation += 1;
        (self.generation, (previous, previous_view))
    }
}

struct Shared<T> {
    label: String,
    slot: RwLock<Slot<T>>,
    subscribers: RwLock<Vec<(usize, Subscriber<T>)>>,
    next_subscriber: AtomicUsize,
    setter: Notifier<T>,
}

impl<T> Shared<T> {
    fn commit(&self, next: Arc<T>) -> u64 {
        let (generation, displaced) = self.slot.write().advance(Arc::clone(&next));
        drop(displaced);
        self.publish(generation, &next);
        generation
    }

    // Runs with no lock held so subscribers may call back into the binding.
    fn publish(&self, generation: u64, next: &T) {
        debug!(label = %self.label, generation, "binding advanced");
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(next);
        }
    }
}

/// Owns the current instance of an immutable value and hands out stand-ins for it.
///
/// Every stand-in returned by [`Binding::view`] uses the binding's own setter
/// as its notifier, so any state-changing call made through it (or through a
/// chain started from it) replaces the binding's current instance. Each
/// accepted change bumps the binding's generation; views are memoized per
/// generation.
///
/// # Examples
///
/// ```
/// use immutable_instance::{Binding, StandIn};
///
/// #[derive(Debug)]
/// struct Todos {
///     items: Vec<String>,
/// }
///
/// let todos = Binding::new(Todos { items: vec![] });
///
/// StandIn::apply(&todos.view(), |t| {
///     let mut items = t.items.clone();
///     items.push("write docs".to_string());
///     Todos { items }
/// });
///
/// assert_eq!(todos.generation(), 1);
/// assert_eq!(todos.view().items, vec!["write docs"]);
/// ```
pub struct Binding<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + Sync + 'static> Binding<T> {
    /// Create a binding holding `initial` at generation 0.
    pub fn new(initial: T) -> Self {
        Self::named("binding", initial)
    }

    /// Create a binding whose tracing events carry `label`.
    pub fn named(label: impl Into<String>, initial: T) -> Self {
        let label = label.into();
        let shared = Arc::new_cyclic(|weak: &Weak<Shared<T>>| {
            let weak = weak.clone();
            let setter: Notifier<T> = Arc::new(move |next: Arc<T>| match weak.upgrade() {
                Some(shared) => {
                    shared.commit(next);
                }
                None => trace!("binding dropped, ignoring new instance"),
            });

            Shared {
                label,
                slot: RwLock::new(Slot {
                    current: Arc::new(initial),
                    generation: 0,
                    view: None,
                }),
                subscribers: RwLock::new(Vec::new()),
                next_subscriber: AtomicUsize::new(0),
                setter,
            }
        });

        Self { shared }
    }

    /// The stand-in for the current instance.
    ///
    /// Repeated calls return the same stand-in (see [`StandIn::ptr_eq`])
    /// until the binding changes.
    pub fn view(&self) -> StandIn<T> {
        let mut slot = self.shared.slot.write();
        let Slot {
            current,
            generation,
            view,
        } = &mut *slot;

        view.get_or_insert_with(|| {
            trace!(label = %self.shared.label, generation = *generation, "deriving view");
            StandIn::from_shared(Arc::clone(current), Arc::clone(&self.shared.setter))
        })
        .clone()
    }

    /// Replace the current instance.
    pub fn set(&self, value: T) {
        self.shared.commit(Arc::new(value));
    }

    /// Replace the current instance only if the binding is still at `expected`.
    ///
    /// Returns the new generation.
    pub fn set_if(&self, expected: u64, value: T) -> Result<u64, BindingError> {
        let next = Arc::new(value);
        let (generation, displaced) = {
            let mut slot = self.shared.slot.write();
            if slot.generation != expected {
                debug!(
                    label = %self.shared.label,
                    expected,
                    current = slot.generation,
                    "rejected stale update"
                );
                return Err(BindingError::StaleGeneration {
                    expected,
                    current: slot.generation,
                });
            }
            slot.advance(Arc::clone(&next))
        };
        drop(displaced);

        self.shared.publish(generation, &next);
        Ok(generation)
    }

    /// Subscribe to changes.
    ///
    /// The callback runs after every accepted change with the new instance.
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.shared.next_subscriber.fetch_add(1, Ordering::SeqCst);
        self.shared.subscribers.write().push((id, Arc::new(callback)));

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

impl<T> Binding<T> {
    /// The current instance.
    pub fn current(&self) -> Arc<T> {
        Arc::clone(&self.shared.slot.read().current)
    }

    /// Read the current instance with a function.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let current = self.current();
        f(&current)
    }

    /// Number of changes accepted since creation.
    pub fn generation(&self) -> u64 {
        self.shared.slot.read().generation
    }

    /// The binding's setter, usable as the notifier of any stand-in.
    pub fn notifier(&self) -> Notifier<T> {
        Arc::clone(&self.shared.setter)
    }

    /// The label recorded on this binding's tracing events.
    pub fn label(&self) -> &str {
        &self.shared.label
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.shared.slot.read();
        f.debug_struct("Binding")
            .field("label", &self.shared.label)
            .field("generation", &slot.generation)
            .field("current", &*slot.current)
            .finish()
    }
}

/// RAII guard for binding subscribers.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<T> {
    id: usize,
    shared: Weak<Shared<T>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.subscribers.write().retain(|(id, _)| *id != self.id);
        }
    }
}
