use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Callback invoked with every new instance produced through a stand-in.
pub type Notifier<T> = Arc<dyn Fn(Arc<T>) + Send + Sync>;

/// A transparent view over one immutable instance and one change notifier.
///
/// Reads go straight to the wrapped instance through [`Deref`]. The
/// stand-in's own operations are associated functions, like [`Arc`]'s, so
/// every method of `T` stays reachable under its own name. Operations
/// that produce a new instance go through [`StandIn::apply`] (or a trait
/// generated by [`transitions!`](crate::transitions)), which notifies and
/// hands back a stand-in for the new instance so calls keep chaining.
///
/// # Examples
///
/// ```
/// use immutable_instance::{wrap, StandIn};
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// #[derive(Debug)]
/// struct Counter {
///     count: i64,
/// }
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let calls_clone = calls.clone();
///
/// let counter = wrap(Counter { count: 0 }, move |_| {
///     calls_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let once = StandIn::apply(&counter, |c| Counter { count: c.count + 1 });
/// let next = StandIn::apply(&once, |c| Counter { count: c.count + 1 });
///
/// assert_eq!(next.count, 2);
/// assert_eq!(counter.count, 0);
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
/// ```
pub struct StandIn<T> {
    target: Arc<T>,
    on_change: Notifier<T>,
}

impl<T> StandIn<T> {
    /// Wrap an already shared instance with an already shared notifier.
    pub fn from_shared(target: Arc<T>, on_change: Notifier<T>) -> Self {
        Self { target, on_change }
    }

    /// Run a state-changing operation on the current instance.
    ///
    /// The notifier fires exactly once with the new instance, and the
    /// returned stand-in wraps that same allocation.
    ///
    /// This is an associated function (`StandIn::apply(&s, op)`) so it never
    /// hides a method of the same name on `T`.
    pub fn apply<F>(this: &Self, op: F) -> StandIn<T>
    where
        F: FnOnce(&T) -> T,
    {
        let next = op(&this.target);
        Self::advance(this, next)
    }

    /// Run a fallible state-changing operation on the current instance.
    ///
    /// An `Err` is handed back exactly as the operation returned it and the
    /// notifier is not invoked.
    pub fn try_apply<F, E>(this: &Self, op: F) -> Result<StandIn<T>, E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = op(&this.target)?;
        Ok(Self::advance(this, next))
    }

    /// Run an operation whose result is not a new instance.
    pub fn query<F, R>(this: &Self, op: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        op(&this.target)
    }

    /// The wrapped instance.
    pub fn target(this: &Self) -> &Arc<T> {
        &this.target
    }

    /// Unwrap into the shared instance, dropping the notifier handle.
    pub fn into_target(this: Self) -> Arc<T> {
        this.target
    }

    /// The notifier shared by every stand-in in this chain.
    pub fn notifier(this: &Self) -> &Notifier<T> {
        &this.on_change
    }

    /// True when both stand-ins wrap the same allocation with the same notifier.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.target, &other.target)
            && Arc::ptr_eq(&this.on_change, &other.on_change)
    }

    // Notification and re-wrapping happen together at every state change.
    fn advance(this: &Self, next: T) -> StandIn<T> {
        let next = Arc::new(next);
        (this.on_change)(Arc::clone(&next));
        StandIn {
            target: next,
            on_change: Arc::clone(&this.on_change),
        }
    }
}

/// Wrap `target` so every state-changing call reports its result to `on_change`.
pub fn wrap<T, F>(target: T, on_change: F) -> StandIn<T>
where
    F: Fn(Arc<T>) + Send + Sync + 'static,
{
    StandIn::from_shared(Arc::new(target), Arc::new(on_change))
}

impl<T> Deref for StandIn<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.target
    }
}

impl<T> Clone for StandIn<T> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            on_change: Arc::clone(&self.on_change),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StandIn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StandIn").field(&*self.target).finish()
    }
}
