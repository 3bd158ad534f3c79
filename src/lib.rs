//! # immutable-instance
//!
//! Treat a chain of calls on an immutable value object as if it were
//! in-place mutation.
//!
//! Domain types that return a new instance from every "mutating" operation
//! stay immutable; a [`StandIn`] threads the newest instance through a call
//! chain and reports each one to a change notifier.
//!
//! ## Stand-ins (core)
//!
//! - [`wrap`] - build a stand-in from an instance and a notifier
//! - [`StandIn<T>`] - reads through `Deref`, state-changing calls through
//!   the associated functions [`StandIn::apply`] / [`StandIn::try_apply`]
//! - [`transitions!`] - declare a type's state-changing operations once and
//!   call them on the stand-in by name
//!
//! ## Bindings
//!
//! - [`Binding<T>`] - owns the current instance, supplies its setter as the
//!   notifier, memoizes its stand-in per generation
//! - Subscriptions and generation-checked updates
//!
//! ```
//! use immutable_instance::{transitions, Binding};
//!
//! #[derive(Debug)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! impl Counter {
//!     fn increment(&self) -> Self {
//!         Counter { count: self.count + 1 }
//!     }
//! }
//!
//! transitions! {
//!     trait CounterTransitions for Counter {
//!         fn increment(&self) -> Self;
//!     }
//! }
//!
//! let counter = Binding::new(Counter { count: 0 });
//! counter.view().increment().increment();
//!
//! assert_eq!(counter.view().count, 2);
//! assert_eq!(counter.generation(), 2);
//! ```

pub mod binding;
pub mod standin;

// Re-export main types for convenience
pub use binding::{Binding, BindingError, Subscription};
pub use standin::{wrap, Notifier, StandIn};
