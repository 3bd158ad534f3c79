//! Stand-ins over immutable instances.
//!
//! A stand-in forwards reads to the instance it wraps and turns every
//! state-changing call into "notify, then hand back a stand-in for the new
//! instance", so chained calls always operate on the latest instance.

mod standin;
mod transitions;

pub use standin::{wrap, Notifier, StandIn};
