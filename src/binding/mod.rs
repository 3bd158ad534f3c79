//! Generation-counted ownership of the current instance.
//!
//! A binding holds the latest instance of an immutable value, supplies its
//! own setter as the notifier of the stand-ins it hands out, and re-derives
//! its stand-in only when the generation changes.

mod binding;
mod error;

pub use binding::{Binding, Subscription};
pub use error::BindingError;
