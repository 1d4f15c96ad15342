//! Attribute storage and propagation between fields.

mod broadcast;
mod set;
mod store;

pub use broadcast::{Broadcaster, DependentKey};
pub use set::{AttributePropagation, AttributeSet, Disabled};
pub use store::AttributeStore;
