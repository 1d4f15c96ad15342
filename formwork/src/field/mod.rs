//! Fields: the primitive node, its kinds, and the composites built from it.

mod address;
mod date;
mod kind;
mod node;
mod range;
mod traits;

pub use address::Address;
pub use date::zero_pad_date;
pub use kind::{FieldKind, SelectMode};
pub use node::{ChoiceOption, FieldNode};
pub use range::DateRange;
pub use traits::{Field, FieldSet};

pub(crate) use node::submission_key;
