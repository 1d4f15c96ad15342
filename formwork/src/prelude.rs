//! Prelude module for convenient imports.
//!
//! ```ignore
//! use formwork::prelude::*;
//! ```

// Core types
pub use crate::attributes::{AttributePropagation, AttributeSet, AttributeStore, Disabled};
pub use crate::config::FormConfig;
pub use crate::context::FormContext;
pub use crate::error::{FormError, RenderError, ValidationError};
pub use crate::field::{Address, DateRange, Field, FieldKind, FieldNode, FieldSet, SelectMode};
pub use crate::form::{Enctype, Form, Method};
pub use crate::submission::{Submission, SubmittedValue, UploadedFile};
pub use crate::validation::{RuleSpec, RuleTable, Validator};

// Derive macros
pub use formwork_derive::FieldSet;
