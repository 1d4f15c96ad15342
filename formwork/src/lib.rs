//! Form fields with attribute propagation and rule-based validation.
//!
//! Fields are created through a [`FormContext`] that carries the submission
//! snapshot, the rule table and the configuration. Composite fields own
//! their children and broadcast shared attributes to them. A [`Form`] runs
//! one validation pass over its fields and renders them.

pub mod attributes;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod form;
pub mod render;
pub mod submission;
pub mod validation;

pub use config::FormConfig;
pub use context::FormContext;
pub use error::{FormError, InvalidAttributeValue, RenderError, ValidationError};
pub use field::{Address, DateRange, Field, FieldKind, FieldNode, FieldSet, SelectMode};
pub use form::{Enctype, Form, Method};
pub use formwork_derive::*;
pub use submission::{Submission, SubmittedValue, UploadedFile};

pub mod prelude;
