//! Rule-based validation of submitted values.
//!
//! This module provides the validation engine used by forms, the rule spec
//! language (`name:param1,param2`, pipe-joined) and the injectable rule table
//! that maps rule names to predicates and messages.
//!
//! # Example
//!
//! ```ignore
//! use formwork::validation::{RuleTable, Validator};
//!
//! let mut validator = Validator::new(Arc::new(RuleTable::standard()));
//! validator.add_validation(&username, "required|alpha_dash|between:3,16", None)?;
//! validator.add_validation(&email, "required|email", None)?;
//!
//! if !validator.passes() {
//!     for (field, errors) in validator.errors() {
//!         // ...
//!     }
//! }
//! ```

mod catalogue;
mod messages;
mod rules;
mod table;
mod validator;

pub use catalogue::{is_alpha_dash, matches_date_format};
pub use messages::{DefaultMessages, MessageResolver, label_for, replace_attribute};
pub use rules::{Params, RuleList, RuleSpec, rule_name};
pub use table::{Rule, RuleTable};
pub use validator::{PendingValidation, ValidationTarget, Validator};
