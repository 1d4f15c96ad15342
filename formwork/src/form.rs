//! The form coordinator: owns a field set, runs the validation pass and
//! renders the `<form>` element around the fields.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::config::FormConfig;
use crate::context::FormContext;
use crate::error::{FormError, RenderError};
use crate::field::{Field, FieldKind, FieldSet, submission_key};
use crate::validation::{Params, RuleSpec, Validator};

/// HTTP method of a form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Post,
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Post => "post",
            Method::Get => "get",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Method::Post),
            "get" => Ok(Method::Get),
            other => Err(FormError::InvalidMethod(other.to_string())),
        }
    }
}

/// Encoding of a submitted form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enctype {
    #[default]
    UrlEncoded,
    Multipart,
    TextPlain,
}

impl Enctype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Enctype::UrlEncoded => "application/x-www-form-urlencoded",
            Enctype::Multipart => "multipart/form-data",
            Enctype::TextPlain => "text/plain",
        }
    }
}

impl fmt::Display for Enctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Enctype {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application/x-www-form-urlencoded" => Ok(Enctype::UrlEncoded),
            "multipart/form-data" => Ok(Enctype::Multipart),
            "text/plain" => Ok(Enctype::TextPlain),
            other => Err(FormError::InvalidEnctype(other.to_string())),
        }
    }
}

/// A form over a set of fields.
///
/// # Example
///
/// ```ignore
/// let mut form = Form::new(&cx, Signup { name, period });
/// form.add_validation("name", "min", 3)?;
///
/// if form.is_posted() && form.validate()? {
///     // store the submission
/// }
/// let html = form.render()?;
/// ```
#[derive(Debug)]
pub struct Form<F> {
    fields: F,
    name: String,
    method: Method,
    action: String,
    enctype: Enctype,
    is_valid: bool,
    validator: Validator,
    validations: Vec<(String, Vec<RuleSpec>)>,
    config: Arc<FormConfig>,
}

impl<F: FieldSet> Form<F> {
    pub fn new(cx: &FormContext, fields: F) -> Self {
        Self {
            fields,
            name: String::new(),
            method: Method::default(),
            action: String::new(),
            enctype: Enctype::default(),
            is_valid: true,
            validator: cx.validator(),
            validations: Vec::new(),
            config: cx.config().clone(),
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn into_fields(self) -> F {
        self.fields
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Set the method (`post` or `get`).
    pub fn set_method(&mut self, method: &str) -> Result<&mut Self, FormError> {
        self.method = method.parse()?;
        Ok(self)
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn set_action(&mut self, action: impl Into<String>) -> &mut Self {
        self.action = action.into();
        self
    }

    pub fn enctype(&self) -> Enctype {
        self.enctype
    }

    pub fn set_enctype(&mut self, enctype: &str) -> Result<&mut Self, FormError> {
        self.enctype = enctype.parse()?;
        Ok(self)
    }

    /// Register a rule for the field named `field`.
    ///
    /// A single parameter does not need to be wrapped in a list.
    pub fn add_validation(
        &mut self,
        field: &str,
        rule: &str,
        params: impl Into<Params>,
    ) -> Result<&mut Self, FormError> {
        let spec = RuleSpec::new(rule, params);
        self.validator.table().ensure(&spec)?;

        match self.validations.iter_mut().find(|(name, _)| *name == field) {
            Some((_, rules)) => rules.push(spec),
            None => self.validations.push((field.to_string(), vec![spec])),
        }
        Ok(self)
    }

    /// Rules registered on the form for one field.
    pub fn validations_for(&self, field: &str) -> &[RuleSpec] {
        self.validations
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or_default()
    }

    /// Run one validation pass over every field, in declaration order.
    ///
    /// Failing fields receive their joined error messages as an
    /// invalidation. Returns whether the form is valid afterwards.
    pub fn validate(&mut self) -> Result<bool, FormError> {
        let Self {
            fields,
            validator,
            validations,
            config,
            is_valid,
            ..
        } = self;
        *is_valid = true;

        for field in fields.fields_mut() {
            let name = submission_key(field.name()).to_string();
            if !field.is_posted() && !field.is_required() {
                log::debug!("Skipping field '{}': not posted and not required", name);
                continue;
            }
            log::debug!("Validating field '{}'", name);

            let custom: Vec<RuleSpec> = validations
                .iter()
                .filter(|(field_name, _)| *field_name == field.name())
                .flat_map(|(_, rules)| rules.iter().cloned())
                .collect();

            for (target, mut rules) in field.validation_plan() {
                rules.extend(custom.iter().cloned());
                if let Err(err) = validator.add_validation(target, rules, None) {
                    validator.reset();
                    log::error!("Validation pass aborted on field '{}': {}", name, err);
                    return Err(err.into());
                }
            }

            if !validator.passes() {
                let errors = validator.attribute_errors(&name);
                let message = if errors.is_empty() {
                    let all: Vec<&str> = validator
                        .errors()
                        .values()
                        .flatten()
                        .map(String::as_str)
                        .collect();
                    all.join(&config.error_separator)
                } else {
                    errors.join(&config.error_separator)
                };
                *is_valid = false;
                field.invalidate(&message);
            }
            validator.reset();
        }

        *is_valid = *is_valid && fields.fields().iter().all(|field| field.is_valid());
        Ok(*is_valid)
    }

    /// Attach an invalidation to a field and mark the form invalid.
    ///
    /// Returns `false` if no field has that name.
    pub fn invalidate(&mut self, name: &str, message: &str) -> bool {
        match self.fields.field_mut(name) {
            Some(field) => {
                field.invalidate(message);
                self.is_valid = false;
                true
            }
            None => {
                log::warn!("Cannot invalidate unknown field '{}'", name);
                false
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Check if any field was posted.
    pub fn is_posted(&self) -> bool {
        self.fields.fields().iter().any(|field| field.is_posted())
    }

    /// The opening `<form>` tag. Switches to multipart when a file field is
    /// present.
    pub fn render_head(&mut self) -> String {
        let has_file = self
            .fields
            .fields()
            .iter()
            .any(|field| field.kind() == FieldKind::File);
        if has_file {
            self.enctype = Enctype::Multipart;
        }
        format!(
            "<form name=\"{}\" method=\"{}\" action=\"{}\" enctype=\"{}\">\n",
            crate::render::escape(&self.name),
            self.method,
            crate::render::escape(&self.action),
            self.enctype
        )
    }

    pub fn render_foot(&self) -> String {
        "</form>\n".to_string()
    }

    /// Render the form head, every field and the foot.
    pub fn render(&mut self) -> Result<String, RenderError> {
        let mut out = self.render_head();
        for field in self.fields.fields_mut() {
            out.push_str(&field.render()?);
        }
        out.push_str(&self.render_foot());
        Ok(out)
    }

    /// A random alphanumeric string.
    pub fn generate_salt(length: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}
