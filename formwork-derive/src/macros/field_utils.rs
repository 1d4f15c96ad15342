//! Shared utilities for detecting form fields among struct members.

use syn::{Attribute, Type};

/// Field types that are detected by type name.
const BUILTIN_FIELD_TYPES: &[&str] = &["FieldNode", "DateRange", "Address"];

/// What a `#[field]` attribute asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAttribute {
    /// No attribute: detect by type.
    Absent,
    /// `#[field]`: always include (custom `Field` implementations).
    Include,
    /// `#[field(skip)]`: never include.
    Skip,
}

/// Check if a type is a built-in field type (FieldNode, DateRange, Address)
pub fn is_builtin_field_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return BUILTIN_FIELD_TYPES.contains(&segment.ident.to_string().as_str());
    }
    false
}

/// Parse the #[field] attribute of a struct member
pub fn field_attribute(attrs: &[Attribute]) -> syn::Result<FieldAttribute> {
    let mut result = FieldAttribute::Absent;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
        if matches!(attr.meta, syn::Meta::Path(_)) {
            result = FieldAttribute::Include;
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                result = FieldAttribute::Skip;
                Ok(())
            } else {
                Err(meta.error("unknown field option, expected `skip`"))
            }
        })?;
    }
    Ok(result)
}

/// Check if a struct member is a form field (built-in type or marked with #[field])
pub fn is_form_field(ty: &Type, attrs: &[Attribute]) -> syn::Result<bool> {
    Ok(match field_attribute(attrs)? {
        FieldAttribute::Include => true,
        FieldAttribute::Skip => false,
        FieldAttribute::Absent => is_builtin_field_type(ty),
    })
}
