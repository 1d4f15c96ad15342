use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member, parse2};

use super::field_utils::is_form_field;

/// Derive macro for the FieldSet trait.
///
/// Lists the struct's form fields in declaration order. Members of type
/// `FieldNode`, `DateRange` or `Address` are detected automatically; other
/// `Field` implementations need `#[field]`, and `#[field(skip)]` excludes a
/// member.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    match expand_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn expand_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldSet can only be derived for structs",
            ));
        }
    };

    let members = form_field_members(fields)?;

    Ok(quote! {
        impl #impl_generics formwork::FieldSet for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<&dyn formwork::Field> {
                ::std::vec![#(&self.#members as &dyn formwork::Field),*]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<&mut dyn formwork::Field> {
                ::std::vec![#(&mut self.#members as &mut dyn formwork::Field),*]
            }
        }
    })
}

/// Members holding form fields, in declaration order.
fn form_field_members(fields: &Fields) -> syn::Result<Vec<Member>> {
    let mut members = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if !is_form_field(&field.ty, &field.attrs)? {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        members.push(member);
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_builtin_field_types() {
        let input: DeriveInput = syn::parse_quote! {
            struct Signup {
                name: FieldNode,
                period: formwork::DateRange,
                home: Address,
                note: String,
            }
        };
        let Data::Struct(data) = &input.data else {
            panic!("expected struct");
        };
        let members = form_field_members(&data.fields).unwrap();
        let names: Vec<String> = members
            .iter()
            .map(|m| match m {
                Member::Named(ident) => ident.to_string(),
                Member::Unnamed(index) => index.index.to_string(),
            })
            .collect();
        assert_eq!(names, ["name", "period", "home"]);
    }

    #[test]
    fn test_field_attribute_overrides_detection() {
        let input: DeriveInput = syn::parse_quote! {
            struct Custom(
                #[field] Postcode,
                #[field(skip)] FieldNode,
                FieldNode,
            );
        };
        let Data::Struct(data) = &input.data else {
            panic!("expected struct");
        };
        let members = form_field_members(&data.fields).unwrap();
        assert_eq!(
            members,
            vec![
                Member::Unnamed(Index::from(0)),
                Member::Unnamed(Index::from(2)),
            ]
        );
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Bad {
                #[field(flatten)]
                name: FieldNode,
            }
        };
        let output = expand(quote! { #input }).to_string();
        assert!(output.contains("compile_error"));
    }

    #[test]
    fn test_enum_is_rejected() {
        let output = expand(quote! { enum NotAForm { A, B } }).to_string();
        assert!(output.contains("FieldSet can only be derived for structs"));
    }
}
