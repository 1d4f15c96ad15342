mod macros;

use proc_macro::TokenStream;

#[proc_macro_derive(FieldSet, attributes(field))]
pub fn derive_field_set(input: TokenStream) -> TokenStream {
    macros::field_set::expand(input.into()).into()
}
