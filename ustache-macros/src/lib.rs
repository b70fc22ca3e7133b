mod to_value;

use proc_macro::TokenStream;

/// Derives `ustache::ToValue` for a struct with named fields, producing a map keyed by field
/// name.
///
/// Field attributes:
/// - `#[value("key")]` or `#[value(rename = "key")]` renames the key;
/// - `#[value(ignore)]` leaves the field out of the map.
#[proc_macro_derive(ToValue, attributes(value))]
pub fn derive_to_value(input: TokenStream) -> TokenStream {
    to_value::derive_to_value_impl(input)
}
