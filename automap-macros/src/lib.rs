#![doc = include_str!("../README.md")]

/// Derives `Automap` for a struct with named fields.
///
/// Fields are described by `#[tag(key = "value", ...)]` attributes; fields without
/// any are invisible to the mapper.
#[proc_macro_derive(Automap, attributes(tag))]
pub fn automap_macros(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    automap_macros_impl::derive_automap(input.into()).into()
}
