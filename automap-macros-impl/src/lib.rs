#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use proc_macro2::{Delimiter, Group, TokenStream, TokenTree};

mod parsed;
pub use parsed::*;

mod parse;
pub use parse::parse_struct;

mod emit;
pub use emit::emit_struct;

/// Main entry point for `#[derive(Automap)]`.
///
/// Parse errors come back as a `compile_error!` invocation spanned on the offending
/// token, never as a panic.
pub fn derive_automap(input: TokenStream) -> TokenStream {
    let input = flatten_transparent_groups(input);
    match parse_struct(input) {
        Ok(parsed) => emit_struct(&parsed),
        Err(err) => err.to_compile_error(),
    }
}

/// Recursively flattens groups with `Delimiter::None`.
///
/// `macro_rules!` wraps captured fragments such as `$vis:vis` or `$ty:ty` in such
/// groups; unwrapping them lets the grammar see `pub` as a plain keyword.
fn flatten_transparent_groups(input: TokenStream) -> TokenStream {
    input
        .into_iter()
        .flat_map(|tt| match tt {
            TokenTree::Group(group) if group.delimiter() == Delimiter::None => {
                flatten_transparent_groups(group.stream())
            }
            TokenTree::Group(group) => {
                let mut flattened =
                    Group::new(group.delimiter(), flatten_transparent_groups(group.stream()));
                flattened.set_span(group.span());
                core::iter::once(TokenTree::Group(flattened)).collect()
            }
            other => core::iter::once(other).collect(),
        })
        .collect()
}
