use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote_spanned;

/// A struct with named fields, as seen by the derive.
#[derive(Debug)]
pub struct PStruct {
    /// The struct's name
    pub name: Ident,
    /// Every declared field, tagged or not, in declaration order
    pub fields: Vec<PField>,
}

impl PStruct {
    /// Fields that carry at least one `#[tag(...)]` attribute.
    ///
    /// Only these make it into the shape; their position in this iterator is the index
    /// used by `ReflectStruct::field`.
    pub fn tagged_fields(&self) -> impl Iterator<Item = &PField> {
        self.fields.iter().filter(|field| !field.tags.is_empty())
    }
}

/// A named field.
#[derive(Debug)]
pub struct PField {
    /// The field's identifier, possibly raw (`r#type`)
    pub ident: Ident,
    /// The declared type, as written
    pub ty: TokenStream,
    /// Every `key = "value"` pair from every `#[tag(...)]` attribute, in order
    pub tags: Vec<PTag>,
}

impl PField {
    /// The field name as it should be reported, without any `r#` prefix.
    pub fn name(&self) -> String {
        unraw(&self.ident)
    }
}

/// One `key = "value"` pair from a `#[tag(...)]` attribute.
#[derive(Debug)]
pub struct PTag {
    /// The key, without any `r#` prefix
    pub key: String,
    /// The value, a string literal kept as written
    pub value: Literal,
    /// Where the key was written
    pub span: Span,
}

/// A parse failure, reported as a `compile_error!` at `span`.
#[derive(Debug)]
pub struct CompileError {
    /// What went wrong
    pub message: String,
    /// Where it went wrong
    pub span: Span,
}

impl CompileError {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Turns the error into tokens that fail compilation with the message.
    pub fn to_compile_error(&self) -> TokenStream {
        let message = &self.message;
        quote_spanned! { self.span =>
            ::core::compile_error!(#message);
        }
    }
}

pub(crate) fn unraw(ident: &Ident) -> String {
    let s = ident.to_string();
    match s.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}
