use proc_macro2::{Delimiter, Span, TokenStream, TokenTree};
use unsynn::*;
use std::result::Result;

use crate::{CompileError, PField, PStruct, PTag, unraw};

const ONLY_STRUCTS: &str = "#[derive(Automap)] only supports structs with named fields";
const EXPECTED_TAG: &str = r#"expected #[tag(key = "value", ...)]"#;

keyword! {
    KPub = "pub";
}

unsynn! {
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    struct Attribute {
        _pound: Pound,
        content: BracketGroup,
    }

    /// Any item with a name. The keyword is kept as a plain identifier so that
    /// `enum` and `union` get a proper error instead of a parse failure.
    struct ItemDecl {
        _attrs: Vec<Attribute>,
        _vis: Option<Vis>,
        keyword: Ident,
        name: Ident,
        body: StructBody,
    }

    enum StructBody {
        Named(BraceGroupContaining<CommaDelimitedVec<FieldDecl>>),
        Unit(Semicolon),
        Unsupported(TokenTree),
    }

    struct FieldDecl {
        attrs: Vec<Attribute>,
        _vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: FieldType,
    }

    /// `<...>` is not a group as far as proc-macros are concerned. Nesting it here
    /// keeps the commas of `HashMap<K, V>` inside the field type, and `->` is
    /// taken whole so it never closes anything.
    struct AngleTokenTree(
        Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, RArrow, TokenTree>,
    );

    struct FieldType {
        tokens: Many<Cons<Except<Comma>, AngleTokenTree>>,
    }

    /// One argument of `#[tag(...)]`, anything up to the next comma.
    struct TagArg {
        tokens: Many<Cons<Except<Comma>, TokenTree>>,
    }

    struct TagPair {
        key: Ident,
        _eq: Assign,
        value: Literal,
    }
}

type TagArgs = ParenthesisGroupContaining<CommaDelimitedVec<TagArg>>;

/// Parses the input of `#[derive(Automap)]`.
pub fn parse_struct(input: TokenStream) -> Result<PStruct, CompileError> {
    let mut tokens = input.to_token_iter();
    let decl: ItemDecl = tokens
        .parse()
        .map_err(|_| CompileError::new(Span::call_site(), ONLY_STRUCTS))?;

    if decl.keyword != "struct" {
        return Err(CompileError::new(decl.keyword.span(), ONLY_STRUCTS));
    }

    let fields = match decl.body {
        StructBody::Named(body) => body
            .content
            .into_iter()
            .map(|field| convert_field(field.value))
            .collect::<Result<_, _>>()?,
        StructBody::Unit(_) => Vec::new(),
        StructBody::Unsupported(tt) => return Err(unsupported(tt)),
    };

    Ok(PStruct {
        name: decl.name,
        fields,
    })
}

/// Explains what follows a struct name when it is not a brace-delimited body.
fn unsupported(tt: TokenTree) -> CompileError {
    let message = match &tt {
        TokenTree::Group(group) if group.delimiter() == Delimiter::Parenthesis => {
            "#[derive(Automap)] does not support tuple structs: fields are matched by tag, and need names"
        }
        TokenTree::Punct(punct) if punct.as_char() == '<' => {
            "#[derive(Automap)] does not support generic structs"
        }
        TokenTree::Ident(ident) if ident == "where" => {
            "#[derive(Automap)] does not support where clauses"
        }
        TokenTree::Group(group) if group.delimiter() == Delimiter::Brace => {
            "expected named fields"
        }
        _ => ONLY_STRUCTS,
    };
    CompileError::new(tt.span(), message)
}

fn convert_field(field: FieldDecl) -> Result<PField, CompileError> {
    let mut tags = Vec::new();
    for attr in &field.attrs {
        collect_tags(attr, &mut tags)?;
    }

    Ok(PField {
        ident: field.name,
        ty: field.ty.to_token_stream(),
        tags,
    })
}

/// Collects tags from `#[tag(...)]`; every other attribute is left alone.
fn collect_tags(attr: &Attribute, tags: &mut Vec<PTag>) -> Result<(), CompileError> {
    let mut content = attr.content.0.stream().to_token_iter();
    let name = match content.parse::<Ident>() {
        Ok(name) if name == "tag" => name,
        _ => return Ok(()),
    };

    let args: TagArgs = content
        .parse_all()
        .map_err(|_| CompileError::new(name.span(), EXPECTED_TAG))?;
    if args.content.is_empty() {
        return Err(CompileError::new(
            name.span(),
            r#"empty #[tag()], expected at least one key = "value" pair"#,
        ));
    }

    for arg in args.content.iter() {
        tags.push(convert_tag(&arg.value)?);
    }
    Ok(())
}

fn convert_tag(arg: &TagArg) -> Result<PTag, CompileError> {
    let pair = match arg.to_token_iter().parse_all::<TagPair>() {
        Ok(pair) => pair,
        Err(_) => return Err(diagnose_tag(arg)),
    };

    if !is_str_literal(&pair.value.to_string()) {
        return Err(CompileError::new(
            pair.value.span(),
            "tag values must be string literals",
        ));
    }

    Ok(PTag {
        key: unraw(&pair.key),
        value: pair.value,
        span: pair.key.span(),
    })
}

/// Finds the first token of a malformed `key = "value"` pair that does not fit.
fn diagnose_tag(arg: &TagArg) -> CompileError {
    let mut tokens = arg.to_token_iter();
    let next_span = |tokens: &TokenIter, fallback: Span| {
        tokens.clone().next().map_or(fallback, |tt| tt.span())
    };

    let key = match tokens.parse::<Ident>() {
        Ok(key) => key,
        Err(_) => {
            let span = next_span(&tokens, Span::call_site());
            return CompileError::new(span, "expected a tag key");
        }
    };
    if tokens.parse::<Assign>().is_err() {
        let span = next_span(&tokens, key.span());
        return CompileError::new(span, "expected `=` after the tag key");
    }
    if tokens.parse::<Literal>().is_err() {
        let span = next_span(&tokens, key.span());
        return CompileError::new(span, "tag values must be string literals");
    }
    CompileError::new(next_span(&tokens, key.span()), "expected `,`")
}

/// `"..."` or `r"..."`/`r#"..."#`; byte and C strings are not `&str`.
fn is_str_literal(repr: &str) -> bool {
    repr.starts_with('"') || repr.starts_with("r\"") || repr.starts_with("r#")
}
