//! Attribute parsing for `#[env("KEY,flag,...")]` and `#[env(nested)]`.
//!
//! The tag string itself is *not* interpreted here: it is captured verbatim
//! and handed to the runtime descriptor parser on every walk, so the
//! lenient flag grammar (unknown flags ignored) lives in exactly one place.
//! The macro level only distinguishes the three field shapes:
//!
//! - `#[env("...")]` — a leaf, bound through the runtime probe
//! - `#[env(nested)]` — a branch, recursed into unconditionally
//! - no attribute — the field does not participate in any pass

use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{
    Attribute, Data, DeriveInput, Error as SynError, Field, Fields, GenericArgument, Ident,
    LitStr, PathArguments, Result as SynResult, Type,
};

/// How one field participates in the traversal passes.
pub enum FieldKind {
    /// A leaf bound to an external key through the runtime probe.
    Leaf {
        /// The raw tag literal, parsed into a descriptor at runtime.
        tag: String,
    },

    /// A nested configuration struct, recursed into unconditionally.
    Nested {
        /// Whether the field is `Option<Nested>` and must be allocated
        /// before recursion.
        optional: bool,
    },

    /// No `#[env]` attribute: ignored by all passes.
    Skipped,
}

/// One parsed field of the deriving struct, in declaration order.
pub struct FieldSpec {
    pub ident: Ident,
    pub ty: Type,
    pub kind: FieldKind,
}

/// Parses every field of the input struct, preserving declaration order.
pub fn parse_fields(input: &DeriveInput) -> SynResult<Vec<FieldSpec>> {
    extract_named_fields(input)?.iter().map(parse_field).collect()
}

/// Extract named fields from the struct, rejecting invalid shapes.
fn extract_named_fields(input: &DeriveInput) -> SynResult<&Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            // Named fields: struct Foo { bar: i32 }
            Fields::Named(fields_named) => Ok(&fields_named.named),

            // Tuple struct: struct Foo(i32)
            Fields::Unnamed(_) => Err(SynError::new_spanned(
                input,
                "EnvBind does not support tuple structs",
            )),

            // Unit struct: struct Foo;
            Fields::Unit => Err(SynError::new_spanned(
                input,
                "EnvBind does not support unit structs",
            )),
        },

        Data::Enum(_) => Err(SynError::new_spanned(
            input,
            "EnvBind can only be derived for structs, not enums",
        )),

        Data::Union(_) => Err(SynError::new_spanned(
            input,
            "EnvBind can only be derived for structs, not unions",
        )),
    }
}

fn parse_field(field: &Field) -> SynResult<FieldSpec> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| SynError::new_spanned(field, "EnvBind fields must be named"))?;

    let mut kind = FieldKind::Skipped;

    for attr in &field.attrs {
        if !attr.path().is_ident("env") {
            continue;
        }

        if !matches!(kind, FieldKind::Skipped) {
            return Err(SynError::new_spanned(
                attr,
                "duplicate #[env(...)] attribute",
            ));
        }

        kind = parse_env_attr(attr, field)?;
    }

    Ok(FieldSpec {
        ident,
        ty: field.ty.clone(),
        kind,
    })
}

fn parse_env_attr(attr: &Attribute, field: &Field) -> SynResult<FieldKind> {
    // Leaf form: #[env("KEY,flag,...")]
    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(FieldKind::Leaf { tag: lit.value() });
    }

    // Branch form: #[env(nested)]
    if let Ok(ident) = attr.parse_args::<Ident>() {
        if ident == "nested" {
            return Ok(FieldKind::Nested {
                optional: option_inner(&field.ty).is_some(),
            });
        }

        return Err(SynError::new(
            ident.span(),
            "unknown #[env(...)] argument; expected a tag string or `nested`",
        ));
    }

    Err(SynError::new_spanned(
        attr,
        r#"expected #[env("KEY[,flag]*")] or #[env(nested)]"#,
    ))
}

/// Returns the `T` of `Option<T>` when the type is syntactically an option.
///
/// Recognizes `Option`, `std::option::Option`, and `core::option::Option`.
/// A renamed alias is invisible here, as with every syntactic derive.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
