//! Code generation for the `EnvBind` derive.
//!
//! Expands one `impl ::envbind::EnvBind` block with the three passes. Every
//! pass emits one statement per field in declaration order — that single
//! property gives the engine its deterministic traversal, its stable
//! missing-required ordering, and the report's row order.
//!
//! Leaf statements rebuild the field's descriptor from the captured tag
//! literal and dispatch through the autoref probe, so a field type's own
//! `Unmarshaller` impl takes precedence over the conversion registry
//! without the macro knowing which capability the type has.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result as SynResult};

use crate::parse::{FieldKind, FieldSpec, parse_fields};

/// Expands the derive input into the `EnvBind` impl.
pub fn expand(input: &DeriveInput) -> SynResult<TokenStream> {
    let specs = parse_fields(input)?;

    let name = &input.ident;
    let owner = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let bind_stmts: Vec<_> = specs.iter().map(|spec| bind_stmt(&owner, spec)).collect();
    let export_stmts: Vec<_> = specs.iter().map(|spec| export_stmt(&owner, spec)).collect();
    let report_stmts: Vec<_> = specs.iter().map(|spec| report_stmt(&owner, spec)).collect();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::envbind::EnvBind for #name #ty_generics #where_clause {
            fn bind_fields(
                &mut self,
                __ctx: &mut ::envbind::walk::BindContext<'_>,
            ) -> ::std::result::Result<(), ::envbind::Error> {
                #(#bind_stmts)*
                ::std::result::Result::Ok(())
            }

            fn export_fields(&self, __out: &mut ::std::vec::Vec<::std::string::String>) {
                #(#export_stmts)*
            }

            fn report_fields(&self, __rows: &mut ::std::vec::Vec<::envbind::ReportRow>) {
                #(#report_stmts)*
            }
        }
    })
}

/// The descriptor construction shared by every leaf statement.
fn descriptor(owner: &str, spec: &FieldSpec, tag: &str) -> TokenStream {
    let field_name = spec.ident.to_string();

    quote! {
        let __desc = ::envbind::FieldDescriptor::parse(
            ::std::option::Option::Some(#tag),
            #owner,
            #field_name,
        );
    }
}

fn bind_stmt(owner: &str, spec: &FieldSpec) -> TokenStream {
    let ident = &spec.ident;

    match &spec.kind {
        FieldKind::Leaf { tag } => {
            let ty = &spec.ty;
            let desc = descriptor(owner, spec, tag);

            quote! {
                {
                    #desc
                    #[allow(unused_imports)]
                    use ::envbind::walk::{ViaUnmarshaller as _, ViaValue as _};
                    (&&::envbind::walk::Leaf::<#ty>::new())
                        .bind(&mut self.#ident, &__desc, __ctx)?;
                }
            }
        }

        FieldKind::Nested { optional: false } => quote! {
            ::envbind::EnvBind::bind_fields(&mut self.#ident, __ctx)?;
        },

        // Unset branch-by-reference: allocate before recursion so nested
        // required checks fire.
        FieldKind::Nested { optional: true } => quote! {
            ::envbind::EnvBind::bind_fields(
                self.#ident.get_or_insert_with(::std::default::Default::default),
                __ctx,
            )?;
        },

        FieldKind::Skipped => quote! {},
    }
}

fn export_stmt(owner: &str, spec: &FieldSpec) -> TokenStream {
    let ident = &spec.ident;

    match &spec.kind {
        FieldKind::Leaf { tag } => {
            let ty = &spec.ty;
            let desc = descriptor(owner, spec, tag);

            quote! {
                {
                    #desc
                    #[allow(unused_imports)]
                    use ::envbind::walk::{ViaUnmarshaller as _, ViaValue as _};
                    (&&::envbind::walk::Leaf::<#ty>::new())
                        .export(&self.#ident, &__desc, __out);
                }
            }
        }

        FieldKind::Nested { optional: false } => quote! {
            ::envbind::EnvBind::export_fields(&self.#ident, __out);
        },

        FieldKind::Nested { optional: true } => quote! {
            if let ::std::option::Option::Some(__nested) = &self.#ident {
                ::envbind::EnvBind::export_fields(__nested, __out);
            }
        },

        FieldKind::Skipped => quote! {},
    }
}

fn report_stmt(owner: &str, spec: &FieldSpec) -> TokenStream {
    let ident = &spec.ident;

    match &spec.kind {
        FieldKind::Leaf { tag } => {
            let ty = &spec.ty;
            let desc = descriptor(owner, spec, tag);

            quote! {
                {
                    #desc
                    #[allow(unused_imports)]
                    use ::envbind::walk::{ViaUnmarshaller as _, ViaValue as _};
                    (&&::envbind::walk::Leaf::<#ty>::new())
                        .report(&self.#ident, &__desc, __rows);
                }
            }
        }

        FieldKind::Nested { optional: false } => quote! {
            ::envbind::EnvBind::report_fields(&self.#ident, __rows);
        },

        FieldKind::Nested { optional: true } => quote! {
            if let ::std::option::Option::Some(__nested) = &self.#ident {
                ::envbind::EnvBind::report_fields(__nested, __rows);
            }
        },

        FieldKind::Skipped => quote! {},
    }
}
