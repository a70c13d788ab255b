use proc_macro2::{Literal, TokenStream};
use quote::{quote, quote_spanned};

use crate::PStruct;

/// Generates the `Automap`, `Reflect` and `ReflectStruct` impls for a parsed struct.
pub fn emit_struct(parsed: &PStruct) -> TokenStream {
    let struct_name = &parsed.name;
    let struct_name_str = Literal::string(&crate::unraw(struct_name));

    let tagged: Vec<_> = parsed.tagged_fields().collect();

    let field_descriptors = tagged.iter().map(|field| {
        let name = Literal::string(&field.name());
        let ty = &field.ty;
        let tags = field.tags.iter().map(|tag| {
            let key = Literal::string(&tag.key);
            let value = &tag.value;
            quote_spanned! { tag.span => ::automap::Tag::new(#key, #value) }
        });
        quote! {
            ::automap::Field::builder()
                .name(#name)
                .shape(|| <#ty as ::automap::Automap>::SHAPE)
                .tags(&const { [#(#tags),*] })
                .build()
        }
    });

    // an empty array literal in an inline const has no element type to infer
    let fields = if tagged.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#field_descriptors),*] } }
    };

    let indices: Vec<_> = (0..tagged.len()).map(Literal::usize_unsuffixed).collect();
    let idents: Vec<_> = tagged.iter().map(|field| &field.ident).collect();

    quote! {
        #[automatically_derived]
        impl ::automap::Automap for #struct_name {
            const SHAPE: &'static ::automap::Shape = &const {
                ::automap::Shape::builder_for_sized::<Self>(#struct_name_str)
                    .def(::automap::Def::Struct(::automap::StructType::new(#fields)))
                    .build()
            };
        }

        #[automatically_derived]
        impl ::automap::Reflect for #struct_name {
            #[inline]
            fn shape(&self) -> &'static ::automap::Shape {
                <Self as ::automap::Automap>::SHAPE
            }

            #[inline]
            fn peek(&self) -> ::automap::Peek<'_> {
                ::automap::Peek::Struct(self)
            }

            #[inline]
            fn poke(&mut self) -> ::automap::Poke<'_> {
                ::automap::Poke::Struct(self)
            }
        }

        #[automatically_derived]
        impl ::automap::ReflectStruct for #struct_name {
            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::automap::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn ::automap::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::automap::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn ::automap::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
