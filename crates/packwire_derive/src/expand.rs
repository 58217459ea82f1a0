use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{
    DeriveInput, Fields, Generics, Ident, Index, Member, Result, Type, ext::IdentExt, parse_quote,
};

use crate::shape::{Alternative, Shape};

pub fn derive(input: &DeriveInput) -> Result<TokenStream> {
    Ok(match Shape::resolve(input)? {
        Shape::Transparent(fields) => transparent(input, fields),
        Shape::Enumerated { repr, variants } => {
            let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
            enumerated(input, &repr, &idents)
        }
        Shape::Union {
            discriminant,
            alternatives,
        } => union(input, &discriminant, &alternatives),
        Shape::Composite(fields) => composite(input, fields),
    })
}

/// Per-field pieces shared by composites and union alternatives.
struct FieldList<'a> {
    members: Vec<Member>,
    types: Vec<&'a Type>,
    labels: Vec<String>,
}

impl<'a> FieldList<'a> {
    fn new(fields: &'a Fields) -> Self {
        let mut list = Self {
            members: Vec::with_capacity(fields.len()),
            types: Vec::with_capacity(fields.len()),
            labels: Vec::with_capacity(fields.len()),
        };
        for (i, field) in fields.iter().enumerate() {
            let (member, label) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
                None => (Member::Unnamed(Index::from(i)), i.to_string()),
            };
            list.members.push(member);
            list.types.push(&field.ty);
            list.labels.push(label);
        }
        list
    }

    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `Field` metadata entries in declaration order.
    fn metadata(&self) -> TokenStream {
        let labels = &self.labels;
        let types = &self.types;
        quote! {
            &[#(::packwire::Field::new(#labels, <#types as ::packwire::Encode>::STRATEGY)),*]
        }
    }

    /// Struct-literal body decoding every field from `scope`.
    fn decode_body(&self) -> TokenStream {
        let members = &self.members;
        let types = &self.types;
        quote! {
            { #(#members: <#types as ::packwire::Decode>::decode(&mut scope)?,)* }
        }
    }
}

fn with_bound(generics: &Generics, bound: TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#bound));
    }
    generics
}

struct Impls {
    encode: Generics,
    decode: Generics,
}

impl Impls {
    fn new(input: &DeriveInput) -> Self {
        Self {
            encode: with_bound(&input.generics, quote!(::packwire::Encode)),
            decode: with_bound(&input.generics, quote!(::packwire::Decode)),
        }
    }
}

fn transparent(input: &DeriveInput, fields: &Fields) -> TokenStream {
    let name = &input.ident;
    let list = FieldList::new(fields);
    let member = &list.members[0];
    let ty = list.types[0];

    let impls = Impls::new(input);
    let (encode_impl, ty_generics, encode_where) = impls.encode.split_for_impl();
    let (decode_impl, _, decode_where) = impls.decode.split_for_impl();

    quote! {
        impl #encode_impl ::packwire::Encode for #name #ty_generics #encode_where {
            const STRATEGY: ::packwire::Strategy = <#ty as ::packwire::Encode>::STRATEGY;

            #[inline]
            fn encode(&self, writer: &mut ::packwire::Writer<'_>) -> ::packwire::Result<()> {
                ::packwire::Encode::encode(&self.#member, writer)
            }
        }

        impl #decode_impl ::packwire::Decode for #name #ty_generics #decode_where {
            #[inline]
            fn decode(reader: &mut ::packwire::Reader<'_>) -> ::packwire::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #member: <#ty as ::packwire::Decode>::decode(reader)?,
                })
            }
        }
    }
}

fn composite(input: &DeriveInput, fields: &Fields) -> TokenStream {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let list = FieldList::new(fields);
    let members = &list.members;
    let metadata = list.metadata();

    let decode_body = if list.is_empty() {
        quote! {
            let _ = reader;
            ::core::result::Result::Ok(Self {})
        }
    } else {
        let body = list.decode_body();
        quote! {
            let mut scope = reader.deserialize_scope()?;
            ::core::result::Result::Ok(Self #body)
        }
    };
    let unused_writer = list.is_empty().then(|| quote!(let _ = writer;));

    let impls = Impls::new(input);
    let (encode_impl, ty_generics, encode_where) = impls.encode.split_for_impl();
    let (decode_impl, _, decode_where) = impls.decode.split_for_impl();

    quote! {
        impl #encode_impl ::packwire::Encode for #name #ty_generics #encode_where {
            const STRATEGY: ::packwire::Strategy = ::packwire::Strategy::Composite;

            fn encode(&self, writer: &mut ::packwire::Writer<'_>) -> ::packwire::Result<()> {
                #unused_writer
                #(writer.serialize_scoped(&self.#members)?;)*
                ::core::result::Result::Ok(())
            }
        }

        impl #decode_impl ::packwire::Decode for #name #ty_generics #decode_where {
            fn decode(reader: &mut ::packwire::Reader<'_>) -> ::packwire::Result<Self> {
                #decode_body
            }
        }

        impl #encode_impl ::packwire::Composite for #name #ty_generics #encode_where {
            const NAME: &'static str = #name_str;
            const FIELDS: &'static [::packwire::Field] = #metadata;
        }
    }
}

fn enumerated(input: &DeriveInput, repr: &Ident, idents: &[&Ident]) -> TokenStream {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let labels: Vec<String> = idents.iter().map(|ident| ident.unraw().to_string()).collect();

    let encode_body = if idents.is_empty() {
        quote! {
            let _ = writer;
            match *self {}
        }
    } else {
        quote! {
            let value: #repr = match self {
                #(Self::#idents => Self::#idents as #repr,)*
            };
            ::packwire::Encode::encode(&value, writer)
        }
    };

    // Rejects declared values the wire repr would truncate.
    let fits: Vec<String> = labels
        .iter()
        .map(|label| format!("`{name_str}::{label}` does not fit `{repr}`, set a wider `#[repr]`"))
        .collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        const _: () = {
            #(
                ::core::assert!(
                    (#name::#idents as i128) == ((#name::#idents as #repr) as i128),
                    #fits
                );
            )*
        };

        impl #impl_generics ::packwire::Encode for #name #ty_generics #where_clause {
            const STRATEGY: ::packwire::Strategy = ::packwire::Strategy::Primitive;

            #[inline]
            fn encode(&self, writer: &mut ::packwire::Writer<'_>) -> ::packwire::Result<()> {
                #encode_body
            }
        }

        impl #impl_generics ::packwire::Decode for #name #ty_generics #where_clause {
            fn decode(reader: &mut ::packwire::Reader<'_>) -> ::packwire::Result<Self> {
                let value = <#repr as ::packwire::Decode>::decode(reader)?;
                #(
                    if value == Self::#idents as #repr {
                        return ::core::result::Result::Ok(Self::#idents);
                    }
                )*
                ::core::result::Result::Err(::packwire::Error::unrecognized_enum_value(
                    #name_str,
                    ::core::convert::From::from(value),
                ))
            }
        }

        impl #impl_generics ::packwire::Enumerated for #name #ty_generics #where_clause {
            type Repr = #repr;

            const NAME: &'static str = #name_str;
            const CONSTANTS: &'static [::packwire::Constant] = &[
                #(::packwire::Constant::new(#labels, Self::#idents as i128)),*
            ];
        }
    }
}

fn union(input: &DeriveInput, discriminant: &Ident, alternatives: &[Alternative]) -> TokenStream {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    let mut encode_arms = Vec::with_capacity(alternatives.len());
    let mut decode_arms = Vec::with_capacity(alternatives.len());
    let mut discriminant_arms = Vec::with_capacity(alternatives.len());
    let mut metadata = Vec::with_capacity(alternatives.len());

    for alternative in alternatives {
        let ident = &alternative.variant.ident;
        let label = ident.unraw().to_string();
        let tag = Literal::u64_unsuffixed(alternative.tag);
        let list = FieldList::new(&alternative.variant.fields);
        let fields = list.metadata();

        metadata.push(quote! {
            ::packwire::Alternative {
                name: #label,
                discriminant: #tag,
                fields: #fields,
            }
        });

        if list.is_empty() {
            encode_arms.push(quote! {
                Self::#ident { .. } => {
                    let tag: #discriminant = #tag;
                    ::packwire::Encode::encode(&tag, writer)?;
                }
            });
            decode_arms.push(quote! {
                #tag => ::core::result::Result::Ok(Self::#ident {}),
            });
        } else {
            let members = &list.members;
            let bindings: Vec<Ident> = (0..members.len())
                .map(|i| format_ident!("__field{}", i))
                .collect();
            encode_arms.push(quote! {
                Self::#ident { #(#members: #bindings),* } => {
                    let tag: #discriminant = #tag;
                    ::packwire::Encode::encode(&tag, writer)?;
                    #(writer.serialize_scoped(#bindings)?;)*
                }
            });
            let body = list.decode_body();
            decode_arms.push(quote! {
                #tag => {
                    let mut scope = reader.deserialize_scope()?;
                    ::core::result::Result::Ok(Self::#ident #body)
                }
            });
        }

        discriminant_arms.push(quote! {
            Self::#ident { .. } => #tag,
        });
    }

    let impls = Impls::new(input);
    let (encode_impl, ty_generics, encode_where) = impls.encode.split_for_impl();
    let (decode_impl, _, decode_where) = impls.decode.split_for_impl();

    quote! {
        impl #encode_impl ::packwire::Encode for #name #ty_generics #encode_where {
            const STRATEGY: ::packwire::Strategy = ::packwire::Strategy::DiscriminatedUnion;

            fn encode(&self, writer: &mut ::packwire::Writer<'_>) -> ::packwire::Result<()> {
                match self {
                    #(#encode_arms)*
                }
                ::core::result::Result::Ok(())
            }
        }

        impl #decode_impl ::packwire::Decode for #name #ty_generics #decode_where {
            fn decode(reader: &mut ::packwire::Reader<'_>) -> ::packwire::Result<Self> {
                let discriminant = <#discriminant as ::packwire::Decode>::decode(reader)?;
                match discriminant {
                    #(#decode_arms)*
                    other => ::core::result::Result::Err(::packwire::Error::unknown_discriminant(
                        #name_str,
                        ::core::convert::From::from(other),
                    )),
                }
            }
        }

        impl #encode_impl ::packwire::DiscriminatedUnion for #name #ty_generics #encode_where {
            type Discriminant = #discriminant;

            const NAME: &'static str = #name_str;
            const ALTERNATIVES: &'static [::packwire::Alternative] = &[#(#metadata),*];

            fn discriminant(&self) -> u64 {
                match self {
                    #(#discriminant_arms)*
                }
            }
        }
    }
}
