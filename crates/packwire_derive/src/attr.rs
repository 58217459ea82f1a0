use syn::{Attribute, Ident, LitInt, LitStr, Result, Variant, token};

/// Integer types accepted as union discriminants.
const DISCRIMINANT_TYPES: &[&str] = &["u8", "u16", "u32", "u64"];

/// `#[repr]` integer types usable as enum storage.
const REPR_TYPES: &[&str] = &["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64"];

/// Container-level `#[wire(..)]` and `#[repr(..)]` settings.
#[derive(Default)]
pub struct ContainerAttrs {
    pub transparent: bool,
    pub discriminant: Option<Ident>,
    pub repr: Option<Ident>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if attr.path().is_ident("wire") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("transparent") {
                        parsed.transparent = true;
                        Ok(())
                    } else if meta.path.is_ident("discriminant") {
                        let lit: LitStr = meta.value()?.parse()?;
                        let ident: Ident = lit.parse()?;
                        if !DISCRIMINANT_TYPES.iter().any(|ty| ident == *ty) {
                            return Err(syn::Error::new_spanned(
                                &lit,
                                "discriminant must be one of `u8`, `u16`, `u32`, `u64`",
                            ));
                        }
                        parsed.discriminant = Some(ident);
                        Ok(())
                    } else {
                        Err(meta.error("unsupported wire attribute"))
                    }
                })?;
            } else if attr.path().is_ident("repr") {
                attr.parse_nested_meta(|meta| {
                    // align(N), packed(N)
                    if meta.input.peek(token::Paren) {
                        let content;
                        syn::parenthesized!(content in meta.input);
                        content.parse::<proc_macro2::TokenStream>()?;
                        return Ok(());
                    }
                    let Some(ident) = meta.path.get_ident() else {
                        return Ok(());
                    };
                    if REPR_TYPES.iter().any(|ty| ident == *ty) {
                        parsed.repr = Some(ident.clone());
                    } else if ["u128", "i128", "usize", "isize"]
                        .iter()
                        .any(|ty| ident == *ty)
                    {
                        return Err(meta.error(format!(
                            "`{ident}` has no fixed wire width, use an integer of at most 64 bits"
                        )));
                    }
                    Ok(())
                })?;
            }
        }

        Ok(parsed)
    }
}

/// Variant-level `#[wire(tag = N)]`.
#[derive(Default)]
pub struct VariantAttrs {
    pub tag: Option<(u64, LitInt)>,
}

impl VariantAttrs {
    pub fn parse(variant: &Variant) -> Result<Self> {
        let mut parsed = Self::default();

        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("wire")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("tag") {
                    let lit: LitInt = meta.value()?.parse()?;
                    parsed.tag = Some((lit.base10_parse()?, lit));
                    Ok(())
                } else {
                    Err(meta.error("unsupported wire attribute"))
                }
            })?;
        }

        Ok(parsed)
    }
}
