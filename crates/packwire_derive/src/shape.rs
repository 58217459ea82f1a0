use syn::{Data, DeriveInput, Error, Fields, Ident, Result, Variant, spanned::Spanned};

use crate::attr::{ContainerAttrs, VariantAttrs};

/// How a derived type is encoded.
///
/// Resolved once per type with a fixed precedence: transparent wrappers keep
/// their inner type's strategy, then fieldless enums, then enums carrying
/// data, then structs.
pub enum Shape<'a> {
    Transparent(&'a Fields),
    Enumerated {
        repr: Ident,
        variants: Vec<&'a Variant>,
    },
    Union {
        discriminant: Ident,
        alternatives: Vec<Alternative<'a>>,
    },
    Composite(&'a Fields),
}

pub struct Alternative<'a> {
    pub variant: &'a Variant,
    pub tag: u64,
}

impl<'a> Shape<'a> {
    pub fn resolve(input: &'a DeriveInput) -> Result<Self> {
        let attrs = ContainerAttrs::parse(&input.attrs)?;

        if attrs.transparent {
            return match &input.data {
                Data::Struct(data) if data.fields.len() == 1 => Ok(Self::Transparent(&data.fields)),
                _ => Err(Error::new_spanned(
                    &input.ident,
                    "`#[wire(transparent)]` requires a struct with exactly one field",
                )),
            };
        }

        match &input.data {
            Data::Enum(data) if data.variants.iter().all(|v| v.fields.is_empty()) => {
                if attrs.discriminant.is_some() {
                    return Err(Error::new_spanned(
                        &input.ident,
                        "fieldless enums are encoded through their `#[repr]`, not a discriminant",
                    ));
                }
                for variant in &data.variants {
                    if VariantAttrs::parse(variant)?.tag.is_some() {
                        return Err(Error::new_spanned(
                            variant,
                            "fieldless enums take their values from the declared discriminants",
                        ));
                    }
                }
                Ok(Self::Enumerated {
                    repr: attrs
                        .repr
                        .unwrap_or_else(|| Ident::new("i32", input.ident.span())),
                    variants: data.variants.iter().collect(),
                })
            }
            Data::Enum(data) => {
                let discriminant = attrs
                    .discriminant
                    .unwrap_or_else(|| Ident::new("u32", input.ident.span()));
                let max = max_discriminant(&discriminant);

                let mut alternatives: Vec<Alternative> = Vec::with_capacity(data.variants.len());
                let mut next = Some(0u64);
                for variant in &data.variants {
                    if let Some((_, expr)) = &variant.discriminant {
                        return Err(Error::new(
                            expr.span(),
                            "use `#[wire(tag = N)]` to set the discriminant of a union alternative",
                        ));
                    }
                    let (tag, span) = match VariantAttrs::parse(variant)?.tag {
                        Some((tag, lit)) => (tag, lit.span()),
                        None => match next {
                            Some(tag) => (tag, variant.ident.span()),
                            None => {
                                return Err(Error::new_spanned(
                                    &variant.ident,
                                    "discriminant overflows `u64`",
                                ));
                            }
                        },
                    };
                    if tag > max {
                        return Err(Error::new(
                            span,
                            format!("discriminant {tag} does not fit `{discriminant}`"),
                        ));
                    }
                    if let Some(taken) = alternatives.iter().find(|alt| alt.tag == tag) {
                        return Err(Error::new(
                            span,
                            format!(
                                "discriminant {tag} is already used by `{}`",
                                taken.variant.ident
                            ),
                        ));
                    }
                    alternatives.push(Alternative { variant, tag });
                    next = tag.checked_add(1);
                }

                Ok(Self::Union {
                    discriminant,
                    alternatives,
                })
            }
            Data::Struct(data) => Ok(Self::Composite(&data.fields)),
            Data::Union(_) => Err(Error::new_spanned(
                &input.ident,
                "Wire can't be derived for unions, use an enum instead",
            )),
        }
    }
}

fn max_discriminant(ty: &Ident) -> u64 {
    match ty.to_string().as_str() {
        "u8" => u8::MAX as u64,
        "u16" => u16::MAX as u64,
        "u32" => u32::MAX as u64,
        _ => u64::MAX,
    }
}
