//! Derive macro for packwire.
//!
//! `#[derive(Wire)]` implements `Encode`, `Decode` and the matching metadata
//! trait for a type, choosing its encoding from its shape:
//!
//! - `#[wire(transparent)]` single-field structs encode as their field.
//! - Fieldless enums encode as their `#[repr]` integer (`i32` by default).
//! - Enums with data encode as a discriminated union, `u32` discriminant by
//!   default, overridable with `#[wire(discriminant = "u8")]` and per variant
//!   with `#[wire(tag = N)]`.
//! - Structs encode their fields in declaration order.
//!
//! A fieldless enum whose declared values don't fit its storage width is
//! rejected at compile time:
//!
//! ```compile_fail
//! use packwire::Wire;
//!
//! #[derive(Wire)]
//! enum Wide {
//!     Low = 0,
//!     High = 0x1_0000_0000,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attr;
mod expand;
mod shape;

#[proc_macro_derive(Wire, attributes(wire))]
pub fn derive_wire(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
