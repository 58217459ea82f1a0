#![doc = include_str!("../README.md")]

#[cfg(feature = "derive")]
pub use packwire_derive::Wire;

mod error;
mod impls;
mod options;
mod reader;
mod strategy;
mod writer;

pub use error::*;
pub use options::*;
pub use reader::*;
pub use strategy::*;
pub use writer::*;

/// Size of the length prefix carried by strings and sequences.
pub const PREFIX_SIZE: usize = size_of::<u32>();

/// Encodes a single value into a fresh payload.
pub fn pack<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
    pack_with(value, Options::default())
}

pub fn pack_with<T: Encode + ?Sized>(value: &T, options: Options) -> Result<Vec<u8>> {
    let mut packer = Packer::with_options(options);
    packer.serialize(value)?;
    packer.end_pack()
}

/// Decodes a single value, requiring the payload to be fully consumed.
pub fn unpack<T: Decode>(bytes: &[u8]) -> Result<T> {
    unpack_with(bytes, Options::default())
}

pub fn unpack_with<T: Decode>(bytes: &[u8], options: Options) -> Result<T> {
    let mut reader = Reader::with_options(bytes, options);
    let value = reader.deserialize()?;
    reader.finalize()?;
    Ok(value)
}
