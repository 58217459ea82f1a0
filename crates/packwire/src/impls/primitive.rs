use crate::{Decode, Encode, Reader, Result, Strategy, Writer};

macro_rules! impl_primitive {
    ($($t:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl Encode for $t {
                const STRATEGY: Strategy = Strategy::Primitive;

                #[inline]
                fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
                    writer.$write(*self);
                    Ok(())
                }
            }

            impl Decode for $t {
                #[inline]
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_primitive!(
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
    bool => write_bool, read_bool;
);
