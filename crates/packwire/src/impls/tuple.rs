use crate::{Composite, Decode, Encode, Field, Reader, Result, Strategy, Writer};

macro_rules! impl_tuple {
    ($(($($idx:tt $name:ident),+))+) => {
        $(
            impl<$($name: Encode),+> Encode for ($($name,)+) {
                const STRATEGY: Strategy = Strategy::Composite;

                fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
                    $(writer.serialize_scoped(&self.$idx)?;)+
                    Ok(())
                }
            }

            impl<$($name: Decode),+> Decode for ($($name,)+) {
                fn decode(reader: &mut Reader<'_>) -> Result<Self> {
                    let mut scope = reader.deserialize_scope()?;
                    Ok(($($name::decode(&mut scope)?,)+))
                }
            }

            impl<$($name: Encode),+> Composite for ($($name,)+) {
                const NAME: &'static str = "tuple";
                const FIELDS: &'static [Field] = &[$(Field::new(stringify!($idx), $name::STRATEGY)),+];
            }
        )+
    };
}

impl_tuple!(
    (0 A)
    (0 A, 1 B)
    (0 A, 1 B, 2 C)
    (0 A, 1 B, 2 C, 3 D)
    (0 A, 1 B, 2 C, 3 D, 4 E)
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F)
);
