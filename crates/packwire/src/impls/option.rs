use crate::{
    Alternative, Decode, DiscriminatedUnion, Encode, Error, Field, Reader, Result, Strategy,
    Writer,
};

const NONE: u32 = 0;
const SOME: u32 = 1;

impl<T: Encode> Encode for Option<T> {
    const STRATEGY: Strategy = Strategy::DiscriminatedUnion;

    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        match self {
            None => writer.write_u32(NONE),
            Some(value) => {
                writer.write_u32(SOME);
                writer.serialize_scoped(value)?;
            }
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        match reader.read_u32()? {
            NONE => Ok(None),
            SOME => {
                let mut scope = reader.deserialize_scope()?;
                T::decode(&mut scope).map(Some)
            }
            discriminant => Err(Error::unknown_discriminant(
                Self::NAME,
                discriminant as u64,
            )),
        }
    }
}

impl<T: Encode> DiscriminatedUnion for Option<T> {
    type Discriminant = u32;

    const NAME: &'static str = "Option";
    const ALTERNATIVES: &'static [Alternative] = &[
        Alternative {
            name: "None",
            discriminant: NONE as u64,
            fields: &[],
        },
        Alternative {
            name: "Some",
            discriminant: SOME as u64,
            fields: &[Field::new("0", T::STRATEGY)],
        },
    ];

    #[inline]
    fn discriminant(&self) -> u64 {
        match self {
            None => NONE as u64,
            Some(_) => SOME as u64,
        }
    }
}
