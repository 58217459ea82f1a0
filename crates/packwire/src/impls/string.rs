use crate::{Decode, Encode, Reader, Result, Strategy, Writer};

impl Encode for str {
    const STRATEGY: Strategy = Strategy::String;

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.write_str(self)
    }
}

impl Encode for String {
    const STRATEGY: Strategy = Strategy::String;

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.write_str(self)
    }
}

impl Decode for String {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_string()
    }
}
