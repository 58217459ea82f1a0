use crate::{Decode, Encode, Reader, Result, Strategy, Writer};

impl<T: Encode> Encode for [T] {
    const STRATEGY: Strategy = Strategy::Sequence;

    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.write_len(self.len())?;
        let mut scope = writer.create_scope()?;
        for element in self {
            element.encode(&mut scope)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    const STRATEGY: Strategy = Strategy::Sequence;

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.as_slice().encode(writer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let len = reader.read_len()?;
        let mut scope = reader.deserialize_scope()?;
        // Capacity never exceeds the unread byte count.
        let mut elements = Vec::with_capacity(len.min(scope.remaining()));
        for _ in 0..len {
            elements.push(T::decode(&mut scope)?);
        }
        Ok(elements)
    }
}
