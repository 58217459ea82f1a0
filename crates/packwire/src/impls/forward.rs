use crate::{Decode, Encode, Reader, Result, Strategy, Writer};

impl<T: Encode + ?Sized> Encode for &T {
    const STRATEGY: Strategy = T::STRATEGY;

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    const STRATEGY: Strategy = T::STRATEGY;

    #[inline]
    fn encode(&self, writer: &mut Writer<'_>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Decode> Decode for Box<T> {
    #[inline]
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        T::decode(reader).map(Box::new)
    }
}
