use std::{
    ops::{Deref, DerefMut},
    str,
};

use log::debug;

use crate::{Decode, Error, Options, Result};

/// Decodes values from a received payload through a forward-only cursor.
///
/// Every read checks the remaining length before touching the buffer and
/// advances the cursor by exactly the bytes it consumed. The cursor never
/// rewinds, values must be read in the order they were packed.
///
/// The first failed read poisons the reader: every later read, and
/// [`Reader::finalize`], fails with [`Error::SessionFailed`].
#[derive(Debug)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    position: usize,
    options: Options,
    depth: usize,
    failed: bool,
}

macro_rules! impl_read_le {
    ($($name:ident => $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Reads a little-endian `", stringify!($t), "`.")]
            #[inline]
            pub fn $name(&mut self) -> Result<$t> {
                Ok(<$t>::from_le_bytes(self.read_array()?))
            }
        )*
    };
}

impl<'a> Reader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_options(buffer, Options::default())
    }

    pub fn with_options(buffer: &'a [u8], options: Options) -> Self {
        Self {
            buffer,
            position: 0,
            options,
            depth: 0,
            failed: false,
        }
    }

    /// Decodes a `T` with the strategy its type resolves to.
    pub fn deserialize<T: Decode>(&mut self) -> Result<T> {
        self.ensure_live()?;
        let result = T::decode(self);
        self.poison(result)
    }

    /// Opens a nested decode scope over the same cursor.
    ///
    /// Fails once the nesting depth reaches [`Options::max_depth`].
    pub fn deserialize_scope(&mut self) -> Result<Scope<'_, 'a>> {
        self.ensure_live()?;
        if self.depth >= self.options.max_depth {
            self.failed = true;
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(Scope { reader: self })
    }

    /// Ends the session, failing if any byte was left unread.
    pub fn finalize(self) -> Result<()> {
        self.ensure_live()?;
        let remaining = self.remaining();
        if remaining > 0 {
            debug!(
                "Finalize found {} trailing byte(s) at offset {}.",
                remaining, self.position
            );
            return Err(Error::TrailingBytes {
                position: self.position,
                remaining,
            });
        }
        debug!("Unpacked {} byte(s).", self.position);
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns `true` once a read of this session has failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure_live()?;
        let Some(end) = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
        else {
            self.failed = true;
            return Err(Error::BufferUnderrun {
                offset: self.position,
                requested: len,
                len: self.buffer.len(),
            });
        };
        let bytes = &self.buffer[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    impl_read_le!(
        read_u8 => u8,
        read_u16 => u16,
        read_u32 => u32,
        read_u64 => u64,
        read_i8 => i8,
        read_i16 => i16,
        read_i32 => i32,
        read_i64 => i64,
        read_f32 => f32,
        read_f64 => f64,
    );

    /// Reads one byte, any nonzero value is `true`.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a length-prefixed UTF-8 string without copying it.
    pub fn read_str(&mut self) -> Result<&'a str> {
        let len = self.read_u32()? as usize;
        if len > self.options.max_string_len {
            let max = self.options.max_string_len;
            return self.poison(Err(Error::StringTooLong { len, max }));
        }
        let offset = self.position;
        let bytes = self.read_bytes(len)?;
        let value = str::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 { offset, source });
        self.poison(value)
    }

    #[inline]
    pub fn read_string(&mut self) -> Result<String> {
        self.read_str().map(str::to_owned)
    }

    /// Reads the 4-byte element-count prefix of a sequence.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = self.read_u32()? as usize;
        if len > self.options.max_sequence_len {
            let max = self.options.max_sequence_len;
            return self.poison(Err(Error::SequenceTooLong { len, max }));
        }
        Ok(len)
    }

    #[inline]
    fn ensure_live(&self) -> Result<()> {
        if self.failed {
            return Err(Error::SessionFailed);
        }
        Ok(())
    }

    #[inline]
    fn poison<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

/// Nested decode scope returned by [`Reader::deserialize_scope`].
///
/// Shares the parent's cursor and restores its depth when dropped.
#[derive(Debug)]
pub struct Scope<'r, 'a> {
    reader: &'r mut Reader<'a>,
}

impl<'a> Deref for Scope<'_, 'a> {
    type Target = Reader<'a>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.reader
    }
}

impl DerefMut for Scope<'_, '_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.reader
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.reader.depth -= 1;
    }
}
