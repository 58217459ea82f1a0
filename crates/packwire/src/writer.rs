use log::{debug, trace};

use crate::{Encode, Error, Options, Result};

/// Top-level encode session.
///
/// Owns the byte buffer that every [`Writer`] of the session appends into.
/// Writers only borrow the buffer, so none of them can outlive the session or
/// release the buffer on their own. [`Packer::end_pack`] consumes the session
/// and hands the buffer to the caller.
///
/// The first failed write poisons the session: the partial value is dropped,
/// later writes fail with [`Error::SessionFailed`] and so does `end_pack`.
#[derive(Debug, Default)]
#[must_use = "Packer should be finished with `end_pack` to obtain the payload"]
pub struct Packer {
    buffer: Vec<u8>,
    options: Options,
    failed: bool,
}

impl Packer {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self::with_capacity_and_options(0, options)
    }

    /// Pre-allocates `capacity` bytes to avoid growth while packing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_options(capacity, Options::default())
    }

    pub fn with_capacity_and_options(capacity: usize, options: Options) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            options,
            failed: false,
        }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the root writer of the session.
    #[inline]
    pub fn writer(&mut self) -> Writer<'_> {
        Writer::root(&mut self.buffer, &mut self.failed, self.options)
    }

    /// Encodes one outgoing field or argument.
    ///
    /// On failure the bytes of the partial value are removed.
    pub fn serialize<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        let start = self.buffer.len();
        let result = self.writer().serialize(value);
        if result.is_err() {
            self.buffer.truncate(start);
        }
        result
    }

    /// Returns `true` once a write of this session has failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Number of bytes packed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ends the session and returns the packed bytes.
    ///
    /// Fails with [`Error::SessionFailed`] if any write of the session failed.
    pub fn end_pack(self) -> Result<Vec<u8>> {
        if self.failed {
            debug!("Discarded failed session after {} byte(s).", self.buffer.len());
            return Err(Error::SessionFailed);
        }
        debug!("Packed {} byte(s).", self.buffer.len());
        Ok(self.buffer)
    }
}

/// Appends encoded values to the buffer of a [`Packer`].
///
/// A writer is either the root writer of a session or a scope created with
/// [`Writer::create_scope`]. Both append to the same buffer; scoping never
/// changes the bytes produced.
#[derive(Debug)]
pub struct Writer<'a> {
    buffer: &'a mut Vec<u8>,
    failed: &'a mut bool,
    options: Options,
    /// Buffer length when this writer was created.
    start: usize,
    depth: usize,
}

macro_rules! impl_write_le {
    ($($name:ident => $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Appends a `", stringify!($t), "` as little-endian bytes.")]
            #[inline]
            pub fn $name(&mut self, value: $t) {
                self.buffer.extend_from_slice(&value.to_le_bytes());
            }
        )*
    };
}

impl<'a> Writer<'a> {
    #[inline]
    fn root(buffer: &'a mut Vec<u8>, failed: &'a mut bool, options: Options) -> Self {
        Self {
            start: buffer.len(),
            buffer,
            failed,
            options,
            depth: 0,
        }
    }

    /// Encodes `value` with the strategy its type resolves to.
    pub fn serialize<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.ensure_live()?;
        let result = value.encode(self);
        self.poison(result)
    }

    /// Returns a child writer appending into the same buffer.
    ///
    /// The child borrows this writer mutably, so the parent can't be written
    /// to until the child is finished or dropped. Fails once the nesting depth
    /// reaches [`Options::max_depth`], the same bound the reader applies.
    pub fn create_scope(&mut self) -> Result<Writer<'_>> {
        self.ensure_live()?;
        if self.depth >= self.options.max_depth {
            *self.failed = true;
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        let start = self.buffer.len();
        Ok(Writer {
            buffer: &mut *self.buffer,
            failed: &mut *self.failed,
            options: self.options,
            start,
            depth: self.depth + 1,
        })
    }

    /// Encodes `value` inside its own scope, returning the bytes it took.
    pub fn serialize_scoped<T: Encode + ?Sized>(&mut self, value: &T) -> Result<usize> {
        let mut scope = self.create_scope()?;
        let result = value.encode(&mut scope);
        scope.poison(result)?;
        Ok(scope.finish())
    }

    /// Closes this writer and returns the number of bytes it appended.
    ///
    /// The bytes already live in the shared buffer, nothing is copied.
    #[inline]
    pub fn finish(self) -> usize {
        let written = self.written();
        trace!(
            "Scope at depth {} closed after {} byte(s).",
            self.depth, written
        );
        written
    }

    /// Absolute offset of the next byte in the session buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes appended through this writer and its scopes.
    #[inline]
    pub fn written(&self) -> usize {
        self.buffer.len() - self.start
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    impl_write_le!(
        write_u8 => u8,
        write_u16 => u16,
        write_u32 => u32,
        write_u64 => u64,
        write_i8 => i8,
        write_i16 => i16,
        write_i32 => i32,
        write_i64 => i64,
        write_f32 => f32,
        write_f64 => f64,
    );

    /// Appends a boolean as one byte, `0` or `1`.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    /// Appends raw bytes without a length prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Returns `true` once a write of this session has failed.
    #[inline]
    pub fn is_failed(&self) -> bool {
        *self.failed
    }

    /// Appends a UTF-8 string with its 4-byte byte-count prefix.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        let len = value.len();
        let prefix = self.prefix(len)?;
        if len > self.options.max_string_len {
            let max = self.options.max_string_len;
            return self.poison(Err(Error::StringTooLong { len, max }));
        }
        self.write_u32(prefix);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Appends the 4-byte element-count prefix of a sequence.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        let prefix = self.prefix(len)?;
        if len > self.options.max_sequence_len {
            let max = self.options.max_sequence_len;
            return self.poison(Err(Error::SequenceTooLong { len, max }));
        }
        self.write_u32(prefix);
        Ok(())
    }

    #[inline]
    fn prefix(&mut self, len: usize) -> Result<u32> {
        let prefix = u32::try_from(len).map_err(|_| Error::LengthOverflow { len });
        self.poison(prefix)
    }

    #[inline]
    fn ensure_live(&self) -> Result<()> {
        if *self.failed {
            return Err(Error::SessionFailed);
        }
        Ok(())
    }

    #[inline]
    fn poison<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            *self.failed = true;
        }
        result
    }
}
