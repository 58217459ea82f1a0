/// Default bound on nested decode scopes.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Largest value the 4-byte length prefix can carry.
pub const MAX_PREFIX_LEN: usize = u32::MAX as usize;

/// Limits applied by writers and readers of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Maximum number of nested decode scopes.
    pub max_depth: usize,
    /// Maximum string length in bytes, on both sides.
    pub max_string_len: usize,
    /// Maximum number of sequence elements, on both sides.
    pub max_sequence_len: usize,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: MAX_PREFIX_LEN,
            max_sequence_len: MAX_PREFIX_LEN,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Values above [`MAX_PREFIX_LEN`] are clamped, the prefix can't carry more.
    pub const fn with_max_string_len(mut self, max: usize) -> Self {
        self.max_string_len = if max > MAX_PREFIX_LEN {
            MAX_PREFIX_LEN
        } else {
            max
        };
        self
    }

    /// Values above [`MAX_PREFIX_LEN`] are clamped, the prefix can't carry more.
    pub const fn with_max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = if max > MAX_PREFIX_LEN {
            MAX_PREFIX_LEN
        } else {
            max
        };
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
