//! Decode and encode configuration.

/// Settings threaded unchanged through every recursive decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode every string-tag family as a binary blob instead of UTF-8 text.
    /// Used for older wire data that stored raw bytes under string tags.
    pub compatibility_mode: bool,
    /// Maximum container nesting. `None` means unlimited.
    pub max_depth: Option<usize>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with compatibility mode on.
    pub fn compat() -> Self {
        Self::default().compatibility_mode(true)
    }

    pub fn compatibility_mode(mut self, on: bool) -> Self {
        self.compatibility_mode = on;
        self
    }

    /// Rejects input whose containers nest more than `depth` levels.
    /// A top-level array counts as depth 1.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl From<bool> for DecodeOptions {
    fn from(compatibility_mode: bool) -> Self {
        Self::default().compatibility_mode(compatibility_mode)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write strings and binaries with the string tags only, skipping str8
    /// and the bin family.
    pub compatibility_mode: bool,
}

impl EncodeOptions {
    pub fn compat() -> Self {
        Self {
            compatibility_mode: true,
        }
    }
}
