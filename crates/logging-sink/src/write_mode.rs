/// Controls how [`SinkHandle`](crate::SinkHandle) treats an existing
/// destination file when opening it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WriteMode {
    /// Discard any existing contents before the first write.
    Truncate,
    /// Keep existing contents and write at the end of the file.
    Append,
}

impl WriteMode {
    pub(crate) const fn truncates(self) -> bool {
        matches!(self, Self::Truncate)
    }

    /// Returns the lowercase name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Append => "append",
        }
    }
}

impl Default for WriteMode {
    fn default() -> Self {
        Self::Append
    }
}
