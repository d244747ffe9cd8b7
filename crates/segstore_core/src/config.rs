//! Segment store configuration.

use std::fmt;

/// A tradeoff a caller can ask the factory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreType {
    /// Cheapest appends; sorting is deferred to the next read.
    Fast,
    /// Always sorted; parallel readers and logarithmic query cut-off.
    Stable,
    /// Equal segments are stored once.
    Distinct,
    /// Paged to disk for datasets larger than memory.
    OnDisk,
}

impl StoreType {
    const fn bit(self) -> u8 {
        match self {
            Self::Fast => 1,
            Self::Stable => 1 << 1,
            Self::Distinct => 1 << 2,
            Self::OnDisk => 1 << 3,
        }
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fast => "fast",
            Self::Stable => "stable",
            Self::Distinct => "distinct",
            Self::OnDisk => "on-disk",
        };
        f.write_str(name)
    }
}

/// A set of [`StoreType`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StoreFlags(u8);

impl StoreFlags {
    /// The empty set, which the factory treats as [`StoreType::Fast`].
    pub const EMPTY: Self = Self(0);

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: StoreType) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns true if `kind` is in the set.
    pub const fn contains(&self, kind: StoreType) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns true if no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<StoreType> for StoreFlags {
    fn from(kind: StoreType) -> Self {
        Self::EMPTY.with(kind)
    }
}

impl FromIterator<StoreType> for StoreFlags {
    fn from_iter<I: IntoIterator<Item = StoreType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<&[StoreType]> for StoreFlags {
    fn from(kinds: &[StoreType]) -> Self {
        kinds.iter().copied().collect()
    }
}

/// Configuration for creating a segment store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Requested tradeoffs. Empty means [`StoreType::Fast`].
    pub flags: StoreFlags,

    /// Number of segments to pre-allocate room for.
    pub initial_capacity: usize,
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a requested tradeoff.
    #[must_use]
    pub const fn store_type(mut self, kind: StoreType) -> Self {
        self.flags = self.flags.with(kind);
        self
    }

    /// Replaces the requested tradeoffs.
    #[must_use]
    pub const fn flags(mut self, flags: StoreFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the initial capacity.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert!(config.flags.is_empty());
        assert_eq!(config.initial_capacity, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new()
            .store_type(StoreType::Stable)
            .store_type(StoreType::Distinct)
            .initial_capacity(1024);

        assert!(config.flags.contains(StoreType::Stable));
        assert!(config.flags.contains(StoreType::Distinct));
        assert!(!config.flags.contains(StoreType::Fast));
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn flags_from_slice() {
        let flags = StoreFlags::from(&[StoreType::Fast, StoreType::OnDisk][..]);
        assert!(flags.contains(StoreType::Fast));
        assert!(flags.contains(StoreType::OnDisk));
        assert!(!flags.contains(StoreType::Stable));
    }

    #[test]
    fn store_type_names() {
        assert_eq!(StoreType::OnDisk.to_string(), "on-disk");
        assert_eq!(StoreType::Stable.to_string(), "stable");
    }
}
