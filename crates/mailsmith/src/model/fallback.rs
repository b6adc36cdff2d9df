//! Ordered fallback chains for initial draft values.
//!
//! A chain lists candidate sources in priority order. Sources are consulted
//! lazily and an empty string counts as absent.

/// An ordered list of candidate values with a final default.
#[derive(Debug, Clone, Default)]
pub struct FallbackChain<'a> {
    sources: Vec<Option<&'a str>>,
}

impl<'a> FallbackChain<'a> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Appends a candidate source.
    #[must_use]
    pub fn then(mut self, source: Option<&'a str>) -> Self {
        self.sources.push(source);
        self
    }

    /// First non-empty source, if any.
    #[must_use]
    pub fn first_present(&self) -> Option<&'a str> {
        self.sources
            .iter()
            .copied()
            .flatten()
            .find(|value| !value.is_empty())
    }

    /// Resolves the chain, calling `default` only when every source is absent.
    #[must_use]
    pub fn or_else(&self, default: impl FnOnce() -> String) -> String {
        self.first_present().map_or_else(default, str::to_string)
    }
}
