//! Page selection for multi-page documents.

/// An inclusive, 1-based page range.
///
/// `last` of `None` means "through the final page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page to process (1-based).
    pub first: u32,
    /// Last page to process (inclusive), or `None` for all remaining pages.
    pub last: Option<u32>,
}

impl PageRange {
    /// Range starting at `first` and running to the end of the document.
    pub fn from_page(first: u32) -> Self {
        Self { first, last: None }
    }

    /// Bounded inclusive range.
    pub fn bounded(first: u32, last: u32) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    /// Whether the range is well-formed (pages are 1-based, last >= first).
    pub fn is_valid(&self) -> bool {
        self.first >= 1 && self.last.map_or(true, |last| last >= self.first)
    }
}

impl Default for PageRange {
    /// All pages.
    fn default() -> Self {
        Self::from_page(1)
    }
}
