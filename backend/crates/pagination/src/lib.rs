//! Offset-based pagination primitives shared by list endpoints.
//!
//! Clients address a page with an absolute item offset (`from`) and a page
//! length (`size`). The pair is validated once at the boundary and then
//! carried through the domain as a [`PageRequest`], which persistence
//! adapters translate directly into `OFFSET`/`LIMIT` clauses. There is no
//! page-index arithmetic: `from = 7, size = 5` skips exactly seven records.
//!
//! # Examples
//!
//! ```
//! use pagination::PageRequest;
//!
//! let page = PageRequest::try_new(20, 10).expect("valid page");
//! assert_eq!(page.offset(), 20);
//! assert_eq!(page.limit(), 10);
//!
//! let window: Vec<u32> = page.apply(0..100).collect();
//! assert_eq!(window.first(), Some(&20));
//! assert_eq!(window.len(), 10);
//! ```

use serde::{Deserialize, Serialize};

/// Offset used when the client omits `from`.
pub const DEFAULT_FROM: i64 = 0;

/// Page length used when the client omits `size`.
pub const DEFAULT_SIZE: i64 = 10;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// `from` was below zero.
    #[error("from must be zero or greater, got {from}")]
    NegativeOffset {
        /// Rejected offset.
        from: i64,
    },
    /// `size` was zero or negative.
    #[error("size must be greater than zero, got {size}")]
    NonPositiveLimit {
        /// Rejected page length.
        size: i64,
    },
}

/// Validated offset/limit window over an ordered result set.
///
/// ## Invariants
/// - `offset >= 0`
/// - `limit > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    offset: i64,
    limit: i64,
}

impl PageRequest {
    /// Validate a client supplied `(from, size)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::NegativeOffset`] when `from < 0` and
    /// [`PageRequestError::NonPositiveLimit`] when `size <= 0`.
    pub const fn try_new(from: i64, size: i64) -> Result<Self, PageRequestError> {
        if from < 0 {
            return Err(PageRequestError::NegativeOffset { from });
        }
        if size <= 0 {
            return Err(PageRequestError::NonPositiveLimit { size });
        }
        Ok(Self {
            offset: from,
            limit: size,
        })
    }

    /// Build a page from optional query parameters, applying defaults.
    ///
    /// # Errors
    ///
    /// Propagates the same validation failures as [`PageRequest::try_new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{DEFAULT_SIZE, PageRequest};
    ///
    /// let page = PageRequest::from_optional(None, None).expect("defaults are valid");
    /// assert_eq!(page.offset(), 0);
    /// assert_eq!(page.limit(), DEFAULT_SIZE);
    /// ```
    pub fn from_optional(from: Option<i64>, size: Option<i64>) -> Result<Self, PageRequestError> {
        Self::try_new(from.unwrap_or(DEFAULT_FROM), size.unwrap_or(DEFAULT_SIZE))
    }

    /// Number of records to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// Apply the window to an already ordered sequence.
    ///
    /// Used by adapters that hold records in memory; SQL adapters push the
    /// window down to the database instead.
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        items
            .into_iter()
            .skip(saturating_usize(self.offset))
            .take(saturating_usize(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: DEFAULT_FROM,
            limit: DEFAULT_SIZE,
        }
    }
}

fn saturating_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPageRequest {
    from: i64,
    size: i64,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.from, value.size)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            from: value.offset,
            size: value.limit,
        }
    }
}
