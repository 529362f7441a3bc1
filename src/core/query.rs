//! Query parameters, sorting and pagination for the collection endpoint

use crate::core::error::ValidationError;
use crate::core::record::CashCard;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Upper bound applied to a caller-supplied page size
pub const DEFAULT_MAX_PAGE_SIZE: usize = 2000;

/// Raw query parameters of `GET /cashcards`
///
/// All parameters are optional; the defaults are resolved by
/// [`PageSpec::resolve`] and [`SortSpec::resolve`].
///
/// # Example
/// ```text
/// GET /cashcards
/// GET /cashcards?page=1&size=1
/// GET /cashcards?page=0&size=1&sort=amount,desc
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Zero-based page index
    pub page: Option<usize>,

    /// Number of records per page
    pub size: Option<usize>,

    /// Sort expression: `field`, `field,asc`, `field,desc` (`:` works as separator too)
    pub sort: Option<String>,
}

/// Field a record listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Amount,
    Owner,
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "amount" => Ok(SortField::Amount),
            "owner" => Ok(SortField::Owner),
            other => Err(ValidationError::UnknownSortField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Id => write!(f, "id"),
            SortField::Amount => write!(f, "amount"),
            SortField::Owner => write!(f, "owner"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Descending)
        } else {
            Err(ValidationError::UnknownSortDirection(s.to_string()))
        }
    }
}

/// Ordering applied to a listing
///
/// Records that compare equal on the requested field are ordered by id in
/// the same direction, so page boundaries are stable between requests and
/// `desc` is exactly the reverse of `asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Amount,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a sort expression such as `amount`, `amount,desc` or `owner:asc`
    pub fn parse(expr: &str) -> Result<Self, ValidationError> {
        let expr = expr.trim();
        let (field, direction) = match expr.split_once([',', ':']) {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (expr, None),
        };

        let field = field.parse::<SortField>()?;
        let direction = match direction {
            Some(d) => d.parse::<SortDirection>()?,
            None => SortDirection::Ascending,
        };

        Ok(Self { field, direction })
    }

    /// Resolve the optional `sort` parameter, falling back to amount ascending
    pub fn resolve(sort: Option<&str>) -> Result<Self, ValidationError> {
        match sort {
            Some(expr) if !expr.trim().is_empty() => Self::parse(expr),
            _ => Ok(Self::default()),
        }
    }

    /// Compare two records according to this spec
    pub fn compare(&self, a: &CashCard, b: &CashCard) -> Ordering {
        let primary = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Owner => a.owner.cmp(&b.owner),
        };

        let ordering = primary.then_with(|| a.id.cmp(&b.id));

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Which slice of the sorted sequence to return
///
/// `size == None` means "everything": the first page holds the whole set and
/// every later page is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSpec {
    pub page: usize,
    pub size: Option<usize>,
}

impl PageSpec {
    /// The whole sequence in a single page
    pub fn unpaged() -> Self {
        Self::default()
    }

    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size: Some(size),
        }
    }

    /// Resolve the optional `page`/`size` parameters
    ///
    /// A size of zero is rejected; a size above `max_page_size` is clamped.
    pub fn resolve(
        page: Option<usize>,
        size: Option<usize>,
        max_page_size: usize,
    ) -> Result<Self, ValidationError> {
        let size = match size {
            Some(0) => return Err(ValidationError::InvalidPageSize),
            Some(size) => Some(size.min(max_page_size.max(1))),
            None => None,
        };

        Ok(Self {
            page: page.unwrap_or(0),
            size,
        })
    }

    /// Index of the first record on this page, saturating on overflow
    pub fn offset(&self) -> usize {
        match self.size {
            Some(size) => self.page.saturating_mul(size),
            None if self.page == 0 => 0,
            None => usize::MAX,
        }
    }

    /// Cut this page out of an already sorted sequence
    pub fn slice<T>(&self, sorted: Vec<T>) -> Vec<T> {
        let offset = self.offset();
        if offset >= sorted.len() {
            return Vec::new();
        }

        let take = self.size.unwrap_or(usize::MAX);
        sorted.into_iter().skip(offset).take(take).collect()
    }
}

/// One page of results plus the size of the full filtered set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub spec: PageSpec,
    pub total: usize,
}

impl<T> Page<T> {
    /// Build a page from the complete, sorted result set
    pub fn from_sorted(sorted: Vec<T>, spec: PageSpec) -> Self {
        let total = sorted.len();
        Self {
            content: spec.slice(sorted),
            spec,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}
