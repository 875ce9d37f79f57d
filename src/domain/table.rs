// Table filter domain model
use super::records::{Role, UserStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("invalid page size {0}, expected one of 10, 25, 50 or 100")]
    InvalidPageSize(usize),
}

/// Rows per page. Only the sizes offered by the page-size selector are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub const OPTIONS: [usize; 4] = [10, 25, 50, 100];

    pub fn new(size: usize) -> Result<Self, TableError> {
        if Self::OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(TableError::InvalidPageSize(size))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableFilterState {
    pub search_text: String,
    /// `None` matches every role
    pub role_filter: Option<Role>,
    /// `None` matches every status
    pub status_filter: Option<UserStatus>,
    pub page_index: usize,
    pub page_size: PageSize,
}

impl TableFilterState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_options() {
        for size in PageSize::OPTIONS {
            assert_eq!(PageSize::new(size).unwrap().get(), size);
        }
        assert_eq!(PageSize::new(0), Err(TableError::InvalidPageSize(0)));
        assert_eq!(PageSize::try_from(20), Err(TableError::InvalidPageSize(20)));
        assert_eq!(PageSize::default().get(), 10);
    }
}
