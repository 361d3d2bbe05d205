use crate::{Filter, Result};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchRequest {
    /// `None` matches every entry
    pub filter: Option<Filter>,

    /// Maximum number of entries returned, `0` for the configured default
    pub size_limit: usize,
}

impl SearchRequest {
    pub fn new(filter: Option<Filter>) -> SearchRequest {
        SearchRequest {
            filter,
            size_limit: 0,
        }
    }

    /// Builds a request from an RFC 4515 filter string.
    pub fn parse(filter: &str) -> Result<SearchRequest> {
        Ok(SearchRequest::new(Some(filter.parse()?)))
    }

    pub fn size_limit(mut self, size_limit: usize) -> SearchRequest {
        self.size_limit = size_limit;
        self
    }
}
