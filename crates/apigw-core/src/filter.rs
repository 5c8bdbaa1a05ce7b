//! Method filter applied while expanding resource methods

use std::collections::BTreeSet;

/// Sentinel filter entry that selects every method
pub const ALL_METHODS: &str = "ALL";

/// HTTP methods a REST gateway resource can carry
pub const REST_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"];

/// Set of method names to expand, or the [`ALL_METHODS`] sentinel
///
/// Matching is exact and case-sensitive. The filter does not validate its
/// entries; callers are expected to hand over names from [`REST_METHODS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFilter {
    methods: BTreeSet<String>,
}

impl MethodFilter {
    /// Filter that expands every method
    pub fn all() -> Self {
        Self::new([ALL_METHODS])
    }

    /// Filter over the given method names
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether every method is selected
    pub fn expands_all(&self) -> bool {
        self.methods.contains(ALL_METHODS)
    }

    /// Whether the given method should be expanded
    pub fn allows(&self, http_method: &str) -> bool {
        self.expands_all() || self.methods.contains(http_method)
    }
}

impl Default for MethodFilter {
    fn default() -> Self {
        Self::all()
    }
}
