//! Pagination query parameters for the list endpoint.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::repositories::MAX_LIST_LIMIT;

/// `skip`/`limit` query parameters.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub skip: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListParams {
    /// Validates the parameters and returns `(skip, limit)`.
    ///
    /// # Defaults
    ///
    /// - `skip`: 0
    /// - `limit`: 100
    ///
    /// # Validation
    ///
    /// - `skip` must be >= 0
    /// - `limit` must be between 1 and 100
    pub fn validate_and_get_skip_limit(&self) -> Result<(i64, i64), String> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(MAX_LIST_LIMIT);

        if skip < 0 {
            return Err("skip must be greater than or equal to 0".to_string());
        }

        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {}", MAX_LIST_LIMIT));
        }

        Ok((skip, limit))
    }
}
