use super::asset::Asset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    /// Resume token for the next request's `after`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

/// One page of assets in store order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub assets: Vec<Asset>,
    pub page_info: PageInfo,
}
