//! Shared query parameter types for API handlers.

use agora_core::types::DbId;
use serde::Deserialize;

/// Keyset listing parameters (`?limit=&since=&desc=`).
///
/// Used by the forum member and forum thread listings. `since` is a
/// nickname or a timestamp depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub since: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

/// Thread post listing parameters (`?limit=&since=&sort=&desc=`).
///
/// `since` is the id of the last post of the previous page.
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub limit: Option<i64>,
    pub since: Option<DbId>,
    pub sort: Option<String>,
    #[serde(default)]
    pub desc: bool,
}

/// Post detail expansion (`?related=user,thread,forum`).
#[derive(Debug, Default, Deserialize)]
pub struct RelatedParams {
    pub related: Option<String>,
}
