//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of the add and update endpoints.
///
/// Every field is optional on the wire; update treats omitted fields as
/// cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_draft: Option<bool>,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query string of `GET /posts/latest`.
///
/// `limit` stays raw text; the handler reads its leading integer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestPostsQuery {
    pub limit: Option<String>,
}

/// One page of the post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage<T> {
    pub posts: Vec<T>,
    pub total_posts: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
