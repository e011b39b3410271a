//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Absolute http(s) URL the link should redirect to.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// A link as returned to its owner.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub identifier: String,
    pub destination: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            identifier: link.identifier,
            destination: link.destination,
            access_count: link.access_count,
            created_at: link.created_at,
        }
    }
}

/// The caller's links, newest first.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateLinkRequest {
            url: "https://example.com/a".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = CreateLinkRequest {
            url: "not a url".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
