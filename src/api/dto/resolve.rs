//! DTOs for identifier resolution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub destination: String,
}
