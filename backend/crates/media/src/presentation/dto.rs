//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::asset::StorageProvider;

/// DELETE /media request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAssetRequest {
    pub public_id: String,
    pub provider: StorageProvider,
}

/// DELETE /media response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAssetResponse {
    pub deleted: bool,
}
