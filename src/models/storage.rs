// Mounted volume usage model

use serde::Serialize;

/// Usage of one mounted volume whose usage query succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeUsage {
    pub path: String,
    pub fstype: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
}
