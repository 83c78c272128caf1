//! Metadata block shared by resource kinds.

use serde::{Deserialize, Serialize};

/// Identity and bookkeeping fields carried under `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Human identifier; required before create/update.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Creation time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub create_time: Option<i64>,
    /// Last update time as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp"
    )]
    pub update_time: Option<i64>,
}
