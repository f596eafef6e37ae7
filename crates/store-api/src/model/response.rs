use serde::{Deserialize, Serialize};

/// Outcome reported by every mutating store call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseStatus {
    pub success: bool,
    pub id: i64,
    pub code: i64,
}

impl ResponseStatus {
    pub fn ok(id: i64) -> Self {
        Self {
            success: true,
            id,
            code: 200,
        }
    }

    pub fn failed(code: i64) -> Self {
        Self {
            success: false,
            id: 0,
            code,
        }
    }
}
