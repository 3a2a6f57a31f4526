use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Status/message envelope returned by write endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub status_code: String,
    pub status_msg: String,
}

impl ResponseDto {
    pub fn new(status_code: impl Into<String>, status_msg: impl Into<String>) -> Self {
        Self { status_code: status_code.into(), status_msg: status_msg.into() }
    }
}
