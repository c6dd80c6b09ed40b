use regieleki_domain::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordDto {
    pub id: i64,
    pub domain: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
}

impl From<Record> for RecordDto {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            domain: record.domain,
            record_type: record.record_type.to_string(),
            value: record.value,
        }
    }
}

/// Body of create and update requests. Missing fields read as empty and are
/// rejected by validation; an `id` in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RecordRequest {
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub value: String,
}
