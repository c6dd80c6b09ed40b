use std::sync::Arc;

use regieleki_domain::{DomainError, Record};
use tracing::info;

use super::RecordFields;
use crate::ports::RecordRepository;

pub struct UpdateRecordUseCase {
    repository: Arc<dyn RecordRepository>,
}

impl UpdateRecordUseCase {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        id: i64,
        domain: &str,
        record_type: &str,
        value: &str,
    ) -> Result<Record, DomainError> {
        let fields = RecordFields::validate(domain, record_type, value)?;

        let record = self
            .repository
            .update(id, &fields.domain, fields.record_type, &fields.value)
            .await?;

        info!(
            id = record.id,
            domain = %record.domain,
            record_type = %record.record_type,
            value = %record.value,
            "Record updated"
        );

        Ok(record)
    }
}
