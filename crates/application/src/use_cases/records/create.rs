use std::sync::Arc;

use regieleki_domain::{DomainError, Record};
use tracing::info;

use super::RecordFields;
use crate::ports::RecordRepository;

pub struct CreateRecordUseCase {
    repository: Arc<dyn RecordRepository>,
}

impl CreateRecordUseCase {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        domain: &str,
        record_type: &str,
        value: &str,
    ) -> Result<Record, DomainError> {
        let fields = RecordFields::validate(domain, record_type, value)?;

        let record = self
            .repository
            .add(&fields.domain, fields.record_type, &fields.value)
            .await?;

        info!(
            id = record.id,
            domain = %record.domain,
            record_type = %record.record_type,
            value = %record.value,
            "Record created"
        );

        Ok(record)
    }
}
