use std::sync::Arc;

use regieleki_domain::DomainError;
use tracing::info;

use crate::ports::RecordRepository;

pub struct DeleteRecordUseCase {
    repository: Arc<dyn RecordRepository>,
}

impl DeleteRecordUseCase {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i64) -> Result<(), DomainError> {
        self.repository.delete(id).await?;
        info!(id, "Record deleted");
        Ok(())
    }
}
