use std::sync::Arc;

use regieleki_domain::Record;

use crate::ports::RecordRepository;

pub struct ListRecordsUseCase {
    repository: Arc<dyn RecordRepository>,
}

impl ListRecordsUseCase {
    pub fn new(repository: Arc<dyn RecordRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Vec<Record> {
        self.repository.list().await
    }
}
