use regieleki_application::ports::RecordRepository;
use regieleki_application::use_cases::{
    CreateRecordUseCase, DeleteRecordUseCase, ListRecordsUseCase, UpdateRecordUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub list_records: Arc<ListRecordsUseCase>,
    pub create_record: Arc<CreateRecordUseCase>,
    pub update_record: Arc<UpdateRecordUseCase>,
    pub delete_record: Arc<DeleteRecordUseCase>,
    /// Bearer token required on every API request; `None` disables auth.
    pub api_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordRepository>, api_token: Option<String>) -> Self {
        Self {
            list_records: Arc::new(ListRecordsUseCase::new(records.clone())),
            create_record: Arc::new(CreateRecordUseCase::new(records.clone())),
            update_record: Arc::new(UpdateRecordUseCase::new(records.clone())),
            delete_record: Arc::new(DeleteRecordUseCase::new(records)),
            api_token: api_token.map(Arc::from),
        }
    }
}
