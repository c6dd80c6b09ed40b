pub mod dns;
pub mod records;

pub use dns::HandleDnsQueryUseCase;
pub use records::{
    CreateRecordUseCase, DeleteRecordUseCase, ListRecordsUseCase, RecordFields,
    UpdateRecordUseCase,
};
