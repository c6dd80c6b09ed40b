pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod validation;

pub use create::CreateRecordUseCase;
pub use delete::DeleteRecordUseCase;
pub use list::ListRecordsUseCase;
pub use update::UpdateRecordUseCase;
pub use validation::RecordFields;
