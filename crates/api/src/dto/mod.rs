pub mod record;

pub use record::{RecordDto, RecordRequest};
