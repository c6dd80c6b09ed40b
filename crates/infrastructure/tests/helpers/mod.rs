pub mod mock_upstream;

pub use mock_upstream::{build_query, unreachable_addr, MockUpstream, MOCK_ANSWER};
