//! DNS wire format helpers (RFC 1035 §4).
//!
//! Pure functions over byte buffers: no state, no I/O. Everything that reads
//! from a buffer bounds-checks its accesses and reports a [`WireError`]
//! instead of panicking, since queries arrive straight off the network.

mod message;
mod name;

pub use message::{build_response, build_servfail, parse_question, Question, HEADER_LEN};
pub use name::{
    decode_name, encode_name, is_encodable_name, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_JUMPS,
};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    #[error("message shorter than a DNS header")]
    TooShort,

    #[error("message is a response, not a query")]
    NotAQuery,

    #[error("message carries no question")]
    NoQuestion,

    #[error("read past the end of the message")]
    Truncated,

    #[error("too many compression pointers")]
    PointerLoop,
}
