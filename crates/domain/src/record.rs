use std::fmt;
use std::str::FromStr;

/// QTYPE value requesting every record held for a name.
pub const QTYPE_ANY: u16 = 255;

/// Record kinds the store can hold and the server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::AAAA => 28,
            RecordType::CNAME => 5,
        }
    }

    /// True when a record of this type answers a question of type `qtype`.
    /// `ANY` is handled by the caller, not here.
    pub fn matches_qtype(&self, qtype: u16) -> bool {
        self.to_u16() == qtype
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses the canonical upper-case name only; `a` or `Cname` are rejected.
impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            _ => Err(format!("Unsupported record type: {}", s)),
        }
    }
}

/// One locally managed DNS entry.
///
/// `domain` is always lower case once a record has been stored; `value` is
/// kept exactly as written (an address literal for A/AAAA, a target name for
/// CNAME).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub domain: String,
    pub record_type: RecordType,
    pub value: String,
}

impl Record {
    pub fn new(id: i64, domain: &str, record_type: RecordType, value: &str) -> Self {
        Self {
            id,
            domain: domain.to_lowercase(),
            record_type,
            value: value.to_string(),
        }
    }
}
