use std::net::IpAddr;

use super::name::{decode_name, encode_name, is_encodable_name};
use super::WireError;
use crate::record::{Record, RecordType};

pub const HEADER_LEN: usize = 12;

const FLAG_QR: u8 = 0x80;
const FLAG_AA: u8 = 0x04;
const FLAG_RD: u8 = 0x01;
const FLAG_RA: u8 = 0x80;
const RCODE_SERVFAIL: u8 = 0x02;

const CLASS_IN: u16 = 1;
const ANSWER_TTL: u32 = 60;
/// Compression pointer to the question name, which always starts right
/// after the header.
const QUESTION_NAME_PTR: [u8; 2] = [0xC0, HEADER_LEN as u8];

/// The first question of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    /// Offset of the first byte after QTYPE/QCLASS.
    pub end: usize,
}

/// Validates the header of an inbound message and decodes its first
/// question. Anything that is not a query carrying at least one question is
/// rejected.
pub fn parse_question(buf: &[u8]) -> Result<Question, WireError> {
    if buf.len() < HEADER_LEN {
        return Err(WireError::TooShort);
    }
    if buf[2] & FLAG_QR != 0 {
        return Err(WireError::NotAQuery);
    }
    if u16::from_be_bytes([buf[4], buf[5]]) == 0 {
        return Err(WireError::NoQuestion);
    }

    let (name, pos) = decode_name(buf, HEADER_LEN)?;
    let fixed = buf.get(pos..pos + 4).ok_or(WireError::Truncated)?;
    let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);

    Ok(Question {
        name,
        qtype,
        end: pos + 4,
    })
}

/// Builds an authoritative NOERROR answer to `query`.
///
/// `question_end` must come from [`parse_question`] on the same buffer. One
/// answer is emitted per record whose value is usable for its type; records
/// holding an address that does not parse for their family are left out of
/// both the answer section and ANCOUNT.
pub fn build_response(query: &[u8], question_end: usize, records: &[Record]) -> Vec<u8> {
    let mut answers = Vec::new();
    let mut ancount: u16 = 0;

    for record in records {
        let Some(rdata) = answer_rdata(record) else {
            continue;
        };
        answers.extend_from_slice(&QUESTION_NAME_PTR);
        answers.extend_from_slice(&record.record_type.to_u16().to_be_bytes());
        answers.extend_from_slice(&CLASS_IN.to_be_bytes());
        answers.extend_from_slice(&ANSWER_TTL.to_be_bytes());
        answers.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        answers.extend_from_slice(&rdata);
        ancount += 1;
    }

    let mut resp = Vec::with_capacity(question_end + answers.len());
    push_header(
        &mut resp,
        query,
        [FLAG_QR | FLAG_AA | (query[2] & FLAG_RD), FLAG_RA],
        ancount,
    );
    resp.extend_from_slice(&query[HEADER_LEN..question_end]);
    resp.extend_from_slice(&answers);
    resp
}

/// Builds a SERVFAIL reply echoing the question of `query`.
pub fn build_servfail(query: &[u8], question_end: usize) -> Vec<u8> {
    let mut resp = Vec::with_capacity(question_end);
    push_header(
        &mut resp,
        query,
        [FLAG_QR | (query[2] & FLAG_RD), FLAG_RA | RCODE_SERVFAIL],
        0,
    );
    resp.extend_from_slice(&query[HEADER_LEN..question_end]);
    resp
}

fn push_header(resp: &mut Vec<u8>, query: &[u8], flags: [u8; 2], ancount: u16) {
    resp.extend_from_slice(&query[0..2]);
    resp.extend_from_slice(&flags);
    resp.extend_from_slice(&1u16.to_be_bytes());
    resp.extend_from_slice(&ancount.to_be_bytes());
    resp.extend_from_slice(&[0, 0, 0, 0]);
}

fn answer_rdata(record: &Record) -> Option<Vec<u8>> {
    match record.record_type {
        RecordType::A => match record.value.parse::<IpAddr>().ok()?.to_canonical() {
            IpAddr::V4(v4) => Some(v4.octets().to_vec()),
            IpAddr::V6(_) => None,
        },
        RecordType::AAAA => match record.value.parse::<IpAddr>().ok()? {
            IpAddr::V6(v6) if v6.to_ipv4_mapped().is_none() => Some(v6.octets().to_vec()),
            _ => None,
        },
        RecordType::CNAME => {
            is_encodable_name(&record.value).then(|| encode_name(&record.value))
        }
    }
}
