mod helpers;

use helpers::{MockForwarder, MockRecordRepository};
use regieleki_application::use_cases::HandleDnsQueryUseCase;
use regieleki_domain::dns_wire::encode_name;
use regieleki_domain::{Record, RecordType};
use std::sync::Arc;

fn build_query(domain: &str, qtype: u16) -> Vec<u8> {
    let mut buf = vec![
        0xBE, 0xEF, // ID
        0x01, 0x00, // flags: RD
        0x00, 0x01, // QDCOUNT
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    buf
}

async fn make_use_case(
    records: Vec<Record>,
    forwarder: MockForwarder,
) -> (HandleDnsQueryUseCase, MockForwarder) {
    let repo = MockRecordRepository::with_records(records).await;
    let use_case = HandleDnsQueryUseCase::new(Arc::new(repo), Arc::new(forwarder.clone()));
    (use_case, forwarder)
}

fn ancount(resp: &[u8]) -> u16 {
    u16::from_be_bytes([resp[6], resp[7]])
}

#[tokio::test]
async fn test_answers_local_record_without_forwarding() {
    let (use_case, forwarder) = make_use_case(
        vec![Record::new(1, "app.my.local", RecordType::A, "100.70.30.1")],
        MockForwarder::replying(vec![0xFF; 12]),
    )
    .await;

    let query = build_query("app.my.local", 1);
    let resp = use_case.execute(&query).await.unwrap();

    assert_eq!(resp[2] & 0x84, 0x84, "QR and AA set");
    assert_eq!(ancount(&resp), 1);
    assert_eq!(&resp[resp.len() - 4..], &[100, 70, 30, 1]);
    assert_eq!(forwarder.calls(), 0);
}

#[tokio::test]
async fn test_lookup_is_case_insensitive() {
    let (use_case, _) = make_use_case(
        vec![Record::new(1, "app.my.local", RecordType::A, "10.0.0.1")],
        MockForwarder::failing(),
    )
    .await;

    let resp = use_case
        .execute(&build_query("APP.My.Local", 1))
        .await
        .unwrap();

    assert_eq!(ancount(&resp), 1);
}

#[tokio::test]
async fn test_managed_domain_with_no_matching_type_is_not_forwarded() {
    let (use_case, forwarder) = make_use_case(
        vec![Record::new(1, "app.my.local", RecordType::A, "10.0.0.1")],
        MockForwarder::replying(vec![0xFF; 12]),
    )
    .await;

    let query = build_query("app.my.local", 28);
    let resp = use_case.execute(&query).await.unwrap();

    assert_eq!(ancount(&resp), 0);
    assert_eq!(resp[3] & 0x0F, 0, "NOERROR");
    assert_eq!(resp.len(), query.len());
    assert_eq!(forwarder.calls(), 0);
}

#[tokio::test]
async fn test_unknown_domain_is_relayed_verbatim() {
    let upstream_reply = vec![0xBE, 0xEF, 0x81, 0x80, 0, 1, 0, 0, 0, 0, 0, 0, 0xAA];
    let (use_case, forwarder) =
        make_use_case(vec![], MockForwarder::replying(upstream_reply.clone())).await;

    let resp = use_case
        .execute(&build_query("example.com", 1))
        .await
        .unwrap();

    assert_eq!(resp, upstream_reply);
    assert_eq!(forwarder.calls(), 1);
}

#[tokio::test]
async fn test_servfail_when_every_upstream_fails() {
    let (use_case, forwarder) = make_use_case(vec![], MockForwarder::failing()).await;

    let query = build_query("example.com", 1);
    let resp = use_case.execute(&query).await.unwrap();

    assert_eq!(resp[3] & 0x0F, 2, "SERVFAIL");
    assert_eq!(ancount(&resp), 0);
    assert_eq!(&resp[0..2], &query[0..2]);
    assert_eq!(forwarder.calls(), 1);
}

#[tokio::test]
async fn test_drops_short_datagram() {
    let (use_case, forwarder) = make_use_case(vec![], MockForwarder::failing()).await;
    assert!(use_case.execute(&[0u8; 11]).await.is_none());
    assert_eq!(forwarder.calls(), 0);
}

#[tokio::test]
async fn test_drops_responses() {
    let (use_case, forwarder) = make_use_case(vec![], MockForwarder::failing()).await;
    let mut query = build_query("example.com", 1);
    query[2] |= 0x80;
    assert!(use_case.execute(&query).await.is_none());
    assert_eq!(forwarder.calls(), 0);
}

#[tokio::test]
async fn test_drops_query_without_question() {
    let (use_case, _) = make_use_case(vec![], MockForwarder::failing()).await;
    let mut query = build_query("example.com", 1);
    query[5] = 0;
    assert!(use_case.execute(&query).await.is_none());
}

#[tokio::test]
async fn test_drops_pointer_loop_in_question() {
    let (use_case, forwarder) = make_use_case(vec![], MockForwarder::failing()).await;
    let query = vec![
        0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x0C,
        0x00, 0x01, 0x00, 0x01,
    ];
    assert!(use_case.execute(&query).await.is_none());
    assert_eq!(forwarder.calls(), 0);
}

#[tokio::test]
async fn test_cname_fallback_answer() {
    let (use_case, _) = make_use_case(
        vec![Record::new(1, "alias.my.local", RecordType::CNAME, "app.my.local")],
        MockForwarder::failing(),
    )
    .await;

    let query = build_query("alias.my.local", 1);
    let resp = use_case.execute(&query).await.unwrap();

    assert_eq!(ancount(&resp), 1);
    let answer = &resp[query.len()..];
    assert_eq!(&answer[2..4], &[0, 5], "answer carries the CNAME type");
}
