use crate::ports::{RecordRepository, UpstreamForwarder};
use regieleki_domain::dns_wire::{build_response, build_servfail, parse_question};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns one inbound datagram into at most one reply datagram.
pub struct HandleDnsQueryUseCase {
    records: Arc<dyn RecordRepository>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl HandleDnsQueryUseCase {
    pub fn new(records: Arc<dyn RecordRepository>, forwarder: Arc<dyn UpstreamForwarder>) -> Self {
        Self { records, forwarder }
    }

    /// Returns `None` when the datagram must go unanswered: it is not a
    /// well-formed query, or its first question cannot be decoded.
    pub async fn execute(&self, query: &[u8]) -> Option<Vec<u8>> {
        let question = match parse_question(query) {
            Ok(q) => q,
            Err(e) => {
                debug!(error = %e, len = query.len(), "Dropping malformed datagram");
                return None;
            }
        };

        let resolution = self.records.resolve(&question.name, question.qtype).await;

        if resolution.authoritative {
            if !resolution.records.is_empty() {
                debug!(
                    domain = %question.name,
                    qtype = question.qtype,
                    answers = resolution.records.len(),
                    "Resolved locally"
                );
            }
            return Some(build_response(query, question.end, &resolution.records));
        }

        match self.forwarder.forward(query).await {
            Some(response) => Some(response),
            None => {
                warn!(domain = %question.name, qtype = question.qtype, "All upstreams failed, answering SERVFAIL");
                Some(build_servfail(query, question.end))
            }
        }
    }
}
