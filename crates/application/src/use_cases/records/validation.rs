use regieleki_domain::dns_wire::is_encodable_name;
use regieleki_domain::{DomainError, RecordType};
use std::net::IpAddr;

/// Record fields that passed validation, trimmed and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub domain: String,
    pub record_type: RecordType,
    pub value: String,
}

impl RecordFields {
    /// Checks raw user input the way the management API accepts it.
    pub fn validate(domain: &str, record_type: &str, value: &str) -> Result<Self, DomainError> {
        let domain = domain.trim();
        let value = value.trim();
        let record_type = record_type.trim().to_uppercase();

        if domain.is_empty() {
            return Err(invalid("domain is required"));
        }
        if !is_encodable_name(domain) {
            return Err(invalid("domain name is too long"));
        }
        if value.is_empty() {
            return Err(invalid("value is required"));
        }

        let record_type = match record_type.as_str() {
            "A" => {
                match value.parse::<IpAddr>().map(|ip| ip.to_canonical()) {
                    Ok(IpAddr::V4(_)) => {}
                    _ => return Err(invalid("invalid IPv4 address")),
                }
                RecordType::A
            }
            "AAAA" => {
                match value.parse::<IpAddr>() {
                    Ok(IpAddr::V6(v6)) if v6.to_ipv4_mapped().is_none() => {}
                    _ => return Err(invalid("invalid IPv6 address")),
                }
                RecordType::AAAA
            }
            "CNAME" => {
                if value.contains([' ', '\t']) || !is_encodable_name(value) {
                    return Err(invalid("invalid CNAME target"));
                }
                RecordType::CNAME
            }
            _ => return Err(invalid("type must be A, AAAA, or CNAME")),
        };

        Ok(Self {
            domain: domain.to_string(),
            record_type,
            value: value.to_string(),
        })
    }
}

fn invalid(message: &str) -> DomainError {
    DomainError::InvalidRecord(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<RecordFields, DomainError>) -> String {
        match result {
            Err(DomainError::InvalidRecord(msg)) => msg,
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_trims_and_uppercases() {
        let fields = RecordFields::validate("  app.local ", " a ", " 10.0.0.1 ").unwrap();
        assert_eq!(fields.domain, "app.local");
        assert_eq!(fields.record_type, RecordType::A);
        assert_eq!(fields.value, "10.0.0.1");
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(message(RecordFields::validate(" ", "A", "10.0.0.1")), "domain is required");
        assert_eq!(message(RecordFields::validate("a.local", "A", "")), "value is required");
    }

    #[test]
    fn test_address_families() {
        assert_eq!(
            message(RecordFields::validate("a.local", "A", "fd00::1")),
            "invalid IPv4 address"
        );
        assert_eq!(
            message(RecordFields::validate("a.local", "AAAA", "10.0.0.1")),
            "invalid IPv6 address"
        );
        assert_eq!(
            message(RecordFields::validate("a.local", "AAAA", "::ffff:10.0.0.1")),
            "invalid IPv6 address"
        );
        assert!(RecordFields::validate("a.local", "AAAA", "fd00::1").is_ok());
    }

    #[test]
    fn test_cname_rejects_whitespace() {
        assert_eq!(
            message(RecordFields::validate("a.local", "CNAME", "bad target")),
            "invalid CNAME target"
        );
        assert!(RecordFields::validate("a.local", "cname", "app.local").is_ok());
    }

    #[test]
    fn test_names_must_fit_wire_limits() {
        let long_label = format!("{}.local", "x".repeat(64));
        assert_eq!(
            message(RecordFields::validate("a.local", "CNAME", &long_label)),
            "invalid CNAME target"
        );
        assert_eq!(
            message(RecordFields::validate(&long_label, "A", "10.0.0.1")),
            "domain name is too long"
        );

        let long_name = vec!["x".repeat(60); 5].join(".");
        assert_eq!(
            message(RecordFields::validate("a.local", "CNAME", &long_name)),
            "invalid CNAME target"
        );
        assert!(RecordFields::validate("a.local", "CNAME", &format!("{}.local", "x".repeat(63))).is_ok());
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            message(RecordFields::validate("a.local", "MX", "mail.local")),
            "type must be A, AAAA, or CNAME"
        );
    }
}
