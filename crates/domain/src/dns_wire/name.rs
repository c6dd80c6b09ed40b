use super::WireError;

/// Upper bound on compression pointers followed while decoding one name.
pub const MAX_POINTER_JUMPS: usize = 10;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 253;

const POINTER_MASK: u8 = 0xC0;

/// Decodes the domain name starting at `offset`.
///
/// Returns the dotted name (no trailing dot) and the offset of the first
/// byte after the name as it appears at `offset`. When the name ends in a
/// compression pointer, that is the byte after the first pointer, not after
/// the bytes the pointer refers to.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), WireError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut resume_at: Option<usize> = None;
    let mut jumps = 0usize;

    loop {
        let len = *buf.get(pos).ok_or(WireError::Truncated)?;

        if len == 0 {
            return Ok((name, resume_at.unwrap_or(pos + 1)));
        }

        if len & POINTER_MASK == POINTER_MASK {
            let low = *buf.get(pos + 1).ok_or(WireError::Truncated)?;
            if resume_at.is_none() {
                resume_at = Some(pos + 2);
            }
            jumps += 1;
            if jumps > MAX_POINTER_JUMPS {
                return Err(WireError::PointerLoop);
            }
            pos = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);
            continue;
        }

        let start = pos + 1;
        let end = start + usize::from(len);
        let label = buf.get(start..end).ok_or(WireError::Truncated)?;
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&String::from_utf8_lossy(label));
        pos = end;
    }
}

/// True when `name` fits the wire format: no label longer than 63 bytes and
/// at most 253 bytes in total, not counting a trailing dot.
pub fn is_encodable_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    name.len() <= MAX_NAME_LEN && name.split('.').all(|label| label.len() <= MAX_LABEL_LEN)
}

/// Encodes a dotted name as length-prefixed labels plus the root label.
/// Empty segments (leading, trailing or doubled dots) are skipped.
///
/// The result is only well-formed for names accepted by
/// [`is_encodable_name`].
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        debug_assert!(label.len() <= MAX_LABEL_LEN, "label too long: {}", label);
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stops_at_root_label() {
        let buf = [3, b'f', b'o', b'o', 0, 0xFF];
        assert_eq!(decode_name(&buf, 0), Ok(("foo".to_string(), 5)));
    }

    #[test]
    fn test_decode_root_name_is_empty() {
        assert_eq!(decode_name(&[0], 0), Ok((String::new(), 1)));
    }

    #[test]
    fn test_decode_pointer_past_end_is_truncated() {
        let buf = [0xC0, 0x40];
        assert_eq!(decode_name(&buf, 0), Err(WireError::Truncated));
    }

    #[test]
    fn test_encodable_name_limits() {
        let label63 = "x".repeat(63);
        assert!(is_encodable_name(&format!("{}.local", label63)));
        assert!(is_encodable_name("app.local."));
        assert!(!is_encodable_name(&format!("{}x.local", label63)));

        let long = vec![label63.as_str(); 4].join(".");
        assert_eq!(long.len(), 255);
        assert!(!is_encodable_name(&long));
        assert!(is_encodable_name(&long[..253]));
    }

    #[test]
    fn test_encode_skips_empty_segments() {
        assert_eq!(encode_name(".a..b."), vec![1, b'a', 1, b'b', 0]);
    }
}
