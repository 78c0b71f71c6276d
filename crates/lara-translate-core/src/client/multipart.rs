//! Multipart/form-data body construction.
//!
//! Used for presigned object-storage uploads, where the ticket's form fields
//! and the file itself must be sent as one multipart body. Built by hand so
//! the exact byte layout stays under our control.

use std::collections::BTreeMap;

/// Strip characters that could break a `Content-Disposition` header or the
/// part framing: `"`, CR, LF and backslash.
pub fn sanitize_header_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n' | '\\'))
        .collect()
}

/// Generate a boundary unlikely to collide with content:
/// timestamp plus 128 bits of randomness, hex-encoded.
pub fn generate_boundary() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("----LaraUpload{}{}", millis, uuid::Uuid::new_v4().simple())
}

/// Serialize form fields plus one file into a multipart/form-data body.
///
/// Each field becomes its own part; the file part carries a `filename` and
/// `Content-Type: application/octet-stream`; the body is terminated by the
/// closing `--boundary--` marker. Field names, values and the filename are
/// sanitized against header injection.
pub fn build_multipart_body(
    fields: &BTreeMap<String, String>,
    file_field_name: &str,
    file_bytes: &[u8],
    filename: &str,
    boundary: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(file_bytes.len() + 512);
    let safe_filename = sanitize_header_value(filename);

    for (key, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                sanitize_header_value(key),
                sanitize_header_value(value),
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{file_field_name}\"; \
             filename=\"{safe_filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    /// Minimal reference parse of a multipart body: split on the boundary
    /// marker and recover (headers, payload) per part.
    fn parse_parts(body: &[u8], boundary: &str) -> Vec<(String, Vec<u8>)> {
        let delimiter = format!("--{boundary}");
        let mut parts = Vec::new();
        let mut rest = body;

        loop {
            let Some(start) = find(rest, delimiter.as_bytes()) else {
                break;
            };
            rest = &rest[start + delimiter.len()..];
            if rest.starts_with(b"--") {
                break;
            }
            // Skip the CRLF after the boundary line
            rest = &rest[2..];
            let header_end =
                find(rest, b"\r\n\r\n").unwrap_or_else(|| panic!("part without header terminator"));
            let headers = String::from_utf8(rest[..header_end].to_vec()).unwrap();
            rest = &rest[header_end + 4..];
            let payload_end = find(rest, format!("\r\n--{boundary}").as_bytes())
                .unwrap_or_else(|| panic!("part without closing boundary"));
            parts.push((headers, rest[..payload_end].to_vec()));
            rest = &rest[payload_end..];
        }

        parts
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    #[test]
    fn test_round_trip_fields_and_file() {
        let fields = fields(&[("key", "uploads/abc"), ("policy", "eyJ9")]);
        let file = b"\x00\x01binary content\xff";
        let body = build_multipart_body(&fields, "file", file, "doc.pdf", "BOUNDARY123");

        let parts = parse_parts(&body, "BOUNDARY123");
        assert_eq!(parts.len(), 3);
        assert!(parts[0].0.contains("name=\"key\""));
        assert_eq!(parts[0].1, b"uploads/abc");
        assert!(parts[1].0.contains("name=\"policy\""));
        assert_eq!(parts[1].1, b"eyJ9");
        assert!(parts[2].0.contains("name=\"file\""));
        assert!(parts[2].0.contains("filename=\"doc.pdf\""));
        assert!(parts[2].0.contains("Content-Type: application/octet-stream"));
        assert_eq!(parts[2].1, file);
    }

    #[test]
    fn test_body_terminated_by_closing_marker() {
        let body = build_multipart_body(&fields(&[]), "file", b"x", "a.txt", "B");
        assert!(body.ends_with(b"\r\n--B--\r\n"));
    }

    #[test]
    fn test_injection_characters_are_stripped() {
        let fields = fields(&[("key", "a\"b\r\nc\\d")]);
        let body = build_multipart_body(
            &fields,
            "file",
            b"data",
            "evil\"name\r\n.pdf",
            "BOUNDARY123",
        );

        let parts = parse_parts(&body, "BOUNDARY123");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].1, b"abcd");
        assert!(parts[1].0.contains("filename=\"evilname.pdf\""));
    }

    #[test]
    fn test_sanitize_header_value() {
        assert_eq!(sanitize_header_value("plain.pdf"), "plain.pdf");
        assert_eq!(sanitize_header_value("a\"b\\c\r\nd"), "abcd");
    }

    #[test]
    fn test_generate_boundary_is_unique() {
        let a = generate_boundary();
        let b = generate_boundary();
        assert_ne!(a, b);
        assert!(a.starts_with("----LaraUpload"));
    }
}
