//! JSON encoding of record sequences.
//!
//! A collection is stored as a single JSON array of objects. Encoding is
//! indented by default so the files stay readable and diffable.

use crate::document::Document;
use crate::error::{CodecError, CodecResult};

/// Encodes a record sequence as a JSON array.
///
/// With `pretty` set the output is indented with two spaces.
///
/// # Errors
///
/// Returns [`CodecError::EncodingFailed`] if serialization fails.
pub fn encode_documents(documents: &[Document], pretty: bool) -> CodecResult<Vec<u8>> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(documents)
    } else {
        serde_json::to_vec(documents)
    };
    encoded.map_err(|e| CodecError::encoding_failed(e.to_string()))
}

/// Decodes a record sequence from a JSON array of objects.
///
/// Empty or whitespace-only input decodes to an empty sequence.
///
/// # Errors
///
/// Returns [`CodecError::DecodingFailed`] if the bytes are not a JSON array
/// whose elements are all objects.
pub fn decode_documents(bytes: &[u8]) -> CodecResult<Vec<Document>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn sample() -> Vec<Document> {
        vec![
            Document::from([("id", Value::from("a")), ("n", Value::from(1))]),
            Document::from([
                ("id", Value::from("b")),
                ("nested", Value::from(Document::from([("deep", vec![1.5, 2.0])]))),
            ]),
        ]
    }

    #[test]
    fn pretty_output_is_indented() {
        let bytes = encode_documents(&sample(), true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n  {\n"));
        assert!(text.contains("\"id\": \"a\""));
    }

    #[test]
    fn compact_output_is_single_line() {
        let bytes = encode_documents(&sample(), false).unwrap();
        assert!(!bytes.contains(&b'\n'));
    }

    #[test]
    fn decode_preserves_order_and_fields() {
        let docs = sample();
        let decoded = decode_documents(&encode_documents(&docs, true).unwrap()).unwrap();
        assert_eq!(decoded, docs);
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert!(decode_documents(b"").unwrap().is_empty());
        assert!(decode_documents(b"  \n").unwrap().is_empty());
        assert!(decode_documents(b"[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_input_fails() {
        for input in [&b"[{\"a\": 1}"[..], b"{\"a\": 1}", b"[1, 2]", b"not json"] {
            assert!(
                matches!(decode_documents(input), Err(CodecError::DecodingFailed { .. })),
                "{:?} should fail",
                String::from_utf8_lossy(input)
            );
        }
    }
}
