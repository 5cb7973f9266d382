use serde::de::DeserializeOwned;

/// Longest slice of the offending candidate kept for diagnostics.
const SNIPPET_LEN: usize = 200;

/// A candidate that failed to parse as JSON.
///
/// Carries a truncated copy of the input so a bad record can be logged and
/// skipped without retaining the full candidate.
#[derive(Debug, thiserror::Error)]
#[error("record decode failed: {source}; input: {snippet:?}")]
pub struct DecodeError {
    pub snippet: String,
    #[source]
    pub source: simd_json::Error,
}

/// Parses one framed candidate.
///
/// The structure comes back as-is: no schema validation, no coercion. simd-json
/// parses in place, so the candidate is copied into scratch space first.
pub fn decode_frame<T: DeserializeOwned>(frame: &[u8]) -> Result<T, DecodeError> {
    let mut scratch = frame.to_vec();
    simd_json::from_slice(&mut scratch).map_err(|source| DecodeError {
        snippet: snippet_of(frame),
        source,
    })
}

fn snippet_of(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame).chars().take(SNIPPET_LEN).collect()
}
