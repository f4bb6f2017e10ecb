//! Strict decoding of a generation reply.
//!
//! Stage one finds the first top-level JSON array in free text, stage two
//! validates every element as a block descriptor. Either stage failing is a
//! `Format` error; a partially valid batch is never returned.

use shared::BlockDescriptor;

use crate::error::{Error, Result};

/// Slice of `text` spanning the first balanced `[...]`, brackets inside JSON
/// strings ignored.
pub fn extract_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Validate a JSON array literal as a non-empty descriptor batch
pub fn decode_batch(span: &str) -> Result<Vec<BlockDescriptor>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(span)
        .map_err(|e| Error::Format(format!("reply array is not valid JSON: {e}")))?;
    if items.is_empty() {
        return Err(Error::Format("reply contained no blocks".into()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<BlockDescriptor>(item)
                .map_err(|e| Error::Format(format!("block {i}: {e}")))
        })
        .collect()
}

/// Both stages over raw reply text
pub fn parse_batch(text: &str) -> Result<Vec<BlockDescriptor>> {
    let span = extract_array(text)
        .ok_or_else(|| Error::Format("reply contains no JSON array".into()))?;
    decode_batch(span)
}
