//! # Type Signatures
//!
//! Signatures are opaque to the properties layer. The only operation needed
//! is splitting a signature into its complete types, which the reflection
//! callbacks use to render one `<arg>` element per argument.

use thiserror::Error;

/// Errors from signature parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A character that is not a type code.
    #[error("Unknown type code {code:?} at offset {offset} in {signature:?}")]
    UnknownTypeCode {
        signature: String,
        code: char,
        offset: usize,
    },

    /// Signature ended in the middle of a container.
    #[error("Signature {signature:?} ends inside a container")]
    Truncated { signature: String },

    /// Closing bracket without a matching opener, or an empty struct.
    #[error("Malformed container at offset {offset} in {signature:?}")]
    MalformedContainer { signature: String, offset: usize },
}

const BASIC_CODES: &[u8] = b"ybnqiuxtdhsog";

/// Split a signature into complete types.
///
/// ```
/// use bus_types::split_signature;
///
/// assert_eq!(split_signature("sa{sv}as").unwrap(), vec!["s", "a{sv}", "as"]);
/// ```
pub fn split_signature(signature: &str) -> Result<Vec<String>, SignatureError> {
    let bytes = signature.as_bytes();
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let end = complete_type_end(signature, bytes, offset)?;
        out.push(signature[offset..end].to_string());
        offset = end;
    }
    Ok(out)
}

/// Return the offset one past the complete type starting at `start`.
fn complete_type_end(signature: &str, bytes: &[u8], start: usize) -> Result<usize, SignatureError> {
    let truncated = || SignatureError::Truncated {
        signature: signature.to_string(),
    };
    let Some(&code) = bytes.get(start) else {
        return Err(truncated());
    };

    match code {
        c if BASIC_CODES.contains(&c) || c == b'v' => Ok(start + 1),
        b'a' => complete_type_end(signature, bytes, start + 1),
        b'(' => {
            let mut offset = start + 1;
            if bytes.get(offset) == Some(&b')') {
                return Err(SignatureError::MalformedContainer {
                    signature: signature.to_string(),
                    offset,
                });
            }
            loop {
                match bytes.get(offset) {
                    None => return Err(truncated()),
                    Some(b')') => return Ok(offset + 1),
                    Some(_) => offset = complete_type_end(signature, bytes, offset)?,
                }
            }
        }
        b'{' => {
            // Dict entry: one basic key type, one complete value type.
            let key = start + 1;
            match bytes.get(key) {
                None => return Err(truncated()),
                Some(k) if BASIC_CODES.contains(k) => {}
                Some(_) => {
                    return Err(SignatureError::MalformedContainer {
                        signature: signature.to_string(),
                        offset: key,
                    })
                }
            }
            let value_end = complete_type_end(signature, bytes, key + 1)?;
            match bytes.get(value_end) {
                Some(b'}') => Ok(value_end + 1),
                None => Err(truncated()),
                Some(_) => Err(SignatureError::MalformedContainer {
                    signature: signature.to_string(),
                    offset: value_end,
                }),
            }
        }
        b')' | b'}' => Err(SignatureError::MalformedContainer {
            signature: signature.to_string(),
            offset: start,
        }),
        other => Err(SignatureError::UnknownTypeCode {
            signature: signature.to_string(),
            code: other as char,
            offset: start,
        }),
    }
}
