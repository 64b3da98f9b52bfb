//! Base64 variable-length quantity codec
//!
//! Each integer is written as a sequence of base64 digits carrying five bits
//! of payload. The lowest bit of the first digit is the sign, and bit 6 of
//! every digit marks a continuation.

use thiserror::Error;

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_BASE_MASK: u64 = (1 << VLQ_BASE_SHIFT) - 1;
const VLQ_CONTINUATION_BIT: u64 = 1 << VLQ_BASE_SHIFT;

/// Errors produced while decoding a VLQ segment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlqError {
    /// A character outside the base64 alphabet
    #[error("invalid base64 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// The segment ended while a value still expected more digits
    #[error("segment ended in the middle of a value")]
    UnterminatedValue,

    /// A value does not fit in 64 bits
    #[error("value overflows a 64-bit integer")]
    Overflow,
}

/// Encode a sequence of signed integers into one VLQ string.
///
/// ```
/// use retrace_util::vlq;
///
/// assert_eq!(vlq::encode(&[0, 0, 0, 0]), "AAAA");
/// assert_eq!(vlq::encode(&[1, -1, 16]), "CDgB");
/// ```
pub fn encode(values: &[i64]) -> String {
    let mut out = String::with_capacity(values.len() * 2);
    for &value in values {
        encode_value(value, &mut out);
    }
    out
}

/// Append the encoding of a single integer to `out`.
pub fn encode_value(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        value.unsigned_abs() << 1
    };

    loop {
        let mut digit = vlq & VLQ_BASE_MASK;
        vlq >>= VLQ_BASE_SHIFT;
        if vlq > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

/// Decode one segment (no `,` or `;` separators) back into its integers.
///
/// ```
/// use retrace_util::vlq;
///
/// assert_eq!(vlq::decode("CDgB").unwrap(), vec![1, -1, 16]);
/// ```
pub fn decode(segment: &str) -> Result<Vec<i64>, VlqError> {
    let mut values = Vec::new();
    let mut accumulator: u64 = 0;
    let mut shift: u32 = 0;
    let mut in_value = false;

    for (position, ch) in segment.chars().enumerate() {
        let digit = base64_value(ch).ok_or(VlqError::InvalidCharacter { ch, position })?;
        let payload = digit & VLQ_BASE_MASK;

        if shift >= 64 || (shift > 0 && payload >> (64 - shift) != 0) {
            return Err(VlqError::Overflow);
        }
        accumulator |= payload << shift;
        in_value = true;

        if digit & VLQ_CONTINUATION_BIT != 0 {
            shift += VLQ_BASE_SHIFT;
            continue;
        }

        let magnitude = accumulator >> 1;
        let value = i64::try_from(magnitude).map_err(|_| VlqError::Overflow)?;
        values.push(if accumulator & 1 == 1 { -value } else { value });

        accumulator = 0;
        shift = 0;
        in_value = false;
    }

    if in_value {
        return Err(VlqError::UnterminatedValue);
    }

    Ok(values)
}

fn base64_value(ch: char) -> Option<u64> {
    let value = match ch {
        'A'..='Z' => ch as u64 - 'A' as u64,
        'a'..='z' => ch as u64 - 'a' as u64 + 26,
        '0'..='9' => ch as u64 - '0' as u64 + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(value)
}
