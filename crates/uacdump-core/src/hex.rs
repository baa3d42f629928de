//! Hex text input.
//!
//! Accepts the forms descriptor bytes are usually pasted in: `0a 24 01`,
//! `0x0a, 0x24, 0x01`, `0a2401`, one byte per line, and `#` comments to the
//! end of a line.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex byte '{token}'")]
    InvalidDigit { token: String },
    #[error("odd number of hex digits in '{token}'")]
    OddLength { token: String },
}

/// Parse hex text into bytes.
///
/// Tokens are separated by whitespace or commas and may carry a `0x` prefix.
/// A single-digit token is one byte; longer tokens must have an even number
/// of digits and are read two digits per byte.
///
/// # Errors
/// Returns `HexError` for non-hex characters or an odd-length token.
///
/// # Examples
/// ```
/// use uacdump_core::hex::parse_hex_bytes;
///
/// assert_eq!(parse_hex_bytes("0x0a, 0x24 1")?, vec![0x0a, 0x24, 0x01]);
/// assert_eq!(parse_hex_bytes("0a2401 # header")?, vec![0x0a, 0x24, 0x01]);
/// assert!(parse_hex_bytes("0a2").is_err());
/// # Ok::<(), uacdump_core::hex::HexError>(())
/// ```
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, HexError> {
    let mut bytes = Vec::new();
    for line in text.lines() {
        let content = line.split('#').next().unwrap_or_default();
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            parse_token(token, &mut bytes)?;
        }
    }
    Ok(bytes)
}

fn parse_token(token: &str, bytes: &mut Vec<u8>) -> Result<(), HexError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit {
            token: token.to_string(),
        });
    }
    if digits.len() == 1 {
        bytes.push(hex_value(digits.as_bytes()[0]));
        return Ok(());
    }
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength {
            token: token.to_string(),
        });
    }
    bytes.extend(
        digits
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| (hex_value(pair[0]) << 4) | hex_value(pair[1])),
    );
    Ok(())
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Whether file contents look like hex text rather than raw descriptor bytes.
///
/// Text must be UTF-8 and, outside `#` comments, contain only hex digits,
/// `x`/`X`, commas and whitespace.
pub fn is_hex_text(data: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(data) else {
        return false;
    };
    text.lines().all(|line| {
        line.split('#')
            .next()
            .unwrap_or_default()
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c.is_whitespace() || matches!(c, ',' | 'x' | 'X'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_layouts() {
        assert_eq!(parse_hex_bytes("0A 24\n01\n").unwrap(), vec![0x0a, 0x24, 0x01]);
        assert_eq!(parse_hex_bytes("0X0a,0x24,,1").unwrap(), vec![0x0a, 0x24, 0x01]);
        assert_eq!(parse_hex_bytes("").unwrap(), Vec::<u8>::new());
        assert_eq!(parse_hex_bytes("# only a comment").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_bad_tokens() {
        assert_eq!(
            parse_hex_bytes("0a zz").unwrap_err(),
            HexError::InvalidDigit {
                token: "zz".to_string()
            }
        );
        assert!(matches!(
            parse_hex_bytes("0x").unwrap_err(),
            HexError::InvalidDigit { .. }
        ));
        assert!(matches!(
            parse_hex_bytes("123").unwrap_err(),
            HexError::OddLength { .. }
        ));
    }

    #[test]
    fn detects_binary_content() {
        assert!(is_hex_text(b"0a 24 01 # header\n"));
        assert!(!is_hex_text(&[0x0a, 0x24, 0x01]));
        assert!(!is_hex_text(b"hello"));
    }
}
