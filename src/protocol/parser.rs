//! Command parsing
//!
//! Decodes one raw control-channel message into a validated [`Request`] or a
//! [`ParseError`]. Pure function of the input bytes; no side effects.
//!
//! Wire format, one command per line:
//!
//! ```text
//! <data port> -l
//! <data port> -g <filename>
//! ```
//!
//! Tokens are separated by single spaces; consecutive spaces produce empty
//! tokens and are rejected. Validation order is fixed: length and charset,
//! then token count, then the port token, then the operation and its arity,
//! then the filename.

use crate::error::ParseError;
use crate::protocol::request::{DATA_PORT_MIN, MAX_COMMAND_LEN, MAX_TOKENS, Operation, Request};

/// Parse the raw bytes of one control message into a validated `Request`.
///
/// The trailing `\n` or `\r\n` left by line-oriented reads is stripped before
/// any limit is applied.
pub fn parse_request(raw: &[u8]) -> Result<Request, ParseError> {
    let line = strip_line_ending(raw);

    if line.len() > MAX_COMMAND_LEN {
        return Err(ParseError::BadCommand(format!(
            "command exceeds {} bytes",
            MAX_COMMAND_LEN
        )));
    }

    let text = match std::str::from_utf8(line) {
        Ok(text) if text.is_ascii() => text,
        _ => return Err(ParseError::BadCommand("command is not ASCII".into())),
    };

    let tokens: Vec<&str> = text.split(' ').collect();
    if tokens.len() > MAX_TOKENS {
        return Err(ParseError::BadCommand(format!(
            "expected at most {} tokens, got {}",
            MAX_TOKENS,
            tokens.len()
        )));
    }

    let data_port = parse_data_port(tokens[0])?;

    match &tokens[1..] {
        ["-l"] => Ok(Request {
            data_port,
            operation: Operation::List,
        }),
        ["-g", name] => Ok(Request {
            data_port,
            operation: Operation::Get(validate_filename(name)?),
        }),
        ["-g"] => Err(ParseError::BadCommand("-g requires a filename".into())),
        _ => Err(ParseError::BadCommand(
            "expected '-l' or '-g <filename>' after the data port".into(),
        )),
    }
}

fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

/// The first token must be an integer in [[`DATA_PORT_MIN`], 65535]; anything
/// else (including non-numeric input) is `BadPort`.
fn parse_data_port(token: &str) -> Result<u16, ParseError> {
    let port: u16 = token
        .parse()
        .map_err(|_| ParseError::BadPort(token.to_string()))?;
    if port < DATA_PORT_MIN {
        return Err(ParseError::BadPort(token.to_string()));
    }
    Ok(port)
}

/// A filename must be non-empty and must not be able to escape the served
/// directory: no path separators, no `..` sequences.
fn validate_filename(name: &str) -> Result<String, ParseError> {
    if name.is_empty() {
        return Err(ParseError::BadCommand("filename is empty".into()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ParseError::BadCommand(
            "filename must not contain path separators".into(),
        ));
    }
    if name.contains("..") {
        return Err(ParseError::BadCommand(
            "filename must not contain '..'".into(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Request, ParseError> {
        parse_request(s.as_bytes())
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse("3000 -l").unwrap(),
            Request {
                data_port: 3000,
                operation: Operation::List,
            }
        );
    }

    #[test]
    fn test_parse_get() {
        assert_eq!(
            parse("4021 -g notes.txt").unwrap(),
            Request {
                data_port: 4021,
                operation: Operation::Get("notes.txt".to_string()),
            }
        );
    }

    #[test]
    fn test_line_endings_stripped() {
        assert!(parse("3000 -l\n").is_ok());
        assert!(parse("3000 -l\r\n").is_ok());
        assert_eq!(
            parse("3000 -g a.txt\r\n").unwrap().operation,
            Operation::Get("a.txt".to_string())
        );
    }

    #[test]
    fn test_too_many_tokens() {
        assert!(matches!(
            parse("3000 -g a.txt extra"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(
            parse("3000 -l x y z"),
            Err(ParseError::BadCommand(_))
        ));
    }

    #[test]
    fn test_port_range() {
        assert!(matches!(parse("1023 -l"), Err(ParseError::BadPort(_))));
        assert_eq!(parse("1024 -l").unwrap().data_port, 1024);
        assert_eq!(parse("65535 -l").unwrap().data_port, 65535);
        assert!(matches!(parse("65536 -l"), Err(ParseError::BadPort(_))));
        assert!(matches!(parse("0 -l"), Err(ParseError::BadPort(_))));
    }

    #[test]
    fn test_port_not_numeric() {
        assert!(matches!(parse("abc -l"), Err(ParseError::BadPort(_))));
        assert!(matches!(parse("-1 -l"), Err(ParseError::BadPort(_))));
        // Port token is validated before the operation token.
        assert!(matches!(parse("abc -x"), Err(ParseError::BadPort(_))));
        assert!(matches!(parse(""), Err(ParseError::BadPort(_))));
    }

    #[test]
    fn test_list_arity() {
        assert!(matches!(
            parse("3000 -l extra"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(parse("3000"), Err(ParseError::BadCommand(_))));
    }

    #[test]
    fn test_get_requires_filename() {
        assert!(matches!(parse("3000 -g"), Err(ParseError::BadCommand(_))));
    }

    #[test]
    fn test_unknown_operation() {
        assert!(matches!(parse("3000 -x"), Err(ParseError::BadCommand(_))));
        assert!(matches!(parse("3000 list"), Err(ParseError::BadCommand(_))));
    }

    #[test]
    fn test_filename_rejects_traversal() {
        assert!(matches!(
            parse("3000 -g ../secret"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(
            parse("3000 -g a/b.txt"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(
            parse("3000 -g a\\b.txt"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(
            parse("3000 -g a..b"),
            Err(ParseError::BadCommand(_))
        ));
    }

    #[test]
    fn test_filename_clean_names_accepted() {
        assert!(parse("3000 -g a.txt").is_ok());
        assert!(parse("3000 -g .hidden").is_ok());
        assert!(parse("3000 -g file-with_dash.2.txt").is_ok());
    }

    #[test]
    fn test_consecutive_spaces_rejected() {
        // Single-space delimiting: a double space yields an empty token.
        assert!(matches!(parse("3000  -l"), Err(ParseError::BadCommand(_))));
        assert!(matches!(parse("3000 -l "), Err(ParseError::BadCommand(_))));
        assert!(matches!(parse(" 3000 -l"), Err(ParseError::BadPort(_))));
    }

    #[test]
    fn test_length_limit() {
        let long_name = "a".repeat(300);
        assert!(matches!(
            parse(&format!("3000 -g {}", long_name)),
            Err(ParseError::BadCommand(_))
        ));

        // Exactly at the limit is fine; the terminator does not count.
        let name = "a".repeat(MAX_COMMAND_LEN - "3000 -g ".len());
        let cmd = format!("3000 -g {}\n", name);
        assert!(parse(&cmd).is_ok());
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(matches!(
            parse("3000 -g caf\u{e9}.txt"),
            Err(ParseError::BadCommand(_))
        ));
        assert!(matches!(
            parse_request(&[0xff, 0xfe, 0x20, 0x2d, 0x6c]),
            Err(ParseError::BadCommand(_))
        ));
    }
}
