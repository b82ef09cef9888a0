//! Parsers for the payloads of well known records
//!
//! Record framing is handled by the platform, these only see a single record's payload

use winnow::{
    Bytes, ModalResult, Parser,
    binary::bits::{bits, bool as take_bool, take as take_bits},
    error::{ContextError, ErrMode},
    token::{any, rest, take},
};

use crate::payload::{TextPayload, TextPayloadFormat, URI_PREFIXES};

pub type Stream<'i> = &'i Bytes;

pub fn new(b: &[u8]) -> Stream<'_> {
    Bytes::new(b)
}

/// Parse a RTD URI payload: one prefix code byte followed by the rest of the URI
pub fn parse_uri_payload(input: &mut Stream<'_>) -> ModalResult<String> {
    let prefix = any
        .verify_map(|code: u8| URI_PREFIXES.get(code as usize).copied())
        .parse_next(input)?;

    let body = rest
        .try_map(|body: &[u8]| std::str::from_utf8(body).map(str::to_string))
        .parse_next(input)?;

    Ok(format!("{prefix}{body}"))
}

/// Parse a RTD Text payload
///
/// Status byte: bit 7 is the encoding (0 = UTF-8, 1 = UTF-16), bit 6 is reserved,
/// bits 0-5 are the length of the IANA language code that follows
pub fn parse_text_payload(input: &mut Stream<'_>) -> ModalResult<TextPayload> {
    let (is_utf16, _reserved, language_code_length): (bool, bool, u8) =
        bits::<_, _, ErrMode<ContextError>, _, _>((take_bool, take_bool, take_bits(6_u8)))
            .parse_next(input)?;

    let language_code = take(language_code_length as usize).parse_next(input)?;
    let text = rest.parse_next(input)?;

    let (format, text) = if is_utf16 {
        (TextPayloadFormat::Utf16, decode_utf16(text))
    } else {
        (TextPayloadFormat::Utf8, String::from_utf8_lossy(text).to_string())
    };

    Ok(TextPayload {
        format,
        language: String::from_utf8_lossy(language_code).to_string(),
        text,
    })
}

// private

/// UTF-16 text honours a byte order mark, big endian otherwise
fn decode_utf16(text: &[u8]) -> String {
    let (text, little_endian) = match text {
        [0xFE, 0xFF, rest @ ..] => (rest, false),
        [0xFF, 0xFE, rest @ ..] => (rest, true),
        _ => (text, false),
    };

    let units = text
        .chunks_exact(2)
        .map(|chunk| {
            if little_endian {
                u16::from_le_bytes([chunk[0], chunk[1]])
            } else {
                u16::from_be_bytes([chunk[0], chunk[1]])
            }
        })
        .collect::<Vec<u16>>();

    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::payload::{encode_text_payload, encode_uri_payload};

    #[test]
    fn uri_with_prefix() {
        let payload = encode_uri_payload("https://example.com/tag");
        let uri = parse_uri_payload(&mut new(&payload)).unwrap();
        assert_eq!(uri, "https://example.com/tag");
    }

    #[test]
    fn uri_known_bytes() {
        // "https://www." + "nfc.org"
        let payload = [0x02, b'n', b'f', b'c', b'.', b'o', b'r', b'g'];
        let uri = parse_uri_payload(&mut new(&payload)).unwrap();
        assert_eq!(uri, "https://www.nfc.org");
    }

    #[test]
    fn uri_with_unknown_prefix_code_fails() {
        let payload = [0x24, b'x'];
        assert!(parse_uri_payload(&mut new(&payload)).is_err());
    }

    #[test]
    fn uri_with_invalid_utf8_fails() {
        let payload = [0x04, 0xC3, 0x28];
        assert!(parse_uri_payload(&mut new(&payload)).is_err());
    }

    #[test]
    fn empty_uri_payload_fails() {
        assert!(parse_uri_payload(&mut new(&[])).is_err());
    }

    #[test]
    fn text_utf8() {
        let payload = encode_text_payload("hello tag", "en-US");
        let text = parse_text_payload(&mut new(&payload)).unwrap();

        assert_eq!(text.format, TextPayloadFormat::Utf8);
        assert_eq!(text.language, "en-US");
        assert_eq!(text.text, "hello tag");
    }

    #[test]
    fn text_utf16_big_endian() {
        let mut payload = vec![0x80 | 2, b'j', b'a'];
        payload.extend("こんにちは".encode_utf16().flat_map(u16::to_be_bytes));

        let text = parse_text_payload(&mut new(&payload)).unwrap();
        assert_eq!(text.format, TextPayloadFormat::Utf16);
        assert_eq!(text.language, "ja");
        assert_eq!(text.text, "こんにちは");
    }

    #[test]
    fn text_utf16_little_endian_bom() {
        let mut payload = vec![0x80 | 2, b'e', b'n', 0xFF, 0xFE];
        payload.extend("hi".encode_utf16().flat_map(u16::to_le_bytes));

        let text = parse_text_payload(&mut new(&payload)).unwrap();
        assert_eq!(text.text, "hi");
    }

    #[test]
    fn text_truncated_language_fails() {
        let payload = [0x05, b'e', b'n'];
        assert!(parse_text_payload(&mut new(&payload)).is_err());
    }
}
