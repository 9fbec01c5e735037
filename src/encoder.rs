use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};

use crate::error::{DecodeError, DecodeResult};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
//
// '*' also passes through unescaped. Strict RFC 3986 would escape it, but
// the encoders this one has to interoperate with treat it as unreserved.
pub const ENCODE_TARGETS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` lazily, for use in `format!` chains.
pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, ENCODE_TARGETS)
}

pub fn percent_encode_str(input: &str) -> String {
    percent_encode(input).to_string()
}

pub fn percent_encode_cow<'a, T: Into<Cow<'a, str>>>(input: T) -> Cow<'a, str> {
    match input.into() {
        Cow::Borrowed(r) => Cow::from(percent_encode(r)),
        Cow::Owned(v) => Cow::from(percent_encode(&v).to_string()),
    }
}

/// Decode a percent-encoded string, the exact inverse of [`percent_encode`].
///
/// Multi-byte UTF-8 sequences split across several `%XX` triplets are
/// reassembled before validation. A literal `+` stays a `+`; the
/// `+`-for-space convention belongs to the form-urlencoded path only
/// (see [`ParameterList::from_form_encoded`]).
///
/// Inputs come from server-controlled responses, so malformed sequences are
/// a [`DecodeError`] rather than a panic.
///
/// [`ParameterList::from_form_encoded`]: crate::ParameterList::from_form_encoded
pub fn percent_decode(input: &str) -> DecodeResult<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return Err(DecodeError::TruncatedSequence(i));
            }
            let hi = hex_value(bytes[i + 1]).ok_or(DecodeError::InvalidHexDigit(i + 1))?;
            let lo = hex_value(bytes[i + 2]).ok_or(DecodeError::InvalidHexDigit(i + 2))?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
