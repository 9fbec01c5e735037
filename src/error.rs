use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type SignResult<T> = std::result::Result<T, SignError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("percent decoding failed : {0}")]
    Decode(#[from] DecodeError),
    #[error("OAuth sign failed : {0}")]
    Sign(#[from] SignError),
    #[error("missing OAuth parameter : {0}")]
    MissingParameter(#[from] MissingParameterError),
    #[error("request URL is invalid : {0}")]
    Url(#[from] url::ParseError),
}

/// Failures while decoding a percent-encoded string.
///
/// Offsets are byte positions into the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("percent sequence is truncated at byte {0}")]
    TruncatedSequence(usize),
    #[error("percent sequence has a non-hex digit at byte {0}")]
    InvalidHexDigit(usize),
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Failures while computing a signature.
///
/// Variants carry the signature base string for diagnostics; secrets are
/// never included.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("consumer secret is empty, refusing to sign (base string: {0})")]
    EmptyConsumerSecret(String),
    #[error("signature base string is empty")]
    EmptyBaseString,
    #[error("unknown signature method : {0}")]
    UnknownMethod(String),
}

/// A required OAuth protocol parameter is absent or empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("required parameter {0} is missing or empty")]
pub struct MissingParameterError(pub &'static str);
