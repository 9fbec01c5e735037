use std::borrow::Cow;

use crate::error::{SignError, SignResult};

pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";
pub const OAUTH_VALUE_SIGMETHOD_PLAINTEXT: &str = "PLAINTEXT";

/// Signature algorithm selector.
///
/// The variant decides both the computation and the exact
/// `oauth_signature_method` value placed into the request, so the two can
/// never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureMethod {
    #[default]
    HmacSha1,
    PlainText,
}

impl SignatureMethod {
    /// The `oauth_signature_method` protocol value, byte for byte.
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => OAUTH_VALUE_SIGMETHOD_HMACSHA1,
            SignatureMethod::PlainText => OAUTH_VALUE_SIGMETHOD_PLAINTEXT,
        }
    }

    /// Select a method by its descriptor string, at configuration time.
    pub fn from_name(name: &str) -> SignResult<Self> {
        match name {
            OAUTH_VALUE_SIGMETHOD_HMACSHA1 => Ok(SignatureMethod::HmacSha1),
            OAUTH_VALUE_SIGMETHOD_PLAINTEXT => Ok(SignatureMethod::PlainText),
            other => Err(SignError::UnknownMethod(other.to_string())),
        }
    }
}

/// The `oauth_version` parameter: `"1.0"` by default, omittable for servers
/// that reject it, or a custom value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OAuthVersion<'a> {
    None,
    #[default]
    Default,
    Custom(Cow<'a, str>),
}

impl OAuthVersion<'_> {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            OAuthVersion::None => None,
            OAuthVersion::Default => Some(OAUTH_VALUE_VERSION),
            OAuthVersion::Custom(v) => Some(v),
        }
    }
}

impl<'a> From<Option<Cow<'a, str>>> for OAuthVersion<'a> {
    fn from(value: Option<Cow<'a, str>>) -> Self {
        match value {
            Some(Cow::Borrowed(OAUTH_VALUE_VERSION)) => OAuthVersion::Default,
            Some(item) => OAuthVersion::Custom(item),
            None => OAuthVersion::None,
        }
    }
}
