/*!
oauth1-sign: the OAuth 1.0a request-signing core.

# Overview

This library deterministically derives the `oauth_signature` for an
outgoing HTTP request: RFC 5849 percent-encoding, signature-base-string
construction, the HMAC-SHA1 and PLAINTEXT signature methods, and the final
`Authorization` header (or merged parameter set). HTTP transport, JSON
parsing and retry policy stay with the HTTP client of your choice; this
crate only reads the clock and a random source.

Signing is pure and synchronous. All working state is allocated per call,
so a [`Signer`] borrowing an immutable [`Secrets`] can be shared across
threads freely.

# How to use

## Sign a request with an access token

```
use oauth1_sign::{ParameterList, Secrets, Signer};

let secrets = Secrets::new("consumer_key", "consumer_secret")
    .token("access_token", "token_secret");

let params = ParameterList::new().with("status", "Hello, signed world!");

let signed = Signer::new(&secrets)
    .sign("POST", "https://api.example.com/1.1/statuses/update.json", params)
    .unwrap();

let header = signed.authorization_header();
assert!(header.starts_with("OAuth oauth_consumer_key=\"consumer_key\""));
```

## Acquire a request token (no user token yet)

```
use oauth1_sign::{ParameterList, Secrets, SignatureDestination, Signer};

let secrets = Secrets::new("consumer_key", "consumer_secret");

let signed = Signer::new(&secrets)
    .callback("oob")
    .destination(SignatureDestination::RequestParameters)
    .sign("POST", "https://api.example.com/oauth/request_token", ParameterList::new())
    .unwrap();

// hand the merged parameter set to the transport layer
let query = signed.into_parameters();
assert!(query.iter().any(|(key, _)| key == "oauth_callback"));
```
*/

mod base_string;
mod encoder;
mod error;
mod nonce;
mod parameters;
mod secrets;
mod signature;
mod signer;
mod util;
mod values;

// exposed to external program
pub use base_string::{build_base_string, SignableRequest};
pub use encoder::{
    percent_decode, percent_encode, percent_encode_cow, percent_encode_str, ENCODE_TARGETS,
};
pub use error::{
    DecodeError, DecodeResult, Error, MissingParameterError, Result, SignError, SignResult,
};
pub use nonce::{nonce, timestamp};
pub use parameters::ParameterList;
pub use secrets::{Credential, Secrets, SecretsProvider};
pub use signer::{SignatureDestination, SignatureOutput, SignedRequest, Signer};
pub use util::{normalize_endpoint, url_to_endpoint_and_queries};
pub use values::{
    OAuthVersion, SignatureMethod, OAUTH_VALUE_SIGMETHOD_HMACSHA1,
    OAUTH_VALUE_SIGMETHOD_PLAINTEXT, OAUTH_VALUE_VERSION,
};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// Represents `realm`.
pub const REALM_KEY: &str = "realm";
