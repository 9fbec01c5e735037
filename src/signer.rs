use std::borrow::Cow;

use tracing::{debug, trace};
use url::Url;

use crate::base_string::{build_base_string, SignableRequest};
use crate::encoder::percent_encode;
use crate::error::{MissingParameterError, Result};
use crate::nonce;
use crate::parameters::ParameterList;
use crate::secrets::SecretsProvider;
use crate::util;
use crate::values::{OAuthVersion, SignatureMethod};
use crate::{
    OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
    OAUTH_VERSION_KEY,
};

/// Where the signed `oauth_*` parameter set ends up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureDestination {
    /// Materialize an `Authorization: OAuth ...` header.
    #[default]
    AuthorizationHeader,
    /// Merge the `oauth_*` parameters into the request parameter set.
    RequestParameters,
}

/// OAuth 1.0a request signer.
///
/// Borrows an immutable [`SecretsProvider`] and carries per-exchange
/// configuration. Each `sign*` call allocates its working state fresh and
/// shares nothing mutable, so one signer can be used from any number of
/// threads.
#[derive(Debug, Clone)]
pub struct Signer<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    secrets: &'a TSecrets,
    signature_method: SignatureMethod,
    version: OAuthVersion<'a>,
    callback: Option<Cow<'a, str>>,
    verifier: Option<Cow<'a, str>>,
    realm: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    timestamp: Option<i64>,
    destination: SignatureDestination,
}

impl<'a, TSecrets> Signer<'a, TSecrets>
where
    TSecrets: SecretsProvider,
{
    pub fn new(secrets: &'a TSecrets) -> Self {
        Signer {
            secrets,
            signature_method: SignatureMethod::default(),
            version: OAuthVersion::default(),
            callback: None,
            verifier: None,
            realm: None,
            nonce: None,
            timestamp: None,
            destination: SignatureDestination::default(),
        }
    }

    pub fn signature_method(self, signature_method: SignatureMethod) -> Self {
        Signer {
            signature_method,
            ..self
        }
    }

    pub fn version(self, version: OAuthVersion<'a>) -> Self {
        Signer { version, ..self }
    }

    /// Set `oauth_callback` (the request-token step).
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Signer {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// Set `oauth_verifier` (the access-token step).
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Signer {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// Set the protection realm, echoed into the `Authorization` header
    /// but excluded from the signed parameter set.
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Signer {
            realm: Some(realm.into()),
            ..self
        }
    }

    /// Pin the nonce instead of generating one per call.
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Signer {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// Pin the timestamp instead of reading the clock per call.
    pub fn timestamp(self, timestamp: i64) -> Self {
        Signer {
            timestamp: Some(timestamp),
            ..self
        }
    }

    pub fn destination(self, destination: SignatureDestination) -> Self {
        Signer {
            destination,
            ..self
        }
    }

    /// Sign a request to `url`, which may carry a query string; its pairs
    /// join `parameters` and the endpoint is normalized for the base
    /// string.
    pub fn sign(
        &self,
        http_method: &str,
        url: &str,
        parameters: ParameterList<'_>,
    ) -> Result<SignedRequest> {
        let parsed = Url::parse(url)?;
        self.sign_url(http_method, &parsed, parameters)
    }

    /// Same as [`Signer::sign`] for an already parsed URL.
    pub fn sign_url(
        &self,
        http_method: &str,
        url: &Url,
        mut parameters: ParameterList<'_>,
    ) -> Result<SignedRequest> {
        let (endpoint, queries) = util::url_to_endpoint_and_queries(url);
        parameters.extend(queries);
        self.sign_endpoint(http_method, &endpoint, parameters)
    }

    /// Sign against a bare endpoint (no query string, already canonical).
    ///
    /// One pass: collect the protocol parameters, build the base string,
    /// invoke the signature method, attach `oauth_signature`. Any failure
    /// aborts the whole call; partially signed output is never returned.
    pub fn sign_endpoint(
        &self,
        http_method: &str,
        endpoint: &str,
        parameters: ParameterList<'_>,
    ) -> Result<SignedRequest> {
        let (consumer_key, consumer_secret) = self.secrets.consumer_pair();
        if consumer_key.is_empty() {
            return Err(MissingParameterError(OAUTH_CONSUMER_KEY).into());
        }

        let timestamp = self.timestamp.unwrap_or_else(nonce::timestamp);
        let request_nonce = match &self.nonce {
            Some(pinned) => pinned.to_string(),
            None => nonce::nonce(),
        };

        let mut oauth_params: Vec<(String, String)> = vec![
            (OAUTH_CONSUMER_KEY.into(), consumer_key.to_string()),
            (
                OAUTH_SIGNATURE_METHOD_KEY.into(),
                self.signature_method.as_str().to_string(),
            ),
            (OAUTH_TIMESTAMP_KEY.into(), timestamp.to_string()),
            (OAUTH_NONCE_KEY.into(), request_nonce.clone()),
        ];
        if let Some(version) = self.version.as_value() {
            oauth_params.push((OAUTH_VERSION_KEY.into(), version.to_string()));
        }
        if let Some((token, _)) = self.secrets.token_pair() {
            oauth_params.push((OAUTH_TOKEN_KEY.into(), token.to_string()));
        }
        if let Some(callback) = &self.callback {
            oauth_params.push((OAUTH_CALLBACK_KEY.into(), callback.to_string()));
        }
        if let Some(verifier) = &self.verifier {
            oauth_params.push((OAUTH_VERIFIER_KEY.into(), verifier.to_string()));
        }

        // a stale signature must never sign itself
        let request_params: Vec<(String, String)> = parameters
            .iter()
            .filter(|(name, _)| *name != OAUTH_SIGNATURE_KEY)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let mut merged = ParameterList::new();
        for (name, value) in oauth_params.iter().chain(request_params.iter()) {
            merged.push(name.as_str(), value.as_str());
        }
        let signable = SignableRequest::new(http_method, endpoint, merged);
        let base_string = build_base_string(&signable);
        trace!(%base_string, "built signature base string");

        let signature = self.signature_method.sign(
            &base_string,
            consumer_secret,
            self.secrets.token_secret_or_empty(),
        )?;
        debug!(
            method = self.signature_method.as_str(),
            %endpoint,
            "signed request"
        );

        oauth_params.push((OAUTH_SIGNATURE_KEY.into(), signature.clone()));
        oauth_params.sort();

        Ok(SignedRequest {
            signature,
            base_string,
            timestamp,
            nonce: request_nonce,
            realm: self.realm.as_ref().map(|r| r.to_string()),
            oauth_parameters: oauth_params,
            request_parameters: request_params,
            destination: self.destination,
        })
    }
}

/// The materialized result of [`Signer::sign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureOutput {
    Header(String),
    Parameters(Vec<(String, String)>),
}

/// A fully signed request: the `oauth_*` protocol set with its signature,
/// the caller's parameters, and the base string that was signed.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    signature: String,
    base_string: String,
    timestamp: i64,
    nonce: String,
    realm: Option<String>,
    oauth_parameters: Vec<(String, String)>,
    request_parameters: Vec<(String, String)>,
    destination: SignatureDestination,
}

impl SignedRequest {
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn base_string(&self) -> &str {
        &self.base_string
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// The sorted `oauth_*` pairs, `oauth_signature` included, raw values.
    pub fn oauth_parameters(&self) -> &[(String, String)] {
        &self.oauth_parameters
    }

    /// `Authorization` header value: `OAuth` scheme, comma+space separated
    /// quoted pairs, names and values percent-encoded. A configured realm
    /// leads unencoded.
    pub fn authorization_header(&self) -> String {
        let mut parts = Vec::with_capacity(self.oauth_parameters.len() + 1);
        if let Some(realm) = &self.realm {
            parts.push(format!("realm=\"{}\"", realm));
        }
        parts.extend(
            self.oauth_parameters
                .iter()
                .map(|(name, value)| {
                    format!("{}=\"{}\"", percent_encode(name), percent_encode(value))
                }),
        );
        format!("OAuth {}", parts.join(", "))
    }

    /// The caller's parameter set with the `oauth_*` pairs merged in, for
    /// transports that sign via query or body instead of the header.
    pub fn into_parameters(self) -> Vec<(String, String)> {
        let mut params = self.request_parameters;
        params.extend(self.oauth_parameters);
        params
    }

    /// Materialize per the configured [`SignatureDestination`].
    pub fn output(&self) -> SignatureOutput {
        match self.destination {
            SignatureDestination::AuthorizationHeader => {
                SignatureOutput::Header(self.authorization_header())
            }
            SignatureDestination::RequestParameters => {
                SignatureOutput::Parameters(self.clone().into_parameters())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, SignError};
    use crate::secrets::Secrets;

    // https://developer.twitter.com/ja/docs/basics/authentication/guides/creating-a-signature
    #[test]
    fn test_signing_twitter_vector() {
        let secrets = Secrets::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        )
        .token(
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        );
        let params = ParameterList::new()
            .with("include_entities", "true")
            .with("status", "Hello Ladies + Gentlemen, a signed OAuth request!");
        let signed = Signer::new(&secrets)
            .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .timestamp(1_318_622_958)
            .sign("post", "https://api.twitter.com/1.1/statuses/update.json", params)
            .unwrap();
        assert_eq!(signed.signature(), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    // https://tools.ietf.org/html/rfc5849 section 1.2, "initiate" request
    #[test]
    fn test_signing_rfc5849_initiate_vector() {
        let secrets = Secrets::new("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
        let signed = Signer::new(&secrets)
            .nonce("wIjqoS")
            .timestamp(137_131_200)
            .version(OAuthVersion::None)
            .callback("http://printer.example.com/ready")
            .realm("photos")
            .sign("post", "https://photos.example.net/initiate", ParameterList::new())
            .unwrap();
        assert_eq!(signed.signature(), "74KNZJeDHnMBp0EMJ9ZHt/XKycU=");

        let header = signed.authorization_header();
        assert!(header.starts_with("OAuth realm=\"photos\", oauth_callback="));
        assert!(header.contains("oauth_signature=\"74KNZJeDHnMBp0EMJ9ZHt%2FXKycU%3D\""));
        assert!(!header.contains("oauth_version"));
    }

    #[test]
    fn test_signing_with_token_duplicates_and_multibyte_params() {
        let secrets = Secrets::new("ck", "secret").token("tk", "tsecret");
        let params = ParameterList::new().with("q", "café").with("q", "beta");
        // mixed-case host and default port normalize away
        let signed = Signer::new(&secrets)
            .nonce("abc123")
            .timestamp(1_700_000_000)
            .sign("get", "http://Example.COM:80/path", params)
            .unwrap();
        assert_eq!(
            signed.base_string(),
            "GET&http%3A%2F%2Fexample.com%2Fpath&oauth_consumer_key%3Dck%26oauth_nonce%3Dabc123\
             %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26oauth_token\
             %3Dtk%26oauth_version%3D1.0%26q%3Dbeta%26q%3Dcaf%25C3%25A9"
        );
        assert_eq!(signed.signature(), "E3NOpFsVAwYMgQzfxlcVPwGj+es=");
    }

    #[test]
    fn test_signing_is_insensitive_to_parameter_order() {
        let secrets = Secrets::new("ck", "cs");
        let signer = Signer::new(&secrets).nonce("n").timestamp(1);
        let forward = ParameterList::new().with("a", "1").with("b", "2");
        let backward = ParameterList::new().with("b", "2").with("a", "1");
        let url = "https://example.com/r";
        assert_eq!(
            signer.sign("GET", url, forward).unwrap().signature(),
            signer.sign("GET", url, backward).unwrap().signature()
        );
    }

    #[test]
    fn test_authorization_header_golden() {
        let secrets = Secrets::new("ck", "cs");
        let params = ParameterList::new().with("a", "1").with("b", "2");
        let signed = Signer::new(&secrets)
            .nonce("abc123")
            .timestamp(1_700_000_000)
            .sign("GET", "https://example.com/resource", params)
            .unwrap();
        assert_eq!(
            signed.authorization_header(),
            "OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"abc123\", \
             oauth_signature=\"ukL4IelSj3mnqAWOKfo6g285OeU%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", \
             oauth_version=\"1.0\""
        );
    }

    #[test]
    fn test_query_string_joins_the_signed_set() {
        let secrets = Secrets::new("ck", "cs");
        let signer = Signer::new(&secrets).nonce("n").timestamp(1);
        let from_query = signer
            .sign("GET", "https://example.com/r?a=1", ParameterList::new())
            .unwrap();
        let from_params = signer
            .sign(
                "GET",
                "https://example.com/r",
                ParameterList::new().with("a", "1"),
            )
            .unwrap();
        assert_eq!(from_query.base_string(), from_params.base_string());
        assert_eq!(from_query.signature(), from_params.signature());
    }

    #[test]
    fn test_stale_signature_parameter_is_discarded() {
        let secrets = Secrets::new("ck", "cs");
        let signer = Signer::new(&secrets).nonce("n").timestamp(1);
        let clean = signer
            .sign("GET", "https://example.com/r", ParameterList::new())
            .unwrap();
        let stale = signer
            .sign(
                "GET",
                "https://example.com/r",
                ParameterList::new().with("oauth_signature", "stale"),
            )
            .unwrap();
        assert_eq!(clean.base_string(), stale.base_string());
        assert_eq!(clean.signature(), stale.signature());
    }

    #[test]
    fn test_parameter_destination_merges_oauth_set() {
        let secrets = Secrets::new("ck", "cs");
        let params = ParameterList::new().with("page", "2");
        let signed = Signer::new(&secrets)
            .destination(SignatureDestination::RequestParameters)
            .sign("GET", "https://example.com/r", params)
            .unwrap();
        let expected_signature = signed.signature().to_string();
        match signed.output() {
            SignatureOutput::Parameters(pairs) => {
                assert_eq!(pairs[0], ("page".to_string(), "2".to_string()));
                assert!(pairs
                    .iter()
                    .any(|(k, v)| k == "oauth_signature" && *v == expected_signature));
                assert!(pairs.iter().any(|(k, _)| k == "oauth_consumer_key"));
            }
            SignatureOutput::Header(_) => panic!("expected merged parameters"),
        }
    }

    #[test]
    fn test_plaintext_method_descriptor_matches_strategy() {
        let secrets = Secrets::new("ck", "cs").token("tk", "ts");
        let signed = Signer::new(&secrets)
            .signature_method(SignatureMethod::PlainText)
            .sign("POST", "https://example.com/r", ParameterList::new())
            .unwrap();
        assert_eq!(signed.signature(), "cs&ts");
        assert!(signed
            .oauth_parameters()
            .iter()
            .any(|(k, v)| k == "oauth_signature_method" && v == "PLAINTEXT"));
    }

    #[test]
    fn test_missing_consumer_key_aborts() {
        let secrets = Secrets::new("", "cs");
        let err = Signer::new(&secrets)
            .sign("GET", "https://example.com/r", ParameterList::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
    }

    #[test]
    fn test_empty_consumer_secret_aborts() {
        let secrets = Secrets::new("ck", "");
        let err = Signer::new(&secrets)
            .sign("GET", "https://example.com/r", ParameterList::new())
            .unwrap_err();
        match err {
            Error::Sign(SignError::EmptyConsumerSecret(base)) => {
                assert!(base.starts_with("GET&"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_url_aborts() {
        let secrets = Secrets::new("ck", "cs");
        let err = Signer::new(&secrets)
            .sign("GET", "not a url", ParameterList::new())
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_generated_nonce_and_timestamp_are_attached() {
        let secrets = Secrets::new("ck", "cs");
        let signed = Signer::new(&secrets)
            .sign("GET", "https://example.com/r", ParameterList::new())
            .unwrap();
        assert!(!signed.nonce().is_empty());
        assert!(signed.timestamp() > 0);
        let nonce = signed.nonce().to_string();
        assert!(signed
            .oauth_parameters()
            .iter()
            .any(|(k, v)| k == "oauth_nonce" && *v == nonce));
    }
}
