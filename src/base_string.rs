use std::borrow::Cow;

use url::Url;

use crate::encoder::{percent_encode, percent_encode_str};
use crate::parameters::ParameterList;
use crate::util;
use crate::{OAUTH_SIGNATURE_KEY, REALM_KEY};

/// The canonical view of a request for signing: HTTP method, endpoint
/// without query or fragment, and the full parameter set.
#[derive(Debug, Clone)]
pub struct SignableRequest<'a> {
    pub http_method: Cow<'a, str>,
    pub endpoint: Cow<'a, str>,
    pub parameters: ParameterList<'a>,
}

impl<'a> SignableRequest<'a> {
    pub fn new<TMethod, TEndpoint>(
        http_method: TMethod,
        endpoint: TEndpoint,
        parameters: ParameterList<'a>,
    ) -> Self
    where
        TMethod: Into<Cow<'a, str>>,
        TEndpoint: Into<Cow<'a, str>>,
    {
        SignableRequest {
            http_method: http_method.into(),
            endpoint: endpoint.into(),
            parameters,
        }
    }

    /// Build a signable view from a full URL: the endpoint is normalized,
    /// the fragment dropped, and decoded query pairs join `parameters`.
    pub fn from_url<TMethod>(
        http_method: TMethod,
        url: &Url,
        mut parameters: ParameterList<'a>,
    ) -> Self
    where
        TMethod: Into<Cow<'a, str>>,
    {
        let (endpoint, queries) = util::url_to_endpoint_and_queries(url);
        parameters.extend(queries);
        SignableRequest {
            http_method: http_method.into(),
            endpoint: Cow::Owned(endpoint),
            parameters,
        }
    }
}

/// Derive the signature base string.
///
/// Pure function; identical inputs yield identical output regardless of
/// parameter insertion order. Encoded pairs sort by name, ties by value.
/// `realm` and any `oauth_signature` already present stay out of the
/// signed set, and the endpoint and parameter string are re-encoded as
/// opaque values in the outer join so an inner `&` cannot split them.
pub fn build_base_string(request: &SignableRequest<'_>) -> String {
    let mut encoded: Vec<(String, String)> = request
        .parameters
        .iter()
        .filter(|(name, _)| *name != REALM_KEY && *name != OAUTH_SIGNATURE_KEY)
        .map(|(name, value)| (percent_encode_str(name), percent_encode_str(value)))
        .collect();
    encoded.sort();

    let param_str = encoded
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<String>>()
        .join("&");

    let http_method = request.http_method.to_ascii_uppercase();
    format!(
        "{}&{}&{}",
        percent_encode(&http_method),
        percent_encode(&request.endpoint),
        percent_encode(&param_str)
    )
}
