use url::Url;

/// Rebuild the endpoint in the canonical form used for signing: lowercase
/// scheme and host (guaranteed by `Url` parsing), scheme-default ports
/// stripped (`Url::port` hides them), path kept as-is, query and fragment
/// dropped.
pub fn normalize_endpoint(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

/// Split a URL into its normalized endpoint and decoded query pairs.
///
/// Pairs keep their order and duplicate names survive. The query string is
/// the form-urlencoded surface, so `+` decodes as a space here.
pub fn url_to_endpoint_and_queries(url: &Url) -> (String, Vec<(String, String)>) {
    let queries = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    (normalize_endpoint(url), queries)
}
