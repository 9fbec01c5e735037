use std::borrow::Cow;
use std::fmt;

/// An immutable key/secret pair, used for both the consumer (application)
/// credential and the token (user) credential.
///
/// Constructed once and reused across signing calls; rotation means
/// constructing a new pair, never mutating in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential<'a> {
    key: Cow<'a, str>,
    secret: Cow<'a, str>,
}

impl<'a> Credential<'a> {
    pub fn new<TKey, TSecret>(key: TKey, secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Credential {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// Secrets must never end up in logs or error output.
impl fmt::Debug for Credential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Consumer credential, optionally upgraded with a token credential once
/// the authorization exchange has produced one.
#[derive(Debug, Clone)]
pub struct Secrets<'a, TToken> {
    consumer: Credential<'a>,
    token: TToken,
}

impl<'a> Secrets<'a, ()> {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            consumer: Credential::new(consumer_key, consumer_secret),
            token: (),
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Secrets<'a, Credential<'a>>
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            consumer: self.consumer,
            token: Credential::new(token, token_secret),
        }
    }
}

pub trait SecretsProvider {
    fn consumer_pair(&self) -> (&str, &str);

    fn token_pair(&self) -> Option<(&str, &str)>;

    /// Token secret half of the signing key; empty before a token exists
    /// (the request-token step).
    fn token_secret_or_empty(&self) -> &str {
        self.token_pair().map(|(_, secret)| secret).unwrap_or("")
    }
}

impl SecretsProvider for Secrets<'_, ()> {
    fn consumer_pair(&self) -> (&str, &str) {
        (self.consumer.key(), self.consumer.secret())
    }

    fn token_pair(&self) -> Option<(&str, &str)> {
        None
    }
}

impl SecretsProvider for Secrets<'_, Credential<'_>> {
    fn consumer_pair(&self) -> (&str, &str) {
        (self.consumer.key(), self.consumer.secret())
    }

    fn token_pair(&self) -> Option<(&str, &str)> {
        Some((self.token.key(), self.token.secret()))
    }
}
