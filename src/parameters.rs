use std::borrow::Cow;

use serde::Serialize;

/// An ordered collection of `(name, value)` request parameters.
///
/// Duplicate names are retained as independent pairs and encoded
/// independently when the signature base string is built; nothing here
/// collapses parameters into a map keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList<'a> {
    pairs: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> ParameterList<'a> {
    pub fn new() -> Self {
        ParameterList { pairs: Vec::new() }
    }

    pub fn push<K, V>(&mut self, name: K, value: V)
    where
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn with<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        self.push(name, value);
        self
    }

    /// Parse an `application/x-www-form-urlencoded` string (a query string
    /// or form body). This is the one place `+` decodes as a space.
    pub fn from_form_encoded(input: &str) -> ParameterList<'static> {
        url::form_urlencoded::parse(input.as_bytes())
            .map(|(k, v)| (Cow::Owned(k.into_owned()), Cow::Owned(v.into_owned())))
            .collect()
    }

    /// Flatten any `Serialize` value (a pair slice, a map, a derive struct)
    /// into a parameter list, via its form-urlencoded rendition.
    pub fn from_serialize<T: Serialize + ?Sized>(
        params: &T,
    ) -> Result<ParameterList<'static>, serde_urlencoded::ser::Error> {
        let encoded = serde_urlencoded::to_string(params)?;
        Ok(ParameterList::from_form_encoded(&encoded))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    pub fn into_pairs(self) -> Vec<(Cow<'a, str>, Cow<'a, str>)> {
        self.pairs
    }
}

impl<'a, K, V> FromIterator<(K, V)> for ParameterList<'a>
where
    K: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ParameterList {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a, K, V> Extend<(K, V)> for ParameterList<'a>
where
    K: Into<Cow<'a, str>>,
    V: Into<Cow<'a, str>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<'a> IntoIterator for ParameterList<'a> {
    type Item = (Cow<'a, str>, Cow<'a, str>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_and_order_are_kept() {
        let params = ParameterList::new()
            .with("b", "2")
            .with("a", "1")
            .with("a", "other");
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("b", "2"), ("a", "1"), ("a", "other")]);
        assert!(params.contains_name("a"));
        assert!(!params.contains_name("c"));
    }

    #[test]
    fn test_from_form_encoded_plus_is_space() {
        let params = ParameterList::from_form_encoded("status=hello+world&q=a%26b");
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("status", "hello world"), ("q", "a&b")]);
    }

    #[test]
    fn test_from_serialize_pairs() {
        let params = ParameterList::from_serialize(&[("a", "1"), ("b", "x y")]).unwrap();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("a", "1"), ("b", "x y")]);
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(serde::Serialize)]
        struct Query<'a> {
            status: &'a str,
            count: u32,
        }
        let params = ParameterList::from_serialize(&Query {
            status: "signed",
            count: 3,
        })
        .unwrap();
        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("status", "signed"), ("count", "3")]);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut params: ParameterList = [("a", "1")].into_iter().collect();
        params.extend([("b", "2")]);
        assert_eq!(params.len(), 2);
    }
}
