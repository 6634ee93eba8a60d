//! Canonical encoding of the fields covered by a signature.

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to value mapping that takes part in a signature.
///
/// Keys are kept in ascending byte order, so encoding never depends on
/// insertion order. Absent values are stored as `""` and never dropped.
/// Serializes as a flat JSON object, which is also the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignableFields(BTreeMap<String, String>);

impl SignableFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Set a field whose value may be absent; `None` becomes `""`.
    pub fn insert_opt<V: Into<String>>(
        &mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        let value = value.map(Into::into).unwrap_or_default();
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Build `k1=v1&k2=v2&...` in sorted key order.
    ///
    /// Values are not escaped: a value containing `&` or `=` can make two
    /// different field sets encode identically.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(name);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SignableFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
