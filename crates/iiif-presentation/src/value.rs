use serde::{Deserialize, Serialize};

/// A text value, optionally tagged with a language.
///
/// Serializes as a bare string, or as `{"@value": ..., "@language": ...}`
/// when a language is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageValue {
    Plain(String),
    Tagged {
        #[serde(rename = "@value")]
        value: String,
        #[serde(rename = "@language")]
        language: String,
    },
}

impl LanguageValue {
    /// Build a value; an empty or missing language yields a plain value.
    pub fn new(text: impl Into<String>, language: Option<&str>) -> Self {
        match language.map(str::trim) {
            Some(lang) if !lang.is_empty() => LanguageValue::Tagged {
                value: text.into(),
                language: lang.to_owned(),
            },
            _ => LanguageValue::Plain(text.into()),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        LanguageValue::Plain(text.into())
    }

    pub fn tagged(text: impl Into<String>, language: impl Into<String>) -> Self {
        let language: String = language.into();
        Self::new(text, Some(&language))
    }

    pub fn text(&self) -> &str {
        match self {
            LanguageValue::Plain(value) | LanguageValue::Tagged { value, .. } => value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            LanguageValue::Plain(_) => None,
            LanguageValue::Tagged { language, .. } => Some(language),
        }
    }
}

impl From<&str> for LanguageValue {
    fn from(s: &str) -> Self {
        LanguageValue::Plain(s.to_owned())
    }
}

impl From<String> for LanguageValue {
    fn from(s: String) -> Self {
        LanguageValue::Plain(s)
    }
}

/// A read view over an ordered collection that exposes a lone entry bare.
///
/// `One` is returned only for a single-entry slice; empty and multi-entry
/// slices are both `Many`.
#[derive(Debug, PartialEq, Eq)]
pub enum OneOrMany<'a, T> {
    One(&'a T),
    Many(&'a [T]),
}

impl<T> Clone for OneOrMany<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OneOrMany<'_, T> {}

impl<'a, T> OneOrMany<'a, T> {
    pub fn from_slice(items: &'a [T]) -> Self {
        match items {
            [only] => OneOrMany::One(only),
            _ => OneOrMany::Many(items),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single entry, if this view holds exactly one.
    pub fn as_one(&self) -> Option<&'a T> {
        match *self {
            OneOrMany::One(only) => Some(only),
            OneOrMany::Many(_) => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        match *self {
            OneOrMany::One(only) => std::slice::from_ref(only).iter(),
            OneOrMany::Many(items) => items.iter(),
        }
    }
}

impl<'a, T> IntoIterator for &OneOrMany<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for OneOrMany<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OneOrMany::One(only) => only.serialize(serializer),
            OneOrMany::Many(items) => items.serialize(serializer),
        }
    }
}
