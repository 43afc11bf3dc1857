//! Value objects attached to resources: thumbnails, logos, services, links,
//! `within` references and descriptive metadata.
//!
//! Each one renders a self-contained fragment through [`ToFragment`]; the
//! resource serializer treats them as opaque.

use crate::document::{flatten, to_document, ToFragment};
use crate::nodes::Collection;
use crate::types::{ContextUri, ResourceId};
use crate::value::LanguageValue;
use serde_json::{Map, Value};

/// An external service (for example an IIIF Image API endpoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ResourceId,
    pub context: Option<ContextUri>,
    pub profile: Option<String>,
    pub label: Option<LanguageValue>,
}

impl Service {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            context: None,
            profile: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<ContextUri>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, text: impl Into<String>, language: Option<&str>) -> Self {
        self.label = Some(LanguageValue::new(text, language));
        self
    }
}

impl ToFragment for Service {
    fn to_fragment(&self) -> Value {
        let mut out = Map::new();
        if let Some(context) = &self.context {
            out.insert("@context".to_owned(), context.to_fragment());
        }
        out.insert("@id".to_owned(), self.id.to_fragment());
        if let Some(profile) = &self.profile {
            out.insert("profile".to_owned(), Value::String(profile.clone()));
        }
        if let Some(label) = &self.label {
            out.insert("label".to_owned(), label.to_fragment());
        }
        Value::Object(out)
    }
}

macro_rules! image_property {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub id: ResourceId,
            pub services: Vec<Service>,
        }

        impl $name {
            pub fn new(id: impl Into<ResourceId>) -> Self {
                Self {
                    id: id.into(),
                    services: Vec::new(),
                }
            }

            #[must_use]
            pub fn with_service(mut self, service: Service) -> Self {
                self.services.push(service);
                self
            }
        }

        impl ToFragment for $name {
            fn to_fragment(&self) -> Value {
                let mut out = Map::new();
                out.insert("@id".to_owned(), self.id.to_fragment());
                if let Some(service) = flatten(&self.services) {
                    out.insert("service".to_owned(), service);
                }
                Value::Object(out)
            }
        }
    };
}

image_property!(
    /// A small image depicting the resource (`thumbnail`).
    Thumbnail
);

image_property!(
    /// An image identifying the publishing institution (`logo`).
    Logo
);

macro_rules! link_property {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// A link with nothing but an id renders as a bare URI string.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub id: ResourceId,
            pub format: Option<String>,
            pub profile: Option<String>,
            pub label: Option<LanguageValue>,
        }

        impl $name {
            pub fn new(id: impl Into<ResourceId>) -> Self {
                Self {
                    id: id.into(),
                    format: None,
                    profile: None,
                    label: None,
                }
            }

            #[must_use]
            pub fn with_format(mut self, format: impl Into<String>) -> Self {
                self.format = Some(format.into());
                self
            }

            #[must_use]
            pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
                self.profile = Some(profile.into());
                self
            }

            #[must_use]
            pub fn with_label(mut self, text: impl Into<String>, language: Option<&str>) -> Self {
                self.label = Some(LanguageValue::new(text, language));
                self
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl ToFragment for $name {
            fn to_fragment(&self) -> Value {
                if self.format.is_none() && self.profile.is_none() && self.label.is_none() {
                    return self.id.to_fragment();
                }
                let mut out = Map::new();
                out.insert("@id".to_owned(), self.id.to_fragment());
                if let Some(format) = &self.format {
                    out.insert("format".to_owned(), Value::String(format.clone()));
                }
                if let Some(profile) = &self.profile {
                    out.insert("profile".to_owned(), Value::String(profile.clone()));
                }
                if let Some(label) = &self.label {
                    out.insert("label".to_owned(), label.to_fragment());
                }
                Value::Object(out)
            }
        }
    };
}

link_property!(
    /// A human-readable page about the resource (`related`).
    Related
);

link_property!(
    /// An alternative representation such as a PDF download (`rendering`).
    Rendering
);

link_property!(
    /// A machine-readable description of the resource (`seeAlso`).
    SeeAlso
);

/// The resource a node is part of (`within`).
///
/// Stores either the parent's URI or a reference rendering of it; it never
/// owns the parent's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Within {
    Uri(ResourceId),
    Collection(Box<Collection>),
}

impl From<&str> for Within {
    fn from(uri: &str) -> Self {
        Within::Uri(ResourceId::from(uri))
    }
}

impl From<ResourceId> for Within {
    fn from(uri: ResourceId) -> Self {
        Within::Uri(uri)
    }
}

impl From<Collection> for Within {
    fn from(collection: Collection) -> Self {
        Within::Collection(Box::new(collection))
    }
}

impl ToFragment for Within {
    fn to_fragment(&self) -> Value {
        match self {
            Within::Uri(uri) => uri.to_fragment(),
            Within::Collection(collection) => to_document(collection.as_ref()),
        }
    }
}

/// One descriptive label/value pair shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub label: Vec<LanguageValue>,
    pub value: Vec<LanguageValue>,
}

impl MetadataEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: vec![LanguageValue::plain(label)],
            value: vec![LanguageValue::plain(value)],
        }
    }

    /// An entry with no label or value yet, filled through `with_*` calls.
    pub fn empty() -> Self {
        Self {
            label: Vec::new(),
            value: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, text: impl Into<String>, language: Option<&str>) -> Self {
        self.label.push(LanguageValue::new(text, language));
        self
    }

    #[must_use]
    pub fn with_value(mut self, text: impl Into<String>, language: Option<&str>) -> Self {
        self.value.push(LanguageValue::new(text, language));
        self
    }
}

impl ToFragment for MetadataEntry {
    fn to_fragment(&self) -> Value {
        let mut out = Map::new();
        if let Some(label) = flatten(&self.label) {
            out.insert("label".to_owned(), label);
        }
        if let Some(value) = flatten(&self.value) {
            out.insert("value".to_owned(), value);
        }
        Value::Object(out)
    }
}

/// The ordered list of metadata entries of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, entry: MetadataEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: MetadataEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MetadataEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<MetadataEntry> for Metadata {
    fn from_iter<I: IntoIterator<Item = MetadataEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
