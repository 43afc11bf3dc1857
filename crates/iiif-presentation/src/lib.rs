//! Resource model and document serializer for IIIF Presentation API 2 manifests.
//!
//! This crate defines the node types of a presentation document (`Manifest`,
//! `Sequence`, `Canvas`, `Image`, `Annotation`, `Range`, `Collection`,
//! `Layer`), the chained mutation API they share (`Resource`), the controlled
//! vocabularies for constrained fields (`vocab`), and the serializer that
//! projects a node tree onto the JSON document (`to_document`).
//!
//! Builders are tolerant: an invalid viewing hint, viewing direction or
//! license is dropped with a warning and a bad nav date degrades to a fixed
//! stamp. The `try_*` variants report the same conditions as errors.

pub mod config;
pub mod document;
pub mod nodes;
pub mod properties;
pub mod resource;
pub mod types;
pub mod validate;
pub mod value;
pub mod vocab;

pub use config::PresentationConfig;
pub use document::{to_document, to_json_string, try_to_document, Render, ToFragment};
pub use nodes::{
    Annotation, Canvas, Collection, CollectionMember, Image, Layer, Manifest, Range, RangeMember,
    Sequence, PAINTING_MOTIVATION,
};
pub use properties::{
    Logo, Metadata, MetadataEntry, Related, Rendering, SeeAlso, Service, Thumbnail, Within,
};
pub use resource::{Resource, ResourceCore, ResourceKind, DEFAULT_CONTEXT};
pub use types::{ContextUri, ResourceId};
pub use validate::{is_well_formed_url, normalize_nav_date, NAV_DATE_FALLBACK};
pub use value::{LanguageValue, OneOrMany};
pub use vocab::{is_member, ViewingDirection, ViewingHint, Vocabulary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("illegal {field} value: '{value}'")]
    InvalidVocabulary { field: &'static str, value: String },
    #[error("not a valid URL: '{0}'")]
    InvalidUrl(String),
    #[error("top-level {0} has no @id")]
    MissingId(ResourceKind),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("presentation config error: {0}")]
    Config(String),
}
