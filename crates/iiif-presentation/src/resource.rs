//! Shared state and mutation API of every resource node.
//!
//! Concrete node types (see [`crate::nodes`]) embed a [`ResourceCore`] and
//! implement [`Resource`], which supplies the common chained setters. All
//! setters take `&mut self` and hand the same node back.

use crate::properties::{
    Logo, Metadata, Related, Rendering, SeeAlso, Service, Thumbnail, Within,
};
use crate::types::{ContextUri, ResourceId};
use crate::validate::{is_well_formed_url, normalize_nav_date};
use crate::value::{LanguageValue, OneOrMany};
use crate::vocab::{ViewingDirection, ViewingHint};
use crate::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Context attached to every top-level resource.
pub const DEFAULT_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Manifest,
    Sequence,
    Canvas,
    Image,
    Annotation,
    Range,
    Collection,
    Layer,
}

impl ResourceKind {
    /// The `@type` discriminator emitted for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Manifest => "sc:Manifest",
            ResourceKind::Sequence => "sc:Sequence",
            ResourceKind::Canvas => "sc:Canvas",
            ResourceKind::Image => "dctypes:Image",
            ResourceKind::Annotation => "oa:Annotation",
            ResourceKind::Range => "sc:Range",
            ResourceKind::Collection => "sc:Collection",
            ResourceKind::Layer => "sc:Layer",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Manifest => write!(f, "manifest"),
            ResourceKind::Sequence => write!(f, "sequence"),
            ResourceKind::Canvas => write!(f, "canvas"),
            ResourceKind::Image => write!(f, "image"),
            ResourceKind::Annotation => write!(f, "annotation"),
            ResourceKind::Range => write!(f, "range"),
            ResourceKind::Collection => write!(f, "collection"),
            ResourceKind::Layer => write!(f, "layer"),
        }
    }
}

/// Fields common to every resource kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCore {
    kind: ResourceKind,
    top_level: bool,
    id: Option<ResourceId>,
    contexts: Vec<ContextUri>,
    labels: Vec<LanguageValue>,
    descriptions: Vec<LanguageValue>,
    attributions: Vec<LanguageValue>,
    viewing_hints: Vec<ViewingHint>,
    viewing_direction: Option<ViewingDirection>,
    licenses: Vec<String>,
    thumbnails: Vec<Thumbnail>,
    logos: Vec<Logo>,
    services: Vec<Service>,
    related: Vec<Related>,
    rendering: Vec<Rendering>,
    see_also: Vec<SeeAlso>,
    within: Vec<Within>,
    metadata: Metadata,
    nav_date: Option<String>,
    id_only: bool,
    member_data_only: bool,
}

impl ResourceCore {
    /// An embedded (non top-level) core with no context.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            top_level: false,
            id: None,
            contexts: Vec::new(),
            labels: Vec::new(),
            descriptions: Vec::new(),
            attributions: Vec::new(),
            viewing_hints: Vec::new(),
            viewing_direction: None,
            licenses: Vec::new(),
            thumbnails: Vec::new(),
            logos: Vec::new(),
            services: Vec::new(),
            related: Vec::new(),
            rendering: Vec::new(),
            see_also: Vec::new(),
            within: Vec::new(),
            metadata: Metadata::default(),
            nav_date: None,
            id_only: false,
            member_data_only: false,
        }
    }

    /// A top-level core carrying `context` as its first context.
    pub fn top_level(kind: ResourceKind, context: impl Into<ContextUri>) -> Self {
        let mut core = Self::new(kind);
        core.top_level = true;
        core.contexts.push(context.into());
        core
    }
}

/// Common behaviour of all resource nodes.
///
/// Implementors only provide access to their [`ResourceCore`]; every other
/// method has a default.
pub trait Resource {
    fn core(&self) -> &ResourceCore;

    fn core_mut(&mut self) -> &mut ResourceCore;

    fn from_core(core: ResourceCore) -> Self
    where
        Self: Sized;

    /// The kind every instance of this type has.
    fn resource_kind() -> ResourceKind
    where
        Self: Sized;

    /// An embedded node: no context, rendered inside a parent.
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::from_core(ResourceCore::new(Self::resource_kind()))
    }

    /// A document root carrying [`DEFAULT_CONTEXT`].
    fn top_level() -> Self
    where
        Self: Sized,
    {
        Self::top_level_with_context(DEFAULT_CONTEXT)
    }

    fn top_level_with_context(context: impl Into<ContextUri>) -> Self
    where
        Self: Sized,
    {
        Self::from_core(ResourceCore::top_level(Self::resource_kind(), context))
    }

    fn kind(&self) -> ResourceKind {
        self.core().kind
    }

    fn is_top_level(&self) -> bool {
        self.core().top_level
    }

    fn add_context(&mut self, uri: impl Into<ContextUri>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().contexts.push(uri.into());
        self
    }

    /// The contexts, as a bare value when exactly one is present.
    fn contexts(&self) -> OneOrMany<'_, ContextUri> {
        OneOrMany::from_slice(&self.core().contexts)
    }

    fn set_id(&mut self, id: impl Into<ResourceId>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().id = Some(id.into());
        self
    }

    fn id(&self) -> Option<&ResourceId> {
        self.core().id.as_ref()
    }

    /// Render only `@id` when serialized.
    fn mark_id_only(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().id_only = true;
        self
    }

    fn is_id_only(&self) -> bool {
        self.core().id_only
    }

    /// Render only `@id`, `@type` and `label` when serialized.
    fn mark_member_data_only(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().member_data_only = true;
        self
    }

    fn is_member_data_only(&self) -> bool {
        self.core().member_data_only
    }

    fn add_label(&mut self, text: impl Into<String>, language: Option<&str>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().labels.push(LanguageValue::new(text, language));
        self
    }

    fn labels(&self) -> &[LanguageValue] {
        &self.core().labels
    }

    fn add_description(&mut self, text: impl Into<String>, language: Option<&str>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut()
            .descriptions
            .push(LanguageValue::new(text, language));
        self
    }

    fn descriptions(&self) -> &[LanguageValue] {
        &self.core().descriptions
    }

    fn add_attribution(&mut self, text: impl Into<String>, language: Option<&str>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut()
            .attributions
            .push(LanguageValue::new(text, language));
        self
    }

    fn attributions(&self) -> &[LanguageValue] {
        &self.core().attributions
    }

    /// Append a viewing hint; values outside the vocabulary are dropped.
    fn add_viewing_hint(&mut self, value: &str) -> &mut Self
    where
        Self: Sized,
    {
        match value.parse::<ViewingHint>() {
            Ok(hint) => self.core_mut().viewing_hints.push(hint),
            Err(e) => tracing::warn!("ignoring {e} on {}", self.kind()),
        }
        self
    }

    fn try_add_viewing_hint(&mut self, value: &str) -> Result<&mut Self, DocumentError>
    where
        Self: Sized,
    {
        let hint = value.parse::<ViewingHint>()?;
        self.core_mut().viewing_hints.push(hint);
        Ok(self)
    }

    fn viewing_hints(&self) -> &[ViewingHint] {
        &self.core().viewing_hints
    }

    /// Set the viewing direction; values outside the vocabulary leave it unchanged.
    fn set_viewing_direction(&mut self, value: &str) -> &mut Self
    where
        Self: Sized,
    {
        match value.parse::<ViewingDirection>() {
            Ok(direction) => self.core_mut().viewing_direction = Some(direction),
            Err(e) => tracing::warn!("ignoring {e} on {}", self.kind()),
        }
        self
    }

    fn try_set_viewing_direction(&mut self, value: &str) -> Result<&mut Self, DocumentError>
    where
        Self: Sized,
    {
        let direction = value.parse::<ViewingDirection>()?;
        self.core_mut().viewing_direction = Some(direction);
        Ok(self)
    }

    fn viewing_direction(&self) -> Option<ViewingDirection> {
        self.core().viewing_direction
    }

    /// Append a license URL; malformed URLs are dropped.
    fn add_license(&mut self, url: &str) -> &mut Self
    where
        Self: Sized,
    {
        if is_well_formed_url(url) {
            self.core_mut().licenses.push(url.to_owned());
        } else {
            tracing::warn!("ignoring license on {}: '{url}' is not a valid URL", self.kind());
        }
        self
    }

    fn try_add_license(&mut self, url: &str) -> Result<&mut Self, DocumentError>
    where
        Self: Sized,
    {
        if !is_well_formed_url(url) {
            return Err(DocumentError::InvalidUrl(url.to_owned()));
        }
        self.core_mut().licenses.push(url.to_owned());
        Ok(self)
    }

    fn licenses(&self) -> &[String] {
        &self.core().licenses
    }

    fn add_thumbnail(&mut self, thumbnail: Thumbnail) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().thumbnails.push(thumbnail);
        self
    }

    fn thumbnails(&self) -> &[Thumbnail] {
        &self.core().thumbnails
    }

    fn add_logo(&mut self, logo: Logo) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().logos.push(logo);
        self
    }

    fn logos(&self) -> &[Logo] {
        &self.core().logos
    }

    fn add_service(&mut self, service: Service) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().services.push(service);
        self
    }

    fn services(&self) -> &[Service] {
        &self.core().services
    }

    fn add_related(&mut self, related: Related) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().related.push(related);
        self
    }

    fn related(&self) -> &[Related] {
        &self.core().related
    }

    fn add_rendering(&mut self, rendering: Rendering) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().rendering.push(rendering);
        self
    }

    fn rendering(&self) -> &[Rendering] {
        &self.core().rendering
    }

    fn add_see_also(&mut self, see_also: impl Into<SeeAlso>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().see_also.push(see_also.into());
        self
    }

    fn see_also(&self) -> &[SeeAlso] {
        &self.core().see_also
    }

    fn add_within(&mut self, within: impl Into<Within>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().within.push(within.into());
        self
    }

    fn within(&self) -> &[Within] {
        &self.core().within
    }

    /// Replace the metadata slot.
    fn set_metadata(&mut self, metadata: Metadata) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().metadata = metadata;
        self
    }

    fn metadata(&self) -> &Metadata {
        &self.core().metadata
    }

    /// Store `text` as a normalized nav date, or the fallback stamp when it
    /// cannot be parsed.
    fn set_nav_date(&mut self, text: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().nav_date = Some(normalize_nav_date(text));
        self
    }

    fn nav_date(&self) -> Option<&str> {
        self.core().nav_date.as_deref()
    }
}
