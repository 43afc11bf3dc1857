//! Projection of a resource tree onto the JSON document shape.
//!
//! Rendering never mutates the model and never fails for missing optional
//! data: empty collections and unset values are simply left out. Each node is
//! rendered according to its own reduction flags:
//!
//! 1. id-only nodes render as `{"@id"}`;
//! 2. member-data-only nodes render as `{"@id", "@type", "label"}`;
//! 3. everything else renders in full, followed by the kind's children.

use crate::nodes::{
    Annotation, Canvas, Collection, CollectionMember, Image, Layer, Manifest, Range, RangeMember,
    Sequence,
};
use crate::resource::Resource;
use crate::types::{ContextUri, ResourceId};
use crate::value::{LanguageValue, OneOrMany};
use crate::vocab::{ViewingDirection, ViewingHint};
use crate::DocumentError;
use serde_json::{Map, Value};

/// `@type` of the annotation lists referenced from `otherContent`.
const ANNOTATION_LIST_TYPE: &str = "sc:AnnotationList";

/// A value that renders as a self-contained document fragment.
pub trait ToFragment {
    fn to_fragment(&self) -> Value;
}

impl ToFragment for String {
    fn to_fragment(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToFragment for ResourceId {
    fn to_fragment(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

impl ToFragment for ContextUri {
    fn to_fragment(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

impl ToFragment for LanguageValue {
    fn to_fragment(&self) -> Value {
        match self {
            LanguageValue::Plain(text) => Value::String(text.clone()),
            LanguageValue::Tagged { value, language } => {
                let mut out = Map::new();
                out.insert("@value".to_owned(), Value::String(value.clone()));
                out.insert("@language".to_owned(), Value::String(language.clone()));
                Value::Object(out)
            }
        }
    }
}

impl ToFragment for ViewingHint {
    fn to_fragment(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

impl ToFragment for ViewingDirection {
    fn to_fragment(&self) -> Value {
        Value::String(self.as_str().to_owned())
    }
}

/// Render `items` as a bare value when there is exactly one, an array when
/// there are several, and nothing when empty.
pub(crate) fn flatten<T: ToFragment>(items: &[T]) -> Option<Value> {
    match OneOrMany::from_slice(items) {
        OneOrMany::One(only) => Some(only.to_fragment()),
        OneOrMany::Many([]) => None,
        OneOrMany::Many(many) => Some(Value::Array(
            many.iter().map(ToFragment::to_fragment).collect(),
        )),
    }
}

/// Render child nodes as an array, or nothing when there are none.
fn nodes<R: Render>(children: &[R]) -> Option<Value> {
    if children.is_empty() {
        return None;
    }
    Some(Value::Array(children.iter().map(to_document).collect()))
}

fn insert(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        out.insert(key.to_owned(), value);
    }
}

/// A resource kind the serializer knows how to render.
pub trait Render: Resource {
    /// Append the kind-specific keys of a full rendering to `out`.
    fn render_children(&self, out: &mut Map<String, Value>);
}

/// Render `resource` and its children.
pub fn to_document<R: Render>(resource: &R) -> Value {
    let mut out = Map::new();

    if resource.is_id_only() {
        insert(&mut out, "@id", resource.id().map(ToFragment::to_fragment));
        return Value::Object(out);
    }

    if resource.is_member_data_only() {
        insert(&mut out, "@id", resource.id().map(ToFragment::to_fragment));
        out.insert(
            "@type".to_owned(),
            Value::String(resource.kind().type_name().to_owned()),
        );
        insert(&mut out, "label", flatten(resource.labels()));
        return Value::Object(out);
    }

    if resource.is_top_level() {
        let contexts = match resource.contexts() {
            OneOrMany::One(only) => Some(only.to_fragment()),
            OneOrMany::Many(many) => flatten(many),
        };
        insert(&mut out, "@context", contexts);
    }
    insert(&mut out, "@id", resource.id().map(ToFragment::to_fragment));
    out.insert(
        "@type".to_owned(),
        Value::String(resource.kind().type_name().to_owned()),
    );
    insert(&mut out, "label", flatten(resource.labels()));
    insert(&mut out, "description", flatten(resource.descriptions()));
    insert(&mut out, "attribution", flatten(resource.attributions()));
    insert(&mut out, "license", flatten(resource.licenses()));
    insert(&mut out, "viewingHint", flatten(resource.viewing_hints()));
    insert(
        &mut out,
        "viewingDirection",
        resource
            .viewing_direction()
            .as_ref()
            .map(ToFragment::to_fragment),
    );
    insert(
        &mut out,
        "navDate",
        resource.nav_date().map(|d| Value::String(d.to_owned())),
    );
    if !resource.metadata().is_empty() {
        out.insert(
            "metadata".to_owned(),
            Value::Array(
                resource
                    .metadata()
                    .entries()
                    .iter()
                    .map(ToFragment::to_fragment)
                    .collect(),
            ),
        );
    }
    insert(&mut out, "thumbnail", flatten(resource.thumbnails()));
    insert(&mut out, "logo", flatten(resource.logos()));
    insert(&mut out, "service", flatten(resource.services()));
    insert(&mut out, "seeAlso", flatten(resource.see_also()));
    insert(&mut out, "related", flatten(resource.related()));
    insert(&mut out, "rendering", flatten(resource.rendering()));
    insert(&mut out, "within", flatten(resource.within()));

    resource.render_children(&mut out);
    Value::Object(out)
}

/// Like [`to_document`], but refuses a top-level resource without an `@id`.
pub fn try_to_document<R: Render>(resource: &R) -> Result<Value, DocumentError> {
    if resource.is_top_level() && resource.id().is_none() {
        return Err(DocumentError::MissingId(resource.kind()));
    }
    Ok(to_document(resource))
}

/// Render `resource` to a JSON string.
pub fn to_json_string<R: Render>(resource: &R, pretty: bool) -> Result<String, DocumentError> {
    let document = to_document(resource);
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    tracing::debug!(
        "rendered {} document ({} bytes)",
        resource.kind(),
        json.len()
    );
    Ok(json)
}

fn other_content_refs(ids: &[ResourceId]) -> Option<Value> {
    if ids.is_empty() {
        return None;
    }
    Some(Value::Array(
        ids.iter()
            .map(|id| {
                let mut list = Map::new();
                list.insert("@id".to_owned(), id.to_fragment());
                list.insert(
                    "@type".to_owned(),
                    Value::String(ANNOTATION_LIST_TYPE.to_owned()),
                );
                Value::Object(list)
            })
            .collect(),
    ))
}

fn id_list(ids: &[ResourceId]) -> Option<Value> {
    if ids.is_empty() {
        return None;
    }
    Some(Value::Array(ids.iter().map(ToFragment::to_fragment).collect()))
}

impl Render for Manifest {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "sequences", nodes(self.sequences()));
        insert(out, "structures", nodes(self.structures()));
    }
}

impl Render for Sequence {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(
            out,
            "startCanvas",
            self.start_canvas().map(ToFragment::to_fragment),
        );
        insert(out, "canvases", nodes(self.canvases()));
    }
}

impl Render for Canvas {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "height", self.height().map(Value::from));
        insert(out, "width", self.width().map(Value::from));
        insert(out, "images", nodes(self.images()));
        insert(out, "otherContent", other_content_refs(self.other_content()));
    }
}

impl Render for Image {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "format", self.format().map(Value::from));
        insert(out, "height", self.height().map(Value::from));
        insert(out, "width", self.width().map(Value::from));
    }
}

impl Render for Annotation {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "motivation", self.motivation().map(Value::from));
        insert(out, "resource", self.resource().map(to_document));
        insert(out, "on", self.on().map(ToFragment::to_fragment));
    }
}

impl Render for Range {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(
            out,
            "startCanvas",
            self.start_canvas().map(ToFragment::to_fragment),
        );
        insert(out, "canvases", id_list(self.canvases()));
        insert(out, "ranges", id_list(self.ranges()));
        if !self.members().is_empty() {
            let members = self
                .members()
                .iter()
                .map(|member| match member {
                    RangeMember::Canvas(canvas) => to_document(canvas),
                    RangeMember::Range(range) => to_document(range),
                })
                .collect();
            out.insert("members".to_owned(), Value::Array(members));
        }
    }
}

impl Render for Collection {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "collections", nodes(self.collections()));
        insert(out, "manifests", nodes(self.manifests()));
        if !self.members().is_empty() {
            let members = self
                .members()
                .iter()
                .map(|member| match member {
                    CollectionMember::Collection(collection) => to_document(collection),
                    CollectionMember::Manifest(manifest) => to_document(manifest),
                })
                .collect();
            out.insert("members".to_owned(), Value::Array(members));
        }
    }
}

impl Render for Layer {
    fn render_children(&self, out: &mut Map<String, Value>) {
        insert(out, "otherContent", id_list(self.other_content()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{Metadata, MetadataEntry, Service, Thumbnail};
    use crate::resource::DEFAULT_CONTEXT;
    use serde_json::json;

    fn keys(doc: &Value) -> Vec<&str> {
        doc.as_object()
            .map(|o| o.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn empty_top_level_node_has_context_and_type_only() {
        assert_eq!(
            to_document(&Manifest::top_level()),
            json!({"@context": DEFAULT_CONTEXT, "@type": "sc:Manifest"})
        );
        assert_eq!(keys(&to_document(&Annotation::top_level())), ["@context", "@type"]);
        assert_eq!(keys(&to_document(&Layer::top_level())), ["@context", "@type"]);
    }

    #[test]
    fn embedded_node_omits_context() {
        let mut canvas = Canvas::new();
        canvas.set_id("https://example.org/canvas/1");
        assert_eq!(
            to_document(&canvas),
            json!({"@id": "https://example.org/canvas/1", "@type": "sc:Canvas"})
        );
    }

    #[test]
    fn language_tagged_label() {
        let mut manifest = Manifest::top_level();
        manifest.add_label("Book 1", Some("en"));
        let doc = to_document(&manifest);
        assert_eq!(doc["label"], json!({"@value": "Book 1", "@language": "en"}));

        let mut plain = Manifest::top_level();
        plain.add_label("Book 1", None);
        assert_eq!(to_document(&plain)["label"], json!("Book 1"));
    }

    #[test]
    fn language_tagged_description_and_attribution() {
        let mut manifest = Manifest::top_level();
        manifest
            .add_description("A book of hours", Some("en"))
            .add_attribution("Provided by Example Library", Some("en"))
            .add_attribution("Fourni par Example Library", Some("fr"));
        let doc = to_document(&manifest);
        assert_eq!(
            doc["description"],
            json!({"@value": "A book of hours", "@language": "en"})
        );
        assert_eq!(
            doc["attribution"],
            json!([
                {"@value": "Provided by Example Library", "@language": "en"},
                {"@value": "Fourni par Example Library", "@language": "fr"}
            ])
        );

        let mut plain = Manifest::top_level();
        plain.add_description("A book of hours", Some(""));
        assert_eq!(to_document(&plain)["description"], json!("A book of hours"));
    }

    #[test]
    fn multiple_labels_render_as_array() {
        let mut manifest = Manifest::top_level();
        manifest
            .add_label("Book 1", Some("en"))
            .add_label("Livre 1", Some("fr"));
        assert_eq!(
            to_document(&manifest)["label"],
            json!([
                {"@value": "Book 1", "@language": "en"},
                {"@value": "Livre 1", "@language": "fr"}
            ])
        );
    }

    #[test]
    fn multiple_contexts_render_as_array() {
        let mut manifest = Manifest::top_level();
        manifest.add_context("http://www.w3.org/ns/anno.jsonld");
        assert_eq!(
            to_document(&manifest)["@context"],
            json!([DEFAULT_CONTEXT, "http://www.w3.org/ns/anno.jsonld"])
        );
    }

    #[test]
    fn viewing_hints_flatten_like_contexts() {
        let mut one = Manifest::top_level();
        one.add_viewing_hint("paged");
        assert_eq!(to_document(&one)["viewingHint"], json!("paged"));

        let mut two = Manifest::top_level();
        two.add_viewing_hint("paged").add_viewing_hint("top");
        assert_eq!(to_document(&two)["viewingHint"], json!(["paged", "top"]));
    }

    #[test]
    fn id_only_emits_a_single_key() {
        let mut manifest = Manifest::top_level();
        manifest
            .set_id("https://example.org/iiif/book1/manifest")
            .add_label("Book 1", None)
            .add_license("http://creativecommons.org/licenses/by/4.0/")
            .add_viewing_hint("paged")
            .set_nav_date("2020-01-15")
            .add_thumbnail(Thumbnail::new("https://example.org/thumb.jpg"))
            .add_sequence(Sequence::new())
            .mark_id_only();
        assert_eq!(
            to_document(&manifest),
            json!({"@id": "https://example.org/iiif/book1/manifest"})
        );
    }

    #[test]
    fn id_only_takes_precedence_over_member_data() {
        let mut canvas = Canvas::new();
        canvas
            .set_id("https://example.org/canvas/1")
            .add_label("p. 1", None)
            .mark_member_data_only()
            .mark_id_only();
        assert_eq!(keys(&to_document(&canvas)), ["@id"]);
    }

    #[test]
    fn member_data_only_emits_id_type_label() {
        let mut manifest = Manifest::top_level();
        manifest
            .set_id("https://example.org/iiif/book1/manifest")
            .add_label("Book 1", Some("en"))
            .add_description("Long description", None)
            .add_license("http://creativecommons.org/licenses/by/4.0/")
            .add_thumbnail(Thumbnail::new("https://example.org/thumb.jpg"))
            .add_service(Service::new("https://example.org/search"))
            .mark_member_data_only();
        assert_eq!(
            to_document(&manifest),
            json!({
                "@id": "https://example.org/iiif/book1/manifest",
                "@type": "sc:Manifest",
                "label": {"@value": "Book 1", "@language": "en"}
            })
        );
    }

    #[test]
    fn full_document_key_order() {
        let mut manifest = Manifest::top_level();
        manifest
            .add_within("https://example.org/collection/top")
            .add_rendering("https://example.org/book1.pdf".into())
            .add_related("https://example.org/book1.html".into())
            .add_see_also("https://example.org/book1.xml")
            .add_service(Service::new("https://example.org/search"))
            .add_logo(crate::properties::Logo::new("https://example.org/logo.png"))
            .add_thumbnail(Thumbnail::new("https://example.org/thumb.jpg"))
            .set_metadata(Metadata::new().with_entry(MetadataEntry::new("Author", "Anne")))
            .set_nav_date("1856-07-04")
            .set_viewing_direction("left-to-right")
            .add_viewing_hint("paged")
            .add_license("http://creativecommons.org/licenses/by/4.0/")
            .add_attribution("Example Library", None)
            .add_description("A book", None)
            .add_label("Book 1", None)
            .set_id("https://example.org/iiif/book1/manifest")
            .add_sequence(Sequence::new());
        assert_eq!(
            keys(&to_document(&manifest)),
            [
                "@context",
                "@id",
                "@type",
                "label",
                "description",
                "attribution",
                "license",
                "viewingHint",
                "viewingDirection",
                "navDate",
                "metadata",
                "thumbnail",
                "logo",
                "service",
                "seeAlso",
                "related",
                "rendering",
                "within",
                "sequences",
            ]
        );
    }

    #[test]
    fn metadata_is_always_an_array() {
        let mut manifest = Manifest::top_level();
        manifest.set_metadata(Metadata::new().with_entry(MetadataEntry::new("Author", "Anne")));
        assert_eq!(
            to_document(&manifest)["metadata"],
            json!([{"label": "Author", "value": "Anne"}])
        );
    }

    #[test]
    fn children_use_their_own_flags() {
        let mut referenced = Canvas::new();
        referenced
            .set_id("https://example.org/canvas/2")
            .add_label("p. 2", None)
            .mark_id_only();

        let mut sequence = Sequence::new();
        sequence
            .set_id("https://example.org/sequence/normal")
            .set_start_canvas("https://example.org/canvas/2")
            .add_canvas(referenced);

        assert_eq!(
            to_document(&sequence),
            json!({
                "@id": "https://example.org/sequence/normal",
                "@type": "sc:Sequence",
                "startCanvas": "https://example.org/canvas/2",
                "canvases": [{"@id": "https://example.org/canvas/2"}]
            })
        );
    }

    #[test]
    fn canvas_renders_painting_annotation_and_image() {
        let mut image = Image::new();
        image
            .set_id("https://example.org/images/p1/full/full/0/default.jpg")
            .set_format("image/jpeg")
            .set_dimensions(2000, 3000)
            .add_service(
                Service::new("https://example.org/images/p1")
                    .with_context("http://iiif.io/api/image/2/context.json")
                    .with_profile("http://iiif.io/api/image/2/level2.json"),
            );

        let mut canvas = Canvas::new();
        canvas
            .set_id("https://example.org/canvas/p1")
            .add_label("p. 1", None)
            .set_dimensions(2000, 3000)
            .add_image(Annotation::painting(image, "https://example.org/canvas/p1"))
            .add_other_content("https://example.org/list/p1");

        assert_eq!(
            to_document(&canvas),
            json!({
                "@id": "https://example.org/canvas/p1",
                "@type": "sc:Canvas",
                "label": "p. 1",
                "height": 3000,
                "width": 2000,
                "images": [{
                    "@type": "oa:Annotation",
                    "motivation": "sc:painting",
                    "resource": {
                        "@id": "https://example.org/images/p1/full/full/0/default.jpg",
                        "@type": "dctypes:Image",
                        "service": {
                            "@context": "http://iiif.io/api/image/2/context.json",
                            "@id": "https://example.org/images/p1",
                            "profile": "http://iiif.io/api/image/2/level2.json"
                        },
                        "format": "image/jpeg",
                        "height": 3000,
                        "width": 2000
                    },
                    "on": "https://example.org/canvas/p1"
                }],
                "otherContent": [{
                    "@id": "https://example.org/list/p1",
                    "@type": "sc:AnnotationList"
                }]
            })
        );
    }

    #[test]
    fn range_renders_ids_and_members() {
        let mut canvas = Canvas::new();
        canvas
            .set_id("https://example.org/canvas/p1")
            .add_label("p. 1", None)
            .mark_member_data_only();

        let mut range = Range::new();
        range
            .set_id("https://example.org/range/r1")
            .add_label("Chapter 1", None)
            .add_canvas("https://example.org/canvas/p1")
            .add_range("https://example.org/range/r1.1")
            .add_member(canvas);

        assert_eq!(
            to_document(&range),
            json!({
                "@id": "https://example.org/range/r1",
                "@type": "sc:Range",
                "label": "Chapter 1",
                "canvases": ["https://example.org/canvas/p1"],
                "ranges": ["https://example.org/range/r1.1"],
                "members": [{
                    "@id": "https://example.org/canvas/p1",
                    "@type": "sc:Canvas",
                    "label": "p. 1"
                }]
            })
        );
    }

    #[test]
    fn collection_lists_manifests_by_reference() {
        let mut manifest = Manifest::new();
        manifest
            .set_id("https://example.org/iiif/book1/manifest")
            .add_label("Book 1", None)
            .mark_member_data_only();

        let mut collection = Collection::top_level();
        collection
            .set_id("https://example.org/collection/top")
            .add_manifest(manifest);

        assert_eq!(
            to_document(&collection),
            json!({
                "@context": DEFAULT_CONTEXT,
                "@id": "https://example.org/collection/top",
                "@type": "sc:Collection",
                "manifests": [{
                    "@id": "https://example.org/iiif/book1/manifest",
                    "@type": "sc:Manifest",
                    "label": "Book 1"
                }]
            })
        );
    }

    #[test]
    fn layer_lists_annotation_list_ids() {
        let mut layer = Layer::new();
        layer
            .set_id("https://example.org/layer/transcription")
            .add_other_content("https://example.org/list/p1")
            .add_other_content("https://example.org/list/p2");
        assert_eq!(
            to_document(&layer)["otherContent"],
            json!(["https://example.org/list/p1", "https://example.org/list/p2"])
        );
    }

    #[test]
    fn strict_rendering_requires_top_level_id() {
        let err = try_to_document(&Manifest::top_level()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::MissingId(crate::resource::ResourceKind::Manifest)
        ));
        assert!(try_to_document(&Canvas::new()).is_ok());
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut manifest = Manifest::top_level();
        manifest
            .set_id("https://example.org/iiif/book1/manifest")
            .add_label("Book 1", None);
        assert_eq!(to_document(&manifest), to_document(&manifest));
        assert_eq!(
            to_json_string(&manifest, false).unwrap(),
            to_json_string(&manifest, false).unwrap()
        );
    }

    #[test]
    fn compact_json_keeps_key_order() {
        let mut manifest = Manifest::top_level();
        manifest.set_id("https://example.org/m");
        assert_eq!(
            to_json_string(&manifest, false).unwrap(),
            format!(r#"{{"@context":"{DEFAULT_CONTEXT}","@id":"https://example.org/m","@type":"sc:Manifest"}}"#)
        );
    }
}
