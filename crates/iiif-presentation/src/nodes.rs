//! Concrete resource kinds and the children only they may hold.

use crate::resource::{Resource, ResourceCore, ResourceKind};
use crate::types::ResourceId;

/// Motivation of an annotation that paints content onto a canvas.
pub const PAINTING_MOTIVATION: &str = "sc:painting";

macro_rules! resource_node {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, {
            $($field:ident: $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            core: ResourceCore,
            $($field: $ty),*
        }

        impl Resource for $name {
            fn core(&self) -> &ResourceCore {
                &self.core
            }

            fn core_mut(&mut self) -> &mut ResourceCore {
                &mut self.core
            }

            fn from_core(core: ResourceCore) -> Self {
                Self {
                    core,
                    $($field: Default::default()),*
                }
            }

            fn resource_kind() -> ResourceKind {
                $kind
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as Resource>::new()
            }
        }
    };
}

resource_node!(
    /// The description of one digital object (`sc:Manifest`).
    Manifest, ResourceKind::Manifest, {
        sequences: Vec<Sequence>,
        structures: Vec<Range>,
    }
);

resource_node!(
    /// An ordering of canvases (`sc:Sequence`).
    Sequence, ResourceKind::Sequence, {
        canvases: Vec<Canvas>,
        start_canvas: Option<ResourceId>,
    }
);

resource_node!(
    /// A virtual page onto which content is painted (`sc:Canvas`).
    Canvas, ResourceKind::Canvas, {
        width: Option<u32>,
        height: Option<u32>,
        images: Vec<Annotation>,
        other_content: Vec<ResourceId>,
    }
);

resource_node!(
    /// An image resource (`dctypes:Image`).
    Image, ResourceKind::Image, {
        format: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    }
);

resource_node!(
    /// Associates a resource with a canvas (`oa:Annotation`).
    Annotation, ResourceKind::Annotation, {
        motivation: Option<String>,
        resource: Option<Image>,
        on: Option<ResourceId>,
    }
);

resource_node!(
    /// A structural section such as a chapter (`sc:Range`).
    Range, ResourceKind::Range, {
        canvases: Vec<ResourceId>,
        ranges: Vec<ResourceId>,
        members: Vec<RangeMember>,
        start_canvas: Option<ResourceId>,
    }
);

resource_node!(
    /// A grouping of manifests and other collections (`sc:Collection`).
    Collection, ResourceKind::Collection, {
        collections: Vec<Collection>,
        manifests: Vec<Manifest>,
        members: Vec<CollectionMember>,
    }
);

resource_node!(
    /// A grouping of annotation lists across canvases (`sc:Layer`).
    Layer, ResourceKind::Layer, {
        other_content: Vec<ResourceId>,
    }
);

/// A node listed under a range's `members`.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeMember {
    Canvas(Canvas),
    Range(Range),
}

impl From<Canvas> for RangeMember {
    fn from(canvas: Canvas) -> Self {
        RangeMember::Canvas(canvas)
    }
}

impl From<Range> for RangeMember {
    fn from(range: Range) -> Self {
        RangeMember::Range(range)
    }
}

/// A node listed under a collection's `members`.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionMember {
    Collection(Collection),
    Manifest(Manifest),
}

impl From<Collection> for CollectionMember {
    fn from(collection: Collection) -> Self {
        CollectionMember::Collection(collection)
    }
}

impl From<Manifest> for CollectionMember {
    fn from(manifest: Manifest) -> Self {
        CollectionMember::Manifest(manifest)
    }
}

impl Manifest {
    pub fn add_sequence(&mut self, sequence: Sequence) -> &mut Self {
        self.sequences.push(sequence);
        self
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Append a range to the table of contents (`structures`).
    pub fn add_structure(&mut self, range: Range) -> &mut Self {
        self.structures.push(range);
        self
    }

    pub fn structures(&self) -> &[Range] {
        &self.structures
    }
}

impl Sequence {
    pub fn add_canvas(&mut self, canvas: Canvas) -> &mut Self {
        self.canvases.push(canvas);
        self
    }

    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    pub fn set_start_canvas(&mut self, canvas_id: impl Into<ResourceId>) -> &mut Self {
        self.start_canvas = Some(canvas_id.into());
        self
    }

    pub fn start_canvas(&self) -> Option<&ResourceId> {
        self.start_canvas.as_ref()
    }
}

impl Canvas {
    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = Some(height);
        self
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) -> &mut Self {
        self.set_width(width).set_height(height)
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Append an annotation painting content onto this canvas.
    pub fn add_image(&mut self, annotation: Annotation) -> &mut Self {
        self.images.push(annotation);
        self
    }

    pub fn images(&self) -> &[Annotation] {
        &self.images
    }

    /// Reference an annotation list by id (`otherContent`).
    pub fn add_other_content(&mut self, list_id: impl Into<ResourceId>) -> &mut Self {
        self.other_content.push(list_id.into());
        self
    }

    pub fn other_content(&self) -> &[ResourceId] {
        &self.other_content
    }
}

impl Image {
    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = Some(format.into());
        self
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = Some(height);
        self
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) -> &mut Self {
        self.set_width(width).set_height(height)
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }
}

impl Annotation {
    /// An embedded annotation painting `image` onto the canvas `canvas_id`.
    pub fn painting(image: Image, canvas_id: impl Into<ResourceId>) -> Self {
        let mut annotation = Self::new();
        annotation
            .set_motivation(PAINTING_MOTIVATION)
            .set_resource(image)
            .set_on(canvas_id);
        annotation
    }

    pub fn set_motivation(&mut self, motivation: impl Into<String>) -> &mut Self {
        self.motivation = Some(motivation.into());
        self
    }

    pub fn motivation(&self) -> Option<&str> {
        self.motivation.as_deref()
    }

    pub fn set_resource(&mut self, image: Image) -> &mut Self {
        self.resource = Some(image);
        self
    }

    pub fn resource(&self) -> Option<&Image> {
        self.resource.as_ref()
    }

    /// The canvas this annotation targets.
    pub fn set_on(&mut self, canvas_id: impl Into<ResourceId>) -> &mut Self {
        self.on = Some(canvas_id.into());
        self
    }

    pub fn on(&self) -> Option<&ResourceId> {
        self.on.as_ref()
    }
}

impl Range {
    /// Reference a canvas belonging to this range by id.
    pub fn add_canvas(&mut self, canvas_id: impl Into<ResourceId>) -> &mut Self {
        self.canvases.push(canvas_id.into());
        self
    }

    pub fn canvases(&self) -> &[ResourceId] {
        &self.canvases
    }

    /// Reference a nested range by id.
    pub fn add_range(&mut self, range_id: impl Into<ResourceId>) -> &mut Self {
        self.ranges.push(range_id.into());
        self
    }

    pub fn ranges(&self) -> &[ResourceId] {
        &self.ranges
    }

    pub fn add_member(&mut self, member: impl Into<RangeMember>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    pub fn members(&self) -> &[RangeMember] {
        &self.members
    }

    pub fn set_start_canvas(&mut self, canvas_id: impl Into<ResourceId>) -> &mut Self {
        self.start_canvas = Some(canvas_id.into());
        self
    }

    pub fn start_canvas(&self) -> Option<&ResourceId> {
        self.start_canvas.as_ref()
    }
}

impl Collection {
    pub fn add_collection(&mut self, collection: Collection) -> &mut Self {
        self.collections.push(collection);
        self
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn add_manifest(&mut self, manifest: Manifest) -> &mut Self {
        self.manifests.push(manifest);
        self
    }

    pub fn manifests(&self) -> &[Manifest] {
        &self.manifests
    }

    pub fn add_member(&mut self, member: impl Into<CollectionMember>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    pub fn members(&self) -> &[CollectionMember] {
        &self.members
    }
}

impl Layer {
    /// Reference an annotation list by id (`otherContent`).
    pub fn add_other_content(&mut self, list_id: impl Into<ResourceId>) -> &mut Self {
        self.other_content.push(list_id.into());
        self
    }

    pub fn other_content(&self) -> &[ResourceId] {
        &self.other_content
    }
}
