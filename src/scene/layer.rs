//! Layer tree.
//!
//! A [`Layer`] carries the fields every layer type shares; the type-specific
//! payload lives in [`LayerKind`]. The manifest `Type` string is derived from
//! the variant, so the two cannot disagree.

use crate::geom::Drawing;
use crate::util::{named_enum, BoundingBox, Color, Error, Result, Vec4};
use super::{Animation, Transform};

/// Layer type names as stored in the manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerType {
    #[default]
    Unknown,
    Group,
    Sound,
    Paint,
    Picture,
    Viewpoint,
    Camera,
    Model,
}

named_enum!(LayerType, fallback = Unknown, [Unknown, Group, Sound, Paint, Picture, Viewpoint, Camera, Model]);

/// Keep-alive policy of a layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeepAliveType {
    #[default]
    None,
    Keep,
}

named_enum!(KeepAliveType, fallback = None, [None, Keep]);

/// Children of a group, in render and traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupLayer {
    pub children: Vec<Layer>,
}

/// Frame-by-frame painted content.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintLayer {
    pub framerate: f32,
    /// Number of animation loops, 0 for infinite.
    pub max_repeat_count: i32,
    /// Keyframe poses. Inserted keyframes are appended, not inserted.
    pub drawings: Vec<Drawing>,
    /// Indices into `drawings`, one per frame. A repeated index is a
    /// non-keyframe; the sequence is not necessarily monotonic.
    pub frames: Vec<i32>,
}

impl Default for PaintLayer {
    fn default() -> Self {
        Self {
            framerate: 24.0,
            max_repeat_count: 0,
            drawings: Vec::new(),
            frames: Vec::new(),
        }
    }
}

impl PaintLayer {
    /// Frame index standing in for a `Frames` entry that is not an integer.
    pub const INVALID_FRAME: i32 = -1;

    /// Single-drawing layer showing `drawing` on frame 0.
    pub fn with_drawing(drawing: Drawing) -> Self {
        Self {
            drawings: vec![drawing],
            frames: vec![0],
            ..Default::default()
        }
    }

    /// Union of all drawing bounds.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::of_boxes(self.drawings.iter().map(|d| &d.bounding_box))
    }

    /// Check that every frame indexes an existing drawing.
    pub fn validate_frames(&self, layer_name: &str) -> Result<()> {
        let count = self.drawings.len();
        for (frame, &index) in self.frames.iter().enumerate() {
            if index < 0 || index as usize >= count {
                return Err(Error::FrameOutOfRange {
                    layer: layer_name.to_string(),
                    frame,
                    index,
                    count,
                });
            }
        }
        Ok(())
    }
}

/// Spawn point / viewing volume.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewpointLayer {
    pub version: i32,
    pub color: Color,
    /// Center in xyz, radius in w.
    pub sphere: Vec4,
    pub allow_translation_x: bool,
    pub allow_translation_y: bool,
    pub allow_translation_z: bool,
    pub exporting: bool,
    pub showing_volume: bool,
    /// Observed values: "FloorLevel", "EyeLevel".
    pub type_str: String,
}

impl Default for ViewpointLayer {
    fn default() -> Self {
        Self {
            version: 1,
            color: Color::new(0.113542, 0.409455, 0.808914),
            sphere: Vec4::new(0.0, 1.0, 0.0, 2.0),
            allow_translation_x: true,
            allow_translation_y: true,
            allow_translation_z: true,
            exporting: true,
            showing_volume: false,
            type_str: "FloorLevel".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraLayer {
    pub fov: f32,
}

impl Default for CameraLayer {
    fn default() -> Self {
        Self { fov: 90.0 }
    }
}

/// Type-specific payload of a layer.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    Group(GroupLayer),
    Paint(PaintLayer),
    Viewpoint(ViewpointLayer),
    Camera(CameraLayer),
    /// Picture, sound, model or an unknown type. Not written back.
    Unsupported(LayerType),
}

impl LayerKind {
    pub fn layer_type(&self) -> LayerType {
        match self {
            Self::Group(_) => LayerType::Group,
            Self::Paint(_) => LayerType::Paint,
            Self::Viewpoint(_) => LayerType::Viewpoint,
            Self::Camera(_) => LayerType::Camera,
            Self::Unsupported(t) => *t,
        }
    }
}

/// A node of the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub collapsed: bool,
    pub bbox_visible: bool,
    /// Layer opacity in [0, 1].
    pub opacity: f32,
    /// Top layer of an imported rigid model.
    pub is_model_top_layer: bool,
    pub keep_alive: KeepAliveType,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Pivot transform, in layer space.
    pub pivot: Transform,
    pub animation: Animation,
    pub kind: LayerKind,
}

impl Layer {
    /// Create a visible, unlocked layer with identity transforms.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            visible: true,
            locked: false,
            collapsed: false,
            bbox_visible: false,
            opacity: 1.0,
            is_model_top_layer: false,
            keep_alive: KeepAliveType::None,
            transform: Transform::IDENTITY,
            pivot: Transform::IDENTITY,
            animation: Animation::default(),
            kind,
        }
    }

    /// Group layer with `children`.
    pub fn group(name: impl Into<String>, children: Vec<Layer>) -> Self {
        Self::new(name, LayerKind::Group(GroupLayer { children }))
    }

    pub fn paint(name: impl Into<String>, paint: PaintLayer) -> Self {
        Self::new(name, LayerKind::Paint(paint))
    }

    #[inline]
    pub fn layer_type(&self) -> LayerType {
        self.kind.layer_type()
    }

    /// Whether the manifest writer can represent this layer.
    #[inline]
    pub fn is_supported(&self) -> bool {
        !matches!(self.kind, LayerKind::Unsupported(_))
    }

    /// Child layers, empty for non-groups.
    pub fn children(&self) -> &[Layer] {
        match &self.kind {
            LayerKind::Group(g) => &g.children,
            _ => &[],
        }
    }

    pub fn as_paint(&self) -> Option<&PaintLayer> {
        match &self.kind {
            LayerKind::Paint(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paint_mut(&mut self) -> Option<&mut PaintLayer> {
        match &mut self.kind {
            LayerKind::Paint(p) => Some(p),
            _ => None,
        }
    }

    /// Visit every paint layer depth-first, in child order.
    ///
    /// This is the order in which payload records are written, and the order
    /// in which the manifest lists drawings.
    pub fn try_for_each_paint_mut<F>(&mut self, f: &mut F) -> Result<()>
    where
        F: FnMut(&str, &mut PaintLayer) -> Result<()>,
    {
        match &mut self.kind {
            LayerKind::Group(g) => {
                for child in &mut g.children {
                    child.try_for_each_paint_mut(f)?;
                }
                Ok(())
            }
            LayerKind::Paint(p) => f(&self.name, p),
            _ => Ok(()),
        }
    }

    /// Visit every paint layer depth-first, in child order.
    pub fn for_each_paint<'a>(&'a self, f: &mut impl FnMut(&'a Layer, &'a PaintLayer)) {
        match &self.kind {
            LayerKind::Group(g) => {
                for child in &g.children {
                    child.for_each_paint(f);
                }
            }
            LayerKind::Paint(p) => f(self, p),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{DrawingData, DataFileOffset};
    use crate::util::NamedEnum;

    fn paint_with(drawings: usize, frames: Vec<i32>) -> PaintLayer {
        PaintLayer {
            drawings: (0..drawings).map(|_| Drawing::new(DrawingData::default())).collect(),
            frames,
            ..Default::default()
        }
    }

    #[test]
    fn test_type_follows_kind() {
        let layer = Layer::group("Root", Vec::new());
        assert_eq!(layer.layer_type(), LayerType::Group);
        assert_eq!(layer.layer_type().name(), "Group");

        let layer = Layer::new("Snd", LayerKind::Unsupported(LayerType::Sound));
        assert_eq!(layer.layer_type(), LayerType::Sound);
        assert!(!layer.is_supported());
    }

    #[test]
    fn test_layer_type_fallback() {
        assert_eq!(LayerType::parse_or_fallback(Some("Camera")), LayerType::Camera);
        assert_eq!(LayerType::parse_or_fallback(Some("Hologram")), LayerType::Unknown);
        assert_eq!(KeepAliveType::parse_or_fallback(Some("Forever")), KeepAliveType::None);
    }

    #[test]
    fn test_frames_repeat_is_valid() {
        let paint = paint_with(2, vec![0, 0, 1, 0]);
        assert!(paint.validate_frames("Paint").is_ok());
    }

    #[test]
    fn test_frames_out_of_range() {
        let paint = paint_with(2, vec![0, 2]);
        let err = paint.validate_frames("Paint").unwrap_err();
        assert!(matches!(
            err,
            Error::FrameOutOfRange { frame: 1, index: 2, count: 2, .. }
        ));

        let paint = paint_with(2, vec![-1]);
        assert!(paint.validate_frames("Paint").is_err());
    }

    #[test]
    fn test_paint_traversal_order() {
        let mut root = Layer::group(
            "Root",
            vec![
                Layer::paint("A", PaintLayer::default()),
                Layer::group("G", vec![Layer::paint("B", PaintLayer::default())]),
                Layer::new("Cam", LayerKind::Camera(CameraLayer::default())),
                Layer::paint("C", PaintLayer::default()),
            ],
        );

        let mut names = Vec::new();
        root.for_each_paint(&mut |layer, _| names.push(layer.name.clone()));
        assert_eq!(names, ["A", "B", "C"]);

        let mut visited = Vec::new();
        root.try_for_each_paint_mut(&mut |name, paint| {
            visited.push(name.to_string());
            paint.drawings.push(Drawing::default());
            Ok(())
        })
        .unwrap();
        assert_eq!(visited, ["A", "B", "C"]);
        assert_eq!(root.children()[0].as_paint().unwrap().drawings.len(), 1);
        assert_eq!(
            root.children()[0].as_paint().unwrap().drawings[0].data_file_offset,
            DataFileOffset::NONE
        );
    }

    #[test]
    fn test_paint_bbox() {
        let paint = paint_with(3, vec![0]);
        assert!(paint.bounding_box().is_empty());
    }
}
