//! Top-level sequence record.

use crate::util::{Color, Result};
use super::{Layer, LayerKind, PaintLayer};

/// Manifest format version written by this library.
pub const CURRENT_FORMAT_VERSION: i64 = 1;

/// Descriptive metadata of a sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub thumbnail_crop_position: f32,
}

/// Gallery of captured pictures.
///
/// Pictures reference their own payload regions and are not carried over;
/// a gallery is always written back empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gallery;

/// Output resolution of camera exports, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// Root container of a project: metadata plus the layer tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    /// `Version` of the manifest this sequence was read from. Saving always
    /// writes [`CURRENT_FORMAT_VERSION`].
    pub format_version: i64,
    pub metadata: Metadata,
    pub gallery: Gallery,
    pub background_color: Color,
    /// Path of the default viewpoint layer, may be empty.
    pub default_viewpoint: String,
    pub framerate: f32,
    pub export_start: i64,
    pub export_end: i64,
    pub camera_resolution: Resolution,
    root_layer: Layer,
    /// Last stroke identifier handed out. Carried through the payload header
    /// untouched; real files are not always consistent.
    pub last_stroke_id: u32,
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            metadata: Metadata::default(),
            gallery: Gallery,
            background_color: Color::new(0.8, 0.8, 0.8),
            default_viewpoint: String::new(),
            framerate: 24.0,
            export_start: 0,
            export_end: 126000,
            camera_resolution: Resolution::default(),
            root_layer: Layer::group(Self::ROOT_NAME, Vec::new()),
            last_stroke_id: 0,
        }
    }
}

impl Sequence {
    /// Name given to a root group created by this library.
    pub const ROOT_NAME: &'static str = "Root";

    /// Create a sequence around `root`.
    ///
    /// A root that is not a group is wrapped in a new "Root" group, which
    /// keeps the root-is-a-group invariant without failing.
    pub fn with_root(root: Layer) -> Self {
        Self {
            root_layer: Self::ensure_group(root),
            ..Default::default()
        }
    }

    fn ensure_group(root: Layer) -> Layer {
        if matches!(root.kind, LayerKind::Group(_)) {
            root
        } else {
            Layer::group(Self::ROOT_NAME, vec![root])
        }
    }

    /// The root group.
    #[inline]
    pub fn root_layer(&self) -> &Layer {
        &self.root_layer
    }

    /// Mutable access to the root group's children.
    pub fn root_children_mut(&mut self) -> &mut Vec<Layer> {
        match &mut self.root_layer.kind {
            LayerKind::Group(g) => &mut g.children,
            _ => unreachable!("root layer is always a group"),
        }
    }

    /// Mutable access to the root layer itself, for in-place traversals
    /// that keep its kind.
    pub(crate) fn root_layer_mut(&mut self) -> &mut Layer {
        &mut self.root_layer
    }

    /// All paint layers with their names, depth-first.
    pub fn paint_layers(&self) -> Vec<(&str, &PaintLayer)> {
        let mut out = Vec::new();
        self.root_layer.for_each_paint(&mut |layer, paint| out.push((layer.name.as_str(), paint)));
        out
    }

    /// Check frame indices of every paint layer.
    pub fn validate_frames(&self) -> Result<()> {
        self.paint_layers()
            .into_iter()
            .try_for_each(|(name, paint)| paint.validate_frames(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CameraLayer, LayerType};

    #[test]
    fn test_default_root_is_group() {
        let seq = Sequence::default();
        assert_eq!(seq.root_layer().layer_type(), LayerType::Group);
        assert_eq!(seq.root_layer().name, "Root");
        assert!(seq.root_layer().children().is_empty());
    }

    #[test]
    fn test_with_root_wraps_non_group() {
        let cam = Layer::new("Cam", LayerKind::Camera(CameraLayer::default()));
        let seq = Sequence::with_root(cam);
        assert_eq!(seq.root_layer().layer_type(), LayerType::Group);
        assert_eq!(seq.root_layer().children()[0].name, "Cam");
    }

    #[test]
    fn test_paint_layers_and_validation() {
        let mut seq = Sequence::default();
        seq.root_children_mut().push(Layer::paint("P", PaintLayer {
            frames: vec![1],
            ..Default::default()
        }));
        assert_eq!(seq.paint_layers().len(), 1);
        assert!(seq.validate_frames().is_err());
    }
}
