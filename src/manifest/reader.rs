//! Manifest tree to scene model.

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::geom::{DataFileOffset, Drawing};
use crate::scene::{
    Animation, CameraLayer, GroupLayer, Keyframe, Keyframes, Layer, LayerKind, LayerType,
    Metadata, PaintLayer, Resolution, Sequence, Transform, ViewpointLayer, CURRENT_FORMAT_VERSION,
};
use crate::util::{BoundingBox, Quat, Vec3};
use super::node::Node;

/// Parse manifest text into a sequence whose drawings carry offsets but no
/// payload.
///
/// Returns `None` when the text is not a JSON object; the failure is logged.
/// A document without a `Sequence` object yields a default sequence.
pub fn parse_document(text: &str) -> Option<Sequence> {
    let document: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("manifest is not valid JSON: {}", e);
            return None;
        }
    };
    if !document.is_object() {
        warn!("manifest root is not an object");
        return None;
    }
    Some(parse_sequence(Node::new(&document)))
}

/// Parse a document tree (`{ "Version": .., "Sequence": { .. } }`).
pub(crate) fn parse_sequence(document: Node<'_>) -> Sequence {
    let version = document.get("Version").i64_or(CURRENT_FORMAT_VERSION);
    let s = document.get("Sequence");
    if !s.exists() {
        debug!("manifest has no Sequence object, using defaults");
    }

    let defaults = Sequence::default();
    let root = parse_root(s.get("RootLayer"));

    let mut seq = Sequence::with_root(root);
    seq.format_version = version;
    seq.metadata = parse_metadata(s.get("Metadata"));
    parse_gallery(s.get("Gallery"));
    seq.background_color = s.get("BackgroundColor").color_or(defaults.background_color);
    seq.default_viewpoint = s.get("DefaultViewpoint").string_or("");
    seq.framerate = s.get("Framerate").f32_or(defaults.framerate);
    seq.export_start = s.get("ExportStart").i64_or(defaults.export_start);
    seq.export_end = s.get("ExportEnd").i64_or(defaults.export_end);
    seq.camera_resolution = parse_resolution(s.get("CameraResolution"), defaults.camera_resolution);
    seq
}

fn parse_root(node: Node<'_>) -> Layer {
    match parse_layer(node) {
        Some(layer) if matches!(layer.kind, LayerKind::Group(_)) => layer,
        Some(layer) if layer.is_supported() => {
            warn!("root layer '{}' is a {:?}, wrapping it in a group", layer.name, layer.layer_type());
            layer
        }
        _ => {
            warn!("manifest has no usable root layer, using an empty group");
            Layer::group(Sequence::ROOT_NAME, Vec::new())
        }
    }
}

fn parse_metadata(m: Node<'_>) -> Metadata {
    Metadata {
        title: m.get("Title").string_or(""),
        description: m.get("Description").string_or(""),
        thumbnail_crop_position: m.get("ThumbnailCropPosition").f32_or(0.0),
    }
}

fn parse_gallery(g: Node<'_>) {
    let pictures = g.get("Pictures").items().count();
    if pictures > 0 {
        debug!("dropping {} gallery pictures", pictures);
    }
}

fn parse_resolution(node: Node<'_>, default: Resolution) -> Resolution {
    match node.floats_exact::<2>() {
        Some([w, h]) if w >= 0.0 && h >= 0.0 => Resolution { width: w as u32, height: h as u32 },
        _ => default,
    }
}

// ============================================================================
// Layers
// ============================================================================

/// Parse one layer and, for groups, its whole subtree.
///
/// Returns `None` only when the node is not an object. Layers of types this
/// library does not model come back as [`LayerKind::Unsupported`]; groups
/// drop those children.
pub(crate) fn parse_layer(l: Node<'_>) -> Option<Layer> {
    l.as_object()?;

    let layer_type: LayerType = l.get("Type").named();
    let kind = parse_layer_kind(l.get("Implementation"), layer_type);

    Some(Layer {
        name: l.get("Name").string_or(""),
        visible: l.get("Visible").bool_or(true),
        locked: l.get("Locked").bool_or(false),
        collapsed: l.get("Collapsed").bool_or(false),
        bbox_visible: l.get("BBoxVisible").bool_or(false),
        opacity: l.get("Opacity").f32_or(1.0),
        is_model_top_layer: l.get("IsModelTopLayer").bool_or(false),
        keep_alive: l.get("KeepAlive").get("Type").named(),
        transform: parse_transform(l.get("Transform")),
        pivot: parse_transform(l.get("Pivot")),
        animation: parse_animation(l.get("Animation")),
        kind,
    })
}

fn parse_layer_kind(li: Node<'_>, layer_type: LayerType) -> LayerKind {
    match layer_type {
        LayerType::Group => {
            let children = li
                .get("Children")
                .items()
                .filter_map(parse_layer)
                .filter(|child| {
                    if !child.is_supported() {
                        debug!("skipping unsupported layer '{}' ({:?})", child.name, child.layer_type());
                    }
                    child.is_supported()
                })
                .collect();
            LayerKind::Group(GroupLayer { children })
        }
        LayerType::Paint => LayerKind::Paint(parse_paint(li)),
        LayerType::Viewpoint => LayerKind::Viewpoint(parse_viewpoint(li)),
        LayerType::Camera => LayerKind::Camera(CameraLayer {
            fov: li.get("FOV").f32_or(CameraLayer::default().fov),
        }),
        other => LayerKind::Unsupported(other),
    }
}

fn parse_paint(li: Node<'_>) -> PaintLayer {
    let defaults = PaintLayer::default();
    let drawings = li.get("Drawings").items().map(parse_drawing).collect();

    let frames = li.get("Frames").items().map(parse_frame).collect();

    PaintLayer {
        framerate: li.get("Framerate").f32_or(defaults.framerate),
        max_repeat_count: li.get("MaxRepeatCount").i32_or(defaults.max_repeat_count),
        drawings,
        frames,
    }
}

/// One `Frames` entry. Integral floats are accepted.
///
/// Entries are never dropped, so later frames keep their position. An
/// integer outside `i32` saturates and anything else becomes
/// [`PaintLayer::INVALID_FRAME`]; both fail frame validation.
fn parse_frame(item: Node<'_>) -> i32 {
    match item.i64() {
        Some(v) => v.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        None => {
            warn!("frame entry {:?} is not an integer", item.value());
            PaintLayer::INVALID_FRAME
        }
    }
}

fn parse_drawing(d: Node<'_>) -> Drawing {
    let offset = match d.get("DataFileOffset").str() {
        Some(text) => DataFileOffset::parse_hex(text),
        None => DataFileOffset::NONE,
    };
    if offset.is_none() {
        trace!("drawing without payload offset");
    }

    Drawing {
        bounding_box: parse_bounding_box(d.get("BoundingBox")),
        data_file_offset: offset,
        data: Default::default(),
    }
}

fn parse_viewpoint(li: Node<'_>) -> ViewpointLayer {
    let defaults = ViewpointLayer::default();
    ViewpointLayer {
        version: li.get("Version").i32_or(defaults.version),
        color: li.get("Color").color_or(defaults.color),
        sphere: li.get("Sphere").vec4_or(defaults.sphere),
        allow_translation_x: li.get("AllowTranslationX").bool_or(defaults.allow_translation_x),
        allow_translation_y: li.get("AllowTranslationY").bool_or(defaults.allow_translation_y),
        allow_translation_z: li.get("AllowTranslationZ").bool_or(defaults.allow_translation_z),
        exporting: li.get("Exporting").bool_or(defaults.exporting),
        showing_volume: li.get("ShowingVolume").bool_or(defaults.showing_volume),
        type_str: li.get("TypeStr").string_or(&defaults.type_str),
    }
}

// ============================================================================
// Values
// ============================================================================

/// Six floats `[MinX, MaxX, MinY, MaxY, MinZ, MaxZ]`.
///
/// Non-finite bounds are written as `null`; a `null` component restores the
/// empty-box sentinel for that component.
pub(crate) fn parse_bounding_box(node: Node<'_>) -> BoundingBox {
    let Some(v) = node.floats::<6>() else {
        return BoundingBox::EMPTY;
    };
    let empty = BoundingBox::EMPTY.to_array();
    BoundingBox::from_array(std::array::from_fn(|i| v[i].unwrap_or(empty[i])))
}

/// Transform in either schema generation.
///
/// An object is the rotation/scale/flip/translation form. A flat array is
/// the older 4x4 matrix form, which loads as identity.
pub(crate) fn parse_transform(node: Node<'_>) -> Transform {
    match node.value() {
        Some(Value::Object(_)) => Transform {
            rotation: node.get("Rotation").quat_or(Quat::IDENTITY),
            scale: node.get("Scale").f32_or(1.0),
            flip: node.get("Flip").string_or(""),
            translation: node.get("Translation").vec3_or(Vec3::ZERO),
        },
        Some(Value::Array(items)) => {
            debug!("legacy {}-element matrix transform loaded as identity", items.len());
            Transform::IDENTITY
        }
        _ => Transform::IDENTITY,
    }
}

fn parse_animation(a: Node<'_>) -> Animation {
    Animation {
        duration: a.get("Duration").f32_or(0.0),
        timeline: a.get("Timeline").bool_or(false),
        start_offset: a.get("StartOffset").f32_or(0.0),
        max_repeat_count: a.get("MaxRepeatCount").f32_or(0.0),
        keys: parse_keyframes(a.get("Keys")),
    }
}

fn parse_keyframes(k: Node<'_>) -> Keyframes {
    Keyframes {
        visibility: parse_channel(k.get("Visibility"), |v| v.bool_or(true)),
        offset: parse_channel(k.get("Offset"), |v| v.i32_or(0)),
        opacity: parse_channel(k.get("Opacity"), |v| v.f32_or(1.0)),
        transform: parse_channel(k.get("Transform"), parse_transform),
    }
}

fn parse_channel<T>(channel: Node<'_>, value: impl Fn(Node<'_>) -> T) -> Vec<Keyframe<T>> {
    channel
        .items()
        .map(|kf| Keyframe {
            time: kf.get("Time").i64_or(0),
            value: value(kf.get("Value")),
            interpolation: kf.get("Interpolation").named(),
        })
        .collect()
}
