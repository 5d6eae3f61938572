//! Scene model to manifest tree.
//!
//! Mirrors the reader field for field. Drawing offsets are emitted as they
//! are, so the payload must be written first for them to be meaningful.

use serde_json::{json, Value};
use tracing::debug;

use crate::geom::Drawing;
use crate::scene::{
    Animation, Keyframe, Keyframes, Layer, LayerKind, Metadata, PaintLayer, Sequence, Transform,
    ViewpointLayer, CURRENT_FORMAT_VERSION,
};
use crate::util::{BoundingBox, Color, NamedEnum, Result};
use super::format::{self, ManifestLayout};

/// Serialize a sequence to manifest text.
pub fn write_document(seq: &Sequence, layout: ManifestLayout) -> Result<String> {
    format::to_string(&sequence_document(seq), layout)
}

/// Build the full document tree.
///
/// The body is always in the current schema, so `Version` is always
/// [`CURRENT_FORMAT_VERSION`], whatever version the sequence was read from.
pub fn sequence_document(seq: &Sequence) -> Value {
    json!({
        "Version": CURRENT_FORMAT_VERSION,
        "Sequence": write_sequence(seq),
    })
}

fn write_sequence(seq: &Sequence) -> Value {
    let r = seq.camera_resolution;
    json!({
        "Metadata": write_metadata(&seq.metadata),
        "Gallery": { "Thumbnails": {}, "Pictures": [] },
        "BackgroundColor": write_color(seq.background_color),
        "DefaultViewpoint": seq.default_viewpoint,
        "Framerate": seq.framerate,
        "ExportStart": seq.export_start,
        "ExportEnd": seq.export_end,
        "CameraResolution": [r.width, r.height],
        "RootLayer": write_layer(seq.root_layer()),
    })
}

fn write_metadata(m: &Metadata) -> Value {
    json!({
        "Title": m.title,
        "Description": m.description,
        "ThumbnailCropPosition": m.thumbnail_crop_position,
    })
}

// ============================================================================
// Layers
// ============================================================================

fn write_layer(layer: &Layer) -> Value {
    json!({
        "Name": layer.name,
        "Visible": layer.visible,
        "Locked": layer.locked,
        "Collapsed": layer.collapsed,
        "BBoxVisible": layer.bbox_visible,
        "Opacity": layer.opacity,
        "Type": layer.layer_type().name(),
        "IsModelTopLayer": layer.is_model_top_layer,
        "KeepAlive": { "Type": layer.keep_alive.name() },
        "Transform": write_transform(&layer.transform),
        "Pivot": write_transform(&layer.pivot),
        "Animation": write_animation(&layer.animation),
        "Implementation": write_implementation(&layer.kind),
    })
}

fn write_implementation(kind: &LayerKind) -> Value {
    match kind {
        LayerKind::Group(g) => {
            let children: Vec<Value> = g
                .children
                .iter()
                .filter(|child| {
                    if !child.is_supported() {
                        debug!("not writing unsupported layer '{}'", child.name);
                    }
                    child.is_supported()
                })
                .map(write_layer)
                .collect();
            json!({ "Children": children })
        }
        LayerKind::Paint(p) => write_paint(p),
        LayerKind::Viewpoint(v) => write_viewpoint(v),
        LayerKind::Camera(c) => json!({ "FOV": c.fov }),
        LayerKind::Unsupported(_) => Value::Null,
    }
}

fn write_paint(p: &PaintLayer) -> Value {
    let drawings: Vec<Value> = p.drawings.iter().map(write_drawing).collect();
    json!({
        "Framerate": p.framerate,
        "MaxRepeatCount": p.max_repeat_count,
        "Drawings": drawings,
        "Frames": p.frames,
    })
}

fn write_drawing(d: &Drawing) -> Value {
    json!({
        "BoundingBox": write_bounding_box(&d.bounding_box),
        "DataFileOffset": d.data_file_offset.to_hex(),
    })
}

fn write_viewpoint(v: &ViewpointLayer) -> Value {
    json!({
        "Version": v.version,
        "Color": write_color(v.color),
        "Sphere": v.sphere.to_array(),
        "AllowTranslationX": v.allow_translation_x,
        "AllowTranslationY": v.allow_translation_y,
        "AllowTranslationZ": v.allow_translation_z,
        "Exporting": v.exporting,
        "ShowingVolume": v.showing_volume,
        "TypeStr": v.type_str,
    })
}

// ============================================================================
// Values
// ============================================================================

fn write_color(c: Color) -> Value {
    json!(c.to_array())
}

/// Non-finite components (an empty box) become `null`.
fn write_bounding_box(b: &BoundingBox) -> Value {
    Value::Array(b.to_array().into_iter().map(Value::from).collect())
}

fn write_transform(t: &Transform) -> Value {
    json!({
        "Rotation": t.rotation.to_array(),
        "Scale": t.scale,
        "Flip": t.flip,
        "Translation": t.translation.to_array(),
    })
}

fn write_animation(a: &Animation) -> Value {
    json!({
        "Duration": a.duration,
        "Timeline": a.timeline,
        "StartOffset": a.start_offset,
        "MaxRepeatCount": a.max_repeat_count,
        "Keys": write_keyframes(&a.keys),
    })
}

fn write_keyframes(k: &Keyframes) -> Value {
    json!({
        "Visibility": write_channel(&k.visibility, |v| json!(v)),
        "Offset": write_channel(&k.offset, |v| json!(v)),
        "Opacity": write_channel(&k.opacity, |v| json!(v)),
        "Transform": write_channel(&k.transform, write_transform),
    })
}

fn write_channel<T>(keys: &[Keyframe<T>], value: impl Fn(&T) -> Value) -> Value {
    Value::Array(
        keys.iter()
            .map(|kf| {
                json!({
                    "Time": kf.time,
                    "Value": value(&kf.value),
                    "Interpolation": kf.interpolation.name(),
                })
            })
            .collect(),
    )
}
