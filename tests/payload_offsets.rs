//! Offset resolution against hand-placed payload records.

use std::io::Cursor;

use quill::manifest::parse_document;
use quill::prelude::*;
use quill::project::read_payload;
use quill::qbin::{QbinWriter, HEADER_SIZE};

/// Encode one drawing without a file header.
fn encode(data: &DrawingData) -> Vec<u8> {
    let mut w = QbinWriter::new(Vec::new());
    w.write_drawing_data(data).expect("Failed to encode drawing");
    w.finish().expect("Failed to flush")
}

fn stroke(id: u32, brush: BrushType, points: &[[f32; 3]]) -> Stroke {
    Stroke::new(id, brush, points.iter().map(|p| Vertex::at(Vec3::from_array(*p))).collect())
}

/// Payload with records at exactly 0x10 and 0x40, zero filler elsewhere.
fn payload(at_10: &DrawingData, at_40: &DrawingData) -> Vec<u8> {
    let mut bytes = vec![0u8; 0x10];
    bytes[..4].copy_from_slice(&99u32.to_le_bytes());
    bytes.extend(encode(at_10));
    assert!(bytes.len() <= 0x40, "first record overlaps the second");
    bytes.resize(0x40, 0xAB);
    bytes.extend(encode(at_40));
    bytes
}

fn manifest(offsets: [&str; 2]) -> String {
    serde_json::json!({
        "Version": 1,
        "Sequence": {
            "RootLayer": {
                "Name": "Root",
                "Type": "Group",
                "Implementation": { "Children": [{
                    "Name": "Paint",
                    "Type": "Paint",
                    "Implementation": {
                        "Drawings": [
                            { "BoundingBox": [0, 1, 0, 1, 0, 1], "DataFileOffset": offsets[0] },
                            { "BoundingBox": [0, 1, 0, 1, 0, 1], "DataFileOffset": offsets[1] },
                        ],
                        "Frames": [0, 1]
                    }
                }] }
            }
        }
    })
    .to_string()
}

fn first() -> DrawingData {
    // 4 + 40 bytes: ends at 0x3C.
    DrawingData::new(vec![stroke(7, BrushType::Line, &[])])
}

fn second() -> DrawingData {
    DrawingData::new(vec![
        stroke(8, BrushType::Cube, &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
        stroke(9, BrushType::Ellipse, &[[-1.0, 0.0, 0.0]]),
    ])
}

#[test]
fn test_drawings_at_recorded_offsets() {
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["10", "40"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");

    assert_eq!(seq.last_stroke_id, 99);
    let paint = seq.paint_layers()[0].1;
    assert_eq!(paint.drawings[0].data, first());
    assert_eq!(paint.drawings[1].data, second());
    assert_eq!(paint.drawings[1].data.vertex_count(), 3);
    // Bounds come from the manifest, not from the strokes.
    assert_eq!(paint.drawings[1].bounding_box, BoundingBox::new(Vec3::ZERO, Vec3::ONE));
}

#[test]
fn test_offsets_independent_of_order() {
    // Manifest order is the reverse of file order.
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["40", "10"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");

    let paint = seq.paint_layers()[0].1;
    assert_eq!(paint.drawings[0].data, second());
    assert_eq!(paint.drawings[1].data, first());
}

#[test]
fn test_shared_offset() {
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["40", "40"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");

    let paint = seq.paint_layers()[0].1;
    assert_eq!(paint.drawings[0].data, paint.drawings[1].data);
}

#[test]
fn test_unparseable_offset_left_empty() {
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["0x40", "10"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");

    let paint = seq.paint_layers()[0].1;
    assert!(paint.drawings[0].data_file_offset.is_none());
    assert!(paint.drawings[0].data.is_empty());
    assert_eq!(paint.drawings[1].data, first());
}

#[test]
fn test_offset_past_end() {
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["10", "1000"])).expect("Failed to parse manifest");
    let err = read_payload(&mut seq, Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEof(0x1000)));
}

#[test]
fn test_save_remints_offsets() {
    let bytes = payload(&first(), &second());
    let mut seq = parse_document(&manifest(["10", "40"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");

    let out = quill::project::write_payload(&mut seq, Vec::new()).expect("Failed to write payload");
    let paint = seq.paint_layers()[0].1;
    let first_size = 4 + 40;
    assert_eq!(paint.drawings[0].data_file_offset.get(), HEADER_SIZE as i64);
    assert_eq!(paint.drawings[1].data_file_offset.get(), (HEADER_SIZE + first_size) as i64);
    assert_eq!(&out[..4], &99u32.to_le_bytes());
}

#[test]
fn test_unknown_brush_survives_resave() {
    let mut bytes = payload(&first(), &second());
    // Brush code of the only stroke at 0x10: count (4) + id, reserved, bbox (32).
    let brush = 0x10 + 4 + 32;
    bytes[brush..brush + 2].copy_from_slice(&5i16.to_le_bytes());

    let mut seq = parse_document(&manifest(["10", "40"])).expect("Failed to parse manifest");
    read_payload(&mut seq, Cursor::new(bytes)).expect("Failed to read payload");
    let stroke = &seq.paint_layers()[0].1.drawings[0].data.strokes[0];
    assert_eq!(stroke.brush_type, BrushType::Unknown(5));

    let out = quill::project::write_payload(&mut seq, Vec::new()).expect("Failed to write payload");
    let brush = HEADER_SIZE + 4 + 32;
    assert_eq!(&out[brush..brush + 2], &5i16.to_le_bytes());
}
