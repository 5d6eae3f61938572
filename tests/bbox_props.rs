//! Property tests for bounding-box folding and offset text.

use proptest::prelude::*;
use quill::geom::DataFileOffset;
use quill::util::{BoundingBox, Vec3};

fn point() -> impl Strategy<Value = Vec3> {
    (-1.0e4f32..1.0e4, -1.0e4f32..1.0e4, -1.0e4f32..1.0e4).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn bbox() -> impl Strategy<Value = BoundingBox> {
    prop::collection::vec(point(), 0..8).prop_map(BoundingBox::of_points)
}

proptest! {
    #[test]
    fn extend_is_commutative(a in bbox(), b in bbox()) {
        prop_assert_eq!(a.extended(b), b.extended(a));
    }

    #[test]
    fn extend_is_associative(a in bbox(), b in bbox(), c in bbox()) {
        prop_assert_eq!(a.extended(b).extended(c), a.extended(b.extended(c)));
    }

    #[test]
    fn empty_is_identity(a in bbox()) {
        prop_assert_eq!(BoundingBox::EMPTY.extended(a), a);
        prop_assert_eq!(a.extended(BoundingBox::EMPTY), a);
    }

    #[test]
    fn fold_contains_every_point(points in prop::collection::vec(point(), 1..16)) {
        let b = BoundingBox::of_points(points.iter().copied());
        prop_assert!(!b.is_empty());
        for p in points {
            prop_assert!(p.cmpge(b.min).all() && p.cmple(b.max).all());
        }
    }

    #[test]
    fn offset_hex_is_reversible(pos in 0u64..(i64::MAX as u64)) {
        let offset = DataFileOffset::at(pos);
        prop_assert_eq!(DataFileOffset::parse_hex(&offset.to_hex()), offset);
    }

    #[test]
    fn offset_garbage_is_sentinel(text in "[g-zG-Z_ ]{1,20}") {
        prop_assert_eq!(DataFileOffset::parse_hex(&text), DataFileOffset::NONE);
    }
}
