use super::*;

const SHAPES: [ShapeId; 4] = [
    ShapeId::Line,
    ShapeId::Triangle,
    ShapeId::Square,
    ShapeId::Pentagon,
];

#[test]
fn no_lookup_for_none() {
    assert!(coordinates_for(ShapeId::None).is_none());
}

#[test]
fn every_shape_has_a_table() {
    for shape in SHAPES {
        assert!(coordinates_for(shape).is_some(), "{shape:?}");
    }
}

#[test]
fn polygons_close_on_their_first_vertex() {
    for (shape, vertices) in [
        (ShapeId::Triangle, 3),
        (ShapeId::Square, 4),
        (ShapeId::Pentagon, 5),
    ] {
        let points = coordinates_for(shape).expect("table");
        for closing in &points[vertices..] {
            assert_eq!(*closing, points[0], "{shape:?}");
        }
        for distinct in &points[1..vertices] {
            assert_ne!(*distinct, points[0], "{shape:?}");
        }
    }
}

#[test]
fn scaling_then_unscaling_reproduces_table() {
    for factor in [3000.0_f32, 1.0, 0.25, 12_345.0] {
        for shape in SHAPES {
            let original = coordinates_for(shape).expect("table");
            let restored = scaled(&original, factor).map(|point| point / factor);
            for (restored, original) in restored.iter().zip(original.iter()) {
                assert!(
                    restored.approx_eq(original, 1e-6),
                    "{shape:?} x{factor}: {restored:?} != {original:?}"
                );
            }
        }
    }
}

#[test]
fn default_scale_moves_points_into_sink_units() {
    let points = scaled(&coordinates_for(ShapeId::Square).expect("table"), 3000.0);
    assert!(points[0].approx_eq(&Vec3::new(-30.0, 30.0, 0.0), 1e-3));
    assert!(points[2].approx_eq(&Vec3::new(30.0, -30.0, 0.0), 1e-3));
}
