use approx::assert_relative_eq;
use nalgebra::Point3;

use crate::errors::Error;
use crate::knot::KnotStyle;

use super::BSplineCurve;

/// Control polygon from the curve editor's startup scene.
fn zigzag() -> Vec<Point3<f64>> {
    vec![
        Point3::new(-2., 0., 0.),
        Point3::new(-2., 2., 0.),
        Point3::new(2., -2., 0.),
        Point3::new(2., 0., 0.),
    ]
}

fn arch() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 2., 0.),
        Point3::new(2., 2., 0.),
        Point3::new(3., 0., 0.),
    ]
}

#[test]
fn uniform_knot_vector_is_an_arithmetic_progression() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::Uniform).unwrap();
    assert_eq!(
        curve.knots().to_vec(),
        vec![0., 1., 2., 3., 4., 5., 6., 7.]
    );
    assert_eq!(curve.knots_domain(), (3., 4.));
}

#[test]
fn open_uniform_knot_vector_clamps_the_ends() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    assert_eq!(
        curve.knots().to_vec(),
        vec![0., 0., 0., 0., 1., 2., 2., 2.]
    );
    assert_eq!(curve.knots_domain(), (0., 1.));
}

#[test]
fn weights_form_a_partition_of_unity() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    let (min_t, max_t) = curve.knots_domain();
    for i in 0..100 {
        let t = min_t + (max_t - min_t) * i as f64 / 100.;
        let sum: f64 = (0..curve.control_points_count())
            .map(|j| curve.knots().weight(j, curve.degree(), t))
            .sum();
        assert_relative_eq!(sum, 1., epsilon = 1e-10);
    }
}

#[test]
fn open_uniform_curve_starts_at_the_first_control_point() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    let (min_t, _) = curve.knots_domain();
    let start = curve.point_at(min_t);
    assert_relative_eq!(start.x, -2., epsilon = 1e-12);
    assert_relative_eq!(start.y, 0., epsilon = 1e-12);
    assert_relative_eq!(start.z, 0., epsilon = 1e-12);
}

#[test]
fn clamped_knot_vector_interpolates_both_endpoints() {
    let mut curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    curve
        .set_knot_vector(vec![0., 0., 0., 0., 1., 1., 1., 1.])
        .unwrap();

    let (min_t, max_t) = curve.knots_domain();
    let start = curve.point_at(min_t);
    let end = curve.point_at(max_t);

    assert_relative_eq!(start.x, -2., epsilon = 1e-12);
    assert_relative_eq!(start.y, 0., epsilon = 1e-12);
    assert_relative_eq!(end.x, 2., epsilon = 1e-12);
    assert_relative_eq!(end.y, 0., epsilon = 1e-12);
}

#[test]
fn evaluate_samples_precision_times_control_count_points() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    let points = curve.evaluate();
    assert_eq!(points.len(), 1024);
    assert_relative_eq!(points[0].x, -2., epsilon = 1e-12);
    assert_relative_eq!(points[0].y, 0., epsilon = 1e-12);
}

#[test]
fn evaluate_is_idempotent() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    assert_eq!(curve.evaluate(), curve.evaluate());
}

#[test]
fn replacing_control_points_with_the_same_set_round_trips() {
    let mut curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::OpenUniform).unwrap();
    let before = curve.evaluate();
    curve.set_control_points(zigzag()).unwrap();
    assert_eq!(before, curve.evaluate());
}

#[test]
fn segments_count_matches_control_count_and_order() {
    let curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::Uniform).unwrap();
    assert_eq!(curve.segments_count(), 1);

    let five = vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 1., 0.),
        Point3::new(2., 0., 0.),
        Point3::new(3., 1., 0.),
        Point3::new(4., 0., 0.),
    ];
    let curve = BSplineCurve::try_new(2, five, KnotStyle::Uniform).unwrap();
    assert_eq!(curve.segments_count(), 3);
}

#[test]
fn precision_is_clamped_to_a_safe_range() {
    let mut curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::Uniform).unwrap();
    assert_eq!(curve.precision(), 256);

    curve.set_precision(10);
    assert_eq!(curve.precision(), 64);

    curve.set_precision(4000);
    assert_eq!(curve.precision(), 1024);

    curve.set_precision(512);
    assert_eq!(curve.precision(), 512);
}

#[test]
fn straight_line_has_zero_curvature() {
    let line = vec![
        Point3::new(0., 0., 0.),
        Point3::new(1., 0., 0.),
        Point3::new(2., 0., 0.),
        Point3::new(3., 0., 0.),
    ];
    let curve = BSplineCurve::try_new(3, line, KnotStyle::OpenUniform).unwrap();
    assert_relative_eq!(curve.curvature_at(0.5), 0., epsilon = 1e-12);
}

#[test]
fn arch_has_positive_curvature() {
    let curve = BSplineCurve::try_new(3, arch(), KnotStyle::OpenUniform).unwrap();
    assert!(curve.curvature_at(0.5) > 0.);
}

#[test]
fn frenet_frame_is_orthonormal_away_from_degeneracies() {
    let curve = BSplineCurve::try_new(3, arch(), KnotStyle::OpenUniform).unwrap();
    let frame = curve.frenet_frame_at(0.5);

    assert_relative_eq!(frame.tangent().norm(), 1., epsilon = 1e-9);
    assert_relative_eq!(frame.normal().norm(), 1., epsilon = 1e-9);
    assert_relative_eq!(frame.binormal().norm(), 1., epsilon = 1e-9);
    assert_relative_eq!(frame.tangent().dot(frame.normal()), 0., epsilon = 1e-9);
    assert_relative_eq!(frame.tangent().dot(frame.binormal()), 0., epsilon = 1e-9);
}

#[test]
fn frenet_frame_matrix_maps_the_origin_to_the_position() {
    let curve = BSplineCurve::try_new(3, arch(), KnotStyle::OpenUniform).unwrap();
    let frame = curve.frenet_frame_at(0.5);
    let mapped = frame.matrix() * Point3::origin();

    assert_relative_eq!(mapped.x, frame.position().x, epsilon = 1e-9);
    assert_relative_eq!(mapped.y, frame.position().y, epsilon = 1e-9);
    assert_relative_eq!(mapped.z, frame.position().z, epsilon = 1e-9);
}

#[test]
fn empty_control_points_are_rejected() {
    assert_eq!(
        BSplineCurve::<f64>::try_new(3, vec![], KnotStyle::Uniform),
        Err(Error::EmptyControlPoints)
    );
}

#[test]
fn too_few_control_points_are_rejected() {
    let two = vec![Point3::new(0., 0., 0.), Point3::new(1., 0., 0.)];
    assert_eq!(
        BSplineCurve::try_new(3, two, KnotStyle::OpenUniform),
        Err(Error::TooFewControlPoints {
            count: 2,
            degree: 3
        })
    );
}

#[test]
fn custom_knot_vector_is_validated() {
    let mut curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::Uniform).unwrap();
    assert_eq!(
        curve.set_knot_vector(vec![0., 1., 2.]),
        Err(Error::KnotCountMismatch {
            expected: 8,
            actual: 3
        })
    );
    assert_eq!(
        curve.set_knot_vector(vec![0., 0., 0., 0., 2., 1., 3., 3.]),
        Err(Error::UnsortedKnots { index: 5 })
    );
}

#[test]
fn degree_change_takes_effect_after_knot_rebuild() {
    let mut curve = BSplineCurve::try_new(3, zigzag(), KnotStyle::Uniform).unwrap();
    curve.set_degree(2);
    assert_eq!(curve.order(), 3);

    curve.init_knot_vector().unwrap();
    assert_eq!(curve.knots().len(), 7);
    assert_eq!(curve.knots_domain(), (2., 4.));
    assert_eq!(curve.segments_count(), 2);
}
