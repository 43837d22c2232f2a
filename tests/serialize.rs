#![cfg(feature = "serde")]

use nalgebra::Point3;
use splinal::prelude::{BSplineCurve, KnotStyle};

#[test]
fn curve_serialization_round_trips() {
    let curve = BSplineCurve::try_new(
        3,
        vec![
            Point3::new(-2., 0., 0.),
            Point3::new(-2., 2., 0.),
            Point3::new(2., -2., 0.),
            Point3::new(2., 0., 0.),
        ],
        KnotStyle::OpenUniform,
    )
    .unwrap();

    let json = serde_json::to_string(&curve).unwrap();
    let restored: BSplineCurve<f64> = serde_json::from_str(&json).unwrap();

    assert_eq!(curve, restored);
    assert_eq!(curve.evaluate(), restored.evaluate());
}
