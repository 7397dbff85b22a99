use super::*;

#[derive(serde::Serialize)]
struct Sample {
    #[serde(serialize_with = "whole_f64")]
    v: f64,
    #[serde(serialize_with = "whole_point")]
    p: Point,
}

fn json(v: f64, p: Point) -> String {
    serde_json::to_string(&Sample { v, p }).unwrap()
}

#[test]
fn whole_values_are_written_as_integers() {
    assert_eq!(
        json(100.0, Point::new(-3.0, 0.0)),
        r#"{"v":100,"p":{"x":-3,"y":0}}"#
    );
}

#[test]
fn fractional_and_huge_values_stay_floats() {
    assert_eq!(
        json(2.5, Point::new(0.25, 1.0)),
        r#"{"v":2.5,"p":{"x":0.25,"y":1}}"#
    );

    let huge: serde_json::Value = serde_json::from_str(&json(1e20, Point::ORIGIN)).unwrap();
    assert!(huge["v"].is_f64());
    assert_eq!(huge["v"].as_f64(), Some(1e20));
}
