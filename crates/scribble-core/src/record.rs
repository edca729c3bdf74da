//! The external shape record format used by save and restore.
//!
//! A drawing is an ordered JSON array of records:
//!
//! ```json
//! [{"name":null,"type":3,"color":"#000000","points":[{"x":10,"y":10},{"x":50,"y":40}]}]
//! ```

use crate::error::EngineResult;
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize, Serializer};

/// A single coordinate pair in a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point {
    fn from(p: PointRecord) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Serialized form of one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub color: String,
    pub points: Vec<PointRecord>,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            name: shape.name().map(str::to_owned),
            kind: shape.kind(),
            color: shape.color().to_owned(),
            points: shape.points().into_iter().map(PointRecord::from).collect(),
        }
    }
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = crate::error::EngineError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let points = record.points.into_iter().map(Point::from).collect();
        Shape::from_parts(record.kind, record.color, points, record.name)
    }
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> EngineResult<Vec<ShapeRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Stringify records as a compact JSON array.
pub fn records_to_json(records: &[ShapeRecord]) -> EngineResult<String> {
    Ok(serde_json::to_string(records)?)
}

/// Decode records into shapes, failing on the first invalid one.
///
/// Nothing is returned unless every record decodes.
pub fn decode_records(records: &[ShapeRecord]) -> EngineResult<Vec<Shape>> {
    records.iter().cloned().map(Shape::try_from).collect()
}

/// Largest magnitude below which every integer is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write integral coordinates as JSON integers so `{"x":10}` stays `{"x":10}`.
fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    const FREEHAND: &str =
        r##"[{"name":null,"type":1,"color":"red","points":[{"x":0,"y":0},{"x":1,"y":1}]}]"##;

    #[test]
    fn test_record_text_round_trip() {
        let records = parse_records(FREEHAND).unwrap();
        let shapes = decode_records(&records).unwrap();
        let saved: Vec<ShapeRecord> = shapes.iter().map(ShapeRecord::from).collect();
        assert_eq!(records_to_json(&saved).unwrap(), FREEHAND);
    }

    #[test]
    fn test_fractional_coordinates_survive() {
        let json = r##"[{"name":"A","type":2,"color":"#000000","points":[{"x":0.5,"y":-2.25},{"x":3,"y":4}]}]"##;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].kind, ShapeKind::Arrow);
        assert_eq!(records[0].name.as_deref(), Some("A"));
        assert_eq!(records_to_json(&records).unwrap(), json);
    }

    #[test]
    fn test_unknown_type_is_a_parse_error() {
        let json = r##"[{"name":null,"type":7,"color":"red","points":[{"x":0,"y":0}]}]"##;
        assert!(matches!(parse_records(json), Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(parse_records("[{"), Err(EngineError::Parse(_))));
        assert!(matches!(parse_records(r#"{"type":1}"#), Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_point_count() {
        let json = r##"[
            {"name":null,"type":3,"color":"red","points":[{"x":0,"y":0},{"x":5,"y":5}]},
            {"name":null,"type":3,"color":"red","points":[{"x":0,"y":0}]}
        ]"##;
        let records = parse_records(json).unwrap();
        assert!(matches!(
            decode_records(&records),
            Err(EngineError::InvalidPointCount { kind: ShapeKind::Rectangle, actual: 1 })
        ));
    }

    #[test]
    fn test_record_from_named_rectangle() {
        let mut shape = Shape::begin(ShapeKind::Rectangle, "green", Point::new(1.0, 2.0));
        shape.extend_to(Point::new(3.0, 4.0));
        shape.set_name(Some("Test".into()));
        let record = ShapeRecord::from(&shape);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r##"{"name":"Test","type":3,"color":"green","points":[{"x":1,"y":2},{"x":3,"y":4}]}"##
        );
    }
}
