use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use crate::{
    error::Result,
    types::{DetectedShape, DetectionResult},
};

fn number(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

/// Closed ring around the shape's bounding box, in pixel coordinates.
fn bounding_ring(shape: &DetectedShape) -> Vec<Vec<f64>> {
    let b = shape.bounding_box;
    let (x0, y0) = (b.x as f64, b.y as f64);
    let (x1, y1) = (x0 + b.width as f64, y0 + b.height as f64);
    vec![
        vec![x0, y0],
        vec![x1, y0],
        vec![x1, y1],
        vec![x0, y1],
        vec![x0, y0],
    ]
}

impl DetectionResult {
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::with_capacity(self.shapes.len());

        for (i, shape) in self.shapes.iter().enumerate() {
            let geometry = Geometry::new(Value::Polygon(vec![bounding_ring(shape)]));

            let mut properties = JsonObject::new();
            properties.insert("type".to_string(), JsonValue::String(shape.kind.to_string()));
            properties.insert("confidence".to_string(), number(shape.confidence));
            properties.insert("area".to_string(), JsonValue::Number(shape.area.into()));
            properties.insert("center_x".to_string(), number(shape.center.x));
            properties.insert("center_y".to_string(), number(shape.center.y));

            features.push(Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(geojson::feature::Id::Number(serde_json::Number::from(i))),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("image_width".to_string(), JsonValue::Number(self.image_width.into()));
        foreign_members.insert("image_height".to_string(), JsonValue::Number(self.image_height.into()));
        foreign_members.insert("shape_count".to_string(), JsonValue::Number(self.shapes.len().into()));
        foreign_members.insert("processing_time_ms".to_string(), number(self.processing_time_ms));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingBox, ShapeKind};
    use geo_types::Coord;

    fn sample_result() -> DetectionResult {
        DetectionResult {
            shapes: vec![DetectedShape {
                kind: ShapeKind::Pentagon,
                confidence: 0.8,
                bounding_box: BoundingBox { x: 10, y: 20, width: 30, height: 40 },
                center: Coord { x: 25.0, y: 40.0 },
                area: 800,
            }],
            processing_time_ms: 1.5,
            image_width: 100,
            image_height: 80,
        }
    }

    #[test]
    fn test_geojson_export() {
        let collection = sample_result().to_geojson().expect("Should create GeoJSON");
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(feature.property("type"), Some(&JsonValue::from("pentagon")));
        assert_eq!(feature.property("area"), Some(&JsonValue::from(800)));

        let Some(Geometry { value: Value::Polygon(rings), .. }) = &feature.geometry else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][2], vec![40.0, 60.0]);
        assert_eq!(rings[0].first(), rings[0].last());

        let members = collection.foreign_members.expect("metadata");
        assert_eq!(members["shape_count"], 1);
        assert_eq!(members["image_width"], 100);
    }

    #[test]
    fn test_geojson_string_parses_back() {
        let text = sample_result().to_geojson_string().unwrap();
        let parsed: FeatureCollection = text.parse().expect("valid GeoJSON");
        assert_eq!(parsed.features.len(), 1);
    }
}
