use crate::error::PlusCodeError;
use geo_types::{Geometry, GeometryCollection};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a WGS84 geometry string, auto-detecting WKT or GeoJSON.
///
/// A leading `{` means GeoJSON; anything else is treated as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn geojson_geometry(geom: geojson::Geometry) -> Result<Geometry<f64>, PlusCodeError> {
    Geometry::try_from(geom).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))
}

/// Parses a GeoJSON geometry, feature or feature collection.
///
/// Feature collections become a `GeometryCollection` of their member geometries;
/// features without geometry are skipped.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| PlusCodeError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => geojson_geometry(geom),
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| PlusCodeError::GeometryParseError("Feature has no geometry".into()))
            .and_then(geojson_geometry),
        GeoJson::FeatureCollection(fc) => {
            let members = fc
                .features
                .into_iter()
                .filter_map(|f| f.geometry)
                .map(geojson_geometry)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::GeometryCollection(GeometryCollection::new_from(
                members,
            )))
        }
    }
}

/// Parses a WKT string.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, PlusCodeError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| PlusCodeError::GeometryParseError(e.to_string()))?;

    wkt.try_into()
        .map_err(|_| PlusCodeError::GeometryParseError("Unsupported WKT geometry".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_point() -> Result<(), PlusCodeError> {
        let json = r#"{"type":"Point","coordinates":[8.524997,47.36559]}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 8.524997).abs() < 1e-9);
                assert!((pt.y() - 47.36559).abs() < 1e-9);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), PlusCodeError> {
        let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[-0.1246,51.5007]}}"#;
        assert!(matches!(parse_geometry(json)?, Geometry::Point(_)));
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_collection() -> Result<(), PlusCodeError> {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1.0,2.0]}},
            {"type":"Feature","properties":{},"geometry":null},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[3.0,4.0]}}
        ]}"#;
        match parse_geometry(json)? {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0.len(), 2),
            other => panic!("Expected GeometryCollection, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature_without_geometry() {
        let json = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(PlusCodeError::GeometryParseError(_))
        ));
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), PlusCodeError> {
        let wkt = "POLYGON((8.5 47.3, 8.6 47.3, 8.6 47.4, 8.5 47.4, 8.5 47.3))";
        match parse_geometry(wkt)? {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 5),
            other => panic!("Expected Polygon, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_geometry("not a geometry").is_err());
        assert!(parse_geometry("{not json").is_err());
    }
}
