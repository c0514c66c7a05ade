use std::io::prelude::BufRead;

#[derive(serde::Deserialize, Debug, PartialEq, Clone)]
pub struct FixLog {
    pub path: String,
}

impl FixLog {
    pub fn new(path: String) -> Result<Self, TelemetryError> {
        if std::path::Path::new(&path).exists() {
            Ok(Self { path })
        } else {
            Err(TelemetryError::FailedToEstablish {
                connection: path,
                message: "path does not exist".to_string(),
            })
        }
    }
}

fn read_lines(path: &String) -> Result<Vec<String>, TelemetryError> {
    let mut lines: Vec<String> = vec![];
    match std::fs::File::open(path) {
        Ok(file) => {
            let reader = std::io::BufReader::new(file);
            for line in reader.lines() {
                match line {
                    Ok(line) => lines.push(line),
                    Err(error) => {
                        return Err(TelemetryError::ReadFailure {
                            connection: path.to_owned(),
                            message: error.to_string(),
                        });
                    }
                }
            }
        }
        Err(error) => {
            return Err(TelemetryError::FailedToEstablish {
                connection: path.to_owned(),
                message: error.to_string(),
            });
        }
    }

    Ok(lines)
}

impl FixLog {
    // lines are telemetry sentences, optionally prefixed with an RFC 3339
    // receipt time (`2023-07-31T10:00:02-04:00: $$CALLSIGN,...`); lines that
    // parse as neither are skipped
    pub fn read_fixes(&self) -> Result<Vec<crate::telemetry::GpsFix>, TelemetryError> {
        let lines = read_lines(&self.path)?;

        let mut fixes: Vec<crate::telemetry::GpsFix> = vec![];
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }

            let fix = if line.contains(": ") {
                let mut parts = vec![];
                parts.extend(line.splitn(2, ": "));
                match chrono::DateTime::parse_from_rfc3339(parts[0]) {
                    Ok(time) => match crate::telemetry::GpsFix::from_sentence(
                        parts[1],
                        Some(time.with_timezone(&chrono::Local)),
                    ) {
                        Ok(fix) => fix,
                        Err(_) => continue,
                    },
                    Err(_) => match crate::telemetry::GpsFix::from_sentence(&line, None) {
                        Ok(fix) => fix,
                        Err(_) => continue,
                    },
                }
            } else {
                match crate::telemetry::GpsFix::from_sentence(&line, None) {
                    Ok(fix) => fix,
                    Err(_) => continue,
                }
            };

            // repeated downlinks of the same fix carry no new information
            if let Some(previous) = fixes.last() {
                if fix.eq(previous) {
                    continue;
                }
            }
            fixes.push(fix);
        }

        Ok(fixes)
    }
}

pub fn fixes_geojson_featurecollection(
    fixes: Vec<&crate::telemetry::GpsFix>,
    prediction: Option<&crate::predictor::LandingPrediction>,
) -> geojson::GeoJson {
    let mut features = vec![];

    for fix in fixes {
        let mut properties = serde_json::Map::new();
        properties.insert(
            "time".to_string(),
            serde_json::Value::String(fix.time.to_rfc3339()),
        );
        properties.insert("satellites".to_string(), serde_json::json!(fix.satellites));

        features.push(geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                fix.location.x(),
                fix.location.y(),
                fix.altitude,
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    if let Some(prediction) = prediction {
        let mut properties = serde_json::Map::new();
        properties.insert(
            "predicted_landing".to_string(),
            serde_json::Value::Bool(true),
        );
        properties.insert(
            "seconds_to_landing".to_string(),
            serde_json::json!(prediction.seconds_to_landing),
        );

        features.push(geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
                prediction.location.x(),
                prediction.location.y(),
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    geojson::GeoJson::FeatureCollection(geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

custom_error::custom_error! {pub TelemetryError
    FailedToEstablish {connection: String, message: String} = "failed to open {connection}; {message}",
    ReadFailure {connection: String, message: String} = "error reading from {connection}; {message}",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixes_from_file() {
        let path = format!(
            "{:}/{:}",
            env!("CARGO_MANIFEST_DIR"),
            "data/flights/short_flight.txt"
        );

        let log = FixLog::new(path).unwrap();
        let fixes = log.read_fixes().unwrap();

        assert!(!fixes.is_empty());
        // garbage lines and the repeated downlink are skipped
        assert_eq!(fixes.len(), 12);
        assert!(fixes.windows(2).all(|pair| pair[0].time <= pair[1].time));
    }

    #[test]
    fn test_missing_file() {
        assert!(FixLog::new("data/flights/nonexistent.txt".to_string()).is_err());
    }

    #[test]
    fn test_geojson_output() {
        let fix = crate::telemetry::GpsFix::from_sentence(
            "$$LANDFALL,1,10:00:00,39.0242,-76.5471,150,8,3",
            None,
        )
        .unwrap();
        let prediction = crate::predictor::LandingPrediction {
            location: geo::point!(x: -76.51, y: 39.01),
            seconds_to_landing: 1200.0,
        };

        let feature_collection = fixes_geojson_featurecollection(vec![&fix], Some(&prediction));

        let encoded = feature_collection.to_string();
        assert!(encoded.contains("FeatureCollection"));
        assert!(encoded.contains("seconds_to_landing"));
    }
}
