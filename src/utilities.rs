pub fn approx_equal(a: f64, b: f64, decimal_precision: u8) -> bool {
    let p = 10f64.powi(-(decimal_precision as i32));
    (a - b).abs() < p
}

pub mod optional_local_datetime_string {
    use chrono::TimeZone;
    use serde::Deserialize;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(
        date: &Option<chrono::DateTime<chrono::Local>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(ref date) = *date {
            return serializer.serialize_str(&format!("{:}", date.format(FORMAT)));
        }
        serializer.serialize_none()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<chrono::DateTime<chrono::Local>>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        if let Some(value) = value {
            return Ok(Some(
                chrono::Local
                    .datetime_from_str(&value, FORMAT)
                    .map_err(serde::de::Error::custom)?,
            ));
        }

        Ok(None)
    }
}

pub fn duration_string(duration: &chrono::Duration) -> String {
    let mut parts = vec![];

    let hours = duration.num_hours().abs();
    let minutes = duration.num_minutes().abs() % 60;
    let seconds = duration.num_seconds().abs() % 60;

    if hours > 0 {
        parts.push(format!("{:}h", hours));
    }

    if minutes > 0 {
        parts.push(format!("{:}m", minutes));
    }

    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{:}s", seconds));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_equal() {
        assert!(approx_equal(1.00001, 1.00002, 4));
        assert!(!approx_equal(1.001, 1.002, 4));
    }

    #[test]
    fn test_duration_string() {
        assert_eq!(duration_string(&chrono::Duration::seconds(0)), "0s");
        assert_eq!(duration_string(&chrono::Duration::seconds(59)), "59s");
        assert_eq!(duration_string(&chrono::Duration::seconds(3725)), "1h 2m 5s");
    }
}
