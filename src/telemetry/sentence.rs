use chrono::TimeZone;

// flextrak-style telemetry sentence:
// $$CALLSIGN,sequence,HH:MM:SS,latitude,longitude,altitude,satellites,fix_type[*checksum]
impl crate::telemetry::GpsFix {
    pub fn from_sentence(
        sentence: &str,
        time: Option<chrono::DateTime<chrono::Local>>,
    ) -> Result<Self, ParseError> {
        lazy_static::lazy_static! {
            static ref PATTERN: regex::Regex = regex::Regex::new(
                r"^\$\$?(?P<callsign>[A-Za-z0-9-]+),(?P<sequence>\d+),(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2}),(?P<latitude>-?\d+\.?\d*),(?P<longitude>-?\d+\.?\d*),(?P<altitude>-?\d+\.?\d*),(?P<satellites>\d+),(?P<fix_type>\d+)(\*[0-9A-Fa-f]{2,4})?$"
            )
            .unwrap();
        }

        let captures = match PATTERN.captures(sentence.trim()) {
            Some(captures) => captures,
            None => {
                return Err(ParseError::InvalidSentence {
                    sentence: sentence.to_string(),
                });
            }
        };

        let time = match time {
            Some(time) => time,
            None => {
                // sentences carry a time of day only; assume the current date
                let today = chrono::Local::now().date_naive();
                let time_of_day = today
                    .and_hms_opt(
                        captures["hour"].parse::<u32>().unwrap(),
                        captures["minute"].parse::<u32>().unwrap(),
                        captures["second"].parse::<u32>().unwrap(),
                    )
                    .ok_or(ParseError::InvalidTimestamp {
                        time: format!(
                            "{:}:{:}:{:}",
                            &captures["hour"], &captures["minute"], &captures["second"]
                        ),
                    })?;
                match chrono::Local.from_local_datetime(&time_of_day) {
                    chrono::LocalResult::Single(time) => time,
                    _ => {
                        return Err(ParseError::InvalidTimestamp {
                            time: time_of_day.to_string(),
                        });
                    }
                }
            }
        };

        Ok(Self {
            time,
            location: geo::point!(
                x: captures["longitude"].parse::<f64>().unwrap(),
                y: captures["latitude"].parse::<f64>().unwrap()
            ),
            altitude: captures["altitude"].parse::<f64>().unwrap(),
            satellites: captures["satellites"].parse::<u8>().unwrap(),
            fix_type: crate::telemetry::FixType::from_code(
                captures["fix_type"].parse::<u8>().unwrap(),
            ),
        })
    }
}

custom_error::custom_error! {pub ParseError
    InvalidSentence {sentence: String} = "sentence does not match the telemetry format; {sentence}",
    InvalidTimestamp {time: String} = "invalid timestamp; {time}",
}
