fn default_name() -> String {
    String::from("unnamed_flight")
}

#[derive(serde::Deserialize, Clone)]
pub struct RunConfiguration {
    #[serde(default = "default_name")]
    pub name: String,
    pub payload: PayloadConfiguration,
    #[serde(default)]
    pub flight: FlightConfiguration,
    #[serde(default)]
    pub telemetry: TelemetryConfiguration,
    #[serde(default)]
    pub time: TimeConfiguration,
    pub output: Option<PathConfiguration>,
}

impl RunConfiguration {
    pub fn predictor(&self) -> crate::predictor::Predictor {
        crate::predictor::Predictor::new(crate::predictor::PredictorConfiguration {
            landing_altitude: self.flight.landing_altitude,
            payload_weight: self.payload.weight,
            default_cda: self.payload.default_cda,
            slot_size: self.flight.slot_size,
            ceiling_altitude: self.flight.ceiling_altitude,
            poll_period: self.telemetry.poll_period,
            minimum_satellites: self.telemetry.minimum_satellites,
        })
    }
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PathConfiguration {
    pub filename: std::path::PathBuf,
}

fn default_cda() -> f64 {
    crate::predictor::PredictorConfiguration::default().default_cda
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct PayloadConfiguration {
    pub weight: f64,
    #[serde(default = "default_cda")]
    pub default_cda: f64,
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct FlightConfiguration {
    #[serde(default)]
    pub landing_altitude: f64,
    #[serde(default = "default_ceiling_altitude")]
    pub ceiling_altitude: f64,
    #[serde(default = "default_slot_size")]
    pub slot_size: f64,
}

fn default_ceiling_altitude() -> f64 {
    crate::predictor::PredictorConfiguration::default().ceiling_altitude
}

fn default_slot_size() -> f64 {
    crate::predictor::PredictorConfiguration::default().slot_size
}

impl Default for FlightConfiguration {
    fn default() -> Self {
        Self {
            landing_altitude: 0.0,
            ceiling_altitude: default_ceiling_altitude(),
            slot_size: default_slot_size(),
        }
    }
}

#[derive(serde::Deserialize, PartialEq, Debug, Clone)]
pub struct TelemetryConfiguration {
    #[serde(default = "default_poll_period")]
    pub poll_period: u32,
    #[serde(default = "default_minimum_satellites")]
    pub minimum_satellites: u8,
    pub replay: Option<Vec<String>>,
}

fn default_poll_period() -> u32 {
    crate::predictor::PredictorConfiguration::default().poll_period
}

fn default_minimum_satellites() -> u8 {
    crate::predictor::PredictorConfiguration::default().minimum_satellites
}

impl Default for TelemetryConfiguration {
    fn default() -> Self {
        Self {
            poll_period: default_poll_period(),
            minimum_satellites: default_minimum_satellites(),
            replay: None,
        }
    }
}

fn default_interval() -> chrono::Duration {
    *crate::DEFAULT_INTERVAL
}

#[serde_with::serde_as]
#[derive(PartialEq, Debug, serde::Deserialize, Clone)]
pub struct TimeConfiguration {
    #[serde(default)]
    #[serde(with = "crate::utilities::optional_local_datetime_string")]
    pub start: Option<chrono::DateTime<chrono::Local>>,
    #[serde(default)]
    #[serde(with = "crate::utilities::optional_local_datetime_string")]
    pub end: Option<chrono::DateTime<chrono::Local>>,
    #[serde(default = "default_interval")]
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub interval: chrono::Duration,
}

impl Default for TimeConfiguration {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            interval: default_interval(),
        }
    }
}
