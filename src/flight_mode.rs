// smoothed ascent rate (m per admitted tick) at which a launch is declared
const LAUNCH_ASCENT_RATE: f64 = 1.0;
// altitude gain over the observed minimum required before declaring a launch
const LAUNCH_ALTITUDE_GAIN: f64 = 150.0;
// smoothed ascent rate at or below which a burst is declared
const BURST_ASCENT_RATE: f64 = -10.0;
// the flight must have climbed this far above its minimum for a burst to be believable
const BURST_ALTITUDE_GAIN: f64 = 2000.0;
// smoothed ascent rate at or above which a descending payload is considered down
const LANDED_ASCENT_RATE: f64 = -0.1;
// landing is only declared within this altitude margin of the expected landing site
const LANDED_ALTITUDE_MARGIN: f64 = 2000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightMode {
    Idle,
    Launched,
    Descending,
    Landed,
}

pub struct FlightSample {
    pub ascent_rate: f64,
    pub altitude: f64,
    pub minimum_altitude: f64,
    pub maximum_altitude: f64,
    pub landing_altitude: f64,
}

impl FlightMode {
    // transitions are strictly forward; `Landed` is absorbing
    pub fn advance(self, sample: &FlightSample) -> FlightMode {
        match self {
            FlightMode::Idle => {
                if sample.ascent_rate >= LAUNCH_ASCENT_RATE
                    && sample.altitude > sample.minimum_altitude + LAUNCH_ALTITUDE_GAIN
                {
                    FlightMode::Launched
                } else {
                    self
                }
            }
            FlightMode::Launched => {
                if sample.ascent_rate <= BURST_ASCENT_RATE
                    && sample.maximum_altitude >= sample.minimum_altitude + BURST_ALTITUDE_GAIN
                {
                    FlightMode::Descending
                } else {
                    self
                }
            }
            FlightMode::Descending => {
                if sample.ascent_rate >= LANDED_ASCENT_RATE
                    && sample.altitude <= sample.landing_altitude + LANDED_ALTITUDE_MARGIN
                {
                    FlightMode::Landed
                } else {
                    self
                }
            }
            FlightMode::Landed => self,
        }
    }
}

impl std::fmt::Display for FlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:}",
            match self {
                FlightMode::Idle => "IDLE",
                FlightMode::Launched => "LAUNCHED",
                FlightMode::Descending => "DESCENDING",
                FlightMode::Landed => "LANDED",
            }
        )
    }
}
