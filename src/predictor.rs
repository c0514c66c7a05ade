// weight of retained history in the smoothed ascent rate
const ASCENT_RATE_MEMORY: f64 = 0.7;

pub struct PredictorConfiguration {
    pub landing_altitude: f64,
    pub payload_weight: f64,
    pub default_cda: f64,
    pub slot_size: f64,
    pub ceiling_altitude: f64,
    pub poll_period: u32,
    pub minimum_satellites: u8,
}

impl Default for PredictorConfiguration {
    fn default() -> Self {
        Self {
            landing_altitude: 0.0,
            payload_weight: 1.0,
            default_cda: 17.5,
            slot_size: 100.0,
            ceiling_altitude: 60000.0,
            poll_period: 5,
            minimum_satellites: 4,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LandingPrediction {
    pub location: geo::Point,
    pub seconds_to_landing: f64,
}

impl LandingPrediction {
    pub fn time_to_landing(&self) -> chrono::Duration {
        chrono::Duration::milliseconds((self.seconds_to_landing * 1000.0) as i64)
    }
}

// what one admitted fix produced; rejected fixes produce nothing
pub struct Tick {
    pub mode: crate::flight_mode::FlightMode,
    pub transition: Option<crate::flight_mode::FlightMode>,
    pub ascent_rate: f64,
    pub prediction: Option<LandingPrediction>,
}

pub struct Predictor {
    configuration: PredictorConfiguration,
    gate: crate::telemetry::TelemetryGate,
    mode: crate::flight_mode::FlightMode,
    previous_fix: Option<crate::telemetry::GpsFix>,
    ascent_rate: f64,
    minimum_altitude: f64,
    maximum_altitude: f64,
    drag: crate::model::DragEstimator,
    drift: crate::drift::WindDriftProfile,
}

impl Predictor {
    pub fn new(configuration: PredictorConfiguration) -> Self {
        Self {
            gate: crate::telemetry::TelemetryGate::new(
                configuration.minimum_satellites,
                configuration.poll_period,
            ),
            mode: crate::flight_mode::FlightMode::Idle,
            previous_fix: None,
            ascent_rate: 0.0,
            minimum_altitude: 0.0,
            maximum_altitude: 0.0,
            drag: crate::model::DragEstimator::new(
                configuration.payload_weight,
                configuration.default_cda,
            ),
            drift: crate::drift::WindDriftProfile::new(
                configuration.slot_size,
                configuration.ceiling_altitude,
            ),
            configuration,
        }
    }

    pub fn mode(&self) -> crate::flight_mode::FlightMode {
        self.mode
    }

    pub fn ascent_rate(&self) -> f64 {
        self.ascent_rate
    }

    pub fn cda(&self) -> f64 {
        self.drag.cda()
    }

    pub fn add_fix(
        &mut self,
        fix: &crate::telemetry::GpsFix,
    ) -> Result<Option<Tick>, PredictionError> {
        if !self.gate.admit(fix) {
            return Ok(None);
        }

        // the first admitted fix has no predecessor; smooth against the ground
        let previous_altitude = match &self.previous_fix {
            Some(previous) => previous.altitude,
            None => 0.0,
        };

        if fix.altitude <= 0.0 {
            self.ascent_rate = 0.0;
        } else {
            self.ascent_rate = self.ascent_rate * ASCENT_RATE_MEMORY
                + (fix.altitude - previous_altitude) * (1.0 - ASCENT_RATE_MEMORY);
        }

        if fix.altitude < self.minimum_altitude || self.minimum_altitude == 0.0 {
            self.minimum_altitude = fix.altitude;
        }
        if fix.altitude > self.maximum_altitude {
            self.maximum_altitude = fix.altitude;
        }

        let advanced = self.mode.advance(&crate::flight_mode::FlightSample {
            ascent_rate: self.ascent_rate,
            altitude: fix.altitude,
            minimum_altitude: self.minimum_altitude,
            maximum_altitude: self.maximum_altitude,
            landing_altitude: self.configuration.landing_altitude,
        });
        let transition = if advanced != self.mode {
            self.mode = advanced;
            Some(advanced)
        } else {
            None
        };

        let poll_period = self.configuration.poll_period as f64;
        if let Some(previous) = &self.previous_fix {
            let mid_altitude = (fix.altitude + previous.altitude) / 2.0;
            match self.mode {
                crate::flight_mode::FlightMode::Launched => {
                    // going up; learn the horizontal drift of this altitude band
                    self.drift.record(
                        mid_altitude,
                        crate::drift::DriftVelocity {
                            latitude: (fix.location.y() - previous.location.y()) / poll_period,
                            longitude: (fix.location.x() - previous.location.x()) / poll_period,
                        },
                    );
                }
                crate::flight_mode::FlightMode::Descending => {
                    // coming down; learn how well the chute is doing
                    self.drag.update(
                        mid_altitude,
                        (previous.altitude - fix.altitude) / poll_period,
                    );
                }
                _ => {}
            }
        }

        self.previous_fix = Some(fix.clone());

        let prediction = match self.mode {
            crate::flight_mode::FlightMode::Launched
            | crate::flight_mode::FlightMode::Descending => {
                Some(self.predict_landing(fix.location, fix.altitude)?)
            }
            _ => None,
        };

        Ok(Some(Tick {
            mode: self.mode,
            transition,
            ascent_rate: self.ascent_rate,
            prediction,
        }))
    }

    // walk the remaining altitude down to the landing altitude, one drift band
    // at a time, at the terminal velocity for the current CDA estimate
    pub fn predict_landing(
        &self,
        location: geo::Point,
        altitude: f64,
    ) -> Result<LandingPrediction, PredictionError> {
        let mut latitude = location.y();
        let mut longitude = location.x();
        let mut altitude = altitude;
        let mut seconds_to_landing = 0.0;

        let landing_altitude = self.configuration.landing_altitude;
        let slot_size = self.drift.slot_size();
        let landing_slot = self.drift.slot(landing_altitude);

        // the first band is entered partway through
        let mut distance_in_slot = altitude - self.drift.slot(altitude) as f64 * slot_size;
        while altitude > landing_altitude {
            let slot = self.drift.slot(altitude);
            if slot == landing_slot {
                distance_in_slot = altitude - landing_altitude;
            }

            let descent_rate = crate::model::terminal_descent_rate(
                self.drag.weight(),
                self.drag.cda(),
                altitude,
            );
            if !(descent_rate.is_finite() && descent_rate > 0.0) {
                return Err(PredictionError::NonPhysicalDescentRate {
                    altitude,
                    descent_rate,
                });
            }

            let time_in_slot = distance_in_slot / descent_rate;
            let drift = self.drift.velocity(slot);
            latitude += drift.latitude * time_in_slot;
            longitude += drift.longitude * time_in_slot;

            seconds_to_landing += time_in_slot;
            altitude -= distance_in_slot;
            distance_in_slot = slot_size;
        }

        Ok(LandingPrediction {
            location: geo::point!(x: longitude, y: latitude),
            seconds_to_landing,
        })
    }
}

custom_error::custom_error! {pub PredictionError
    NonPhysicalDescentRate {altitude: f64, descent_rate: f64} = "non-physical descent rate {descent_rate} m/s at {altitude} m; check CDA and payload weight",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_mode::FlightMode;

    fn fix(
        start: chrono::DateTime<chrono::Local>,
        seconds: i64,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        satellites: u8,
    ) -> crate::telemetry::GpsFix {
        crate::telemetry::GpsFix {
            time: start + chrono::Duration::seconds(seconds),
            location: geo::point!(x: longitude, y: latitude),
            altitude,
            satellites,
            fix_type: crate::telemetry::FixType::ThreeDimensional,
        }
    }

    #[test]
    fn test_straight_down_landing() {
        let predictor = Predictor::new(PredictorConfiguration {
            landing_altitude: 609.6,
            ..Default::default()
        });

        let prediction = predictor
            .predict_landing(geo::point!(x: -117.15, y: 35.04), 30490.0)
            .unwrap();

        // with no recorded drift the payload falls straight down
        assert!(crate::utilities::approx_equal(
            prediction.location.y(),
            35.04,
            8
        ));
        assert!(crate::utilities::approx_equal(
            prediction.location.x(),
            -117.15,
            8
        ));
        assert!(prediction.seconds_to_landing > 0.0);
        assert!(prediction.seconds_to_landing.is_finite());
        assert!(prediction.time_to_landing() > chrono::Duration::zero());
    }

    #[test]
    fn test_prediction_at_landing_altitude() {
        let predictor = Predictor::new(PredictorConfiguration {
            landing_altitude: 609.6,
            ..Default::default()
        });

        let prediction = predictor
            .predict_landing(geo::point!(x: -117.15, y: 35.04), 609.6)
            .unwrap();

        assert_eq!(prediction.seconds_to_landing, 0.0);
        assert!(crate::utilities::approx_equal(
            prediction.location.y(),
            35.04,
            8
        ));
    }

    #[test]
    fn test_prediction_below_landing_altitude() {
        let predictor = Predictor::new(PredictorConfiguration {
            landing_altitude: 609.6,
            ..Default::default()
        });

        let prediction = predictor
            .predict_landing(geo::point!(x: -117.15, y: 35.04), 300.0)
            .unwrap();

        assert_eq!(prediction.seconds_to_landing, 0.0);
    }

    #[test]
    fn test_zero_cda_is_an_error() {
        let predictor = Predictor::new(PredictorConfiguration {
            default_cda: 0.0,
            ..Default::default()
        });

        match predictor.predict_landing(geo::point!(x: -117.15, y: 35.04), 5000.0) {
            Err(PredictionError::NonPhysicalDescentRate { .. }) => {}
            Ok(_) => panic!("zero CDA must not produce a prediction"),
        }
    }

    #[test]
    fn test_rejected_fixes_do_not_mutate() {
        let mut predictor = Predictor::new(PredictorConfiguration::default());
        let start = chrono::Local::now();

        for index in 0..10 {
            let outcome = predictor
                .add_fix(&fix(start, index, 39.0, -76.5, 1000.0 + index as f64 * 100.0, 3))
                .unwrap();
            assert!(outcome.is_none());
        }

        assert_eq!(predictor.mode(), FlightMode::Idle);
        assert_eq!(predictor.ascent_rate(), 0.0);
        assert_eq!(predictor.minimum_altitude, 0.0);
        assert_eq!(predictor.maximum_altitude, 0.0);
        assert!(predictor.previous_fix.is_none());
    }

    #[test]
    fn test_full_flight() {
        let mut predictor = Predictor::new(PredictorConfiguration {
            landing_altitude: 0.0,
            payload_weight: 1.0,
            default_cda: 17.5,
            slot_size: 100.0,
            ceiling_altitude: 40000.0,
            poll_period: 1,
            minimum_satellites: 4,
        });

        let start = chrono::Local::now();
        let mut transitions = vec![];
        let mut seconds = 0;
        let mut latitude = 39.0242;
        let mut descending_prediction: Option<LandingPrediction> = None;
        let mut descending_latitude = 0.0;

        // ascent: 100 m and 0.001 degrees of latitude per tick
        for index in 0..60 {
            let altitude = 100.0 + index as f64 * 100.0;
            let tick = predictor
                .add_fix(&fix(start, seconds, latitude, -76.5471, altitude, 8))
                .unwrap()
                .expect("admitted fix must produce a tick");
            if let Some(transition) = tick.transition {
                transitions.push(transition);
            }
            if tick.mode == FlightMode::Launched {
                assert!(tick.prediction.is_some());
            }
            latitude += 0.001;
            seconds += 1;
        }
        assert_eq!(predictor.mode(), FlightMode::Launched);

        // descent at 120 m per tick
        let mut altitude: f64 = 6000.0;
        while altitude > 120.0 {
            altitude = (altitude - 120.0).max(120.0);
            let tick = predictor
                .add_fix(&fix(start, seconds, latitude, -76.5471, altitude, 8))
                .unwrap()
                .expect("admitted fix must produce a tick");
            if let Some(transition) = tick.transition {
                transitions.push(transition);
            }
            if tick.mode == FlightMode::Descending && altitude > 3000.0 {
                descending_prediction = tick.prediction.clone();
                descending_latitude = latitude;
            }
            seconds += 1;
        }
        assert_eq!(predictor.mode(), FlightMode::Descending);

        // the drift learned on the way up pushes the prediction north of here
        let prediction = descending_prediction.expect("descending ticks must carry predictions");
        assert!(prediction.seconds_to_landing > 0.0);
        assert!(prediction.location.y() > descending_latitude);

        // on the ground: altitude holds and the smoothed rate decays to rest
        for _ in 0..30 {
            let tick = predictor
                .add_fix(&fix(start, seconds, latitude, -76.5471, 120.0, 8))
                .unwrap()
                .expect("admitted fix must produce a tick");
            if let Some(transition) = tick.transition {
                transitions.push(transition);
            }
            seconds += 1;
        }
        assert_eq!(predictor.mode(), FlightMode::Landed);

        let tick = predictor
            .add_fix(&fix(start, seconds, latitude, -76.5471, 120.0, 8))
            .unwrap()
            .expect("admitted fix must produce a tick");
        assert!(tick.prediction.is_none());
        assert_eq!(tick.mode, FlightMode::Landed);

        assert_eq!(
            transitions,
            vec![
                FlightMode::Launched,
                FlightMode::Descending,
                FlightMode::Landed
            ]
        );
    }
}
