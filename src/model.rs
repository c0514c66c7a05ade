pub const GRAVITY: f64 = 9.81;

// weight of retained history in the CDA blend; each update keeps 4 parts old, 1 part new
const CDA_MEMORY: f64 = 4.0;

// terminal-velocity approximation at the given altitude, in m/s
pub fn terminal_descent_rate(weight: f64, cda: f64, altitude: f64) -> f64 {
    (weight * GRAVITY / (0.5 * crate::atmosphere::air_density(altitude) * cda)).sqrt()
}

// CDA implied by an observed descent rate; meaningless unless actually falling
pub fn instantaneous_cda(weight: f64, altitude: f64, descent_rate: f64) -> Option<f64> {
    if descent_rate > 0.0 {
        let density = crate::atmosphere::air_density(altitude);
        Some(weight * GRAVITY / (0.5 * density * descent_rate * descent_rate))
    } else {
        None
    }
}

pub struct DragEstimator {
    weight: f64,
    cda: f64,
}

impl DragEstimator {
    pub fn new(weight: f64, default_cda: f64) -> Self {
        Self {
            weight,
            cda: default_cda,
        }
    }

    pub fn cda(&self) -> f64 {
        self.cda
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn update(&mut self, altitude: f64, descent_rate: f64) {
        if let Some(instantaneous) = instantaneous_cda(self.weight, altitude, descent_rate) {
            self.cda = (self.cda * CDA_MEMORY + instantaneous) / (CDA_MEMORY + 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descent_rate_matches_drag_balance() {
        let rate = terminal_descent_rate(1.0, 17.5, 0.0);
        let expected = (GRAVITY / (0.5 * crate::atmosphere::air_density(0.0) * 17.5)).sqrt();

        assert!(crate::utilities::approx_equal(rate, expected, 9));
        assert!(rate > 0.0 && rate.is_finite());
    }

    #[test]
    fn test_descent_rate_increases_with_altitude() {
        // thinner air, faster fall
        assert!(terminal_descent_rate(1.0, 17.5, 30000.0) > terminal_descent_rate(1.0, 17.5, 0.0));
    }

    #[test]
    fn test_instantaneous_cda_roundtrip() {
        let rate = terminal_descent_rate(1.0, 17.5, 5000.0);
        let cda = instantaneous_cda(1.0, 5000.0, rate).unwrap();

        assert!(crate::utilities::approx_equal(cda, 17.5, 6));
    }

    #[test]
    fn test_instantaneous_cda_rejects_nonfalling() {
        assert!(instantaneous_cda(1.0, 5000.0, 0.0).is_none());
        assert!(instantaneous_cda(1.0, 5000.0, -3.0).is_none());
    }

    #[test]
    fn test_estimator_blends_toward_observation() {
        let mut estimator = DragEstimator::new(1.0, 17.5);
        let rate = terminal_descent_rate(1.0, 10.0, 2000.0);

        estimator.update(2000.0, rate);
        let blended = (17.5 * 4.0 + 10.0) / 5.0;
        assert!(crate::utilities::approx_equal(estimator.cda(), blended, 6));

        // a stalled or climbing observation leaves the estimate alone
        estimator.update(2000.0, -1.0);
        assert!(crate::utilities::approx_equal(estimator.cda(), blended, 6));
    }
}
