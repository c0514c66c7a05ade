pub mod file;
pub mod sentence;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FixType {
    #[default]
    NoFix,
    TwoDimensional,
    ThreeDimensional,
}

impl FixType {
    pub fn from_code(code: u8) -> FixType {
        match code {
            2 => FixType::TwoDimensional,
            3 => FixType::ThreeDimensional,
            _ => FixType::NoFix,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GpsFix {
    pub time: chrono::DateTime<chrono::Local>,
    pub location: geo::Point,
    pub altitude: f64,
    pub satellites: u8,
    pub fix_type: FixType,
}

impl PartialEq for GpsFix {
    fn eq(&self, other: &Self) -> bool {
        self.time.eq(&other.time)
            && crate::utilities::approx_equal(self.location.x(), other.location.x(), 4)
            && crate::utilities::approx_equal(self.location.y(), other.location.y(), 4)
            && crate::utilities::approx_equal(self.altitude, other.altitude, 4)
    }
}

impl Eq for GpsFix {}

// admits a fix only when enough satellites are visible and the poll period has elapsed
pub struct TelemetryGate {
    minimum_satellites: u8,
    poll_period: u32,
    counter: u32,
}

impl TelemetryGate {
    pub fn new(minimum_satellites: u8, poll_period: u32) -> Self {
        Self {
            minimum_satellites,
            poll_period,
            counter: 0,
        }
    }

    pub fn admit(&mut self, fix: &GpsFix) -> bool {
        if fix.satellites < self.minimum_satellites {
            return false;
        }

        self.counter += 1;
        if self.counter >= self.poll_period {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}
