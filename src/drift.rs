// horizontal motion attributable to one altitude band, in degrees per second
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct DriftVelocity {
    pub latitude: f64,
    pub longitude: f64,
}

pub struct WindDriftProfile {
    slot_size: f64,
    slots: Vec<DriftVelocity>,
}

impl WindDriftProfile {
    pub fn new(slot_size: f64, ceiling_altitude: f64) -> Self {
        let slot_count = (ceiling_altitude / slot_size).ceil() as usize;
        Self {
            slot_size,
            slots: vec![DriftVelocity::default(); slot_count],
        }
    }

    pub fn slot_size(&self) -> f64 {
        self.slot_size
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, altitude: f64) -> usize {
        let slot = (altitude / self.slot_size).floor();
        if slot < 0.0 {
            0
        } else if slot as usize >= self.slots.len() {
            self.slots.len() - 1
        } else {
            slot as usize
        }
    }

    // a later observation for the same band replaces the earlier one
    pub fn record(&mut self, altitude: f64, drift: DriftVelocity) {
        let slot = self.slot(altitude);
        self.slots[slot] = drift;
    }

    pub fn velocity(&self, slot: usize) -> DriftVelocity {
        self.slots[slot]
    }
}
