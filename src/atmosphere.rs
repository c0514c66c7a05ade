// piecewise NASA atmosphere approximation; temperature in Celsius, pressure in kPa
const TROPOPAUSE_ALTITUDE: f64 = 11000.0;
const UPPER_STRATOSPHERE_ALTITUDE: f64 = 25000.0;

// the layer formulas leave small discontinuities at the boundaries; that is
// inherent to the approximation
pub fn air_density(altitude: f64) -> f64 {
    // the upper-layer formulas are only accidentally defined below ground
    let altitude = altitude.max(0.0);

    let temperature: f64;
    let pressure: f64;

    if altitude < TROPOPAUSE_ALTITUDE {
        temperature = 15.04 - 0.00649 * altitude;
        pressure = 101.29 * ((temperature + 273.1) / 288.08).powf(5.256);
    } else if altitude < UPPER_STRATOSPHERE_ALTITUDE {
        temperature = -56.46;
        pressure = 22.65 * (1.73 - 0.000157 * altitude).exp();
    } else {
        temperature = -131.21 + 0.00299 * altitude;
        pressure = 2.488 * ((temperature + 273.1) / 216.6).powf(-11.388);
    }

    pressure / (0.2869 * (temperature + 273.1))
}
