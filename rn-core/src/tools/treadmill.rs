use super::pace::Pace;

/// Treadmill speed to road pace. `None` for non-positive speeds.
pub fn kmh_to_pace(kmh: f64) -> Option<Pace> {
    if kmh <= 0.0 {
        return None;
    }
    let total_minutes = 60.0 / kmh;
    let mut minutes = total_minutes.floor() as u32;
    let mut seconds = ((total_minutes - total_minutes.floor()) * 60.0).round() as u32;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    Some(Pace { minutes, seconds })
}

/// Road pace back to treadmill speed in km/h.
pub fn pace_to_kmh(minutes: u32, seconds: u32) -> Option<f64> {
    let total_minutes = f64::from(minutes) + f64::from(seconds) / 60.0;
    if total_minutes <= 0.0 {
        return None;
    }
    Some(60.0 / total_minutes)
}

/// Flat-ground equivalent speed for an inclined treadmill run, using the
/// site's 2%-per-incline-percent adjustment.
pub fn incline_adjusted_speed(kmh: f64, incline_percent: f64) -> f64 {
    kmh * (1.0 + incline_percent * 0.02)
}
