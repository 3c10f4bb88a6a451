use std::fmt;

/// Minutes and seconds per kilometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub minutes: u32,
    pub seconds: u32,
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} min/km", self.minutes, self.seconds)
    }
}

/// Average pace for a finished effort. `None` when the distance or the
/// time is non-positive.
pub fn pace_per_km(distance_km: f64, total_seconds: u32) -> Option<Pace> {
    if distance_km <= 0.0 || total_seconds == 0 {
        return None;
    }

    let pace_seconds = f64::from(total_seconds) / distance_km;
    let mut minutes = (pace_seconds / 60.0).floor() as u32;
    let mut seconds = (pace_seconds % 60.0).round() as u32;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    Some(Pace { minutes, seconds })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_minute_ten_k_is_five_flat() {
        let pace = pace_per_km(10.0, 50 * 60).unwrap();
        assert_eq!(pace, Pace { minutes: 5, seconds: 0 });
        assert_eq!(pace.to_string(), "5:00 min/km");
    }

    #[test]
    fn seconds_are_rounded_and_carried() {
        // 10 km in 49:55 -> 299.5 s/km -> rounds to 5:00, not 4:60.
        let pace = pace_per_km(10.0, 49 * 60 + 55).unwrap();
        assert_eq!(pace, Pace { minutes: 5, seconds: 0 });
    }

    #[test]
    fn non_positive_inputs_yield_none() {
        assert!(pace_per_km(0.0, 3000).is_none());
        assert!(pace_per_km(-5.0, 3000).is_none());
        assert!(pace_per_km(10.0, 0).is_none());
    }
}
