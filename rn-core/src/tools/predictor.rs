/// Exponent of the Riegel endurance model, as used on the site.
const RIEGEL_EXPONENT: f64 = 1.06;

/// Predicted finish time in seconds for `target_distance_km`, given a
/// known result. Riegel: t2 = t1 * (d2 / d1) ^ 1.06. `None` when any
/// input is non-positive.
pub fn predict_time(
    known_distance_km: f64,
    known_seconds: f64,
    target_distance_km: f64,
) -> Option<f64> {
    if known_distance_km <= 0.0 || known_seconds <= 0.0 || target_distance_km <= 0.0 {
        return None;
    }
    Some(known_seconds * (target_distance_km / known_distance_km).powf(RIEGEL_EXPONENT))
}

/// "H:MM:SS" when an hour or more, "M:SS" otherwise.
pub fn format_hms(total_seconds: f64) -> String {
    let total = total_seconds.round().max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
