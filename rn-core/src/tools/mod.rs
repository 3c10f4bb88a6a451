pub mod pace;
pub mod predictor;
pub mod treadmill;

pub use pace::{pace_per_km, Pace};
pub use predictor::{format_hms, predict_time};
pub use treadmill::{incline_adjusted_speed, kmh_to_pace, pace_to_kmh};
