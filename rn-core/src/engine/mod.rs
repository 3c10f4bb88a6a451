pub mod countdown;
pub mod filter;
pub mod membership;

pub use countdown::Countdown;
pub use filter::{filter_events, FilterSpec, PriceRange};
pub use membership::MembershipSets;
