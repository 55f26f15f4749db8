//! Time keeping
//!
//! UTC and local instants, daylight-saving rules, and the keeper that
//! tracks the current UTC time between network syncs.

pub mod instant;
pub mod keeper;
pub mod timezone;
pub mod zones;

pub use instant::{LocalInstant, LocalTime, UtcInstant, LOCAL_TIME_TEXT_LEN};
pub use keeper::TimeKeeper;
pub use timezone::{Period, TimeChangeRule, Timezone, Transitions, Week};
