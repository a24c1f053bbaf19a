mod asset;
mod schedule;

pub use asset::Asset;
pub use schedule::{Schedule, ScheduleError, Settlement};
