pub mod parse;
pub mod period;
pub mod season;

pub use period::{PeriodKey, period_of, resolve_period};
pub use season::{SeasonCalendar, SeasonCalendarError, SeasonDef};
