mod daily_summary;
mod reading;

pub use daily_summary::{format_date, parse_date, DailySummary, DATE_FORMAT};
pub use reading::Reading;
