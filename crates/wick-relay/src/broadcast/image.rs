//! Daily image filename helper.

use chrono::{Datelike, Local, NaiveDate};

/// Formats the image filename for a date as `<year>_<month>_<day>.png`.
///
/// The month is zero-based (January = 0), which is what existing clients
/// expect; do not "fix" it to one-based.
pub fn image_file_name(date: NaiveDate) -> String {
    format!("{}_{}_{}.png", date.year(), date.month0(), date.day())
}

/// Formats the image filename for today's local date.
pub fn daily_image_file_name() -> String {
    image_file_name(Local::now().date_naive())
}
