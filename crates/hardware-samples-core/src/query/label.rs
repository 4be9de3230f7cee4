//! Human-readable labels for tabulated instants.
//!
//! Labels are rendered in UTC as
//! `"<Month> <day>, <year> <hour>:<MM>:<SS>[.<millis>]<AM|PM>"`, where the day
//! and the 12-hour clock hour are padded to two characters with a space and
//! the millisecond fraction has its trailing zeros trimmed (and is omitted
//! entirely when zero). Sub-millisecond precision is truncated.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use hardware_samples_core::query::label::format_label;
//!
//! let at = Utc.with_ymd_and_hms(2022, 11, 5, 13, 4, 5).unwrap();
//! assert_eq!(format_label(at), "November  5, 2022  1:04:05PM");
//! ```

use chrono::{DateTime, Utc};

/// Render `at` as a tabulation label.
pub fn format_label(at: DateTime<Utc>) -> String {
    let mut label = at.format("%B %e, %Y %l:%M:%S").to_string();

    let millis = at.timestamp_subsec_millis() % 1_000;
    if millis > 0 {
        let fraction = format!("{millis:03}");
        label.push('.');
        label.push_str(fraction.trim_end_matches('0'));
    }

    label.push_str(&at.format("%p").to_string());
    label
}
