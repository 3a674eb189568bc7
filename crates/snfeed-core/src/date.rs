//! HTTP-date formatting for `lastBuildDate` and `pubDate`

use chrono::{DateTime, Utc};

/// RFC 1123 layout, always in GMT
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an RFC 1123 HTTP-date
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use snfeed_core::date::format_http_date;
///
/// let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_http_date(&dt), "Mon, 01 Jan 2024 00:00:00 GMT");
/// ```
pub fn format_http_date(dt: &DateTime<Utc>) -> String {
    dt.format(HTTP_DATE_FORMAT).to_string()
}
