//! Recency labels for published timestamps

use chrono::{DateTime, Utc};

/// Bucket the age of `published` relative to `now` into a human label
///
/// Ages are counted in whole days. Timestamps in the future count as today.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use coherent_search::recency::recency_label;
///
/// let now = Utc::now();
/// assert_eq!(recency_label(now - Duration::days(3), now), "3 days ago");
/// assert_eq!(recency_label(now - Duration::days(45), now), "1 months ago");
/// ```
pub fn recency_label(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - published).num_days().max(0);

    match days {
        0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}

/// Parse an RFC 3339 timestamp and label it; unparseable input yields `None`
pub fn label_from_timestamp(raw: &str, now: DateTime<Utc>) -> Option<String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|published| recency_label(published.with_timezone(&Utc), now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_buckets() {
        let now = now();
        let cases = [
            (0, "Today"),
            (1, "1 day ago"),
            (2, "2 days ago"),
            (6, "6 days ago"),
            (7, "1 weeks ago"),
            (29, "4 weeks ago"),
            (30, "1 months ago"),
            (364, "12 months ago"),
            (365, "1 years ago"),
            (1000, "2 years ago"),
        ];
        for (days, expected) in cases {
            assert_eq!(recency_label(now - Duration::days(days), now), expected, "{} days", days);
        }
    }

    #[test]
    fn test_partial_day_rounds_down() {
        let now = now();
        assert_eq!(recency_label(now - Duration::hours(23), now), "Today");
        assert_eq!(recency_label(now - Duration::hours(47), now), "1 day ago");
    }

    #[test]
    fn test_future_is_today() {
        let now = now();
        assert_eq!(recency_label(now + Duration::days(3), now), "Today");
    }

    #[test]
    fn test_label_from_timestamp() {
        let now = now();
        assert_eq!(
            label_from_timestamp("2025-06-12T08:00:00+00:00", now).as_deref(),
            Some("3 days ago")
        );
        assert_eq!(
            label_from_timestamp("2025-06-01T10:00:00Z", now).as_deref(),
            Some("2 weeks ago")
        );
        assert_eq!(label_from_timestamp("last tuesday", now), None);
        assert_eq!(label_from_timestamp("", now), None);
    }
}
