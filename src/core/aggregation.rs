//! Sales aggregation for the chart on the sales dashboard.
//!
//! Sales are summed into a fixed number of labeled buckets covering a trailing
//! window that ends with the bucket containing `now`:
//!
//! | Period     | Buckets | Bucket width        | Label             |
//! |------------|---------|---------------------|-------------------|
//! | `Hourly24` | 24      | one local hour      | `14:00`           |
//! | `Daily7`   | 7       | one local day       | `Monday`          |
//! | `Weekly4`  | 4       | seven local days    | `Sep 22 - Sep 28` |
//!
//! Hours are truncated to the start of the local hour and days are compared by
//! local calendar date, so every bucket is the half-open interval
//! `[start, next start)`. A sale exactly on a boundary lands in the newer
//! bucket. Sales after the end of the current bucket are not counted.
//!
//! Everything here is pure: the reference time and its time zone are passed
//! in, which keeps boundary behaviour reproducible in tests.

use crate::entities::sale;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Chart period selected on the sales dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    /// Last 24 hours, one bucket per hour (`day` tab)
    #[serde(rename = "day")]
    Hourly24,
    /// Last 7 days, one bucket per day (`week` tab)
    #[default]
    #[serde(rename = "week")]
    Daily7,
    /// Last 28 days, one bucket per 7 days (`month` tab)
    #[serde(rename = "month")]
    Weekly4,
}

impl Period {
    /// All periods in tab order.
    pub const ALL: [Self; 3] = [Self::Hourly24, Self::Daily7, Self::Weekly4];

    /// Number of buckets the chart always shows for this period.
    #[must_use]
    pub const fn bucket_count(self) -> usize {
        match self {
            Self::Hourly24 => 24,
            Self::Daily7 => 7,
            Self::Weekly4 => 4,
        }
    }

    /// Tab name as used on the command line and in `config.toml`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly24 => "day",
            Self::Daily7 => "week",
            Self::Weekly4 => "month",
        }
    }

    /// Chart heading for this period.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hourly24 => "Sales Overview - Last 24 Hours",
            Self::Daily7 => "Sales Overview - Last 7 Days",
            Self::Weekly4 => "Sales Overview - Last 28 Days",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "hourly-24" => Ok(Self::Hourly24),
            "week" | "daily-7" => Ok(Self::Daily7),
            "month" | "weekly-4" => Ok(Self::Weekly4),
            other => Err(format!(
                "unknown period '{other}' (expected day, week or month)"
            )),
        }
    }
}

/// One labeled slot on the chart's x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Axis label
    pub label: String,
    /// Sum of sale totals falling in this bucket
    pub total: f64,
}

/// Ordered chart data, oldest bucket first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Period the buckets were built for
    pub period: Period,
    /// Exactly `period.bucket_count()` buckets
    pub buckets: Vec<Bucket>,
}

impl ChartSeries {
    /// Sum over all buckets, i.e. the sales inside the whole window.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).sum()
    }

    /// Largest bucket value, 0 for an empty chart.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.buckets.iter().map(|b| b.total).fold(0.0, f64::max)
    }
}

/// Builds the chart series for `period` ending at `now`.
///
/// Empty input produces all-zero buckets; the bucket count never changes.
#[must_use]
pub fn aggregate_sales<Tz: TimeZone>(
    sales: &[sale::Model],
    period: Period,
    now: &DateTime<Tz>,
) -> ChartSeries {
    let mut buckets: Vec<Bucket> = bucket_labels(period, now)
        .into_iter()
        .map(|label| Bucket { label, total: 0.0 })
        .collect();

    for sale in sales {
        if let Some(bucket) =
            bucket_index(period, now, &sale.timestamp).and_then(|i| buckets.get_mut(i))
        {
            bucket.total += sale.total;
        }
    }

    ChartSeries { period, buckets }
}

/// Index of the bucket `timestamp` falls into, or `None` when it is outside
/// the period's window.
#[must_use]
pub fn bucket_index<Tz: TimeZone>(
    period: Period,
    now: &DateTime<Tz>,
    timestamp: &DateTime<Utc>,
) -> Option<usize> {
    let local = timestamp.with_timezone(&now.timezone());
    let count = period.bucket_count();

    let steps_back = match period {
        Period::Hourly24 => (start_of_hour(now) - start_of_hour(&local)).num_hours(),
        Period::Daily7 => days_back(now, &local),
        Period::Weekly4 => {
            let days = days_back(now, &local);
            if days < 0 { days } else { days / 7 }
        }
    };

    let steps_back = usize::try_from(steps_back).ok()?;
    (steps_back < count).then(|| count - 1 - steps_back)
}

/// Axis labels for `period`, oldest first.
#[must_use]
pub fn bucket_labels<Tz: TimeZone>(period: Period, now: &DateTime<Tz>) -> Vec<String> {
    let today = now.date_naive();
    match period {
        Period::Hourly24 => {
            let current = start_of_hour(now);
            (0..24)
                .rev()
                .map(|back| {
                    let hour = (current.clone() - TimeDelta::hours(back)).hour();
                    format!("{hour}:00")
                })
                .collect()
        }
        Period::Daily7 => (0..7)
            .rev()
            .map(|back| weekday_name((today - TimeDelta::days(back)).weekday()).to_string())
            .collect(),
        Period::Weekly4 => (0..4)
            .rev()
            .map(|back| {
                let end = today - TimeDelta::days(back * 7);
                let start = end - TimeDelta::days(6);
                format_date_range(start, end)
            })
            .collect(),
    }
}

fn start_of_hour<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    t.clone()
        - TimeDelta::seconds(i64::from(t.minute()) * 60 + i64::from(t.second()))
        - TimeDelta::nanoseconds(i64::from(t.nanosecond()))
}

fn days_back<Tz: TimeZone>(now: &DateTime<Tz>, local: &DateTime<Tz>) -> i64 {
    now.date_naive()
        .signed_duration_since(local.date_naive())
        .num_days()
}

fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
}

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sale_at;
    use chrono::FixedOffset;

    /// Monday 2026-10-19 14:30 UTC
    fn now_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_bucket_counts_are_fixed() {
        let now = now_utc();
        let many: Vec<_> = (0..100)
            .map(|h| sale_at(now - TimeDelta::hours(h), 1.0))
            .collect();

        for period in Period::ALL {
            assert_eq!(
                aggregate_sales(&[], period, &now).buckets.len(),
                period.bucket_count()
            );
            assert_eq!(
                aggregate_sales(&many, period, &now).buckets.len(),
                period.bucket_count()
            );
        }
    }

    #[test]
    fn test_empty_sales_give_zero_buckets() {
        let series = aggregate_sales(&[], Period::Weekly4, &now_utc());
        assert!(series.buckets.iter().all(|b| b.total == 0.0));
        assert_eq!(series.grand_total(), 0.0);
        assert_eq!(series.peak(), 0.0);
    }

    #[test]
    fn test_hourly_labels_end_at_current_hour() {
        let labels = bucket_labels(Period::Hourly24, &now_utc());
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[23], "14:00");
        assert_eq!(labels[22], "13:00");
        assert_eq!(labels[0], "15:00");
    }

    #[test]
    fn test_hourly_buckets() {
        let now = now_utc();
        let sales = vec![
            sale_at(now, 10.0),                        // current hour
            sale_at(now - TimeDelta::minutes(30), 5.0), // 14:00 exactly
            sale_at(now - TimeDelta::minutes(31), 2.0), // 13:59
            sale_at(now - TimeDelta::hours(23), 1.0),   // 15:30 yesterday
            sale_at(now - TimeDelta::hours(24), 100.0), // outside window
            sale_at(now + TimeDelta::hours(1), 50.0),   // future hour
        ];

        let series = aggregate_sales(&sales, Period::Hourly24, &now);
        assert_eq!(series.buckets[23].total, 15.0);
        assert_eq!(series.buckets[22].total, 2.0);
        assert_eq!(series.buckets[0].total, 1.0);
        assert_eq!(series.grand_total(), 18.0);
    }

    #[test]
    fn test_hourly_uses_local_hour() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = now_utc().with_timezone(&tz); // 16:30 local
        let labels = bucket_labels(Period::Hourly24, &now);
        assert_eq!(labels[23], "16:00");

        let series = aggregate_sales(&[sale_at(now_utc(), 3.0)], Period::Hourly24, &now);
        assert_eq!(series.buckets[23].label, "16:00");
        assert_eq!(series.buckets[23].total, 3.0);
    }

    #[test]
    fn test_daily_labels_and_buckets() {
        let now = now_utc();
        let labels = bucket_labels(Period::Daily7, &now);
        assert_eq!(
            labels,
            vec![
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
                "Monday"
            ]
        );

        let midnight = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let sales = vec![
            sale_at(midnight, 4.0),                              // today, boundary
            sale_at(midnight - TimeDelta::seconds(1), 6.0),      // Sunday
            sale_at(midnight - TimeDelta::days(6), 7.0),         // Tuesday, oldest
            sale_at(midnight - TimeDelta::days(6) - TimeDelta::seconds(1), 9.0), // excluded
        ];
        let series = aggregate_sales(&sales, Period::Daily7, &now);
        assert_eq!(series.buckets[6].total, 4.0);
        assert_eq!(series.buckets[5].total, 6.0);
        assert_eq!(series.buckets[0].total, 7.0);
        assert_eq!(series.grand_total(), 17.0);
    }

    #[test]
    fn test_daily_respects_time_zone_calendar_day() {
        // 23:30 UTC on Sunday is already Monday in UTC+2
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = now_utc().with_timezone(&tz);
        let late_sunday_utc = Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();

        let series = aggregate_sales(&[sale_at(late_sunday_utc, 8.0)], Period::Daily7, &now);
        assert_eq!(series.buckets[6].label, "Monday");
        assert_eq!(series.buckets[6].total, 8.0);
    }

    #[test]
    fn test_weekly_labels() {
        let labels = bucket_labels(Period::Weekly4, &now_utc());
        assert_eq!(
            labels,
            vec![
                "Sep 22 - Sep 28",
                "Sep 29 - Oct 5",
                "Oct 6 - Oct 12",
                "Oct 13 - Oct 19"
            ]
        );
    }

    #[test]
    fn test_weekly_buckets() {
        let now = now_utc();
        let sales = vec![
            sale_at(now - TimeDelta::days(6), 1.0),  // newest week
            sale_at(now - TimeDelta::days(7), 2.0),  // second newest
            sale_at(now - TimeDelta::days(27), 3.0), // oldest week
            sale_at(now - TimeDelta::days(28), 4.0), // outside
        ];
        let series = aggregate_sales(&sales, Period::Weekly4, &now);
        assert_eq!(series.buckets[3].total, 1.0);
        assert_eq!(series.buckets[2].total, 2.0);
        assert_eq!(series.buckets[0].total, 3.0);
        assert_eq!(series.grand_total(), 6.0);
    }

    #[test]
    fn test_bucket_sum_matches_window_sum() {
        let now = now_utc();
        let mut sales: Vec<_> = (0..60)
            .map(|i| sale_at(now - TimeDelta::hours(i * 13), f64::from(i as u8) + 0.5))
            .collect();
        // Later today, past the current hour
        sales.push(sale_at(now + TimeDelta::hours(2), 100.0));

        // Windows written out by hand for Monday 2026-10-19 14:30 UTC
        let at = |month: u32, day: u32, hour: u32| {
            Utc.with_ymd_and_hms(2026, month, day, hour, 0, 0).unwrap()
        };
        let windows = [
            (Period::Hourly24, at(10, 18, 15), at(10, 19, 15)),
            (Period::Daily7, at(10, 13, 0), at(10, 20, 0)),
            (Period::Weekly4, at(9, 22, 0), at(10, 20, 0)),
        ];

        for (period, start, end) in windows {
            let expected: f64 = sales
                .iter()
                .filter(|s| s.timestamp >= start && s.timestamp < end)
                .map(|s| s.total)
                .sum();
            let series = aggregate_sales(&sales, period, &now);
            assert!(
                (series.grand_total() - expected).abs() < 1e-9,
                "{period}: got {}, expected {expected}",
                series.grand_total()
            );
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let now = now_utc();
        let sales = vec![sale_at(now - TimeDelta::hours(3), 12.5)];
        assert_eq!(
            aggregate_sales(&sales, Period::Daily7, &now),
            aggregate_sales(&sales, Period::Daily7, &now)
        );
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("day".parse::<Period>().unwrap(), Period::Hourly24);
        assert_eq!("Week".parse::<Period>().unwrap(), Period::Daily7);
        assert_eq!("weekly-4".parse::<Period>().unwrap(), Period::Weekly4);
        assert!("year".parse::<Period>().is_err());
        assert_eq!(Period::default(), Period::Daily7);
        assert_eq!(Period::Weekly4.to_string(), "month");
    }
}
