use std::io::Write;
use std::time::Instant;

use chrono::Month;
use polars::prelude::*;

use crate::aggregation::{
    display_value, max_f64, mean_f64, min_f64, mode_of, sum_f64, value_counts,
};
use crate::error::StatKitError;
use crate::schema::{derived, trip};

const RULE: &str = "----------------------------------------";
const NO_DATA: &str = "No trips match the current filters.";

// ── Time stats ──────────────────────────────────────────────────────────────

/// Most frequent month, weekday and start hour of the filtered trips.
#[derive(Debug, PartialEq)]
pub struct TimeStats {
    pub month: Option<i32>,
    pub weekday: Option<String>,
    pub hour: Option<i32>,
}

impl TimeStats {
    pub fn compute(df: &DataFrame) -> Result<Self, StatKitError> {
        let month = mode_of(df, derived::MONTH)?
            .map(|v| v.try_extract::<i32>())
            .transpose()?;
        let weekday = mode_of(df, derived::DAY_OF_WEEK)?.map(|v| display_value(&v));
        let hour = mode_of(df, derived::HOUR)?
            .map(|v| v.try_extract::<i32>())
            .transpose()?;

        Ok(Self {
            month,
            weekday,
            hour,
        })
    }
}

pub fn print_time_stats<W: Write>(df: &DataFrame, out: &mut W) -> Result<(), StatKitError> {
    writeln!(out, "\nComputing the most frequent times of travel...\n")?;
    let started = Instant::now();

    if df.height() == 0 {
        writeln!(out, "{NO_DATA}")?;
    } else {
        let stats = TimeStats::compute(df)?;
        if let Some(month) = stats.month {
            writeln!(out, "Most common month: {}", month_name(month))?;
        }
        if let Some(weekday) = &stats.weekday {
            writeln!(out, "Most common day of week: {weekday}")?;
        }
        if let Some(hour) = stats.hour {
            writeln!(out, "Most common start hour: {hour}")?;
        }
    }

    finish_section(out, started)
}

// ── Station stats ───────────────────────────────────────────────────────────

/// Most popular start station, end station and route.
#[derive(Debug, PartialEq)]
pub struct StationStats {
    pub start: Option<String>,
    pub end: Option<String>,
    pub route: Option<String>,
}

impl StationStats {
    pub fn compute(df: &DataFrame) -> Result<Self, StatKitError> {
        let start = mode_of(df, trip::START_STATION)?.map(|v| display_value(&v));
        let end = mode_of(df, trip::END_STATION)?.map(|v| display_value(&v));
        let route = mode_of(df, derived::ROUTE)?.map(|v| display_value(&v));

        Ok(Self { start, end, route })
    }
}

pub fn print_station_stats<W: Write>(df: &DataFrame, out: &mut W) -> Result<(), StatKitError> {
    writeln!(out, "\nComputing the most popular stations and trip...\n")?;
    let started = Instant::now();

    if df.height() == 0 {
        writeln!(out, "{NO_DATA}")?;
    } else {
        let stats = StationStats::compute(df)?;
        if let Some(start) = &stats.start {
            writeln!(out, "Most popular start station: {start}")?;
        }
        if let Some(end) = &stats.end {
            writeln!(out, "Most popular end station: {end}")?;
        }
        if let Some(route) = &stats.route {
            writeln!(out, "Most popular trip: {route}")?;
        }
    }

    finish_section(out, started)
}

// ── Duration stats ──────────────────────────────────────────────────────────

/// Total and average trip duration, in seconds.
#[derive(Debug, PartialEq)]
pub struct DurationStats {
    pub total_seconds: Option<f64>,
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    pub fn compute(df: &DataFrame) -> Result<Self, StatKitError> {
        Ok(Self {
            total_seconds: sum_f64(df, trip::TRIP_DURATION)?,
            mean_seconds: mean_f64(df, trip::TRIP_DURATION)?,
        })
    }
}

pub fn print_duration_stats<W: Write>(df: &DataFrame, out: &mut W) -> Result<(), StatKitError> {
    writeln!(out, "\nComputing trip durations...\n")?;
    let started = Instant::now();

    if df.height() == 0 {
        writeln!(out, "{NO_DATA}")?;
    } else {
        let stats = DurationStats::compute(df)?;
        if let Some(total) = stats.total_seconds {
            writeln!(out, "Total travel time: {total:.2} seconds")?;
        }
        if let Some(mean) = stats.mean_seconds {
            writeln!(out, "Average travel time: {mean:.2} seconds")?;
        }
    }

    finish_section(out, started)
}

// ── User stats ──────────────────────────────────────────────────────────────

/// Birth-year extremes and mode, reported as whole years.
#[derive(Debug, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// User-type counts plus the demographic sections that depend on optional
/// columns. A None section means the source file lacks that column.
#[derive(Debug, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, u32)>,
    pub genders: Option<Vec<(String, u32)>>,
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn compute(df: &DataFrame) -> Result<Self, StatKitError> {
        let user_types = value_counts(df, trip::USER_TYPE)?;

        let genders = if df.schema().contains(trip::GENDER) {
            Some(value_counts(df, trip::GENDER)?)
        } else {
            None
        };

        let birth_years = if df.schema().contains(trip::BIRTH_YEAR) {
            let earliest = min_f64(df, trip::BIRTH_YEAR)?;
            let latest = max_f64(df, trip::BIRTH_YEAR)?;
            let most_common = mode_of(df, trip::BIRTH_YEAR)?
                .map(|v| v.try_extract::<f64>())
                .transpose()?;

            match (earliest, latest, most_common) {
                (Some(earliest), Some(latest), Some(most_common)) => Some(BirthYearStats {
                    earliest: earliest as i32,
                    latest: latest as i32,
                    most_common: most_common as i32,
                }),
                _ => None,
            }
        } else {
            None
        };

        Ok(Self {
            user_types,
            genders,
            birth_years,
        })
    }
}

pub fn print_user_stats<W: Write>(df: &DataFrame, out: &mut W) -> Result<(), StatKitError> {
    writeln!(out, "\nComputing user stats...\n")?;
    let started = Instant::now();

    if df.height() == 0 {
        writeln!(out, "{NO_DATA}")?;
    } else {
        let stats = UserStats::compute(df)?;

        writeln!(out, "Counts by user type:")?;
        for (user_type, count) in &stats.user_types {
            writeln!(out, "  {user_type}: {count}")?;
        }

        if let Some(genders) = &stats.genders {
            writeln!(out, "Counts by gender:")?;
            for (gender, count) in genders {
                writeln!(out, "  {gender}: {count}")?;
            }
        }

        if let Some(years) = &stats.birth_years {
            writeln!(out, "Earliest birth year: {}", years.earliest)?;
            writeln!(out, "Most recent birth year: {}", years.latest)?;
            writeln!(out, "Most common birth year: {}", years.most_common)?;
        }
    }

    finish_section(out, started)
}

// ── Shared formatting ───────────────────────────────────────────────────────

fn finish_section<W: Write>(out: &mut W, started: Instant) -> Result<(), StatKitError> {
    writeln!(
        out,
        "\nThis took {:.4} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn month_name(number: i32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(derived::MONTH.into(), &[6i32, 6, 5]),
            Column::new(
                derived::DAY_OF_WEEK.into(),
                &["Monday", "Monday", "Tuesday"],
            ),
            Column::new(derived::HOUR.into(), &[9i32, 17, 9]),
            Column::new(
                trip::START_STATION.into(),
                &["Canal St", "State St", "Canal St"],
            ),
            Column::new(
                trip::END_STATION.into(),
                &["State St", "Canal St", "Clark St"],
            ),
            Column::new(
                derived::ROUTE.into(),
                &[
                    "Canal St to State St",
                    "State St to Canal St",
                    "Canal St to Clark St",
                ],
            ),
            Column::new(trip::TRIP_DURATION.into(), &[900.0, 720.0, 1500.0]),
            Column::new(
                trip::USER_TYPE.into(),
                &["Subscriber", "Customer", "Subscriber"],
            ),
            Column::new(trip::GENDER.into(), &["Male", "Female", "Male"]),
            Column::new(trip::BIRTH_YEAR.into(), &[1988.0, 1992.0, 1988.0]),
        ])
        .unwrap()
    }

    #[test]
    fn time_stats_take_the_mode_of_each_derived_column() {
        let stats = TimeStats::compute(&sample_frame()).unwrap();
        assert_eq!(stats.month, Some(6));
        assert_eq!(stats.weekday.as_deref(), Some("Monday"));
        assert_eq!(stats.hour, Some(9));
    }

    #[test]
    fn station_stats_take_the_mode_of_each_station_column() {
        let stats = StationStats::compute(&sample_frame()).unwrap();
        assert_eq!(stats.start.as_deref(), Some("Canal St"));
        // Every end station appears once; the tie resolves to the smallest.
        assert_eq!(stats.end.as_deref(), Some("Canal St"));
        assert_eq!(stats.route.as_deref(), Some("Canal St to Clark St"));
    }

    #[test]
    fn duration_stats_are_row_order_invariant() {
        let forward = DurationStats::compute(&sample_frame()).unwrap();

        let reversed = sample_frame().reverse();
        let backward = DurationStats::compute(&reversed).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.total_seconds, Some(3120.0));
        assert_eq!(forward.mean_seconds, Some(1040.0));
    }

    #[test]
    fn user_stats_cover_all_sections_when_columns_exist() {
        let stats = UserStats::compute(&sample_frame()).unwrap();
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.genders,
            Some(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_years,
            Some(BirthYearStats {
                earliest: 1988,
                latest: 1992,
                most_common: 1988,
            })
        );
    }

    #[test]
    fn user_stats_skip_absent_optional_columns() {
        let df = DataFrame::new(vec![Column::new(
            trip::USER_TYPE.into(),
            &["Subscriber", "Subscriber"],
        )])
        .unwrap();

        let stats = UserStats::compute(&df).unwrap();
        assert_eq!(stats.user_types, vec![("Subscriber".to_string(), 2)]);
        assert_eq!(stats.genders, None);
        assert_eq!(stats.birth_years, None);
    }

    #[test]
    fn empty_table_short_circuits_every_reporter() {
        let empty = DataFrame::empty();
        let mut out = Vec::new();

        print_time_stats(&empty, &mut out).unwrap();
        print_station_stats(&empty, &mut out).unwrap();
        print_duration_stats(&empty, &mut out).unwrap();
        print_user_stats(&empty, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(NO_DATA).count(), 4);
    }

    #[test]
    fn printed_report_includes_month_name_and_timing() {
        let mut out = Vec::new();
        print_time_stats(&sample_frame(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Most common month: June"));
        assert!(text.contains("Most common day of week: Monday"));
        assert!(text.contains("Most common start hour: 9"));
        assert!(text.contains("This took"));
        assert!(text.contains(RULE));
    }
}
