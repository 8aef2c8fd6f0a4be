use std::path::PathBuf;
use std::time::Instant;

use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;

use tracing::info;

use crate::error::StatKitError;
use crate::filters::{City, DayFilter, MonthFilter, Selection};
use crate::schema::{derived, trip, START_TIME_FORMAT};

/// Loader for the per-city trip CSVs.
///
/// Holds only the base data directory; every load reads and re-derives from
/// disk so a session restart always sees the file as it currently is.
pub struct TripModel {
    base_path: PathBuf,
}

impl TripModel {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a city's trips and narrow them to the selected month/day.
    pub fn load_filtered(&self, selection: &Selection) -> Result<DataFrame, StatKitError> {
        let df = self.load_city(selection.city)?;
        apply_filters(df, selection.month, selection.day)
    }

    /// Load a city's trip log.
    ///
    /// Required columns:
    ///     Start Time, End Time, Start Station, End Station,
    ///     Trip Duration, User Type
    /// Optional columns (kept when present, skipped otherwise):
    ///     Gender, Birth Year
    ///
    /// Start Time is parsed as datetime (%Y-%m-%d %H:%M:%S); Trip Duration
    /// and Birth Year are cast to Float64. Adds the derived month,
    /// day_of_week, hour and start_to_end columns.
    pub fn load_city(&self, city: City) -> Result<DataFrame, StatKitError> {
        let started = Instant::now();
        let raw = self.read_csv_as_strings(city.data_file())?;

        require_columns(&raw, &trip::REQUIRED)?;

        let has_birth_year = raw.schema().contains(trip::BIRTH_YEAR);

        let mut lazy = raw.lazy().with_columns([
            parse_datetime(trip::START_TIME, START_TIME_FORMAT),
            col(trip::TRIP_DURATION).cast(DataType::Float64),
        ]);

        if has_birth_year {
            lazy = lazy.with_columns([col(trip::BIRTH_YEAR).cast(DataType::Float64)]);
        }

        lazy = lazy.with_columns([
            col(trip::START_TIME)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(derived::MONTH),
            col(trip::START_TIME)
                .dt()
                .to_string("%A")
                .alias(derived::DAY_OF_WEEK),
            col(trip::START_TIME)
                .dt()
                .hour()
                .cast(DataType::Int32)
                .alias(derived::HOUR),
            concat_str(
                [col(trip::START_STATION), col(trip::END_STATION)],
                " to ",
                false,
            )
            .alias(derived::ROUTE),
        ]);

        let df = lazy.collect()?;

        info!(
            city = city.label(),
            rows = df.height(),
            elapsed = ?started.elapsed(),
            "loaded city dataset"
        );

        Ok(df)
    }

    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names.
    fn read_csv_as_strings(&self, filename: &str) -> Result<DataFrame, StatKitError> {
        let path = self.base_path.join(filename);
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        Ok(df)
    }
}

/// Narrow a loaded trip table by the month/day selection.
///
/// Both filters are plain equality predicates on the derived columns; an
/// `All` filter leaves the table untouched. The input is consumed and a
/// fresh frame returned, so nothing upstream is mutated.
pub fn apply_filters(
    df: DataFrame,
    month: MonthFilter,
    day: DayFilter,
) -> Result<DataFrame, StatKitError> {
    let mut lazy = df.lazy();

    if let Some(number) = month.number() {
        lazy = lazy.filter(col(derived::MONTH).eq(lit(number)));
    }
    if let Some(name) = day.title() {
        lazy = lazy.filter(col(derived::DAY_OF_WEEK).eq(lit(name)));
    }

    Ok(lazy.collect()?)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), StatKitError> {
    for &name in required {
        if df.column(name).is_err() {
            return Err(StatKitError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Expression parsing a string column to Datetime with the given format.
fn parse_datetime(column: &str, format: &str) -> Expr {
    col(column)
        .str()
        .strip_chars(lit(" \t\r\n"))
        .str()
        .to_datetime(
            Some(TimeUnit::Microseconds),
            None,
            StrptimeOptions {
                format: Some(format.into()),
                strict: true,
                ..Default::default()
            },
            lit("raise"),
        )
}
