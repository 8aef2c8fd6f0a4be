//! Interactive terminal explorer for bicycle-share trip logs.
//!
//! Loads a city's trip CSV into a polars DataFrame, narrows it by month and
//! weekday, prints descriptive statistics (popular travel times, stations,
//! trip durations, user demographics) and pages through raw rows on request.

pub mod aggregation;
pub mod error;
pub mod filters;
pub mod model;
pub mod pager;
pub mod reports;
pub mod schema;
pub mod session;

pub use error::StatKitError;
pub use filters::{City, DayFilter, MonthFilter, Selection};
pub use model::TripModel;
