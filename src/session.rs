use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::StatKitError;
use crate::filters::collect_filters;
use crate::model::TripModel;
use crate::pager;
use crate::reports;

/// Run the interactive explore loop until the user declines to restart.
///
/// Each pass collects filters, loads the city's trips fresh from disk,
/// prints the four statistics sections, and offers raw-row paging. The
/// restart prompt is single-shot: only an exact (case-insensitive) "yes"
/// starts another pass.
pub fn run<R: BufRead, W: Write>(
    model: &TripModel,
    input: &mut R,
    output: &mut W,
) -> Result<(), StatKitError> {
    writeln!(output, "Hello! Let's explore some US bikeshare data.")?;

    loop {
        let selection = collect_filters(input, output)?;
        debug!(
            city = selection.city.label(),
            month = selection.month.label(),
            day = selection.day.label(),
            "filters selected"
        );

        let df = model.load_filtered(&selection)?;
        writeln!(
            output,
            "\n{} trips match {} (month: {}, day: {}).",
            df.height(),
            selection.city.label(),
            selection.month.label(),
            selection.day.label()
        )?;

        reports::print_time_stats(&df, output)?;
        reports::print_station_stats(&df, output)?;
        reports::print_duration_stats(&df, output)?;
        reports::print_user_stats(&df, output)?;

        pager::browse(&df, input, output)?;

        write!(output, "\nWould you like to restart? Enter yes or no: ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            break;
        }
        if !answer.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}
