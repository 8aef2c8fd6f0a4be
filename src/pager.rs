use std::io::{BufRead, Write};

use polars::prelude::*;

use crate::error::StatKitError;
use crate::filters::prompt_yes_no;

pub const PAGE_SIZE: usize = 5;

/// The window of up to `PAGE_SIZE` rows starting at `offset`.
/// A window past the end of the table is simply empty.
pub fn page(df: &DataFrame, offset: usize) -> DataFrame {
    df.slice(offset as i64, PAGE_SIZE)
}

/// Walk the table five rows at a time on repeated confirmation.
///
/// Invalid answers re-prompt without advancing the cursor; "no" stops.
/// Once the table is exhausted the pager says so and stops on its own.
pub fn browse<R: BufRead, W: Write>(
    df: &DataFrame,
    input: &mut R,
    output: &mut W,
) -> Result<(), StatKitError> {
    let mut offset = 0;

    loop {
        let more = prompt_yes_no(input, output, "Show 5 rows of raw trip data? (yes/no): ")?;
        if !more {
            break;
        }

        let window = page(df, offset);
        if window.height() == 0 {
            writeln!(output, "No more raw data to display.")?;
            break;
        }

        writeln!(output, "{window}")?;
        offset += PAGE_SIZE;
    }

    Ok(())
}
