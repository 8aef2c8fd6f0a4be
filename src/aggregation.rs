use polars::prelude::*;

use crate::error::StatKitError;

const COUNT: &str = "count";

/// Most frequent non-null value of a column.
///
/// Ties are broken deterministically: among equally frequent values the
/// smallest in the column's sort order wins (sorted-then-first). Returns
/// None for an empty or all-null column.
pub fn mode_of(df: &DataFrame, column: &str) -> Result<Option<AnyValue<'static>>, StatKitError> {
    let counts = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias(COUNT)])
        .sort_by_exprs(
            [col(COUNT), col(column)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(1)
        .collect()?;

    if counts.height() == 0 {
        return Ok(None);
    }

    let value = counts.column(column)?.get(0)?.into_static();
    Ok(Some(value))
}

/// Per-value frequencies of a string column, most frequent first.
/// Equal counts are ordered by value so the output is deterministic.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Vec<(String, u32)>, StatKitError> {
    let counts = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias(COUNT)])
        .sort_by_exprs(
            [col(COUNT), col(column)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    let values = counts.column(column)?.str()?;
    let totals = counts.column(COUNT)?.u32()?;

    let mut out = Vec::with_capacity(counts.height());
    for i in 0..counts.height() {
        if let (Some(value), Some(total)) = (values.get(i), totals.get(i)) {
            out.push((value.to_string(), total));
        }
    }
    Ok(out)
}

// ── Scalar reductions ───────────────────────────────────────────────────────
// Each returns None when the column has no non-null values, so callers never
// see a reduction over nothing.

pub fn sum_f64(df: &DataFrame, column: &str) -> Result<Option<f64>, StatKitError> {
    let s = df.column(column)?.as_materialized_series();
    if s.len() == s.null_count() {
        return Ok(None);
    }
    let val = s.sum_reduce()?;
    Ok(val.value().try_extract::<f64>().ok())
}

pub fn mean_f64(df: &DataFrame, column: &str) -> Result<Option<f64>, StatKitError> {
    let s = df.column(column)?.as_materialized_series();
    if s.len() == s.null_count() {
        return Ok(None);
    }
    let mean = s.mean_reduce();
    Ok(mean.value().try_extract::<f64>().ok())
}

pub fn min_f64(df: &DataFrame, column: &str) -> Result<Option<f64>, StatKitError> {
    let s = df.column(column)?.as_materialized_series();
    if s.len() == s.null_count() {
        return Ok(None);
    }
    let val = s.min_reduce()?;
    Ok(val.value().try_extract::<f64>().ok())
}

pub fn max_f64(df: &DataFrame, column: &str) -> Result<Option<f64>, StatKitError> {
    let s = df.column(column)?.as_materialized_series();
    if s.len() == s.null_count() {
        return Ok(None);
    }
    let val = s.max_reduce()?;
    Ok(val.value().try_extract::<f64>().ok())
}

/// Render an AnyValue without the quoting Display adds to strings.
pub fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{other}"),
    }
}
