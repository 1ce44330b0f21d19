//! Calendar date parsing and quarter-of-year period labels.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Staging column holding the parsed dates while the label is derived.
const PERIOD_DATE: &str = "__period_date";

/// Layouts tried in order. Slash dates are day-first, as the CSV reader's
/// own date inference reads them.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parses a calendar date, accepting a timestamp whose date part parses.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    let date_part = trimmed.split(['T', ' ']).next()?;
    if date_part.len() < trimmed.len() {
        return parse_calendar_date(date_part);
    }
    None
}

/// Reads a date out of a `Date`, datetime or string cell.
pub fn any_to_date(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Null => None,
        AnyValue::Date(days) => NaiveDate::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE),
        AnyValue::String(s) => parse_calendar_date(s),
        AnyValue::StringOwned(s) => parse_calendar_date(&s),
        other => parse_calendar_date(&other.to_string()),
    }
}

/// The column as `Date` values. Datetimes are truncated; text is parsed
/// with [`parse_calendar_date`], failures becoming null.
pub fn calendar_dates(column: &Column) -> PolarsResult<Column> {
    match column.dtype() {
        DataType::Date => Ok(column.clone()),
        DataType::Datetime(_, _) => column.cast(&DataType::Date),
        _ => {
            let mut days: Vec<Option<i32>> = Vec::with_capacity(column.len());
            for idx in 0..column.len() {
                days.push(
                    any_to_date(column.get(idx)?)
                        .map(|date| date.num_days_from_ce() - EPOCH_DAYS_FROM_CE),
                );
            }
            let series = Series::new(column.name().clone(), days).cast(&DataType::Date)?;
            Ok(series.into_column())
        }
    }
}

/// `{year}Q{quarter}` label of a date expression, e.g. `2024Q1`. Quarters
/// are Jan–Mar, Apr–Jun, Jul–Sep and Oct–Dec. Null dates give null.
pub fn quarter_label(date: Expr) -> Expr {
    concat_str(
        [
            date.clone().dt().year().cast(DataType::String),
            lit("Q"),
            date.dt().quarter().cast(DataType::String),
        ],
        "",
        false,
    )
}

/// Adds (or replaces) `period_column` with the quarter label of each row's
/// `date_column`. Unparseable dates give a null period.
pub fn with_period_column(
    df: &DataFrame,
    date_column: &str,
    period_column: &str,
) -> PolarsResult<DataFrame> {
    let dates = calendar_dates(df.column(date_column)?)?.with_name(PERIOD_DATE.into());
    let mut staged = df.clone();
    staged.with_column(dates)?;
    let labelled = staged
        .lazy()
        .with_column(quarter_label(col(PERIOD_DATE)).alias(period_column))
        .collect()?;
    labelled.drop(PERIOD_DATE)
}
