//! Long-to-wide reshaping with one column per distinct category.

use std::collections::BTreeSet;

use polars::prelude::*;
use tabrep_ingest::any_to_string;
use tracing::debug;

use crate::ops::left_join_on;

/// Mean of `values` per (`index`, `columns`), reshaped to one column per
/// distinct `columns` value.
///
/// The output has one row per distinct index value (first-seen order) and
/// category columns sorted by name. A missing (index, category) pair is
/// null, never zero. Rows with a null category are ignored.
pub fn pivot_wide_mean(
    df: &DataFrame,
    index: &str,
    columns: &str,
    values: &str,
) -> PolarsResult<DataFrame> {
    let means = df
        .clone()
        .lazy()
        .filter(col(columns).is_not_null())
        .group_by_stable([col(index), col(columns).cast(DataType::String)])
        .agg([col(values).cast(DataType::Float64).mean().alias(values)])
        .collect()?;

    let mut wide = means
        .clone()
        .lazy()
        .group_by_stable([col(index)])
        .agg([col(values).count().alias("__cells")])
        .select([col(index)])
        .collect()?;

    let categories = distinct_categories(&means, columns)?;
    debug!(
        index,
        columns,
        categories = categories.len(),
        rows = wide.height(),
        "pivoting to wide layout"
    );
    for category in categories {
        let name = if category == index {
            format!("{category}_{values}")
        } else {
            category.clone()
        };
        let slice = means
            .clone()
            .lazy()
            .filter(col(columns).eq(lit(category.as_str())))
            .select([col(index), col(values).alias(name.as_str())])
            .collect()?;
        wide = left_join_on(&wide, &slice, &[index])?;
    }
    Ok(wide)
}

/// Distinct non-empty values of a column, sorted.
pub fn distinct_categories(df: &DataFrame, name: &str) -> PolarsResult<BTreeSet<String>> {
    let column = df.column(name)?;
    let mut categories = BTreeSet::new();
    for idx in 0..column.len() {
        let value = any_to_string(column.get(idx)?);
        if !value.trim().is_empty() {
            categories.insert(value);
        }
    }
    Ok(categories)
}
