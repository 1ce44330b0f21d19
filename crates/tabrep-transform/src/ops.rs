//! Frame-level operators shared by the report pipelines.

use polars::prelude::*;

/// Temporary column used to restore left-table order after a join.
const ROW_ORDER: &str = "__row_order";

/// A table with the given columns (all `String`) and no rows.
pub fn empty_frame(columns: &[&str]) -> DataFrame {
    let columns = columns
        .iter()
        .map(|name| Column::new_empty((*name).into(), &DataType::String))
        .collect();
    DataFrame::new(columns).unwrap_or_else(|_| DataFrame::empty())
}

/// Column names in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Left-outer join keeping every left row in its original order.
///
/// Right key columns are cast to the left key types first, so an `Int64`
/// id from one source matches a `String` id from another. Non-key name
/// clashes get the Polars `_right` suffix.
pub fn left_join_on(left: &DataFrame, right: &DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
    let left_schema = left.schema();
    let mut casts = Vec::with_capacity(keys.len());
    for key in keys {
        let dtype = left_schema
            .get(key)
            .ok_or_else(|| PolarsError::ColumnNotFound(format!("{key}").into()))?;
        if right.column(key).is_err() {
            return Err(PolarsError::ColumnNotFound(format!("{key}").into()));
        }
        casts.push(col(*key).cast(dtype.clone()));
    }
    let on: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    let joined = left
        .clone()
        .lazy()
        .with_row_index(ROW_ORDER, None)
        .join(
            right.clone().lazy().with_columns(casts),
            on.clone(),
            on,
            JoinArgs::new(JoinType::Left),
        )
        .sort_by_exprs([col(ROW_ORDER)], SortMultipleOptions::default())
        .collect()?;
    joined.drop(ROW_ORDER)
}

/// Replace nulls with zero in the named columns; absent columns are skipped.
pub fn fill_nulls_with_zero(df: DataFrame, columns: &[&str]) -> PolarsResult<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .filter(|name| has_column(&df, name))
        .map(|name| col(*name).fill_null(lit(0)))
        .collect();
    if exprs.is_empty() {
        return Ok(df);
    }
    df.lazy().with_columns(exprs).collect()
}

/// Fill nulls in `name` with `default`, adding the column when it is absent.
pub fn fill_or_add_i64(df: DataFrame, name: &str, default: i64) -> PolarsResult<DataFrame> {
    let expr = if has_column(&df, name) {
        col(name).fill_null(lit(default))
    } else {
        lit(default).alias(name)
    };
    df.lazy().with_column(expr).collect()
}

/// Move `leading` columns to the front; the rest keep their relative order.
///
/// Leading names that the frame does not have are ignored.
pub fn order_columns(df: &DataFrame, leading: &[&str]) -> PolarsResult<DataFrame> {
    let names = column_names(df);
    let mut ordered: Vec<String> = leading
        .iter()
        .filter(|name| names.iter().any(|existing| existing == *name))
        .map(|name| (*name).to_string())
        .collect();
    ordered.extend(
        names
            .into_iter()
            .filter(|name| !leading.contains(&name.as_str())),
    );
    df.select(ordered)
}
