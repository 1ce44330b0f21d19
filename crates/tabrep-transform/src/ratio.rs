//! Null-safe ratios between numeric columns.

use polars::prelude::*;

/// `numerator / denominator` as `Float64`, null when either side is null or
/// the denominator is zero. Never yields an infinite value.
pub fn safe_ratio(numerator: Expr, denominator: Expr) -> Expr {
    let denominator = denominator.cast(DataType::Float64);
    when(denominator.clone().neq(lit(0.0)))
        .then(numerator.cast(DataType::Float64) / denominator)
        .otherwise(lit(NULL).cast(DataType::Float64))
}

/// Adds `output` = `numerator / denominator` using [`safe_ratio`].
pub fn with_ratio_column(
    df: &DataFrame,
    numerator: &str,
    denominator: &str,
    output: &str,
) -> PolarsResult<DataFrame> {
    df.column(numerator)?;
    df.column(denominator)?;
    df.clone()
        .lazy()
        .with_column(safe_ratio(col(numerator), col(denominator)).alias(output))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_column_per_row() {
        let frame = df!(
            "attended" => [Some(2i64), Some(0), Some(5), None],
            "total" => [Some(4u32), Some(0), None, Some(3)],
        )
        .unwrap();
        let out = with_ratio_column(&frame, "attended", "total", "index").unwrap();
        let index = out.column("index").unwrap().f64().unwrap();
        assert_eq!(index.get(0), Some(0.5));
        assert_eq!(index.get(1), None);
        assert_eq!(index.get(2), None);
        assert_eq!(index.get(3), None);
    }

    #[test]
    fn zero_numerator_is_zero() {
        let frame = df!("attended" => [0i64], "total" => [4i64]).unwrap();
        let out = with_ratio_column(&frame, "attended", "total", "index").unwrap();
        assert_eq!(out.column("index").unwrap().f64().unwrap().get(0), Some(0.0));
    }

    #[test]
    fn missing_columns_are_errors() {
        let frame = df!("attended" => [1i64]).unwrap();
        assert!(with_ratio_column(&frame, "attended", "total", "index").is_err());
    }
}
