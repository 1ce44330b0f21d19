//! Property tests for period labels and ratios.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use proptest::prelude::*;

use tabrep_transform::{parse_calendar_date, with_period_column, with_ratio_column};

proptest! {
    #[test]
    fn quarter_matches_month_bucket(year in 1990i32..2100, ordinal in 1u32..=365) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let text = date.format("%Y-%m-%d").to_string();
        let frame = df!("date" => [text.as_str()]).unwrap();
        let out = with_period_column(&frame, "date", "period").unwrap();
        let label = out.column("period").unwrap().str().unwrap().get(0).map(str::to_string);
        let expected_quarter = (date.month() - 1) / 3 + 1;
        prop_assert_eq!(label, Some(format!("{year}Q{expected_quarter}")));
    }

    #[test]
    fn iso_dates_round_trip(year in 1990i32..2100, ordinal in 1u32..=365) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let text = date.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_calendar_date(&text), Some(date));
    }

    #[test]
    fn ratio_is_never_infinite(
        pairs in proptest::collection::vec(
            (
                proptest::option::of(-1.0e9f64..1.0e9),
                proptest::option::of(prop_oneof![Just(0.0f64), -1.0e9f64..1.0e9]),
            ),
            1..20,
        )
    ) {
        let (numerators, denominators): (Vec<Option<f64>>, Vec<Option<f64>>) =
            pairs.iter().copied().unzip();
        let frame = df!("n" => numerators, "d" => denominators).unwrap();
        let out = with_ratio_column(&frame, "n", "d", "ratio").unwrap();
        let ratios = out.column("ratio").unwrap().f64().unwrap();
        for (idx, (numerator, denominator)) in pairs.iter().enumerate() {
            let value = ratios.get(idx);
            if let Some(ratio) = value {
                prop_assert!(ratio.is_finite());
            }
            if numerator.is_none() || denominator.is_none() || *denominator == Some(0.0) {
                prop_assert_eq!(value, None);
            }
        }
    }
}
