//! Reusable frame operators for the report pipelines.
//!
//! Everything here is a pure function over Polars frames: joins that keep
//! left-table order, long-to-wide pivots, quarter periods and null-safe
//! ratios.

pub mod frame;
pub mod ops;
pub mod period;
pub mod pivot;
pub mod ratio;

pub use frame::{FrameOrigin, SourceFrame};
pub use ops::{
    column_names, empty_frame, fill_nulls_with_zero, fill_or_add_i64, has_column, left_join_on,
    order_columns,
};
pub use period::{
    any_to_date, calendar_dates, parse_calendar_date, quarter_label, with_period_column,
};
pub use pivot::{distinct_categories, pivot_wide_mean};
pub use ratio::{safe_ratio, with_ratio_column};
