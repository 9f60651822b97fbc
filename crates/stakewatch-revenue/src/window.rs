use chrono::{Days, Months, NaiveDate};
use stakewatch_types::Window;

/// First date included by `window` when anchored at `anchor`.
///
/// Subtraction is calendar arithmetic, not a fixed millisecond offset:
/// subtracting one month from a day with no equivalent in the target month
/// clamps to its last valid day (2024-03-31 minus 1m is 2024-02-29).
/// `None` means the window is unbounded and the whole series qualifies.
pub fn window_start(anchor: NaiveDate, window: Window) -> Option<NaiveDate> {
    match window {
        Window::OneWeek => anchor.checked_sub_days(Days::new(7)),
        Window::OneMonth => anchor.checked_sub_months(Months::new(1)),
        Window::OneYear => anchor.checked_sub_months(Months::new(12)),
        Window::Max => None,
    }
}

/// Trailing-window subset of an ascending series.
///
/// The anchor is the last element's own date, never wall-clock time, so the
/// result depends only on the input. Kept points satisfy
/// `date >= anchor - window`; since the series is ascending that is a
/// contiguous suffix and is returned as a subslice without copying. An empty
/// series stays empty.
///
/// NOTE: series must be pre-sorted in ascending date order
pub fn filter_window_by<T, F>(series: &[T], window: Window, date_of: F) -> &[T]
where
    F: Fn(&T) -> NaiveDate,
{
    debug_assert!(
        series.windows(2).all(|w| date_of(&w[0]) <= date_of(&w[1])),
        "Series must be sorted in ascending date order"
    );

    let Some(last) = series.last() else {
        return series;
    };
    let Some(start) = window_start(date_of(last), window) else {
        return series;
    };

    let first_kept = series.partition_point(|point| date_of(point) < start);
    &series[first_kept..]
}
