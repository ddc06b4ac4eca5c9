pub struct NumberUtil;

impl NumberUtil {
    /// Round to the nearest integer, halves going toward positive infinity.
    ///
    /// `-2.5` becomes `-2` and `2.5` becomes `3`, which is what the dashboard
    /// cards have always shown. `f64::round` would give `-3` for the former.
    #[inline]
    pub fn round_half_up(value: f64) -> i64 {
        let floor = value.floor();
        if value - floor >= 0.5 {
            (floor + 1.0) as i64
        } else {
            floor as i64
        }
    }

    /// Percentage change from `previous` to `current`, `0` when `previous` is zero.
    #[inline]
    pub fn percentage_change(previous: f64, current: f64) -> i64 {
        if previous == 0.0 {
            return 0;
        }
        Self::round_half_up((current - previous) / previous * 100.0)
    }
}
