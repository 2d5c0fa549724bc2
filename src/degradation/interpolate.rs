//! Piecewise-linear lookup over breakpoint tables.

use super::profiles::Breakpoint;

/// Looks up `x` in a table sorted ascending by key.
///
/// An exact key match returns the tabulated value untouched. Between two
/// breakpoints the value is interpolated linearly. Outside the table the
/// nearest edge value is returned (no extrapolation). An empty table yields
/// `0.0`.
///
/// # Examples
///
/// ```
/// use bess_sim::degradation::interpolate::interpolate;
///
/// let table = [(0.0, 10.0), (1.0, 20.0)];
/// assert_eq!(interpolate(&table, 0.5), 15.0);
/// assert_eq!(interpolate(&table, 3.0), 20.0);
/// ```
pub fn interpolate(table: &[Breakpoint], x: f64) -> f64 {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (table.first(), table.last())
    else {
        return 0.0;
    };

    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }
    if let Some(&(_, y)) = table.iter().find(|(k, _)| *k == x) {
        return y;
    }

    // `x` lies strictly inside the table, so some window brackets it.
    table
        .windows(2)
        .find(|w| x > w[0].0 && x < w[1].0)
        .map_or(last_y, |w| lerp(w[0], w[1], x))
}

fn lerp((x0, y0): Breakpoint, (x1, y1): Breakpoint, x: f64) -> f64 {
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[Breakpoint] = &[(0.25, 1.2), (0.5, 1.0), (1.0, 0.8), (2.0, 0.6)];

    #[test]
    fn exact_breakpoints_return_table_values() {
        for &(x, y) in TABLE {
            assert_eq!(interpolate(TABLE, x), y);
        }
    }

    #[test]
    fn midpoint_is_linear() {
        assert!((interpolate(TABLE, 0.75) - 0.9).abs() < 1e-12);
        assert!((interpolate(TABLE, 1.5) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn clamps_below_and_above() {
        assert_eq!(interpolate(TABLE, 0.1), 1.2);
        assert_eq!(interpolate(TABLE, 0.0), 1.2);
        assert_eq!(interpolate(TABLE, 5.0), 0.6);
    }

    #[test]
    fn empty_table_is_zero() {
        assert_eq!(interpolate(&[], 1.0), 0.0);
    }

    #[test]
    fn single_breakpoint_is_constant() {
        let table = [(3.0, 7.0)];
        assert_eq!(interpolate(&table, 1.0), 7.0);
        assert_eq!(interpolate(&table, 9.0), 7.0);
    }
}
