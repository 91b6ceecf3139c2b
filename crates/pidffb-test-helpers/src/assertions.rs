//! Custom assertion macros for testing.

/// Assert that two floating-point values are approximately equal.
///
/// # Example
///
/// ```rust
/// use pidffb_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0_f64, 1.0001_f64, 0.001_f64);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that a per-axis force sequence matches tick by tick.
///
/// Reports the first mismatching tick instead of dumping both sequences.
///
/// # Example
///
/// ```rust
/// use pidffb_test_helpers::assert_force_trace;
///
/// let trace = vec![[100, 0], [0, 0]];
/// assert_force_trace!(trace, [[100, 0], [0, 0]]);
/// ```
#[macro_export]
macro_rules! assert_force_trace {
    ($actual:expr, $expected:expr $(,)?) => {
        let actual: Vec<[i32; 2]> = $actual.into_iter().collect();
        let expected: Vec<[i32; 2]> = $expected.into_iter().collect();
        for (tick, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
            if a != e {
                panic!(
                    "force mismatch at tick {}\n  actual: `{:?}`,\n expected: `{:?}`",
                    tick, a, e
                );
            }
        }
        if actual.len() != expected.len() {
            panic!(
                "force trace length mismatch: actual {} ticks, expected {}",
                actual.len(),
                expected.len()
            );
        }
    };
}
