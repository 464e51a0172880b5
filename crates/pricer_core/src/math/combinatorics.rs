//! Log-space combinatorics.
//!
//! Binomial probabilities for large step counts overflow or underflow when
//! evaluated directly (`C(n, i)` exceeds `f64::MAX` near n = 1030). All
//! quantities here are accumulated as natural logarithms instead.

use num_traits::Float;

/// Cumulative log-factorial table `[ln 0!, ln 1!, ..., ln n!]`.
///
/// # Examples
/// ```
/// use pricer_core::math::combinatorics::log_factorials;
///
/// let table = log_factorials::<f64>(4);
/// assert_eq!(table.len(), 5);
/// assert!((table[4] - 24.0_f64.ln()).abs() < 1e-12);
/// ```
pub fn log_factorials<T: Float>(n: usize) -> Vec<T> {
    let mut table = Vec::with_capacity(n + 1);
    let mut acc = T::zero();
    table.push(acc);
    for k in 1..=n {
        acc = acc + T::from(k).unwrap_or_else(T::nan).ln();
        table.push(acc);
    }
    table
}

/// Log-probabilities of reaching each terminal node of an `n`-step
/// recombining binomial tree with up-probability `p`.
///
/// Entry `i` is `ln C(n, i) + i ln p + (n - i) ln(1 - p)`, i.e. the log of
/// the probability of exactly `i` up-moves. Degenerate `p = 0` or `p = 1`
/// yields `-inf` for unreachable nodes, which exponentiates to zero.
///
/// # Examples
/// ```
/// use pricer_core::math::combinatorics::binomial_log_weights;
///
/// let w = binomial_log_weights(2, 0.5_f64);
/// assert!((w[1].exp() - 0.5).abs() < 1e-12);
/// ```
pub fn binomial_log_weights<T: Float>(n: usize, p: T) -> Vec<T> {
    let table = log_factorials::<T>(n);
    let ln_p = p.ln();
    let ln_q = (T::one() - p).ln();

    (0..=n)
        .map(|i| {
            let ups = T::from(i).unwrap_or_else(T::nan);
            let downs = T::from(n - i).unwrap_or_else(T::nan);
            table[n] - table[i] - table[n - i] + mul_log(ups, ln_p) + mul_log(downs, ln_q)
        })
        .collect()
}

/// `count * ln_x` with the convention `0 * -inf = 0`.
#[inline]
fn mul_log<T: Float>(count: T, ln_x: T) -> T {
    if count == T::zero() {
        T::zero()
    } else {
        count * ln_x
    }
}
