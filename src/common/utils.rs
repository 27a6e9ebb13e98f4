//! This file provides some common numerical functions.


/// Returns `ln(sum_i exp(xs[i]))` without overflowing.
#[inline(always)]
pub(crate) fn log_sum_exp(xs: &[f64]) -> f64 {
    let max = xs.iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() { return max; }

    let sum = xs.iter()
        .map(|x| (x - max).exp())
        .sum::<f64>();
    max + sum.ln()
}


/// Returns the index of the first maximal element.
/// Ties go to the smaller index.
#[inline(always)]
pub(crate) fn argmax(xs: &[f64]) -> usize {
    xs.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, max), (i, &x)| {
            if x > max { (i, x) } else { (best, max) }
        })
        .0
}
