//! Return-period estimation for annual peak flow events
//!
//! Ranks a station's annual peak flows with average-rank tie handling and
//! converts the ranks to empirical exceedance probabilities using the Weibull
//! plotting position, 100 * rank / (N + 1). Rank 1 is the largest flow, so a
//! low probability marks a rare event.

use std::cmp::Ordering;

/// One plottable return-period point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPeriodPoint {
    /// Empirical exceedance probability in percent
    pub exceedance_probability: f64,

    /// Annual peak flow for this point
    pub peak_flow: f64,
}

/// Compute Weibull plotting-position points for a set of annual peak flows
///
/// NaN peaks are dropped. The result is ordered by descending peak flow;
/// tied flows share the average of the ranks they occupy, so equal peaks map
/// to equal probabilities.
pub fn weibull_points(peaks: &[f64]) -> Vec<ReturnPeriodPoint> {
    let mut sorted: Vec<f64> = peaks.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let ascending = average_ranks(&sorted);
    let n = sorted.len() as f64;

    sorted
        .iter()
        .zip(ascending)
        .map(|(&peak_flow, rank_asc)| {
            // Flip ascending ranks so the largest flow carries rank 1
            let rank = n + 1.0 - rank_asc;
            ReturnPeriodPoint {
                exceedance_probability: 100.0 * rank / (n + 1.0),
                peak_flow,
            }
        })
        .collect()
}

/// Ascending 1-based ranks with average tie handling
///
/// Tied values receive the mean of the ranks they would occupy, matching the
/// conventional "average" ranking method used in hydrologic frequency
/// analysis.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        // Extend over the run of values tied with order[i]
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }

        // Positions i..=j hold 1-based ranks i+1..=j+1; ties share the mean
        let average = (i + j + 2) as f64 / 2.0;
        for &index in &order[i..=j] {
            ranks[index] = average;
        }
        i = j + 1;
    }

    ranks
}
