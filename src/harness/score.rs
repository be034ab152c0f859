use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("Label sequences differ in length: truth has {truth}, predicted has {predicted}")]
    LengthMismatch { truth: usize, predicted: usize },
}

/// Adjusted Rand index between two labelings of the same points.
///
/// Labels are compared only for equality, so the two sides may use unrelated
/// label values. Returns 1.0 for identical partitions (including the trivial
/// all-in-one and all-apart cases) and about 0.0 for random agreement.
pub fn adjusted_rand_score<T, P>(truth: &[T], predicted: &[P]) -> Result<f64, ScoreError>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    if truth.len() != predicted.len() {
        return Err(ScoreError::LengthMismatch {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }

    let n = truth.len() as f64;
    let mut contingency: HashMap<(&T, &P), f64> = HashMap::new();
    let mut truth_counts: HashMap<&T, f64> = HashMap::new();
    let mut predicted_counts: HashMap<&P, f64> = HashMap::new();

    for (t, p) in truth.iter().zip(predicted) {
        *contingency.entry((t, p)).or_default() += 1.0;
        *truth_counts.entry(t).or_default() += 1.0;
        *predicted_counts.entry(p).or_default() += 1.0;
    }

    let sum_squares: f64 = contingency.values().map(|c| c * c).sum();
    let truth_squares: f64 = truth_counts.values().map(|c| c * c).sum();
    let predicted_squares: f64 = predicted_counts.values().map(|c| c * c).sum();

    // Pair confusion matrix, counting ordered pairs
    let tp = sum_squares - n;
    let fp = predicted_squares - sum_squares;
    let fn_ = truth_squares - sum_squares;
    let tn = n * n - fp - fn_ - sum_squares;

    if fn_ == 0.0 && fp == 0.0 {
        return Ok(1.0);
    }

    Ok(2.0 * (tp * tn - fn_ * fp) / ((tp + fn_) * (fn_ + tn) + (tp + fp) * (fp + tn)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_up_to_relabeling() {
        let truth = [0, 0, 1, 1, 2];
        let predicted = ["b", "b", "a", "a", "c"];
        assert!(close(adjusted_rand_score(&truth, &predicted).unwrap(), 1.0));
    }

    #[test]
    fn test_known_partial_agreement() {
        let score = adjusted_rand_score(&[0, 0, 1, 2], &[0, 0, 1, 1]).unwrap();
        assert!(close(score, 4.0 / 7.0));

        let score = adjusted_rand_score(&[0, 0, 1, 1], &[0, 0, 1, 2]).unwrap();
        assert!(close(score, 4.0 / 7.0));
    }

    #[test]
    fn test_no_agreement() {
        let score = adjusted_rand_score(&[0, 0, 0, 0], &[0, 1, 2, 3]).unwrap();
        assert!(close(score, 0.0));
    }

    #[test]
    fn test_trivial_partitions() {
        assert_eq!(adjusted_rand_score(&[1, 1, 1], &[7, 7, 7]).unwrap(), 1.0);
        assert_eq!(adjusted_rand_score(&[1, 2, 3], &[4, 5, 6]).unwrap(), 1.0);
        assert_eq!(adjusted_rand_score::<u8, u8>(&[], &[]).unwrap(), 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = adjusted_rand_score(&[0, 1], &[0]).unwrap_err();
        assert_eq!(err, ScoreError::LengthMismatch { truth: 2, predicted: 1 });
    }
}
