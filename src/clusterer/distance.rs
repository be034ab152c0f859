pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;

    for i in 0..a.len() {
        let d = a[i] - b[i];
        sum += d * d;
    }

    sum.sqrt()
}

/// Smallest value of an `(index, value)` sequence; the first index wins ties.
pub(crate) fn argmin<I>(items: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    items.into_iter().fold(None, |best, (i, v)| match best {
        Some((_, b)) if b <= v => best,
        _ => Some((i, v)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_known_values() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean_distance(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_argmin_prefers_lowest_index_on_ties() {
        let values = vec![3.0, 1.0, 2.0, 1.0];
        assert_eq!(argmin(values.into_iter().enumerate()), Some((1, 1.0)));
    }

    #[test]
    fn test_argmin_keeps_original_indices() {
        let filtered = vec![(4, 2.0), (7, 0.5), (9, 0.5)];
        assert_eq!(argmin(filtered), Some((7, 0.5)));
    }

    #[test]
    fn test_argmin_empty() {
        assert_eq!(argmin(Vec::new()), None);
    }
}
