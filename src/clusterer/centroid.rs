/// Move `center` along the line toward `point` by `step`.
///
/// `gap` is the current distance between the two and must be non-zero.
pub fn shift_toward(center: &mut [f64], point: &[f64], gap: f64, step: f64) {
    let scale = step / gap;

    for i in 0..center.len() {
        center[i] += scale * (point[i] - center[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_half_way() {
        let mut center = vec![0.0, 0.0];
        shift_toward(&mut center, &[2.0, 0.0], 2.0, 1.0);
        assert_eq!(center, vec![1.0, 0.0]);
    }

    #[test]
    fn test_shift_zero_step_is_noop() {
        let mut center = vec![1.0, -1.0];
        shift_toward(&mut center, &[5.0, 5.0], 7.2, 0.0);
        assert_eq!(center, vec![1.0, -1.0]);
    }
}
