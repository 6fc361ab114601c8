/// Index of the largest score.
///
/// Scans left to right and only moves on a strictly greater value, so ties
/// resolve to the earliest index. `NaN` never wins against an earlier score.
/// Returns `None` for an empty slice.
#[must_use]
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;

    let mut best = 0;
    let mut max = *first;
    for (i, &score) in rest.iter().enumerate() {
        if score > max {
            max = score;
            best = i + 1;
        }
    }

    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(argmax(&[0.5, 0.9, 0.9, 0.1]), Some(1));
    }

    #[test]
    fn test_all_equal() {
        assert_eq!(argmax(&[0.25; 4]), Some(0));
    }

    #[test]
    fn test_last_is_max() {
        assert_eq!(argmax(&[0.1, 0.2, 0.3]), Some(2));
    }

    #[test]
    fn test_negative_scores() {
        assert_eq!(argmax(&[-3.0, -1.5, -2.0]), Some(1));
    }

    #[test]
    fn test_single() {
        assert_eq!(argmax(&[f32::MIN]), Some(0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_nan_ignored() {
        assert_eq!(argmax(&[0.2, f32::NAN, 0.1]), Some(0));
        assert_eq!(argmax(&[0.2, f32::NAN, 0.7]), Some(2));
    }
}
