//! Distractor generation for multiple-choice rounds.
//!
//! Wrong options are biased toward near misses whose size scales with the magnitude of
//! the correct answer, so they stay plausible instead of wildly off.

use std::collections::HashSet;

use rand::prelude::*;

/// Random-offset draws before falling back to a sequential fill.
const MAX_RANDOM_DRAWS: usize = 200;

/// Curated near-miss offsets for an answer of this magnitude.
pub fn near_miss_offsets(answer: i64) -> &'static [i64] {
    match answer.abs() {
        0..=20 => &[1, -1, 2, -2, 3, -3, 4, -4, 5, -5],
        21..=100 => &[1, -1, 2, -2, 5, -5, 10, -10],
        101..=1000 => &[1, -1, 5, -5, 10, -10, 20, -20, 50, -50],
        _ => &[1, -1, 10, -10, 50, -50, 100, -100],
    }
}

/// Spread of the random offsets used once the curated list is exhausted.
fn random_spread(answer: i64) -> i64 {
    (answer.abs() / 5).max(5)
}

/// `count` distinct positive values, none equal to `answer`.
pub fn distractors<R: Rng + ?Sized>(answer: i64, count: usize, rng: &mut R) -> Vec<i64> {
    let mut chosen: Vec<i64> = Vec::with_capacity(count);
    let mut taken: HashSet<i64> = HashSet::with_capacity(count + 1);
    taken.insert(answer);

    let mut offsets = near_miss_offsets(answer).to_vec();
    offsets.shuffle(rng);
    for offset in offsets {
        if chosen.len() == count {
            return chosen;
        }
        let candidate = answer + offset;
        if candidate > 0 && taken.insert(candidate) {
            chosen.push(candidate);
        }
    }

    let spread = random_spread(answer);
    let mut draws = 0;
    while chosen.len() < count && draws < MAX_RANDOM_DRAWS {
        draws += 1;
        let magnitude = rng.gen_range(1..=spread);
        let candidate = if rng.gen_bool(0.5) {
            answer + magnitude
        } else {
            answer - magnitude
        };
        if candidate > 0 && taken.insert(candidate) {
            chosen.push(candidate);
        }
    }

    let mut next = answer.max(0) + 1;
    while chosen.len() < count {
        if taken.insert(next) {
            chosen.push(next);
        }
        next += 1;
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn assert_valid(answer: i64, count: usize, values: &[i64]) {
        assert_eq!(values.len(), count, "answer {answer}");
        let unique: HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), count, "duplicates for {answer}: {values:?}");
        assert!(values.iter().all(|v| *v > 0), "non-positive for {answer}: {values:?}");
        assert!(!values.contains(&answer));
    }

    #[test]
    fn test_distinct_positive_for_reference_answers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for answer in [1, 7, 20, 63, 500] {
            for count in [1, 3, 5, 9] {
                for _ in 0..200 {
                    let values = distractors(answer, count, &mut rng);
                    assert_valid(answer, count, &values);
                }
            }
        }
    }

    #[test]
    fn test_small_answers_stay_near() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let values = distractors(7, 3, &mut rng);
        assert!(values.iter().all(|v| (v - 7).abs() <= 5), "{values:?}");
    }

    #[test]
    fn test_large_answers_use_wider_offsets() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let values = distractors(500, 8, &mut rng);
        assert!(values.iter().all(|v| (v - 500).abs() <= 100), "{values:?}");
        assert!(values.iter().any(|v| (v - 500).abs() >= 5));
    }

    #[test]
    fn test_exhausted_offsets_fill_randomly() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        // Only five positive curated offsets exist for 1; the rest come from the fill.
        let values = distractors(1, 12, &mut rng);
        assert_valid(1, 12, &values);
    }

    #[test]
    fn test_zero_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(distractors(42, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_non_positive_answer() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let values = distractors(0, 4, &mut rng);
        assert_valid(0, 4, &values);
    }
}
