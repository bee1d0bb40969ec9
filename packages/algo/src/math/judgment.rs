//! True/false mutation of a generated problem.
//!
//! A wrong statement differs from the true one by a small, plausible slip whose shape
//! depends on the category: a remainder off by one, a neighbouring prime in a factor
//! chain, a quotient from a neighbouring divisor, ignoring the order of operations.

use rand::prelude::*;

use super::categories::{factor_chain, statement, SMALL_PRIMES};
use super::distractor::near_miss_offsets;
use super::Problem;
use crate::catalog::MathCategory;

/// Render a deliberately wrong statement for `problem`.
///
/// The result always differs from `problem.equation_text`.
pub(crate) fn wrong_statement<R: Rng + ?Sized>(problem: &Problem, rng: &mut R) -> String {
    use MathCategory::*;

    let ops = &problem.operands;
    let op = |i: usize| ops.get(i).copied().unwrap_or_default();
    let category = problem.category;

    let shown = match category {
        DivideRemainder => {
            let divisor = op(1);
            let remainder = problem.remainder.unwrap_or_default();
            if rng.gen_bool(0.5) {
                let shifted = if remainder + 1 < divisor && (remainder == 0 || rng.gen_bool(0.5)) {
                    remainder + 1
                } else {
                    remainder - 1
                };
                statement(category, ops, problem.answer, Some(shifted.max(0)))
            } else {
                let quotient = shift_answer(problem.answer, &[1, -1], rng);
                statement(category, ops, quotient, problem.remainder)
            }
        }
        PrimeFactorization => {
            let mut factors: Vec<i64> = ops.iter().skip(1).copied().collect();
            if factors.is_empty() {
                return near_miss_statement(problem, rng);
            }
            let index = rng.gen_range(0..factors.len());
            factors[index] = adjacent_prime(factors[index], rng);
            factor_chain(op(0), &factors)
        }
        DivideTens | DivideExact => {
            let dividend = op(0);
            let divisor = op(1);
            let neighbour = [divisor - 1, divisor + 1]
                .into_iter()
                .filter(|d| *d > 1 && dividend % d == 0)
                .map(|d| dividend / d)
                .find(|q| *q != problem.answer);
            let quotient = neighbour
                .unwrap_or_else(|| shift_answer(problem.answer, near_miss_offsets(problem.answer), rng));
            statement(category, ops, quotient, None)
        }
        MultiplyTwoByOne | MultiplyThreeByOne => {
            // One row too many or too few in the times table.
            let a = op(0);
            let slip = if rng.gen_bool(0.5) { a } else { -a };
            let product = if problem.answer + slip > 0 {
                problem.answer + slip
            } else {
                problem.answer + a
            };
            statement(category, ops, product, None)
        }
        MultiplyTens => {
            // Place-value slip: one zero too many or too few.
            let product = if problem.answer % 100 == 0 && rng.gen_bool(0.5) {
                problem.answer / 10
            } else {
                problem.answer * 10
            };
            statement(category, ops, product, None)
        }
        AddThreeDigit | SubtractThreeDigit => {
            // Forgotten or extra carry/borrow.
            let value = shift_answer(problem.answer, &[10, -10, 100, -100, 1, -1], rng);
            statement(category, ops, value, None)
        }
        GreatestCommonFactor => {
            let g = problem.answer;
            let smaller = (2..g).rev().find(|d| g % d == 0);
            let value = smaller.unwrap_or_else(|| shift_answer(g, &[1, 2], rng));
            statement(category, ops, value, None)
        }
        LeastCommonMultiple => {
            let product = op(0) * op(1);
            let value = if product != problem.answer {
                product
            } else {
                problem.answer * 2
            };
            statement(category, ops, value, None)
        }
        OrderOfOperations => {
            // Evaluated left to right.
            let value = (op(0) + op(1)) * op(2);
            if value == problem.answer {
                return near_miss_statement(problem, rng);
            }
            statement(category, ops, value, None)
        }
        ParenthesesFirst => {
            // Brackets ignored.
            let value = op(0) - op(1) * op(2);
            if value <= 0 || value == problem.answer {
                return near_miss_statement(problem, rng);
            }
            statement(category, ops, value, None)
        }
        MultiplyTwoByTwo => near_miss_statement(problem, rng),
    };

    if shown == problem.equation_text {
        near_miss_statement(problem, rng)
    } else {
        shown
    }
}

fn near_miss_statement<R: Rng + ?Sized>(problem: &Problem, rng: &mut R) -> String {
    let value = shift_answer(problem.answer, near_miss_offsets(problem.answer), rng);
    statement(problem.category, &problem.operands, value, problem.remainder)
}

/// `answer` moved by one of `offsets`, staying positive and never equal to `answer`.
fn shift_answer<R: Rng + ?Sized>(answer: i64, offsets: &[i64], rng: &mut R) -> i64 {
    let mut candidates: Vec<i64> = offsets
        .iter()
        .map(|o| answer + o)
        .filter(|v| *v > 0 && *v != answer)
        .collect();
    candidates.shuffle(rng);
    candidates.pop().unwrap_or(answer + 1)
}

/// A different small prime next to `p` in the prime sequence.
fn adjacent_prime<R: Rng + ?Sized>(p: i64, rng: &mut R) -> i64 {
    let Some(pos) = SMALL_PRIMES.iter().position(|q| *q == p) else {
        return if p == 2 { 3 } else { 2 };
    };
    let below = pos.checked_sub(1).map(|i| SMALL_PRIMES[i]);
    let above = SMALL_PRIMES.get(pos + 1).copied();
    match (below, above) {
        (Some(b), Some(a)) => {
            if rng.gen_bool(0.5) {
                b
            } else {
                a
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => p + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{GeneratorConfig, ProblemGenerator};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_wrong_statement_always_differs() {
        let mut generator = ProblemGenerator::with_seed(GeneratorConfig::default(), 21);
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        for category in MathCategory::ALL {
            for _ in 0..300 {
                let problem = generator.generate(category);
                let shown = wrong_statement(&problem, &mut rng);
                assert_ne!(shown, problem.equation_text, "{category}");
            }
        }
    }

    #[test]
    fn test_prime_factorization_swaps_exactly_one_factor() {
        let mut generator = ProblemGenerator::with_seed(GeneratorConfig::default(), 23);
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        for _ in 0..200 {
            let problem = generator.generate(MathCategory::PrimeFactorization);
            let shown = wrong_statement(&problem, &mut rng);
            let shown_factors: Vec<i64> = shown
                .split('=')
                .nth(1)
                .unwrap()
                .split('×')
                .map(|f| f.trim().parse().unwrap())
                .collect();
            let true_factors = &problem.operands[1..];
            assert_eq!(shown_factors.len(), true_factors.len());
            let changed = shown_factors
                .iter()
                .zip(true_factors)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1, "{} vs {}", shown, problem.equation_text);
        }
    }

    #[test]
    fn test_remainder_mutation_stays_below_divisor() {
        let mut generator = ProblemGenerator::with_seed(GeneratorConfig::default(), 25);
        let mut rng = ChaCha8Rng::seed_from_u64(26);
        for _ in 0..300 {
            let problem = generator.generate(MathCategory::DivideRemainder);
            let shown = wrong_statement(&problem, &mut rng);
            if let Some((_, r)) = shown.split_once('…') {
                let r: i64 = r.trim().parse().unwrap();
                assert!(r < problem.operands[1]);
            }
        }
    }

    #[test]
    fn test_order_of_operations_uses_left_to_right_slip() {
        let problem = Problem::from_parts(MathCategory::OrderOfOperations, vec![5, 3, 4], 17, None);
        let mut rng = ChaCha8Rng::seed_from_u64(27);
        assert_eq!(wrong_statement(&problem, &mut rng), "5 + 3 × 4 = 32");
    }

    #[test]
    fn test_adjacent_prime() {
        let mut rng = ChaCha8Rng::seed_from_u64(28);
        assert_eq!(adjacent_prime(2, &mut rng), 3);
        assert_eq!(adjacent_prime(13, &mut rng), 11);
        let around_five = adjacent_prime(5, &mut rng);
        assert!(around_five == 3 || around_five == 7);
    }
}
