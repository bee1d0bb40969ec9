//! Per-category operand sampling and rendering.
//!
//! Every sampler draws operands independently from their own ranges and returns
//! `None` when a compound constraint is violated; the generator retries in that case.

use rand::prelude::*;

use crate::catalog::MathCategory;

/// Small primes used by factorization problems and their mutations.
pub(crate) const SMALL_PRIMES: [i64; 6] = [2, 3, 5, 7, 11, 13];

/// Operands and solution of one problem before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Draft {
    pub operands: Vec<i64>,
    pub answer: i64,
    pub remainder: Option<i64>,
}

impl Draft {
    fn new(operands: Vec<i64>, answer: i64) -> Self {
        Self {
            operands,
            answer,
            remainder: None,
        }
    }
}

pub(crate) fn sample<R: Rng + ?Sized>(category: MathCategory, rng: &mut R) -> Option<Draft> {
    use MathCategory::*;

    match category {
        AddThreeDigit => {
            let a = rng.gen_range(100..=899);
            let b = rng.gen_range(100..=899);
            let sum = a + b;
            (sum <= 999).then(|| Draft::new(vec![a, b], sum))
        }
        SubtractThreeDigit => {
            let a = rng.gen_range(200..=999);
            let b = rng.gen_range(100..=899);
            let diff = a - b;
            (diff >= 10).then(|| Draft::new(vec![a, b], diff))
        }
        MultiplyTens => {
            let a = 10 * rng.gen_range(2..=9);
            let b = if rng.gen_bool(0.5) {
                rng.gen_range(2..=9)
            } else {
                10 * rng.gen_range(2..=9)
            };
            let product = a * b;
            (product <= 4000).then(|| Draft::new(vec![a, b], product))
        }
        MultiplyTwoByOne => {
            let a = rng.gen_range(12..=99);
            let b = rng.gen_range(2..=9);
            let product = a * b;
            (product <= 500).then(|| Draft::new(vec![a, b], product))
        }
        MultiplyThreeByOne => {
            let a = rng.gen_range(100..=999);
            let b = rng.gen_range(2..=9);
            let product = a * b;
            (product <= 3000).then(|| Draft::new(vec![a, b], product))
        }
        MultiplyTwoByTwo => {
            let a = rng.gen_range(11..=99);
            let b = rng.gen_range(11..=99);
            let product = a * b;
            (product <= 2500).then(|| Draft::new(vec![a, b], product))
        }
        DivideTens => {
            let divisor = rng.gen_range(2..=9);
            let base = rng.gen_range(2..=9);
            let scale = if rng.gen_bool(0.5) { 10 } else { 100 };
            let quotient = base * scale;
            let dividend = divisor * quotient;
            (dividend <= 2000).then(|| Draft::new(vec![dividend, divisor], quotient))
        }
        DivideExact => {
            let divisor = rng.gen_range(2..=9);
            let quotient = rng.gen_range(12..=99);
            let dividend = divisor * quotient;
            (dividend >= 100).then(|| Draft::new(vec![dividend, divisor], quotient))
        }
        DivideRemainder => {
            let divisor = rng.gen_range(2..=9);
            let quotient = rng.gen_range(1..=12);
            let remainder = rng.gen_range(1..divisor);
            let dividend = divisor * quotient + remainder;
            (10..=99).contains(&dividend).then(|| Draft {
                operands: vec![dividend, divisor],
                answer: quotient,
                remainder: Some(remainder),
            })
        }
        PrimeFactorization => {
            let count = rng.gen_range(3..=5);
            let mut factors: Vec<i64> = (0..count)
                .map(|_| *SMALL_PRIMES[..4].choose(rng).unwrap_or(&2))
                .collect();
            factors.sort_unstable();
            let n: i64 = factors.iter().product();
            if !(12..=200).contains(&n) {
                return None;
            }
            let answer = *factors.last()?;
            let mut operands = vec![n];
            operands.extend(factors);
            Some(Draft::new(operands, answer))
        }
        GreatestCommonFactor => {
            let g = rng.gen_range(2..=12);
            let x = rng.gen_range(1..=9);
            let y = rng.gen_range(1..=9);
            if x == y || gcd(x, y) != 1 {
                return None;
            }
            let (a, b) = (g * x, g * y);
            (a <= 100 && b <= 100).then(|| Draft::new(vec![a, b], g))
        }
        LeastCommonMultiple => {
            let a = rng.gen_range(2..=15);
            let b = rng.gen_range(2..=15);
            if a == b {
                return None;
            }
            let l = lcm(a, b);
            (l <= 120).then(|| Draft::new(vec![a, b], l))
        }
        OrderOfOperations => {
            let a = rng.gen_range(2..=60);
            let b = rng.gen_range(2..=9);
            let c = rng.gen_range(2..=9);
            let result = a + b * c;
            (result <= 120).then(|| Draft::new(vec![a, b, c], result))
        }
        ParenthesesFirst => {
            let a = rng.gen_range(10..=50);
            let b = rng.gen_range(2..=9);
            let c = rng.gen_range(2..=9);
            if a <= b {
                return None;
            }
            let result = (a - b) * c;
            (result <= 300).then(|| Draft::new(vec![a, b, c], result))
        }
    }
}

/// A fixed, always-valid problem per category, used once the retry ceiling is hit.
pub(crate) fn canonical(category: MathCategory) -> Draft {
    use MathCategory::*;

    match category {
        AddThreeDigit => Draft::new(vec![345, 231], 576),
        SubtractThreeDigit => Draft::new(vec![642, 318], 324),
        MultiplyTens => Draft::new(vec![30, 4], 120),
        MultiplyTwoByOne => Draft::new(vec![23, 4], 92),
        MultiplyThreeByOne => Draft::new(vec![214, 3], 642),
        MultiplyTwoByTwo => Draft::new(vec![12, 13], 156),
        DivideTens => Draft::new(vec![80, 4], 20),
        DivideExact => Draft::new(vec![126, 3], 42),
        DivideRemainder => Draft {
            operands: vec![38, 5],
            answer: 7,
            remainder: Some(3),
        },
        PrimeFactorization => Draft::new(vec![36, 2, 2, 3, 3], 3),
        GreatestCommonFactor => Draft::new(vec![12, 18], 6),
        LeastCommonMultiple => Draft::new(vec![4, 6], 12),
        OrderOfOperations => Draft::new(vec![5, 3, 4], 17),
        ParenthesesFirst => Draft::new(vec![12, 4, 3], 24),
    }
}

/// Problem text with the solution hidden.
pub(crate) fn display(category: MathCategory, operands: &[i64]) -> String {
    use MathCategory::*;

    let op = |i: usize| operands.get(i).copied().unwrap_or_default();
    match category {
        AddThreeDigit => format!("{} + {} = ?", op(0), op(1)),
        SubtractThreeDigit => format!("{} - {} = ?", op(0), op(1)),
        MultiplyTens | MultiplyTwoByOne | MultiplyThreeByOne | MultiplyTwoByTwo => {
            format!("{} × {} = ?", op(0), op(1))
        }
        DivideTens | DivideExact => format!("{} ÷ {} = ?", op(0), op(1)),
        DivideRemainder => format!("{} ÷ {} = ? … ?", op(0), op(1)),
        PrimeFactorization => {
            let shown = operands.len().saturating_sub(2);
            let mut parts: Vec<String> = operands
                .iter()
                .skip(1)
                .take(shown)
                .map(i64::to_string)
                .collect();
            parts.push("?".to_string());
            format!("{} = {}", op(0), parts.join(" × "))
        }
        GreatestCommonFactor => format!("GCF({}, {}) = ?", op(0), op(1)),
        LeastCommonMultiple => format!("LCM({}, {}) = ?", op(0), op(1)),
        OrderOfOperations => format!("{} + {} × {} = ?", op(0), op(1), op(2)),
        ParenthesesFirst => format!("({} - {}) × {} = ?", op(0), op(1), op(2)),
    }
}

/// Full statement with the given solution filled in.
///
/// Rendering a statement with the true solution yields the problem's equation; the
/// true/false mutation renders it with a wrong one.
pub(crate) fn statement(
    category: MathCategory,
    operands: &[i64],
    answer: i64,
    remainder: Option<i64>,
) -> String {
    use MathCategory::*;

    let op = |i: usize| operands.get(i).copied().unwrap_or_default();
    match category {
        DivideRemainder => match remainder {
            Some(r) if r != 0 => format!("{} ÷ {} = {} … {}", op(0), op(1), answer, r),
            _ => format!("{} ÷ {} = {}", op(0), op(1), answer),
        },
        PrimeFactorization => factor_chain(op(0), operands.get(1..).unwrap_or_default()),
        _ => display(category, operands).replacen('?', &answer.to_string(), 1),
    }
}

pub(crate) fn factor_chain(n: i64, factors: &[i64]) -> String {
    let chain: Vec<String> = factors.iter().map(i64::to_string).collect();
    format!("{} = {}", n, chain.join(" × "))
}

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub(crate) fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_canonical_problems_are_correct() {
        for category in MathCategory::ALL {
            let draft = canonical(category);
            assert_eq!(solve(category, &draft.operands), (draft.answer, draft.remainder), "{category}");
        }
    }

    #[test]
    fn test_sampled_problems_are_correct() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for category in MathCategory::ALL {
            let mut accepted = 0;
            for _ in 0..500 {
                if let Some(draft) = sample(category, &mut rng) {
                    accepted += 1;
                    assert_eq!(
                        solve(category, &draft.operands),
                        (draft.answer, draft.remainder),
                        "{category} {:?}",
                        draft.operands
                    );
                }
            }
            assert!(accepted > 50, "{category} rejects too often: {accepted}/500");
        }
    }

    #[test]
    fn test_display_and_statement() {
        let d = canonical(MathCategory::DivideRemainder);
        assert_eq!(display(MathCategory::DivideRemainder, &d.operands), "38 ÷ 5 = ? … ?");
        assert_eq!(
            statement(MathCategory::DivideRemainder, &d.operands, d.answer, d.remainder),
            "38 ÷ 5 = 7 … 3"
        );

        let p = canonical(MathCategory::PrimeFactorization);
        assert_eq!(display(MathCategory::PrimeFactorization, &p.operands), "36 = 2 × 2 × 3 × ?");
        assert_eq!(
            statement(MathCategory::PrimeFactorization, &p.operands, p.answer, None),
            "36 = 2 × 2 × 3 × 3"
        );

        let m = canonical(MathCategory::ParenthesesFirst);
        assert_eq!(
            statement(MathCategory::ParenthesesFirst, &m.operands, m.answer, None),
            "(12 - 4) × 3 = 24"
        );
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
    }

    /// Independent reference solution used to check sampled drafts.
    fn solve(category: MathCategory, ops: &[i64]) -> (i64, Option<i64>) {
        use MathCategory::*;
        match category {
            AddThreeDigit => (ops[0] + ops[1], None),
            SubtractThreeDigit => (ops[0] - ops[1], None),
            MultiplyTens | MultiplyTwoByOne | MultiplyThreeByOne | MultiplyTwoByTwo => {
                (ops[0] * ops[1], None)
            }
            DivideTens | DivideExact => {
                assert_eq!(ops[0] % ops[1], 0);
                (ops[0] / ops[1], None)
            }
            DivideRemainder => (ops[0] / ops[1], Some(ops[0] % ops[1])),
            PrimeFactorization => {
                assert_eq!(ops[1..].iter().product::<i64>(), ops[0]);
                (*ops.last().unwrap(), None)
            }
            GreatestCommonFactor => (gcd(ops[0], ops[1]), None),
            LeastCommonMultiple => (lcm(ops[0], ops[1]), None),
            OrderOfOperations => (ops[0] + ops[1] * ops[2], None),
            ParenthesesFirst => ((ops[0] - ops[1]) * ops[2], None),
        }
    }
}
