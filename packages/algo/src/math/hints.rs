//! Solving hints.
//!
//! Each hint explains a method for the concrete operands; none of them states the
//! answer.

use crate::catalog::MathCategory;

pub fn hint_for(category: MathCategory, operands: &[i64]) -> String {
    use MathCategory::*;

    let op = |i: usize| operands.get(i).copied().unwrap_or_default();
    match category {
        AddThreeDigit => format!(
            "Add the ones, then the tens, then the hundreds of {} and {}. Carry 1 whenever a column reaches 10.",
            op(0),
            op(1)
        ),
        SubtractThreeDigit => format!(
            "Subtract {} from {} column by column, starting with the ones. Borrow 10 from the next column when the top digit is smaller.",
            op(1),
            op(0)
        ),
        MultiplyTens => {
            let zeros = trailing_zeros(op(0)) + trailing_zeros(op(1));
            format!(
                "Multiply {} × {} without the zeros, then write {} zero{} after the result.",
                strip_zeros(op(0)),
                strip_zeros(op(1)),
                zeros,
                if zeros == 1 { "" } else { "s" }
            )
        }
        MultiplyTwoByOne | MultiplyThreeByOne => {
            let a = op(0);
            let b = op(1);
            let tens_part = a - a % 10;
            if a % 10 == 0 {
                format!("Multiply {} × {b}, then add a zero.", a / 10)
            } else {
                format!(
                    "Split {a} into {tens_part} and {}. Work out {tens_part} × {b} and {} × {b}, then add the two results.",
                    a % 10,
                    a % 10
                )
            }
        }
        MultiplyTwoByTwo => {
            let a = op(0);
            let b = op(1);
            if b % 10 == 0 {
                format!("Multiply {a} × {}, then add a zero.", b / 10)
            } else {
                format!(
                    "Multiply {a} by {} and by {}, then add the two partial products.",
                    b - b % 10,
                    b % 10
                )
            }
        }
        DivideTens => {
            let zeros = trailing_zeros(op(0));
            format!(
                "Hide the {} zero{} of {}, divide by {}, then put the zero{} back.",
                zeros,
                if zeros == 1 { "" } else { "s" },
                op(0),
                op(1),
                if zeros == 1 { "" } else { "s" }
            )
        }
        DivideExact => format!(
            "Ask yourself: {} times what makes {}? Try the tens digit first, then the ones.",
            op(1),
            op(0)
        ),
        DivideRemainder => format!(
            "Find the biggest multiple of {} that is not more than {}. What is left over is the remainder, and it must be smaller than {}.",
            op(1),
            op(0),
            op(1)
        ),
        PrimeFactorization => format!(
            "Keep dividing {} by the smallest prime that fits (2, 3, 5, 7 …) until only 1 is left.",
            op(0)
        ),
        GreatestCommonFactor => format!(
            "List the factors of {} and of {}. The largest number on both lists is the answer.",
            op(0),
            op(1)
        ),
        LeastCommonMultiple => format!(
            "Count up in steps of {} and check each number: the first one {} also divides is the answer.",
            op(0).max(op(1)),
            op(0).min(op(1))
        ),
        OrderOfOperations => format!(
            "Multiply before you add: work out {} × {} first, then add {}.",
            op(1),
            op(2),
            op(0)
        ),
        ParenthesesFirst => format!(
            "Brackets come first: work out {} - {}, then multiply by {}.",
            op(0),
            op(1),
            op(2)
        ),
    }
}

fn trailing_zeros(mut n: i64) -> u32 {
    let mut zeros = 0;
    while n != 0 && n % 10 == 0 {
        n /= 10;
        zeros += 1;
    }
    zeros
}

fn strip_zeros(n: i64) -> i64 {
    n / 10i64.pow(trailing_zeros(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tens_hint_counts_zeros() {
        let hint = hint_for(MathCategory::MultiplyTens, &[30, 40]);
        assert!(hint.contains("3 × 4"));
        assert!(hint.contains("2 zeros"));
    }

    #[test]
    fn test_hint_never_states_answer_for_canonical_problems() {
        for category in MathCategory::ALL {
            let draft = super::super::categories::canonical(category);
            let hint = hint_for(category, &draft.operands);
            assert!(!hint.is_empty());
            assert!(
                !hint.contains(&format!("= {}", draft.answer)),
                "{category}: {hint}"
            );
        }
    }

    #[test]
    fn test_round_factor_hints_skip_zero_part() {
        let hint = hint_for(MathCategory::MultiplyTwoByOne, &[40, 3]);
        assert_eq!(hint, "Multiply 4 × 3, then add a zero.");
        assert!(!hint.contains("0 × 3"));

        let hint = hint_for(MathCategory::MultiplyTwoByTwo, &[23, 40]);
        assert_eq!(hint, "Multiply 23 × 4, then add a zero.");

        let hint = hint_for(MathCategory::MultiplyThreeByOne, &[456, 7]);
        assert!(hint.contains("Split 456 into 450 and 6"));
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(trailing_zeros(300), 2);
        assert_eq!(trailing_zeros(7), 0);
        assert_eq!(trailing_zeros(0), 0);
        assert_eq!(strip_zeros(4500), 45);
    }
}
