//! Math category and topic tables.
//!
//! A category is one problem shape with its own numeric ranges; a topic (chapter)
//! groups a fixed, ordered subset of categories.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MathCategory {
    AddThreeDigit,
    SubtractThreeDigit,
    MultiplyTens,
    MultiplyTwoByOne,
    MultiplyThreeByOne,
    MultiplyTwoByTwo,
    DivideTens,
    DivideExact,
    DivideRemainder,
    PrimeFactorization,
    GreatestCommonFactor,
    LeastCommonMultiple,
    OrderOfOperations,
    ParenthesesFirst,
}

impl MathCategory {
    pub const ALL: [MathCategory; 14] = [
        MathCategory::AddThreeDigit,
        MathCategory::SubtractThreeDigit,
        MathCategory::MultiplyTens,
        MathCategory::MultiplyTwoByOne,
        MathCategory::MultiplyThreeByOne,
        MathCategory::MultiplyTwoByTwo,
        MathCategory::DivideTens,
        MathCategory::DivideExact,
        MathCategory::DivideRemainder,
        MathCategory::PrimeFactorization,
        MathCategory::GreatestCommonFactor,
        MathCategory::LeastCommonMultiple,
        MathCategory::OrderOfOperations,
        MathCategory::ParenthesesFirst,
    ];

    /// Category used when a caller names one that does not exist.
    pub const FALLBACK: MathCategory = MathCategory::MultiplyTwoByOne;

    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddThreeDigit => "add_three_digit",
            Self::SubtractThreeDigit => "subtract_three_digit",
            Self::MultiplyTens => "multiply_tens",
            Self::MultiplyTwoByOne => "multiply_two_by_one",
            Self::MultiplyThreeByOne => "multiply_three_by_one",
            Self::MultiplyTwoByTwo => "multiply_two_by_two",
            Self::DivideTens => "divide_tens",
            Self::DivideExact => "divide_exact",
            Self::DivideRemainder => "divide_remainder",
            Self::PrimeFactorization => "prime_factorization",
            Self::GreatestCommonFactor => "greatest_common_factor",
            Self::LeastCommonMultiple => "least_common_multiple",
            Self::OrderOfOperations => "order_of_operations",
            Self::ParenthesesFirst => "parentheses_first",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AddThreeDigit => "Three-digit addition",
            Self::SubtractThreeDigit => "Three-digit subtraction",
            Self::MultiplyTens => "Multiplying by tens",
            Self::MultiplyTwoByOne => "Two-digit by one-digit multiplication",
            Self::MultiplyThreeByOne => "Three-digit by one-digit multiplication",
            Self::MultiplyTwoByTwo => "Two-digit by two-digit multiplication",
            Self::DivideTens => "Dividing tens and hundreds",
            Self::DivideExact => "Division without remainder",
            Self::DivideRemainder => "Division with remainder",
            Self::PrimeFactorization => "Prime factorization",
            Self::GreatestCommonFactor => "Greatest common factor",
            Self::LeastCommonMultiple => "Least common multiple",
            Self::OrderOfOperations => "Order of operations",
            Self::ParenthesesFirst => "Parentheses first",
        }
    }
}

impl fmt::Display for MathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered chapter of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub order: u32,
    pub categories: Vec<MathCategory>,
}

impl Topic {
    fn new(id: &str, title: &str, order: u32, categories: &[MathCategory]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            order,
            categories: categories.to_vec(),
        }
    }
}

/// Built-in topic table, ordered by `order`.
pub fn topics() -> &'static [Topic] {
    static TOPICS: OnceLock<Vec<Topic>> = OnceLock::new();
    TOPICS.get_or_init(|| {
        use MathCategory::*;
        vec![
            Topic::new(
                "add_subtract",
                "Adding and subtracting",
                1,
                &[AddThreeDigit, SubtractThreeDigit],
            ),
            Topic::new(
                "multiplication",
                "Multiplication",
                2,
                &[MultiplyTens, MultiplyTwoByOne, MultiplyThreeByOne, MultiplyTwoByTwo],
            ),
            Topic::new(
                "division",
                "Division",
                3,
                &[DivideTens, DivideExact, DivideRemainder],
            ),
            Topic::new(
                "factors",
                "Factors and multiples",
                4,
                &[PrimeFactorization, GreatestCommonFactor, LeastCommonMultiple],
            ),
            Topic::new(
                "mixed_operations",
                "Mixed operations",
                5,
                &[OrderOfOperations, ParenthesesFirst],
            ),
        ]
    })
}

pub fn find_topic(id: &str) -> Option<&'static Topic> {
    let key = id.trim().to_lowercase();
    topics().iter().find(|t| t.id == key)
}
