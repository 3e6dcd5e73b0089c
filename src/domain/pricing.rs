use crate::error::LandingError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt;

/// Category of academic work offered by the calculator.
///
/// The page's work-type selector encodes each category as its base price, so
/// a `WorkType` is reconstructed from that numeric value. Unknown values are
/// still priced: they keep their own base as the floor and fall back to the
/// generic per-page rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkType {
    Coursework,
    Essay,
    Thesis,
    TestPaper,
    Other(Decimal),
}

impl WorkType {
    /// Resolves a selector value (a base price) into a work type.
    pub fn from_base(base: Decimal) -> Self {
        if base == dec!(800) {
            Self::Coursework
        } else if base == dec!(400) {
            Self::Essay
        } else if base == dec!(4500) {
            Self::Thesis
        } else if base == dec!(300) {
            Self::TestPaper
        } else {
            Self::Other(base)
        }
    }

    /// The guaranteed minimum price for this work type.
    pub fn base_price(&self) -> Decimal {
        match self {
            Self::Coursework => dec!(800),
            Self::Essay => dec!(400),
            Self::Thesis => dec!(4500),
            Self::TestPaper => dec!(300),
            Self::Other(base) => *base,
        }
    }

    /// Per-page rate used above the floor.
    pub fn page_rate(&self) -> Decimal {
        match self {
            Self::Coursework => dec!(40),
            Self::Essay => dec!(25),
            Self::Thesis => dec!(75),
            Self::TestPaper => dec!(20),
            Self::Other(_) => dec!(40),
        }
    }
}

/// Number of pages requested, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageCount(u32);

impl PageCount {
    pub fn new(pages: u32) -> Result<Self, LandingError> {
        if pages >= 1 {
            Ok(Self(pages))
        } else {
            Err(LandingError::ValidationError(
                "page count must be at least 1".to_string(),
            ))
        }
    }

    /// Infallible constructor for values already bounded elsewhere; anything
    /// below one page is raised to one.
    pub fn clamped(pages: u32) -> Self {
        Self(pages.max(1))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Urgency multiplier applied to the per-page total. Strictly positive and
/// bounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DeadlineFactor(Decimal);

impl DeadlineFactor {
    /// The relaxed "two weeks or more" tier.
    pub const STANDARD: Self = Self(Decimal::ONE);

    /// Largest accepted factor. The page's selector tops out at 2; the bound
    /// keeps the per-page product inside `Decimal`'s range for any page
    /// count, so repricing can never overflow.
    pub const MAX_FACTOR: Decimal = dec!(1000);

    pub fn new(factor: Decimal) -> Result<Self, LandingError> {
        if factor <= Decimal::ZERO {
            return Err(LandingError::ValidationError(
                "deadline factor must be positive".to_string(),
            ));
        }
        if factor > Self::MAX_FACTOR {
            return Err(LandingError::ValidationError(format!(
                "deadline factor {factor} is out of range"
            )));
        }
        Ok(Self(factor))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// A computed price, rounded to whole rubles.
///
/// Guaranteed to be at least the work type's base price: a short essay never
/// undercuts the floor of its category.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceQuote(Decimal);

impl PriceQuote {
    /// Prices a work: `max(base, rate x pages x deadline)`, rounded half away
    /// from zero like the page's original readout.
    pub fn compute(work: WorkType, pages: PageCount, deadline: DeadlineFactor) -> Self {
        let per_pages = work.page_rate() * Decimal::from(pages.value()) * deadline.value();
        let total = work.base_price().max(per_pages);
        Self(total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for PriceQuote {
    /// Formats as the page renders it: thousands grouped with a space,
    /// ruble sign appended ("4 500 ₽").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", group_thousands(&self.0.normalize().to_string()))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 && c.is_ascii_digit() {
            grouped.push(' ');
        }
        grouped.push(*c);
    }
    grouped
}
