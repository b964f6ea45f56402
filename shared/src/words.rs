//! Amount in words, Indian numbering scale (crore, lakh, thousand, hundred)

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Trailing currency words, depending on where the amount is printed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WordsSuffix {
    #[default]
    Rupees,
    Only,
    RupeesOnly,
}

impl WordsSuffix {
    fn as_str(&self) -> &'static str {
        match self {
            WordsSuffix::Rupees => "Rupees",
            WordsSuffix::Only => "Only",
            WordsSuffix::RupeesOnly => "Rupees Only",
        }
    }
}

impl std::str::FromStr for WordsSuffix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "rupees" => Ok(WordsSuffix::Rupees),
            "only" => Ok(WordsSuffix::Only),
            "rupees_only" => Ok(WordsSuffix::RupeesOnly),
            other => Err(format!("unknown suffix: {}", other)),
        }
    }
}

/// Whole-rupee amount in words, most significant group first, without the
/// currency suffix: `100000` → `"One Lakh"`. Zero is the literal
/// `"Zero Rupees"`.
pub fn number_to_indian_words(amount: u128) -> String {
    if amount == 0 {
        return "Zero Rupees".to_string();
    }
    indian_groups(amount).join(" ")
}

/// Floors `amount` to whole rupees and appends `suffix`.
/// Negative amounts render as zero. The whole Decimal range fits in `u128`.
pub fn amount_in_words(amount: Decimal, suffix: WordsSuffix) -> String {
    let rupees = amount.floor().max(Decimal::ZERO).to_u128().unwrap_or(u128::MAX);
    if rupees == 0 {
        return match suffix {
            WordsSuffix::Rupees => "Zero Rupees".to_string(),
            WordsSuffix::Only | WordsSuffix::RupeesOnly => "Zero Rupees Only".to_string(),
        };
    }
    format!("{} {}", number_to_indian_words(rupees), suffix.as_str())
}

fn indian_groups(amount: u128) -> Vec<String> {
    let mut words = Vec::new();

    let crores = amount / CRORE;
    let lakhs = (amount % CRORE) / LAKH;
    let thousands = (amount % LAKH) / THOUSAND;
    let hundreds = (amount % THOUSAND) / 100;
    let rest = amount % 100;

    if crores > 0 {
        // Beyond 99 crore the crore count is itself spelled in the Indian scale
        words.extend(indian_groups(crores));
        words.push("Crore".to_string());
    }
    if lakhs > 0 {
        words.push(two_digit(lakhs));
        words.push("Lakh".to_string());
    }
    if thousands > 0 {
        words.push(two_digit(thousands));
        words.push("Thousand".to_string());
    }
    if hundreds > 0 {
        words.push(ONES[hundreds as usize].to_string());
        words.push("Hundred".to_string());
    }
    if rest > 0 {
        words.push(two_digit(rest));
    }
    words
}

fn two_digit(n: u128) -> String {
    let n = n as usize;
    match n {
        0..=9 => ONES[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} {}", TENS[n / 10], ONES[n % 10]),
    }
}
