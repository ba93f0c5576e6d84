//! Amount-in-words formatting for receipts.
//!
//! Thai baht text is the default, matching the paper receipts the committee
//! already hands out; English is available for foreign residents.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use villa_shared::config::ReceiptConfig;

/// Language of the amount-in-words line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// Thai baht text, e.g. `หนึ่งพันห้าร้อยบาทถ้วน`.
    #[default]
    Thai,
    /// English, e.g. `One thousand five hundred baht only`.
    English,
}

/// Locale code not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported receipt locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "th" | "thai" => Ok(Self::Thai),
            "en" | "english" => Ok(Self::English),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

impl TryFrom<&ReceiptConfig> for Locale {
    type Error = UnsupportedLocale;

    fn try_from(config: &ReceiptConfig) -> Result<Self, Self::Error> {
        config.locale.parse()
    }
}

/// Spells out an amount of baht and satang.
///
/// The amount is rounded to two decimal places first. Negative amounts get a
/// leading minus word.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use villa_core::receipt::{Locale, amount_in_words};
///
/// let amount = Decimal::new(150_000, 2);
/// assert_eq!(amount_in_words(amount, Locale::Thai), "หนึ่งพันห้าร้อยบาทถ้วน");
/// assert_eq!(
///     amount_in_words(amount, Locale::English),
///     "One thousand five hundred baht only"
/// );
/// ```
#[must_use]
pub fn amount_in_words(amount: Decimal, locale: Locale) -> String {
    let negative = amount.is_sign_negative() && !amount.round_dp(2).is_zero();
    let amount = amount.abs().round_dp(2);
    let whole = amount.trunc();
    let baht = whole.to_u128().unwrap_or_default();
    let satang = ((amount - whole) * Decimal::ONE_HUNDRED)
        .to_u128()
        .unwrap_or_default();

    match locale {
        Locale::Thai => thai_amount(negative, baht, satang),
        Locale::English => english_amount(negative, baht, satang),
    }
}

// ========== Thai ==========

const THAI_DIGITS: [&str; 10] = [
    "ศูนย์", "หนึ่ง", "สอง", "สาม", "สี่", "ห้า", "หก", "เจ็ด", "แปด", "เก้า",
];
const THAI_PLACES: [&str; 6] = ["", "สิบ", "ร้อย", "พัน", "หมื่น", "แสน"];
const THAI_MILLION: &str = "ล้าน";

fn thai_amount(negative: bool, baht: u128, satang: u128) -> String {
    let mut out = String::new();
    if negative {
        out.push_str("ลบ");
    }

    match (baht, satang) {
        (0, 0) => {
            out.push_str(THAI_DIGITS[0]);
            out.push_str("บาทถ้วน");
        }
        (0, s) => {
            out.push_str(&thai_number(s));
            out.push_str("สตางค์");
        }
        (b, 0) => {
            out.push_str(&thai_number(b));
            out.push_str("บาทถ้วน");
        }
        (b, s) => {
            out.push_str(&thai_number(b));
            out.push_str("บาท");
            out.push_str(&thai_number(s));
            out.push_str("สตางค์");
        }
    }
    out
}

/// Thai reading of a positive integer.
fn thai_number(n: u128) -> String {
    let millions = n / 1_000_000;
    let rest = n % 1_000_000;

    let mut out = String::new();
    if millions > 0 {
        out.push_str(&thai_number(millions));
        out.push_str(THAI_MILLION);
    }
    if rest > 0 {
        out.push_str(&thai_below_million(rest, millions > 0));
    }
    out
}

/// Thai reading of `1..1_000_000`.
///
/// A trailing one reads เอ็ด whenever a higher digit precedes it, including
/// digits of a higher million group.
fn thai_below_million(n: u128, has_higher: bool) -> String {
    let mut out = String::new();
    for place in (0..THAI_PLACES.len()).rev() {
        let digit = digit_at(n, place);
        if digit == 0 {
            continue;
        }
        match (place, digit) {
            (1, 1) => {}
            (1, 2) => out.push_str("ยี่"),
            (0, 1) if has_higher || n > 1 => {
                out.push_str("เอ็ด");
                continue;
            }
            _ => out.push_str(THAI_DIGITS[digit]),
        }
        out.push_str(THAI_PLACES[place]);
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn digit_at(n: u128, place: usize) -> usize {
    let divisor = 10u128.pow(place as u32);
    ((n / divisor) % 10) as usize
}

// ========== English ==========

const ENGLISH_ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];
const ENGLISH_TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const ENGLISH_SCALES: [&str; 10] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
    "sextillion",
    "septillion",
    "octillion",
];

fn english_amount(negative: bool, baht: u128, satang: u128) -> String {
    let body = match (baht, satang) {
        (0, 0) => "zero baht only".to_string(),
        (0, s) => format!("{} satang", english_number(s)),
        (b, 0) => format!("{} baht only", english_number(b)),
        (b, s) => format!("{} baht and {} satang", english_number(b), english_number(s)),
    };
    let text = if negative {
        format!("minus {body}")
    } else {
        body
    };
    capitalize(&text)
}

/// English reading of a positive integer.
fn english_number(n: u128) -> String {
    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut words: Vec<String> = Vec::new();
    for (scale, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        words.push(english_below_thousand(*group));
        if let Some(name) = ENGLISH_SCALES.get(scale).filter(|name| !name.is_empty()) {
            words.push((*name).to_string());
        }
    }
    words.join(" ")
}

#[allow(clippy::cast_possible_truncation)]
fn english_below_thousand(n: u128) -> String {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    let mut words = Vec::new();
    if hundreds > 0 {
        words.push(format!("{} hundred", ENGLISH_ONES[hundreds]));
    }
    match rest {
        0 => {}
        1..20 => words.push(ENGLISH_ONES[rest].to_string()),
        _ if rest % 10 == 0 => words.push(ENGLISH_TENS[rest / 10].to_string()),
        _ => words.push(format!(
            "{}-{}",
            ENGLISH_TENS[rest / 10],
            ENGLISH_ONES[rest % 10]
        )),
    }
    words.join(" ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1500.00), "หนึ่งพันห้าร้อยบาทถ้วน")]
    #[case(dec!(1500.50), "หนึ่งพันห้าร้อยบาทห้าสิบสตางค์")]
    #[case(dec!(0.25), "ยี่สิบห้าสตางค์")]
    #[case(dec!(0), "ศูนย์บาทถ้วน")]
    #[case(dec!(1), "หนึ่งบาทถ้วน")]
    #[case(dec!(10), "สิบบาทถ้วน")]
    #[case(dec!(11), "สิบเอ็ดบาทถ้วน")]
    #[case(dec!(21), "ยี่สิบเอ็ดบาทถ้วน")]
    #[case(dec!(101), "หนึ่งร้อยเอ็ดบาทถ้วน")]
    #[case(dec!(250), "สองร้อยห้าสิบบาทถ้วน")]
    #[case(dec!(2500000), "สองล้านห้าแสนบาทถ้วน")]
    #[case(dec!(11000000), "สิบเอ็ดล้านบาทถ้วน")]
    #[case(dec!(1000001), "หนึ่งล้านเอ็ดบาทถ้วน")]
    #[case(dec!(1000000001), "หนึ่งพันล้านเอ็ดบาทถ้วน")]
    #[case(dec!(1.01), "หนึ่งบาทหนึ่งสตางค์")]
    fn test_thai(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(amount_in_words(amount, Locale::Thai), expected);
    }

    #[rstest]
    #[case(dec!(1500.00), "One thousand five hundred baht only")]
    #[case(dec!(1500.50), "One thousand five hundred baht and fifty satang")]
    #[case(dec!(0.25), "Twenty-five satang")]
    #[case(dec!(0), "Zero baht only")]
    #[case(dec!(115), "One hundred fifteen baht only")]
    #[case(dec!(2000001), "Two million one baht only")]
    fn test_english(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(amount_in_words(amount, Locale::English), expected);
    }

    #[test]
    fn test_negative_and_rounding() {
        assert_eq!(amount_in_words(dec!(-5), Locale::Thai), "ลบห้าบาทถ้วน");
        assert_eq!(amount_in_words(dec!(-5), Locale::English), "Minus five baht only");
        assert_eq!(amount_in_words(dec!(0.004), Locale::Thai), "ศูนย์บาทถ้วน");
    }

    #[rstest]
    #[case("th", Locale::Thai)]
    #[case("TH", Locale::Thai)]
    #[case(" en ", Locale::English)]
    #[case("english", Locale::English)]
    fn test_locale_from_str(#[case] input: &str, #[case] expected: Locale) {
        assert_eq!(input.parse::<Locale>(), Ok(expected));
    }

    #[test]
    fn test_locale_from_config() {
        assert_eq!(Locale::try_from(&ReceiptConfig::default()), Ok(Locale::Thai));
    }

    #[test]
    fn test_unknown_locale() {
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(UnsupportedLocale("fr".to_string()))
        );
    }
}
