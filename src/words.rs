//! Amount-in-words conversion using the Indian numbering system
//!
//! Indian grouping keeps three digits for the hundreds block and groups of
//! two above it: crore (10^7), lakh (10^5), thousand (10^3).

use bigdecimal::{BigDecimal, ToPrimitive};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Convert a whole rupee amount into Indian-English words
///
/// Zero returns the literal `"Zero"`; everything else ends with `"Only"`,
/// e.g. `amount_in_words(1234567)` is
/// `"Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Only"`.
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }
    format!("{} Only", segment_words(amount))
}

/// Convert a monetary total into words, truncating to whole rupees
///
/// Fractional paise are dropped. Values that do not fit a `u64` (including
/// negatives) convert as zero rupees.
pub fn rupees_in_words(amount: &BigDecimal) -> String {
    amount_in_words(amount.to_u64().unwrap_or(0))
}

/// Indian decomposition of a non-zero amount, without the trailing "Only"
///
/// Crore counts of one thousand and above recurse, so very large totals
/// read naturally ("One Thousand Crore" rather than "Ten Hundred Crore").
fn segment_words(amount: u64) -> String {
    let crore = amount / 10_000_000;
    let lakh = (amount / 100_000) % 100;
    let thousand = (amount / 1_000) % 100;
    let hundreds = amount % 1_000;

    let mut parts: Vec<String> = Vec::new();
    if crore > 0 {
        parts.push(format!("{} Crore", segment_words(crore)));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", group_words(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", group_words(thousand)));
    }
    if hundreds > 0 {
        parts.push(group_words(hundreds));
    }

    parts.join(" ")
}

/// Words for a group below one thousand
fn group_words(group: u64) -> String {
    debug_assert!(group > 0 && group < 1_000);

    let mut words: Vec<&str> = Vec::new();
    let hundreds = (group / 100) as usize;
    let tail = (group % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("Hundred");
    }

    if tail > 0 {
        if tail < 20 {
            words.push(ONES[tail]);
        } else {
            words.push(TENS[tail / 10]);
            if tail % 10 > 0 {
                words.push(ONES[tail % 10]);
            }
        }
    }

    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(amount_in_words(0), "Zero");
    }

    #[test]
    fn test_small_amounts() {
        assert_eq!(amount_in_words(7), "Seven Only");
        assert_eq!(amount_in_words(13), "Thirteen Only");
        assert_eq!(amount_in_words(42), "Forty Two Only");
        assert_eq!(amount_in_words(90), "Ninety Only");
        assert_eq!(amount_in_words(305), "Three Hundred Five Only");
    }

    #[test]
    fn test_one_lakh() {
        assert_eq!(amount_in_words(100_000), "One Lakh Only");
    }

    #[test]
    fn test_full_decomposition() {
        assert_eq!(
            amount_in_words(1_234_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Only"
        );
    }

    #[test]
    fn test_crore_grouping() {
        assert_eq!(amount_in_words(10_000_000), "One Crore Only");
        assert_eq!(
            amount_in_words(123_45_67_890),
            "One Hundred Twenty Three Crore Forty Five Lakh Sixty Seven Thousand \
             Eight Hundred Ninety Only"
        );
    }

    #[test]
    fn test_large_crore_counts_recurse() {
        assert_eq!(
            amount_in_words(10_000_000_000),
            "One Thousand Crore Only"
        );
        assert_eq!(
            amount_in_words(20_000_000_000),
            "Two Thousand Crore Only"
        );
        assert_eq!(
            amount_in_words(12_00_00_00_00_000),
            "One Lakh Twenty Thousand Crore Only"
        );
        assert_eq!(
            amount_in_words(100_000_000_000_000),
            "One Crore Crore Only"
        );
    }

    #[test]
    fn test_skips_zero_groups() {
        assert_eq!(amount_in_words(1_000_001), "Ten Lakh One Only");
        assert_eq!(amount_in_words(20_000), "Twenty Thousand Only");
    }

    #[test]
    fn test_rupees_in_words_truncates_paise() {
        let amount = "2360.75".parse::<BigDecimal>().unwrap();
        assert_eq!(
            rupees_in_words(&amount),
            "Two Thousand Three Hundred Sixty Only"
        );
    }

    #[test]
    fn test_rupees_in_words_negative_degrades_to_zero() {
        let amount = BigDecimal::from(-5);
        assert_eq!(rupees_in_words(&amount), "Zero");
    }
}
