use super::definitions::{COUNTRY_CODE, NATIONAL_ID_DIGITS, PHONE_DIGITS};

/// Keep only ASCII digits, dropping spaces, dashes, `+` and anything else
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Replace a leading `250` country code with the local trunk prefix `0`
pub fn collapse_country_code(digits: &str) -> String {
    match digits.strip_prefix(COUNTRY_CODE) {
        Some(rest) => format!("0{}", rest),
        None => digits.to_string(),
    }
}

/// Normalize free-text phone input into local digit form
///
/// Strips non-digits, collapses `250` to `0` and caps the result at the local
/// format's ten digits. Never rejects input: the pattern rule in validation
/// decides whether the outcome is a real number.
///
/// `normalize_phone(normalize_phone(x)) == normalize_phone(x)` for every `x`.
pub fn normalize_phone(raw: &str) -> String {
    let mut digits = collapse_country_code(&strip_non_digits(raw));
    digits.truncate(PHONE_DIGITS);
    digits
}

/// Normalize free-text national ID input: digits only, at most sixteen of them
pub fn normalize_national_id(raw: &str) -> String {
    let mut digits = strip_non_digits(raw);
    digits.truncate(NATIONAL_ID_DIGITS);
    digits
}

/// Group a phone number for display as `078 812 3456`
///
/// Incomplete numbers come back normalized but ungrouped.
pub fn format_phone_display(raw: &str) -> String {
    let digits = normalize_phone(raw);
    if digits.len() != PHONE_DIGITS {
        return digits;
    }
    format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Group a national ID for display as `1 1990 1234 5678 901`
///
/// Incomplete IDs come back normalized but ungrouped.
pub fn format_national_id_display(raw: &str) -> String {
    let digits = normalize_national_id(raw);
    if digits.len() != NATIONAL_ID_DIGITS {
        return digits;
    }
    format!(
        "{} {} {} {} {}",
        &digits[..1],
        &digits[1..5],
        &digits[5..9],
        &digits[9..13],
        &digits[13..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "abc",
        "0788123456",
        "078 812 3456",
        "+250 788 123 456",
        "250788123456",
        "250250788123456",
        "2507",
        "07881234567890",
        "1199012345678901",
        "1 1990 1234 5678 901",
        "11990123456789012345",
        "٣٤٥ 078-812-3456",
    ];

    #[test]
    fn test_normalize_phone_collapses_country_code() {
        assert_eq!(normalize_phone("250788123456"), "0788123456");
        assert_eq!(normalize_phone("+250 788 123 456"), "0788123456");
        assert_eq!(normalize_phone("(078) 812-3456"), "0788123456");
    }

    #[test]
    fn test_normalize_phone_caps_length() {
        assert_eq!(normalize_phone("07881234567890"), "0788123456");
        assert_eq!(normalize_phone("078"), "078");
        assert_eq!(normalize_phone("no digits"), "");
    }

    #[test]
    fn test_normalize_national_id() {
        assert_eq!(normalize_national_id("1 1990 1234 5678 901"), "1199012345678901");
        assert_eq!(normalize_national_id("11990123456789012345"), "1199012345678901");
        assert_eq!(normalize_national_id("ID: 12-34"), "1234");
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        // Arabic-Indic digits are not part of the local formats
        assert_eq!(strip_non_digits("٣٤٥ 078"), "078");
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        for sample in SAMPLES {
            let once = normalize_phone(sample);
            assert_eq!(normalize_phone(&once), once, "phone input {:?}", sample);

            let once = normalize_national_id(sample);
            assert_eq!(normalize_national_id(&once), once, "national id input {:?}", sample);
        }
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format_phone_display("250788123456"), "078 812 3456");
        assert_eq!(format_phone_display("07881"), "07881");
        assert_eq!(format_national_id_display("1199012345678901"), "1 1990 1234 5678 901");
        assert_eq!(format_national_id_display("1199"), "1199");
    }

    #[test]
    fn test_display_grouping_is_stable_under_renormalization() {
        for sample in SAMPLES {
            let shown = format_phone_display(sample);
            assert_eq!(format_phone_display(&shown), shown);

            let shown = format_national_id_display(sample);
            assert_eq!(format_national_id_display(&shown), shown);
        }
    }
}
