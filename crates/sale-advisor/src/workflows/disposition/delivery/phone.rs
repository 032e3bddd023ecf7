/// Normalizes North American numbers to E.164. Anything that is not ten digits,
/// or eleven digits starting with `1`, is returned unchanged.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digits_gain_country_code() {
        assert_eq!(normalize_phone("(512) 555-0100"), "+15125550100");
        assert_eq!(normalize_phone("512.555.0100"), "+15125550100");
    }

    #[test]
    fn eleven_digits_with_leading_one_gain_plus() {
        assert_eq!(normalize_phone("1-512-555-0100"), "+15125550100");
        assert_eq!(normalize_phone("+1 512 555 0100"), "+15125550100");
    }

    #[test]
    fn other_shapes_pass_through() {
        assert_eq!(normalize_phone("555-0100"), "555-0100");
        assert_eq!(normalize_phone("25125550100"), "25125550100");
        assert_eq!(normalize_phone("+44 20 7946 0958"), "+44 20 7946 0958");
        assert_eq!(normalize_phone(""), "");
    }
}
