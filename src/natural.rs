use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings in natural order, so `a2` sorts before `a10`.
///
/// A digit run starting with `0` compares digit by digit from the left
/// (`x08` sorts before `x7`). Other digit runs compare by numeric value.
/// Leading zeros at the very start of a string are ignored.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = skip_leading_zeros(a).chars().peekable();
    let mut right = skip_leading_zeros(b).chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ln = take_digits(&mut left);
                let rn = take_digits(&mut right);
                match compare_numeric(&ln, &rn) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                match l.cmp(&r) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
        }
    }
}

/// Sort a slice of strings in natural order.
pub fn natural_sort<S: AsRef<str>>(values: &mut [S]) {
    values.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

// Keeps the last zero when no other digit follows it.
fn skip_leading_zeros(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut start = 0;
    while start + 1 < bytes.len() && bytes[start] == b'0' && bytes[start + 1].is_ascii_digit() {
        start += 1;
    }
    &s[start..]
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    if a.starts_with('0') || b.starts_with('0') {
        // Left aligned: the first differing digit decides, then the shorter run.
        a.cmp(b)
    } else {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_oauth_keys() {
        let mut keys = vec!["oauth_nonce", "oauth_consumer_key", "oauth_token"];
        natural_sort(&mut keys);
        assert_eq!(keys, vec!["oauth_consumer_key", "oauth_nonce", "oauth_token"]);
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(natural_cmp("a2", "a10"), Ordering::Less);
        assert_eq!(natural_cmp("a10", "a2"), Ordering::Greater);

        let mut keys = vec!["a10", "a2", "a1", "b"];
        natural_sort(&mut keys);
        assert_eq!(keys, vec!["a1", "a2", "a10", "b"]);
    }

    #[test]
    fn test_prefix_and_equality() {
        assert_eq!(natural_cmp("oauth", "oauth_token"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }

    #[test_case("x08", "x7", Ordering::Less; "padded run compares left aligned")]
    #[test_case("2024-08", "2024-7", Ordering::Less; "padded month")]
    #[test_case("x007", "x7", Ordering::Less; "zero against digit")]
    #[test_case("x007", "x8", Ordering::Less; "zero against larger digit")]
    #[test_case("x05", "x050", Ordering::Less; "shorter run wins on exhaustion")]
    #[test_case("x7", "x08", Ordering::Greater; "reversed")]
    #[test_case("007", "7", Ordering::Equal; "leading zeros at start ignored")]
    #[test_case("010", "9", Ordering::Greater; "start of string compares by value")]
    #[test_case("0", "00", Ordering::Equal; "all zeros at start")]
    fn test_zero_padded_runs(a: &str, b: &str, expected: Ordering) {
        assert_eq!(natural_cmp(a, b), expected);
    }

    #[test]
    fn test_padded_dates_sort() {
        let mut values = vec!["2024-7", "2024-08", "2024-10"];
        natural_sort(&mut values);
        assert_eq!(values, vec!["2024-08", "2024-10", "2024-7"]);
    }

    #[test]
    fn test_large_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("id99999999999999999999999", "id100000000000000000000000"),
            Ordering::Less
        );
    }
}
