//! Operator input classification for the interactive loop.

/// Literal token that ends the session.
pub const EXIT_TOKEN: &str = "exit";

/// What one line of operator input asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Terminate the session.
    Exit,
    /// Publish this value and await the round trip.
    Push(i64),
    /// Neither the exit token nor a decimal integer. Re-prompt.
    Invalid,
}

/// True iff `s` is an optional leading `-` followed by one or more
/// decimal digits. Stricter than `str::parse::<i64>`, which also
/// accepts a leading `+`.
pub fn is_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Classify one trimmed line of operator input.
pub fn classify(line: &str) -> Input {
    if line == EXIT_TOKEN {
        return Input::Exit;
    }
    if !is_number(line) {
        return Input::Invalid;
    }
    match line.parse::<i64>() {
        Ok(value) => Input::Push(value),
        // All-digit strings can still overflow i64.
        Err(_) => Input::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_digits() {
        assert!(is_number("5"));
        assert!(is_number("0"));
        assert!(is_number("007"));
        assert!(is_number("123456789"));
    }

    #[test]
    fn accepts_leading_minus() {
        assert!(is_number("-3"));
        assert!(is_number("-0"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!is_number(""));
        assert!(!is_number("-"));
        assert!(!is_number("abc"));
        assert!(!is_number("12a"));
        assert!(!is_number("+5"));
        assert!(!is_number("--5"));
        assert!(!is_number(" 5"));
        assert!(!is_number("1.5"));
    }

    #[test]
    fn classifies_exit_token() {
        assert_eq!(classify("exit"), Input::Exit);
    }

    #[test]
    fn classifies_integers() {
        assert_eq!(classify("42"), Input::Push(42));
        assert_eq!(classify("-3"), Input::Push(-3));
        assert_eq!(classify("007"), Input::Push(7));
    }

    #[test]
    fn classifies_garbage_as_invalid() {
        assert_eq!(classify("hello"), Input::Invalid);
        assert_eq!(classify(""), Input::Invalid);
        assert_eq!(classify("Exit"), Input::Invalid);
    }

    #[test]
    fn classifies_overflowing_digits_as_invalid() {
        assert_eq!(classify("99999999999999999999"), Input::Invalid);
    }
}
