// src/matching/email.rs
// Email repair and validation for roster rows. An unreachable recipient is
// disqualifying regardless of certificate availability, so this runs before
// any name matching.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// Known typos of common provider domains, applied after whitespace removal:
// misspellings, a comma where the dot before the TLD belongs, and domains
// that lost their dot to a stray space.
const DOMAIN_TYPO_FIXES: [(&str, &str); 8] = [
    ("gmsil.com", "gmail.com"),
    ("gnail.com", "gmail.com"),
    ("@gmail,com", "@gmail.com"),
    ("@yahoo,com", "@yahoo.com"),
    ("@outlook,com", "@outlook.com"),
    ("@yahoocom", "@yahoo.com"),
    ("@hotmailcom", "@hotmail.com"),
    ("@outlookcom", "@outlook.com"),
];

/// Validate an address against the standard local@domain.tld shape (domain
/// must contain a dot, top-level segment at least 2 letters).
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Lowercase, strip internal whitespace, repair known provider typos, then
/// validate. Returns the repaired address, or an empty string if the value
/// is still invalid after repair. Never panics.
pub fn clean_email(raw: &str) -> String {
    let mut email: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    for (typo, fix) in DOMAIN_TYPO_FIXES {
        if email.contains(typo) {
            email = email.replace(typo, fix);
        }
    }
    if is_valid_email(&email) {
        email
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("john@nodot"));
        assert!(!is_valid_email("john@domain.c"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn repairs_provider_typos() {
        assert_eq!(clean_email("john@gmsil.com"), "john@gmail.com");
        assert_eq!(clean_email("john@gnail.com"), "john@gmail.com");
        assert_eq!(clean_email("mira@gmail,com"), "mira@gmail.com");
        assert_eq!(clean_email("mira@yahoo,com"), "mira@yahoo.com");
        assert_eq!(clean_email("sam@outlook,com"), "sam@outlook.com");
    }

    #[test]
    fn repairs_space_split_domains() {
        assert_eq!(clean_email("amy@yahoo com"), "amy@yahoo.com");
        assert_eq!(clean_email("bob@hotmail com"), "bob@hotmail.com");
        assert_eq!(clean_email("cat@outlook com"), "cat@outlook.com");
    }

    #[test]
    fn lowercases_and_strips_whitespace() {
        assert_eq!(clean_email("  John.Doe@Example.COM  "), "john.doe@example.com");
        assert_eq!(clean_email("j ohn@example.com"), "john@example.com");
    }

    #[test]
    fn unrepairable_input_degrades_to_empty() {
        assert_eq!(clean_email("not-an-email"), "");
        assert_eq!(clean_email(""), "");
        assert_eq!(clean_email("@gmail.com"), "");
    }
}
