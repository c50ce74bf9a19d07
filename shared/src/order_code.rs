//! Order code generation
//!
//! Codes are meant to be read aloud at the counter: a fixed prefix
//! plus five characters from a 32-symbol alphabet that drops the
//! visually ambiguous I, O, 0 and 1. Roughly 33 bits of entropy,
//! collision-tolerant for a small daily order volume, not a secret.

use rand::Rng;

/// Customer-facing code prefix
pub const CODE_PREFIX: &str = "CAF-";

/// 32-symbol alphabet, ambiguous characters excluded
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of random characters after the prefix
pub const CODE_LEN: usize = 5;

/// Generate a fresh order code, e.g. `CAF-X9Y2Z`
pub fn generate_order_code() -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(CODE_PREFIX.len() + CODE_LEN);
    code.push_str(CODE_PREFIX);
    for _ in 0..CODE_LEN {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

/// Whether `code` has the generated shape (prefix + 5 alphabet chars)
pub fn is_valid_order_code(code: &str) -> bool {
    let Some(suffix) = code.strip_prefix(CODE_PREFIX) else {
        return false;
    };
    suffix.len() == CODE_LEN && suffix.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_ambiguous_chars() {
        for bad in [b'I', b'O', b'0', b'1'] {
            assert!(!CODE_ALPHABET.contains(&bad));
        }
        assert_eq!(CODE_ALPHABET.len(), 32);
    }

    #[test]
    fn test_generated_codes_match_format() {
        for _ in 0..10_000 {
            let code = generate_order_code();
            assert_eq!(code.len(), CODE_PREFIX.len() + CODE_LEN);
            assert!(is_valid_order_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn test_validation_rejects_malformed() {
        assert!(!is_valid_order_code("X9Y2Z"));
        assert!(!is_valid_order_code("CAF-X9Y2"));
        assert!(!is_valid_order_code("CAF-X9Y2ZA"));
        assert!(!is_valid_order_code("CAF-X9Y0Z")); // excluded char
        assert!(!is_valid_order_code("caf-X9Y2Z"));
    }
}
