//! Random password generation for new and edited items.
//!
//! Each character comes from one cryptographically random `u32` reduced
//! modulo the alphabet length. The modulo bias this introduces is small
//! (74 symbols against 2^32) and the generator only feeds user passwords,
//! never key material.

use rand::RngCore;
use zeroize::Zeroizing;

/// Characters a generated password may contain.
pub const ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

/// Length used when the caller does not ask for one.
pub const DEFAULT_LENGTH: usize = 16;

/// Generate a password of `DEFAULT_LENGTH` characters.
pub fn generate_password() -> Zeroizing<String> {
    generate_password_with_len(DEFAULT_LENGTH)
}

/// Generate a password of `len` characters drawn from `ALPHABET`.
pub fn generate_password_with_len(len: usize) -> Zeroizing<String> {
    let alphabet = ALPHABET.as_bytes();
    let mut rng = rand::rng();

    let mut password = Zeroizing::new(String::with_capacity(len));
    for _ in 0..len {
        let idx = rng.next_u32() as usize % alphabet.len();
        password.push(char::from(alphabet[idx]));
    }
    password
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_length_is_sixteen() {
        assert_eq!(generate_password().chars().count(), 16);
    }

    #[test]
    fn only_alphabet_characters() {
        for _ in 0..200 {
            let pw = generate_password();
            assert!(
                pw.chars().all(|c| ALPHABET.contains(c)),
                "unexpected character in {}",
                pw.as_str()
            );
        }
    }

    #[test]
    fn custom_length() {
        assert_eq!(generate_password_with_len(40).len(), 40);
        assert!(generate_password_with_len(0).is_empty());
    }

    #[test]
    fn alphabet_has_all_classes() {
        assert!(ALPHABET.chars().any(|c| c.is_ascii_lowercase()));
        assert!(ALPHABET.chars().any(|c| c.is_ascii_uppercase()));
        assert!(ALPHABET.chars().any(|c| c.is_ascii_digit()));
        assert!(ALPHABET.chars().any(|c| !c.is_ascii_alphanumeric()));
        assert_eq!(ALPHABET.len(), 74);
    }
}
