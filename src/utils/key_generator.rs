//! Random short key generation.
//!
//! Keys are drawn from the 62-symbol alphanumeric alphabet using the thread-local
//! CSPRNG from `rand`, so concurrent requests never contend on a shared generator.

use rand::Rng;

/// Length of every generated short key.
pub const SHORT_KEY_LENGTH: usize = 7;

/// Symbols a short key may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random key of `length` characters.
///
/// Each character is sampled independently and uniformly from [`ALPHABET`].
/// Uniqueness is not guaranteed; callers must check the key against storage.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key(SHORT_KEY_LENGTH);
/// assert_eq!(key.len(), 7);
/// assert!(key.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_key(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns `true` if `key` has the shape of a generated short key.
pub fn is_well_formed_key(key: &str) -> bool {
    key.len() == SHORT_KEY_LENGTH && key.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        let unique: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(ALPHABET.len(), 62);
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_key_has_requested_length() {
        assert_eq!(generate_key(SHORT_KEY_LENGTH).len(), 7);
        assert_eq!(generate_key(1).len(), 1);
        assert_eq!(generate_key(32).len(), 32);
    }

    #[test]
    fn test_generate_key_zero_length() {
        assert!(generate_key(0).is_empty());
    }

    #[test]
    fn test_generate_key_uses_alphabet_only() {
        for _ in 0..500 {
            let key = generate_key(SHORT_KEY_LENGTH);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(is_well_formed_key(&key));
        }
    }

    #[test]
    fn test_generate_key_produces_distinct_keys() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_key(SHORT_KEY_LENGTH)).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_generate_key_covers_alphabet() {
        // 62 symbols over ~70k draws; a missing symbol would mean a biased sampler.
        let seen: HashSet<char> = (0..10_000)
            .flat_map(|_| generate_key(SHORT_KEY_LENGTH).chars().collect::<Vec<_>>())
            .collect();
        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_generate_key_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..200)
                        .map(|_| generate_key(SHORT_KEY_LENGTH))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(is_well_formed_key(&key));
                all.insert(key);
            }
        }
        assert_eq!(all.len(), 1600);
    }

    #[test]
    fn test_is_well_formed_key() {
        assert!(is_well_formed_key("aZ09xYq"));
        assert!(!is_well_formed_key("short"));
        assert!(!is_well_formed_key("toolong12"));
        assert!(!is_well_formed_key("ab-cd_e"));
        assert!(!is_well_formed_key(""));
    }
}
