//! # Numeric Codec
//!
//! A salted, reversible mapping from non-negative integers to short alphanumeric
//! strings, built on the hashids scheme via [`harsh`]. Any other hashids
//! implementation with the same salt, alphabet and minimum length produces and
//! accepts the same ids.
//!
//! This is obfuscation: the mapping hides sequential ids from casual readers but
//! the salt is trivially recoverable from a handful of samples.
//!
//! ```text
//!   12345 ──encode──▶ "2gD0gx8ErBkJ"   (salt "Yout_Salt", min length 12)
//!   "2gD0gx8ErBkJ" ──decode──▶ [12345]
//! ```
//!
//! A codec may carry a fixed id prefix (e.g. `haot`). It is prepended on encode
//! and must be present on decode.
//!
//! Decoding re-encodes its result and rejects the input unless the two match, so
//! arbitrary text (plain numbers, words, ids from another salt) is refused rather
//! than silently turned into a wrong number.

use crate::config::EncodingConfig;
use crate::error::{OpkitError, Result};
use harsh::Harsh;
use std::fmt;
use std::panic;
use std::sync::Arc;

pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";
pub const DEFAULT_SALT: &str = "Yout_Salt";
pub const DEFAULT_MIN_LENGTH: usize = 12;

/// Upper bound for the minimum id length. Padding cost grows with it and runs
/// under the session lock.
pub const MAX_MIN_LENGTH: usize = 64;

const MIN_ALPHABET_LENGTH: usize = 16;

#[derive(Clone)]
pub struct Codec {
    harsh: Arc<Harsh>,
    salt: String,
    min_length: usize,
    alphabet: String,
    prefix: String,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("salt", &self.salt)
            .field("min_length", &self.min_length)
            .field("alphabet", &self.alphabet)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Default for Codec {
    fn default() -> Self {
        let harsh = Harsh::builder()
            .salt(DEFAULT_SALT)
            .length(DEFAULT_MIN_LENGTH)
            .build()
            .unwrap_or_default();
        Self {
            harsh: Arc::new(harsh),
            salt: DEFAULT_SALT.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
            alphabet: DEFAULT_ALPHABET.to_string(),
            prefix: String::new(),
        }
    }
}

impl Codec {
    pub fn new(salt: &str, min_length: usize, alphabet: &str) -> Result<Self> {
        validate_alphabet(alphabet)?;
        if min_length > MAX_MIN_LENGTH {
            return Err(OpkitError::Config(format!(
                "min_length must be at most {}, got {}",
                MAX_MIN_LENGTH, min_length
            )));
        }

        let harsh = Harsh::builder()
            .salt(salt)
            .length(min_length)
            .alphabet(alphabet)
            .build()
            .map_err(|e| OpkitError::Alphabet(e.to_string()))?;

        Ok(Self {
            harsh: Arc::new(harsh),
            salt: salt.to_string(),
            min_length,
            alphabet: alphabet.to_string(),
            prefix: String::new(),
        })
    }

    /// Builds the codec for the config's effective profile, prefix included.
    pub fn from_config(config: &EncodingConfig) -> Result<Self> {
        let settings = config.effective();
        Self::new(settings.salt, settings.min_length, settings.alphabet)?
            .with_prefix(&config.prefix)
    }

    /// Sets the fixed prefix put in front of every id.
    pub fn with_prefix(mut self, prefix: &str) -> Result<Self> {
        if let Some(ch) = prefix
            .chars()
            .find(|ch| !ch.is_ascii_graphic() || *ch == ',')
        {
            return Err(OpkitError::Config(format!(
                "character {:?} cannot appear in an id prefix",
                ch
            )));
        }
        self.prefix = prefix.to_string();
        Ok(self)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Encodes a single number.
    pub fn encode(&self, number: u64) -> String {
        format!("{}{}", self.prefix, self.harsh.encode(&[number]))
    }

    /// Encodes a sequence of numbers into one id. Returns `None` for an empty slice.
    pub fn encode_many(&self, numbers: &[u64]) -> Option<String> {
        if numbers.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.prefix, self.harsh.encode(numbers)))
    }

    /// Decodes an id back into its numbers.
    ///
    /// Returns `None` when the prefix is missing, `id` contains characters outside
    /// the alphabet, or the numbers do not re-encode to exactly `id`.
    pub fn decode(&self, id: &str) -> Option<Vec<u64>> {
        let body = id.strip_prefix(self.prefix.as_str())?;
        if body.is_empty() || !body.chars().all(|ch| self.alphabet.contains(ch)) {
            return None;
        }

        // Oversized segments can overflow inside the decoder; treat that as garbage.
        let numbers = panic::catch_unwind(|| self.harsh.decode(body)).ok()?.ok()?;
        if numbers.is_empty() || self.harsh.encode(&numbers) != body {
            return None;
        }
        Some(numbers)
    }
}

fn validate_alphabet(alphabet: &str) -> Result<()> {
    let mut unique: Vec<char> = Vec::with_capacity(alphabet.len());
    for ch in alphabet.chars() {
        if !ch.is_ascii_graphic() || ch == ',' {
            return Err(OpkitError::Alphabet(format!(
                "character {:?} cannot appear in an encoded id",
                ch
            )));
        }
        if unique.contains(&ch) {
            return Err(OpkitError::Alphabet(format!(
                "duplicate character {:?}",
                ch
            )));
        }
        unique.push(ch);
    }

    if unique.len() < MIN_ALPHABET_LENGTH {
        return Err(OpkitError::Alphabet(format!(
            "needs at least {} unique characters, got {}",
            MIN_ALPHABET_LENGTH,
            unique.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncodingConfig, EncodingProfile};

    #[test]
    fn matches_reference_vectors() {
        let codec = Codec::new("this is my salt", 0, DEFAULT_ALPHABET).unwrap();
        assert_eq!(codec.encode(12345), "NkK9");

        let codec = Codec::new("", 16, DEFAULT_ALPHABET).unwrap();
        assert_eq!(codec.encode(1), "4q2VolejRejNmGQB");
    }

    #[test]
    fn default_codec_vectors() {
        let codec = Codec::default();
        assert_eq!(codec.encode(0), "Bx1e08p0OopJ");
        assert_eq!(codec.encode(100), "Bx1e08aOrOop");
        assert_eq!(codec.encode(12345), "2gD0gx8ErBkJ");
        assert_eq!(codec.encode(i64::MAX as u64), "DeWXY8Qba4KQe");
    }

    #[test]
    fn explicit_defaults_match_default() {
        let built = Codec::new(DEFAULT_SALT, DEFAULT_MIN_LENGTH, DEFAULT_ALPHABET).unwrap();
        for n in [0u64, 1, 100, 12345, u32::MAX as u64] {
            assert_eq!(built.encode(n), Codec::default().encode(n));
        }
    }

    #[test]
    fn default_output_respects_min_length() {
        let codec = Codec::default();
        for n in [0u64, 1, 7, 99, 1_000_000] {
            assert!(codec.encode(n).chars().count() >= DEFAULT_MIN_LENGTH);
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let codec = Codec::default();
        for n in [0u64, 1, 42, 100, 67890, u32::MAX as u64, i64::MAX as u64] {
            assert_eq!(codec.decode(&codec.encode(n)), Some(vec![n]));
        }
    }

    #[test]
    fn decode_multiple_numbers() {
        let codec = Codec::new("this is my salt", 0, DEFAULT_ALPHABET).unwrap();
        let id = codec.encode_many(&[123, 456, 789]).unwrap();
        assert_eq!(codec.decode(&id), Some(vec![123, 456, 789]));
    }

    #[test]
    fn decode_rejects_foreign_text() {
        let codec = Codec::default();
        assert_eq!(codec.decode("100"), None);
        assert_eq!(codec.decode("abc"), None);
        assert_eq!(codec.decode(""), None);
        assert_eq!(codec.decode("hello world"), None);
        assert_eq!(codec.decode("-5"), None);
        assert_eq!(codec.decode("ключ"), None);
        assert_eq!(codec.decode(&"z".repeat(200)), None);
    }

    #[test]
    fn decode_rejects_other_salt() {
        let ours = Codec::default();
        let theirs = Codec::new("another salt", DEFAULT_MIN_LENGTH, DEFAULT_ALPHABET).unwrap();
        let id = theirs.encode(12345);
        assert_ne!(ours.decode(&id), Some(vec![12345]));
    }

    #[test]
    fn custom_alphabet_round_trips() {
        let codec = Codec::new("Yout_Salt", 12, "0123456789abcdef").unwrap();
        let id = codec.encode(5);
        assert_eq!(id, "8b6457597ed3");
        assert_eq!(codec.decode(&id), Some(vec![5]));
    }

    #[test]
    fn rejects_short_alphabet() {
        let err = Codec::new("salt", 0, "abcdef").unwrap_err();
        assert!(matches!(err, OpkitError::Alphabet(_)));
    }

    #[test]
    fn rejects_alphabet_with_separators_or_spaces() {
        assert!(Codec::new("salt", 0, "abcdefghijklmnop q").is_err());
        assert!(Codec::new("salt", 0, "abcdefghijklmnop,q").is_err());
        assert!(Codec::new("salt", 0, "abcdefghijklmnopé").is_err());
    }

    #[test]
    fn rejects_duplicate_characters() {
        assert!(Codec::new("salt", 0, "aabcdefghijklmnopq").is_err());
    }

    #[test]
    fn min_length_is_capped() {
        assert!(Codec::new("salt", MAX_MIN_LENGTH, DEFAULT_ALPHABET).is_ok());
        let err = Codec::new("salt", MAX_MIN_LENGTH + 1, DEFAULT_ALPHABET).unwrap_err();
        assert!(matches!(err, OpkitError::Config(_)));
        assert!(Codec::new("salt", 1_000_000, DEFAULT_ALPHABET).is_err());
    }

    #[test]
    fn empty_sequence_has_no_encoding() {
        assert_eq!(Codec::default().encode_many(&[]), None);
    }

    #[test]
    fn prefix_is_added_and_required() {
        let codec = Codec::default().with_prefix("haot").unwrap();
        let id = codec.encode(42);
        assert!(id.starts_with("haot"));
        assert_eq!(&id[4..], Codec::default().encode(42));
        assert_eq!(codec.decode(&id), Some(vec![42]));
        assert_eq!(codec.decode(&id[4..]), None);
    }

    #[test]
    fn prefix_rejects_separators() {
        assert!(Codec::default().with_prefix("a,b").is_err());
        assert!(Codec::default().with_prefix("a b").is_err());
    }

    #[test]
    fn every_profile_round_trips() {
        for profile in EncodingProfile::ALL {
            let config = EncodingConfig::for_profile(profile);
            let codec = Codec::from_config(&config).unwrap();
            for n in [0u64, 7, 12345, i64::MAX as u64] {
                let id = codec.encode(n);
                assert!(id.starts_with(codec.prefix()));
                assert!(id.len() >= codec.prefix().len() + codec.min_length());
                assert_eq!(codec.decode(&id), Some(vec![n]), "{:?}", profile);
            }
        }
    }

    #[test]
    fn huawei_profile_uses_lowercase_ids_with_prefix() {
        let codec = Codec::from_config(&EncodingConfig::for_profile(EncodingProfile::Huawei)).unwrap();
        let id = codec.encode(12345);
        assert!(id.starts_with("haot"));
        assert_eq!(id.len(), 4 + 16);
        assert!(id[4..].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let general = Codec::from_config(&EncodingConfig::for_profile(EncodingProfile::General)).unwrap();
        assert_eq!(general.decode(&id), None);
        assert_eq!(codec.decode(&general.encode(12345)), None);
    }
}
