//! Random identifier generation and format checks.
//!
//! Identifiers are 9 characters drawn uniformly from the 62-symbol
//! alphanumeric alphabet, giving 62^9 (about 1.3e16) possible values.

use rand::Rng;

/// Symbols an identifier may contain.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in every generated identifier.
pub const IDENTIFIER_LENGTH: usize = 9;

/// Draws a random identifier.
///
/// Uses the thread-local CSPRNG; each position is sampled independently and
/// uniformly over [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let id = generate_identifier();
/// assert_eq!(id.len(), 9);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_identifier() -> String {
    random_alphanumeric(IDENTIFIER_LENGTH)
}

/// Draws `len` characters uniformly from [`ALPHABET`].
///
/// Also used for bearer tokens issued by the admin CLI.
pub fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `candidate` has the shape of a generated identifier.
///
/// Used to reject obviously bogus path segments before touching the cache or
/// the store.
pub fn is_valid_identifier(candidate: &str) -> bool {
    candidate.len() == IDENTIFIER_LENGTH && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}
