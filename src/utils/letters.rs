use rand::Rng;

/// Letters used to fill cells no word occupies
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pick a letter uniformly from the alphabet
pub fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    let idx = rng.random_range(0..ALPHABET.len());
    ALPHABET[idx] as char
}

/// Uppercase a word before placement, split into letters.
///
/// Characters outside `A`-`Z` (digits, spaces) are kept and placed verbatim.
pub fn normalize_word(word: &str) -> Vec<char> {
    word.to_uppercase().chars().collect()
}
