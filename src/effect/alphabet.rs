//! Glyphs a scrambled position may show

use rand::Rng;

/// Uppercase then lowercase Latin letters (52 glyphs)
pub const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Draw one glyph uniformly from [`ALPHABET`]
pub fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Whether `c` could have been produced by [`random_glyph`]
#[cfg(test)]
pub fn is_scramble_glyph(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_52_distinct_letters() {
        let distinct: HashSet<u8> = ALPHABET.iter().copied().collect();
        assert_eq!(distinct.len(), 52);
        assert!(ALPHABET.iter().all(|b| (*b as char).is_ascii_alphabetic()));
    }

    #[test]
    fn random_glyphs_cover_both_cases() {
        let mut rng = SmallRng::seed_from_u64(7);
        let drawn: Vec<char> = (0..2_000).map(|_| random_glyph(&mut rng)).collect();

        assert!(drawn.iter().all(|c| is_scramble_glyph(*c)));
        assert!(drawn.iter().any(|c| c.is_ascii_uppercase()));
        assert!(drawn.iter().any(|c| c.is_ascii_lowercase()));
    }
}
