/// Vowel-group syllable estimation.

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Estimate the syllable count of a single token.
///
/// Lower-cases the token, drops one trailing `ed`/`es`/`s`, counts
/// non-vowel→vowel transitions and discounts a silent final `e`.
/// Returns 0 for an empty token and at least 1 otherwise.
pub fn count_syllables(token: &str) -> usize {
    let word = token.trim().to_lowercase();
    if word.is_empty() {
        return 0;
    }

    let stem = ["ed", "es", "s"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(&word);

    let mut count = 0usize;
    let mut prev_was_vowel = false;
    for c in stem.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if stem.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_zero() {
        assert_eq!(count_syllables(""), 0);
        assert_eq!(count_syllables("   "), 0);
    }

    #[test]
    fn simple_words() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("Adventure"), 3);
        assert_eq!(count_syllables("mysterious"), 3);
    }

    #[test]
    fn silent_e_discounted() {
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("explore"), 2);
    }

    #[test]
    fn suffix_stripped_once() {
        // "walked" -> "walk"
        assert_eq!(count_syllables("walked"), 1);
        // "trees" -> "tre", the trailing e is the only vowel group
        assert_eq!(count_syllables("trees"), 1);
        // "boxes" -> "box"
        assert_eq!(count_syllables("boxes"), 1);
    }

    #[test]
    fn minimum_of_one() {
        assert_eq!(count_syllables("s"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("nth"), 1);
        assert_eq!(count_syllables("..."), 1);
    }

    #[test]
    fn trailing_punctuation_blocks_suffix_strip() {
        // "forest," keeps its comma so the "s" is not a suffix
        assert_eq!(count_syllables("forest,"), 2);
    }
}
