use super::glyphs::GlyphAlphabet;
use fastrand::Rng;
use std::collections::BTreeSet;

/// Produce the glyphs to display for `text` given the positions that are already revealed.
///
/// Spaces always pass through. Revealed positions show their true character and everything
/// else gets a filler glyph picked from `alphabet`. The output always has as many characters
/// as `text`.
pub fn shuffle_text(text: &[char], revealed: &BTreeSet<usize>, alphabet: &GlyphAlphabet, rng: &mut Rng) -> Vec<char> {
    match alphabet {
        GlyphAlphabet::Fixed(characters) => shuffle_fixed(text, revealed, characters, rng),
        GlyphAlphabet::OriginalOnly => shuffle_original(text, revealed, rng),
    }
}

fn is_hidden(text: &[char], revealed: &BTreeSet<usize>, index: usize) -> bool {
    text[index] != ' ' && !revealed.contains(&index)
}

fn shuffle_fixed(text: &[char], revealed: &BTreeSet<usize>, characters: &[char], rng: &mut Rng) -> Vec<char> {
    (0..text.len())
        .map(|index| {
            if !is_hidden(text, revealed, index) {
                return text[index];
            }
            // An empty alphabet leaves the character unresolved.
            if characters.is_empty() { text[index] } else { characters[rng.usize(..characters.len())] }
        })
        .collect()
}

fn shuffle_original(text: &[char], revealed: &BTreeSet<usize>, rng: &mut Rng) -> Vec<char> {
    let mut leftovers: Vec<char> =
        (0..text.len()).filter(|index| is_hidden(text, revealed, *index)).map(|index| text[index]).collect();
    rng.shuffle(&mut leftovers);

    let mut leftovers = leftovers.into_iter();
    (0..text.len())
        .map(|index| if is_hidden(text, revealed, index) { leftovers.next().unwrap_or(text[index]) } else { text[index] })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn sorted(mut chars: Vec<char>) -> Vec<char> {
        chars.sort_unstable();
        chars
    }

    #[rstest]
    #[case::nothing_revealed(&[])]
    #[case::one_revealed(&[0])]
    #[case::last_revealed(&[2])]
    #[case::all_but_space(&[0, 1, 2, 4])]
    fn original_only_is_an_anagram_of_hidden(#[case] revealed: &[usize]) {
        let text = chars("AAB C");
        let revealed: BTreeSet<usize> = revealed.iter().copied().collect();
        let mut rng = Rng::with_seed(7);
        for _ in 0..50 {
            let output = shuffle_text(&text, &revealed, &GlyphAlphabet::OriginalOnly, &mut rng);
            assert_eq!(output.len(), text.len());
            assert_eq!(output[3], ' ');

            let hidden: Vec<usize> = (0..text.len()).filter(|i| text[*i] != ' ' && !revealed.contains(i)).collect();
            let expected = sorted(hidden.iter().map(|i| text[*i]).collect());
            let fillers = sorted(hidden.iter().map(|i| output[*i]).collect());
            assert_eq!(fillers, expected);
            for index in &revealed {
                assert_eq!(output[*index], text[*index]);
            }
        }
    }

    #[test]
    fn fixed_fillers_come_from_alphabet() {
        let text = chars("hello world");
        let alphabet = GlyphAlphabet::fixed("xyz");
        let revealed = BTreeSet::from([1]);
        let mut rng = Rng::with_seed(42);
        for _ in 0..50 {
            let output = shuffle_text(&text, &revealed, &alphabet, &mut rng);
            assert_eq!(output.len(), text.len());
            assert_eq!(output[1], 'e');
            assert_eq!(output[5], ' ');
            for (index, ch) in output.iter().enumerate() {
                if index != 1 && index != 5 {
                    assert!("xyz".contains(*ch), "unexpected filler {ch:?}");
                }
            }
        }
    }

    #[test]
    fn empty_alphabet_passes_through() {
        let text = chars("abc");
        let output = shuffle_text(&text, &BTreeSet::new(), &GlyphAlphabet::fixed(""), &mut Rng::with_seed(1));
        assert_eq!(output, text);
    }

    #[test]
    fn empty_text() {
        let output = shuffle_text(&[], &BTreeSet::new(), &GlyphAlphabet::OriginalOnly, &mut Rng::with_seed(1));
        assert!(output.is_empty());
    }

    #[test]
    fn fully_revealed_is_the_text() {
        let text = chars("a b");
        let revealed = BTreeSet::from([0, 1, 2]);
        let output = shuffle_text(&text, &revealed, &GlyphAlphabet::default(), &mut Rng::with_seed(3));
        assert_eq!(output, text);
    }
}
