// Numerology Letter Classifier
// Decides which characters of a name count as vowels

/// One flag per character of a name, true where the character is a vowel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterMask {
    vowels: Vec<bool>,
}

#[inline]
fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

impl LetterMask {
    /// Classify every character of `name`
    ///
    /// `a e i o u` are always vowels. `y` depends on its position:
    /// - alone, it is a vowel
    /// - first, it is a vowel before a consonant (Yvonne) and a consonant before a vowel (Yolanda)
    /// - last, it is a vowel after a consonant (Barry) and a consonant after a vowel (Mickey)
    /// - between two consonants it is a vowel (Kyle), between two vowels a consonant (Eyarta)
    /// - between a vowel and a consonant the following letter decides
    ///
    /// # Example
    /// ```
    /// # use numerology::mask::LetterMask;
    /// let mask = LetterMask::new("Kyle");
    /// assert_eq!(mask.vowels(), &[false, true, false, true]);
    /// ```
    pub fn new(name: &str) -> Self {
        let chars: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();
        let last = chars.len().saturating_sub(1);

        let vowels = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                if ch != 'y' {
                    return is_vowel(ch);
                }
                if chars.len() == 1 {
                    return true;
                }
                if i == 0 {
                    return !is_vowel(chars[i + 1]);
                }
                if i == last {
                    return !is_vowel(chars[i - 1]);
                }
                let before = is_vowel(chars[i - 1]);
                let after = is_vowel(chars[i + 1]);
                if before == after {
                    !before
                } else {
                    after
                }
            })
            .collect();

        Self { vowels }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.vowels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vowels.is_empty()
    }

    /// Every character participates
    pub fn full(&self) -> Vec<bool> {
        vec![true; self.vowels.len()]
    }

    /// Vowel positions
    pub fn vowels(&self) -> &[bool] {
        &self.vowels
    }

    /// Consonant positions, the negation of [`LetterMask::vowels`]
    pub fn consonants(&self) -> Vec<bool> {
        self.vowels.iter().map(|v| !v).collect()
    }
}
