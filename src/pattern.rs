// Numerology Template Parser
// Validates search templates and converts the placeholder word to a LIKE pattern

use crate::types::TemplateError;

/// Marks the part of a name to be filled from the table
pub const PLACEHOLDER: char = '?';

/// Escape character used in generated LIKE patterns
pub const LIKE_ESCAPE: char = '\\';

/// A search template split into its known words and the placeholder word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// The template with the placeholder word replaced by a bare `?`.
    /// "John Da?e Doe" becomes "John ? Doe".
    pub reconstructed: String,

    /// The word that held the placeholder, exactly as written ("Da?e")
    pub placeholder_word: String,
}

/// Parse a name template containing exactly one `?`
///
/// # Examples
/// ```
/// # use numerology::pattern::parse_template;
/// let parsed = parse_template("John Da?e Doe").unwrap();
/// assert_eq!(parsed.reconstructed, "John ? Doe");
/// assert_eq!(parsed.placeholder_word, "Da?e");
///
/// assert!(parse_template("John Doe").is_err());
/// assert!(parse_template("? ?").is_err());
/// ```
pub fn parse_template(name: &str) -> Result<ParsedTemplate, TemplateError> {
    match count_placeholders(name) {
        0 => return Err(TemplateError::MissingPlaceholder),
        1 => {}
        found => return Err(TemplateError::TooManyPlaceholders { found }),
    }

    let mut placeholder_word = String::new();
    let words: Vec<&str> = name
        .split(' ')
        .map(|word| {
            if word.contains(PLACEHOLDER) {
                placeholder_word = word.to_string();
                "?"
            } else {
                word
            }
        })
        .collect();

    Ok(ParsedTemplate {
        reconstructed: words.join(" "),
        placeholder_word,
    })
}

impl ParsedTemplate {
    /// Case-insensitive LIKE pattern for the placeholder word, or `None` when the
    /// word is a bare `?` and every table name fits
    ///
    /// # Example
    /// ```
    /// # use numerology::pattern::parse_template;
    /// let parsed = parse_template("Jo?n Smith").unwrap();
    /// assert_eq!(parsed.like_pattern().as_deref(), Some("jo%n"));
    /// assert_eq!(parse_template("? Smith").unwrap().like_pattern(), None);
    /// ```
    pub fn like_pattern(&self) -> Option<String> {
        if self.placeholder_word.chars().count() <= 1 {
            return None;
        }

        let mut pattern = String::with_capacity(self.placeholder_word.len());
        for ch in self.placeholder_word.to_lowercase().chars() {
            match ch {
                PLACEHOLDER => pattern.push('%'),
                '%' | '_' | LIKE_ESCAPE => {
                    pattern.push(LIKE_ESCAPE);
                    pattern.push(ch);
                }
                c => pattern.push(c),
            }
        }
        Some(pattern)
    }

    /// Build a full name by putting `found` where the placeholder word was
    ///
    /// The whole placeholder word is replaced, so "John Da?e Doe" with "Dave"
    /// gives "John Dave Doe", never "John DaDavee Doe".
    pub fn substitute(&self, found: &str) -> String {
        self.reconstructed.replacen(PLACEHOLDER, found, 1)
    }
}

/// Number of `?` in a string
#[inline]
pub fn count_placeholders(s: &str) -> usize {
    s.chars().filter(|&c| c == PLACEHOLDER).count()
}
