/// Decorative characters stripped from titles before tokenization.
/// Whitespace is stripped as well, see [`Normalizer::is_removed`].
pub const DECORATIVE_CHARS: &[char] = &[
    '【', '】', '「', '」', '『', '』', 'ー', '!', '?', '/', '#',
];

/// Title normalizer
/// Removes decorative / structural characters and all whitespace,
/// keeping the order of every other character.
///
/// # Examples
/// ```
/// use trend_term_extractor::extractor::normalizer::Normalizer;
/// let normalizer = Normalizer::default();
/// assert_eq!(normalizer.normalize("【速報】 Rust 入門!"), "速報Rust入門");
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    chars: Vec<char>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_chars(DECORATIVE_CHARS.iter().copied())
    }
}

impl Normalizer {
    /// Create a normalizer with a custom removal set
    ///
    /// # Arguments
    /// * `chars` - characters to remove (whitespace is always removed)
    pub fn with_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self { chars }
    }

    /// Characters this normalizer removes (besides whitespace)
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline]
    pub fn is_removed(&self, c: char) -> bool {
        c.is_whitespace() || self.chars.binary_search(&c).is_ok()
    }

    /// Normalize a title
    ///
    /// # Arguments
    /// * `title` - raw title
    ///
    /// # Returns
    /// * `String` - the title without decorative characters and whitespace
    pub fn normalize(&self, title: &str) -> String {
        title.chars().filter(|&c| !self.is_removed(c)).collect()
    }
}

/// Normalize a title with the default removal set
#[inline]
pub fn normalize(title: &str) -> String {
    Normalizer::default().normalize(title)
}
