use game_types::GameError;
use rand::Rng;
use rand::seq::SliceRandom;

/// Number of candidate words offered to the drawer each round.
pub const WORD_OPTION_COUNT: usize = 3;

const DEFAULT_WORDS: &[&str] = &[
    "apple", "banana", "car", "dog", "elephant", "fish", "guitar", "house", "ice cream", "jet",
    "kangaroo", "lamp", "mountain", "notebook", "ocean", "pizza", "queen", "rainbow", "sun",
    "train",
];

/// Normalizes chat text for comparison against the secret word
pub fn normalize_guess(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed equality. No partial credit.
pub fn guess_matches(guess: &str, word: &str) -> bool {
    normalize_guess(guess) == normalize_guess(word)
}

#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    pub fn new<I, S>(words: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for word in words {
            let word = normalize_guess(word.as_ref());
            if !word.is_empty() && !unique.contains(&word) {
                unique.push(word);
            }
        }

        if unique.len() < WORD_OPTION_COUNT {
            return Err(GameError::VocabularyTooSmall {
                required: WORD_OPTION_COUNT,
                available: unique.len(),
            });
        }

        Ok(Self { words: unique })
    }

    /// Create a word bank from a newline separated list. Blank lines and `#` comments are skipped.
    pub fn from_word_list(word_list: &str) -> Result<Self, GameError> {
        Self::new(
            word_list
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = normalize_guess(word);
        self.words.iter().any(|w| *w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draw distinct candidates uniformly at random.
    pub fn pick_options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut shuffled = self.words.clone();
        shuffled.shuffle(rng);
        shuffled.truncate(WORD_OPTION_COUNT);
        shuffled
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}
