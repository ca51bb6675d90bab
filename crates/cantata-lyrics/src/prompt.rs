//! Mood classification and prompt expansion.

/// Mood detected from keywords in the user's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Sad,
    Happy,
    Love,
    Neutral,
}

impl Mood {
    /// Classify a request by the first matching keyword.
    pub fn classify(user_input: &str) -> Self {
        let lower = user_input.to_lowercase();
        if lower.contains("sad") {
            Mood::Sad
        } else if lower.contains("happy") {
            Mood::Happy
        } else if lower.contains("love") {
            Mood::Love
        } else {
            Mood::Neutral
        }
    }

    /// The keyword that triggered this mood, if any.
    fn keyword(&self) -> Option<&'static str> {
        match self {
            Mood::Sad => Some("sad"),
            Mood::Happy => Some("happy"),
            Mood::Love => Some("love"),
            Mood::Neutral => None,
        }
    }
}

/// Expand a user request into a detailed prompt for the text model.
///
/// The mood keyword is removed from the subject so "sad song about rain"
/// asks for a sad song about "song about rain", not a song about sadness.
pub fn build_prompt(user_input: &str) -> String {
    let mood = Mood::classify(user_input);
    let subject = match mood.keyword() {
        Some(keyword) => strip_keyword(user_input, keyword),
        None => user_input.trim().to_string(),
    };

    match mood {
        Mood::Sad => format!(
            "Write a sad song about {subject}. The song should evoke feelings of loneliness and melancholy."
        ),
        Mood::Happy => format!(
            "Write a happy song about {subject}. The lyrics should be joyful and uplifting."
        ),
        Mood::Love => format!(
            "Write a love song about {subject}. The song should express deep emotions and affection."
        ),
        Mood::Neutral => {
            format!("Write a song about {subject}. The song should be engaging and meaningful.")
        }
    }
}

/// Remove every case-insensitive occurrence of the keyword, then tidy up
/// the leftover double spaces.
fn strip_keyword(input: &str, keyword: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let lowered = input.to_lowercase();
    // Byte offsets in the lowered copy only line up when lowering did not
    // change any character's width; fall back to exact matching otherwise.
    let lower = if lowered.len() == input.len() {
        lowered
    } else {
        input.to_string()
    };
    let mut cursor = 0;
    while let Some(found) = lower[cursor..].find(keyword) {
        out.push_str(&input[cursor..cursor + found]);
        cursor += found + keyword.len();
    }
    out.push_str(&input[cursor..]);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_classification() {
        assert_eq!(Mood::classify("a sad tune"), Mood::Sad);
        assert_eq!(Mood::classify("HAPPY days"), Mood::Happy);
        assert_eq!(Mood::classify("song of love"), Mood::Love);
        assert_eq!(Mood::classify("about mountains"), Mood::Neutral);
    }

    #[test]
    fn test_sad_takes_priority_over_love() {
        // First keyword in the chain wins, matching the original templates.
        assert_eq!(Mood::classify("sad love song"), Mood::Sad);
    }

    #[test]
    fn test_keyword_is_stripped_from_subject() {
        let prompt = build_prompt("midnight sad song on birds");
        assert!(prompt.starts_with("Write a sad song about midnight song on birds."));
        assert!(!prompt.contains("sad song about midnight sad"));
    }

    #[test]
    fn test_neutral_template() {
        let prompt = build_prompt("  the open sea  ");
        assert_eq!(
            prompt,
            "Write a song about the open sea. The song should be engaging and meaningful."
        );
    }

    #[test]
    fn test_strip_keyword_case_insensitive() {
        assert_eq!(strip_keyword("Sad rain", "sad"), "rain");
    }
}
