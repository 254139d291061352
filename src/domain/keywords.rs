use serde::{Deserialize, Serialize};

/// Ordered collection of unique keyword chips.
///
/// Insertion order is preserved for display and there is no reorder operation;
/// chips can only be appended or removed. Deserialized lists go through
/// [`KeywordChips::add`], so blank and repeated entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordChips(Vec<String>);

impl KeywordChips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims `token` and appends it unless it is blank or already present
    /// (case-sensitive). Returns whether a chip was added.
    pub fn add(&mut self, token: &str) -> bool {
        let trimmed = token.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.0.push(trimmed.to_string());
        true
    }

    /// Removes the chip at `index`, shifting later chips left.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn remove_last(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Backspace gesture: only removes the last chip while the entry field is empty.
    pub fn backspace(&mut self, entry: &str) -> Option<String> {
        if entry.is_empty() {
            self.remove_last()
        } else {
            None
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|chip| chip == token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordChips {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut chips = KeywordChips::new();
        for token in iter {
            chips.add(token.as_ref());
        }
        chips
    }
}

impl From<Vec<String>> for KeywordChips {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl From<KeywordChips> for Vec<String> {
    fn from(chips: KeywordChips) -> Self {
        chips.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_ignored() {
        let mut chips = KeywordChips::new();
        assert!(!chips.add(""));
        assert!(!chips.add("   "));
        assert!(chips.is_empty());
    }

    #[test]
    fn duplicates_are_rejected_case_sensitively() {
        let mut chips = KeywordChips::new();
        assert!(chips.add("Spa"));
        assert!(!chips.add("Spa"));
        assert!(chips.add("spa"));
        assert_eq!(chips.len(), 2);
    }

    #[test]
    fn tokens_are_trimmed_before_storing() {
        let mut chips = KeywordChips::new();
        chips.add(" Spa ");
        assert_eq!(chips.as_slice(), ["Spa".to_string()]);
        assert!(!chips.add("Spa  "));
    }

    #[test]
    fn remove_at_shifts_following_chips() {
        let mut chips: KeywordChips = ["a", "b", "c"].into_iter().collect();
        assert_eq!(chips.remove_at(1).as_deref(), Some("b"));
        assert_eq!(chips.iter().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(chips.remove_at(5), None);
        assert_eq!(chips.len(), 2);
    }

    #[test]
    fn backspace_only_fires_on_empty_entry() {
        let mut chips: KeywordChips = ["Grand Resort", "GR Phuket"].into_iter().collect();
        assert_eq!(chips.backspace("G"), None);
        assert_eq!(chips.backspace("").as_deref(), Some("GR Phuket"));
        assert_eq!(chips.backspace("").as_deref(), Some("Grand Resort"));
        assert_eq!(chips.backspace(""), None);
    }

    #[test]
    fn serializes_as_plain_array() {
        let chips: KeywordChips = ["Grand Resort", "GR Phuket"].into_iter().collect();
        let json = serde_json::to_string(&chips).unwrap();
        assert_eq!(json, r#"["Grand Resort","GR Phuket"]"#);
    }

    #[test]
    fn deserializing_applies_chip_rules() {
        let chips: KeywordChips = serde_json::from_str(r#"["Spa","Spa"," ", " Pool "]"#).unwrap();
        assert_eq!(chips.as_slice(), ["Spa", "Pool"]);
    }
}
