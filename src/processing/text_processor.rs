//! Text processing and normalization

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    whitespace_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    name_line_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let email_regex = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(
            r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{3}[-.\s]?\d{3,4}\b",
        )
        .expect("Invalid phone regex");

        let name_line_regex = Regex::new(r"^[A-Za-z ,.'-]+$").expect("Invalid name regex");

        Self {
            stop_words: Self::create_stop_words(),
            whitespace_regex,
            email_regex,
            phone_regex,
            name_line_regex,
        }
    }

    /// Lower-case, collapse whitespace runs to one space and trim.
    pub fn normalize(&self, text: &str) -> String {
        self.whitespace_regex
            .replace_all(&text.to_lowercase(), " ")
            .trim()
            .to_string()
    }

    /// Trimmed, non-empty lines.
    pub fn non_empty_lines<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Lower-cased word tokens without stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.len() > 1 && !self.stop_words.contains(word.as_str()))
            .filter(|word| word.chars().any(|c| c.is_alphabetic()))
            .collect()
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.unicode_words().count()
    }

    /// First e-mail address, lower-cased.
    pub fn find_email(&self, text: &str) -> Option<String> {
        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }

    /// First phone number, normalized to `+<digits>`.
    pub fn find_phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .find_iter(text)
            .find_map(|m| normalize_phone(m.as_str()))
    }

    /// First of the opening five lines that looks like a person's name.
    pub fn guess_name(&self, text: &str) -> Option<String> {
        self.non_empty_lines(text)
            .into_iter()
            .take(5)
            .find(|line| {
                let words = line.split_whitespace().count();
                (1..=4).contains(&words) && self.name_line_regex.is_match(line)
            })
            .map(title_case)
    }

    fn create_stop_words() -> HashSet<&'static str> {
        [
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
            "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
            "to", "was", "will", "with", "this", "but", "they", "have",
            "had", "what", "which", "she", "do", "how", "their", "if", "up",
            "out", "many", "then", "them", "these", "so", "some", "her",
            "would", "into", "him", "more", "no", "could", "my", "than",
            "been", "who", "now", "did", "may", "over", "our", "also",
            "such", "we", "you", "your", "all", "any", "can", "able",
        ]
        .into_iter()
        .collect()
    }
}

/// Capitalize the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(7..=15).contains(&digits.len()) {
        return None;
    }

    let has_country_code = raw.trim_start().starts_with('+');
    let normalized = if has_country_code {
        format!("+{}", digits)
    } else if digits.len() == 10 {
        format!("+1{}", digits)
    } else {
        format!("+{}", digits)
    };

    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize("  Python\n\n  and\tSQL  "), "python and sql");
    }

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust programming language is awesome!");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(tokens.contains(&"programming".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
    }

    #[test]
    fn test_find_email_is_lowercased() {
        let processor = TextProcessor::new();
        let email = processor.find_email("Reach me: Jane.Roe@Example.COM or not");
        assert_eq!(email.as_deref(), Some("jane.roe@example.com"));
        assert!(processor.find_email("no address here").is_none());
    }

    #[test]
    fn test_find_phone_formats() {
        let processor = TextProcessor::new();
        assert_eq!(
            processor.find_phone("Phone: (555) 123-4567").as_deref(),
            Some("+15551234567")
        );
        assert_eq!(
            processor.find_phone("Mobile +1 (555) 987-6543").as_deref(),
            Some("+15559876543")
        );
        assert_eq!(
            processor.find_phone("tel 555.123.4567").as_deref(),
            Some("+15551234567")
        );
        assert!(processor.find_phone("Call me maybe").is_none());
    }

    #[test]
    fn test_guess_name() {
        let processor = TextProcessor::new();
        let text = "\n  JANE o'NEIL \njane@example.com\nSkills";
        assert_eq!(processor.guess_name(text).as_deref(), Some("Jane O'Neil"));

        let no_name = "jane@example.com\n+1 555 123 4567\nThis line has far too many words in it";
        assert!(processor.guess_name(no_name).is_none());
    }

    #[test]
    fn test_word_count() {
        let processor = TextProcessor::new();
        assert_eq!(processor.word_count("Built REST APIs in Rust, 2019 to 2023."), 8);
        assert_eq!(processor.word_count("   "), 0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mary-jane watson"), "Mary-Jane Watson");
    }
}
