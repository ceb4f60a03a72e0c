//! Listing description quality.
//!
//! A lexical scorer for seller-written descriptions: length, condition
//! info, category keywords, formatting, and policy checks (no contact
//! info), with typed enhancement suggestions and a template-based rewrite
//! helper. Purely local, same character as the other engines but stateless —
//! there is no snapshot to refresh.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Keywords buyers expect to see per category.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("electronics", &["brand new", "warranty", "specifications", "condition", "original packaging"]),
    ("furniture", &["dimensions", "material", "condition", "assembly", "delivery"]),
    ("clothing", &["size", "brand", "material", "condition", "measurements"]),
    ("books", &["author", "edition", "condition", "ISBN", "publication year"]),
    ("toys", &["age range", "condition", "brand", "safety", "batteries"]),
    ("sports", &["brand", "size", "condition", "material", "suitable for"]),
    ("automotive", &["make", "model", "year", "condition", "mileage"]),
    ("home", &["brand", "condition", "dimensions", "warranty", "features"]),
];

static CONDITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(new|used|like new|excellent|good|fair|mint|brand new|barely used|gently used)\b",
    )
    .unwrap()
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static VAGUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(thing|stuff|nice|good|great|awesome|cool|item)\b").unwrap()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Readability {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Scored analysis of a description draft.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WritingAnalysis {
    /// 0–100, starting from 100 with deductions per issue.
    pub score: u32,
    pub suggestions: Vec<String>,
    pub readability: Readability,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Percentage of the category's expected keywords present.
    pub keyword_density: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Grammar,
    Clarity,
    Keywords,
    Length,
    Structure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A single live-editing hint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnhancementSuggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub severity: Severity,
}

/// Stateless description analyzer.
#[derive(Clone, Copy, Debug, Default)]
pub struct WritingAnalyzer;

impl WritingAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a description draft, optionally against a category's keyword
    /// expectations.
    pub fn analyze(&self, text: &str, category: Option<&str>) -> WritingAnalysis {
        let word_count = count_words(text);
        let sentence_count = count_sentences(text);
        let mut suggestions = Vec::new();
        let mut score: i32 = 100;

        if word_count < 20 {
            suggestions
                .push("Add more details - descriptions with 20+ words sell 40% better".to_owned());
            score -= 25;
        } else if word_count < 50 {
            suggestions.push(
                "Consider adding more details about condition, features, and benefits".to_owned(),
            );
            score -= 10;
        }

        if !CONDITION_RE.is_match(text) {
            suggestions.push(
                "Add condition information (e.g., \"Like New\", \"Excellent Condition\")"
                    .to_owned(),
            );
            score -= 15;
        }

        if let Some(category) = category {
            let missing = missing_keywords(text, category);
            if !missing.is_empty() {
                let preview: Vec<&str> = missing.iter().take(3).copied().collect();
                suggestions.push(format!("Consider mentioning: {}", preview.join(", ")));
                score -= 10;
            }
        }

        if is_all_caps(text) {
            suggestions.push(
                "Avoid ALL CAPS - use normal capitalization for better readability".to_owned(),
            );
            score -= 15;
        }

        if has_contact_info(text) {
            suggestions
                .push("Remove phone numbers/emails - use platform messaging instead".to_owned());
            score -= 20;
        }

        WritingAnalysis {
            score: score.max(0) as u32,
            suggestions,
            readability: readability_level(word_count, sentence_count),
            word_count,
            sentence_count,
            keyword_density: keyword_density(text, category),
        }
    }

    /// Live hints as the seller types.
    pub fn enhancement_suggestions(
        &self,
        text: &str,
        category: Option<&str>,
    ) -> Vec<EnhancementSuggestion> {
        let mut suggestions = Vec::new();
        let word_count = count_words(text);

        if word_count < 10 {
            suggestions.push(EnhancementSuggestion {
                kind: SuggestionKind::Length,
                message: "Add more details to attract buyers".to_owned(),
                severity: Severity::Warning,
            });
        } else if word_count > 200 {
            suggestions.push(EnhancementSuggestion {
                kind: SuggestionKind::Length,
                message: "Consider being more concise - buyers prefer scannable descriptions"
                    .to_owned(),
                severity: Severity::Info,
            });
        }

        if word_count > 30 && !text.contains('.') && !text.contains('!') {
            suggestions.push(EnhancementSuggestion {
                kind: SuggestionKind::Structure,
                message: "Break into sentences for better readability".to_owned(),
                severity: Severity::Info,
            });
        }

        if let Some(category) = category {
            if word_count > 10 {
                let missing = missing_keywords(text, category);
                if let Some(first) = missing.first() {
                    suggestions.push(EnhancementSuggestion {
                        kind: SuggestionKind::Keywords,
                        message: format!("Add key info: {first}"),
                        severity: Severity::Info,
                    });
                }
            }
        }

        if has_vague_language(text) {
            suggestions.push(EnhancementSuggestion {
                kind: SuggestionKind::Clarity,
                message: "Be specific about features and benefits".to_owned(),
                severity: Severity::Info,
            });
        }

        suggestions
    }

    /// Light mechanical cleanup plus a category template for thin drafts.
    pub fn enhance(&self, text: &str, category: Option<&str>) -> String {
        let mut enhanced = text.trim().to_owned();

        if let Some(first) = enhanced.chars().next() {
            let capitalized: String = first.to_uppercase().collect();
            enhanced = capitalized + &enhanced[first.len_utf8()..];
        }

        if !enhanced.ends_with(['.', '!', '?']) {
            enhanced.push('.');
        }

        if count_words(&enhanced) < 20 {
            if let Some(category) = category {
                enhanced.push_str("\n\n");
                enhanced.push_str(template(category));
            }
        }

        enhanced
    }
}

/// Fixed description template per category.
pub fn template(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "electronics" => "Condition: [New/Used]\nBrand: [Brand Name]\nKey Features:\n- \n- \n- ",
        "furniture" => {
            "Material: [Wood/Metal/etc]\nDimensions: [LxWxH]\nCondition: [Excellent/Good]\nDelivery: [Available/Pickup only]"
        }
        "clothing" => {
            "Size: [S/M/L/XL]\nBrand: [Brand Name]\nMaterial: [Cotton/Polyester/etc]\nCondition: [Like New/Gently Used]"
        }
        "books" => {
            "Author: [Name]\nCondition: [Like New/Good]\nFormat: [Hardcover/Paperback]\nEdition: [Edition]"
        }
        _ => "Condition: [Describe condition]\nKey Features:\n- \n- \nAdditional Details:",
    }
}

fn keywords_for(category: &str) -> &'static [&'static str] {
    let needle = category.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

fn missing_keywords(text: &str, category: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    keywords_for(category)
        .iter()
        .filter(|keyword| !haystack.contains(&keyword.to_lowercase()))
        .copied()
        .collect()
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?']).filter(|part| !part.trim().is_empty()).count()
}

fn is_all_caps(text: &str) -> bool {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 10 {
        return false;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters as f64 > 0.8
}

fn has_contact_info(text: &str) -> bool {
    PHONE_RE.is_match(text) || EMAIL_RE.is_match(text)
}

fn has_vague_language(text: &str) -> bool {
    VAGUE_RE.is_match(text) && count_words(text) < 30
}

fn readability_level(word_count: usize, sentence_count: usize) -> Readability {
    if word_count < 20 {
        return Readability::Poor;
    }
    if word_count < 50 {
        return Readability::Fair;
    }
    let avg_words_per_sentence = word_count as f64 / sentence_count.max(1) as f64;
    if avg_words_per_sentence > 25.0 {
        Readability::Fair
    } else if avg_words_per_sentence > 15.0 {
        Readability::Good
    } else {
        Readability::Excellent
    }
}

fn keyword_density(text: &str, category: Option<&str>) -> f64 {
    let Some(category) = category else { return 0.0 };
    let keywords = keywords_for(category);
    if keywords.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let matching =
        keywords.iter().filter(|keyword| haystack.contains(&keyword.to_lowercase())).count();
    matching as f64 / keywords.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLID_DESCRIPTION: &str = "Gently used standing desk in excellent condition. \
        Solid oak material with a steel frame. Dimensions are 120x60x75 cm and the height \
        is adjustable. No assembly required and local delivery is available this month. \
        Cable tray and two desk hooks are included. Selling only because we are moving \
        abroad soon.";

    #[test]
    fn short_description_scores_low_with_length_suggestion() {
        let analysis = WritingAnalyzer::new().analyze("old chair", None);
        assert!(analysis.score < 100);
        assert_eq!(analysis.readability, Readability::Poor);
        assert!(analysis.suggestions.iter().any(|s| s.contains("20+ words")));
    }

    #[test]
    fn thorough_description_scores_high() {
        let analysis = WritingAnalyzer::new().analyze(SOLID_DESCRIPTION, Some("furniture"));
        assert!(analysis.score >= 90, "score was {}", analysis.score);
        assert_eq!(analysis.readability, Readability::Excellent);
        assert!(analysis.keyword_density > 50.0);
    }

    #[test]
    fn contact_info_is_penalized() {
        let text = "Great bike in excellent condition, lots of extras included with it. \
            Call 555-123-4567 or mail me at seller@example.com to arrange a quick pickup today.";
        let analysis = WritingAnalyzer::new().analyze(text, None);
        assert!(analysis.suggestions.iter().any(|s| s.contains("platform messaging")));
    }

    #[test]
    fn shouting_is_penalized() {
        let analysis = WritingAnalyzer::new().analyze("AMAZING PHONE FOR SALE CHEAP", None);
        assert!(analysis.suggestions.iter().any(|s| s.contains("ALL CAPS")));
    }

    #[test]
    fn vague_short_drafts_get_a_clarity_hint() {
        let suggestions = WritingAnalyzer::new()
            .enhancement_suggestions("nice thing for sale, really cool stuff honestly", None);
        assert!(suggestions.iter().any(|s| s.kind == SuggestionKind::Clarity));
    }

    #[test]
    fn missing_category_keywords_produce_a_keywords_hint() {
        let suggestions = WritingAnalyzer::new().enhancement_suggestions(
            "Selling a paperback I finished last week, great story and fast shipping",
            Some("books"),
        );
        assert!(suggestions.iter().any(|s| s.kind == SuggestionKind::Keywords));
    }

    #[test]
    fn enhance_capitalizes_and_terminates_the_draft() {
        let enhanced = WritingAnalyzer::new().enhance("barely used espresso machine", None);
        assert!(enhanced.starts_with("Barely"));
        assert!(enhanced.ends_with('.'));
    }

    #[test]
    fn enhance_appends_the_category_template_to_thin_drafts() {
        let enhanced = WritingAnalyzer::new().enhance("warm winter jacket", Some("clothing"));
        assert!(enhanced.contains("Size: [S/M/L/XL]"));
    }

    #[test]
    fn unknown_category_falls_back_to_the_default_template() {
        assert!(template("gardening").starts_with("Condition: [Describe condition]"));
    }
}
