//! Heading-based chapter segmentation over flattened document text.

use crate::config::defaults;
use crate::tokens::TokenSequence;
use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, warn};

/// Chapter label to tokens, in document order.
pub type ChapterMap = IndexMap<String, TokenSequence>;

/// Which line-start headings open a new chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRules {
    /// Matched case-insensitively, e.g. "Chapter", "Part".
    pub keywords: Vec<String>,
    /// Spelled-out numbers accepted after a keyword, e.g. "One".
    pub spelled_numbers: Vec<String>,
    /// Accept uppercase roman numerals ("IV") as numbers.
    pub allow_roman: bool,
    /// Label for non-empty text ahead of the first heading.
    pub leading_label: String,
    /// Label for the single chapter of a document without headings.
    pub fallback_label: String,
}

impl Default for HeadingRules {
    fn default() -> Self {
        HeadingRules {
            keywords: defaults::default_chapter_keywords(),
            spelled_numbers: defaults::default_spelled_numbers(),
            allow_roman: defaults::default_allow_roman(),
            leading_label: defaults::default_leading_label(),
            fallback_label: defaults::default_fallback_label(),
        }
    }
}

impl HeadingRules {
    fn pattern(&self) -> Option<String> {
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|kw| kw.trim())
            .filter(|kw| !kw.is_empty())
            .map(regex::escape)
            .collect();
        if keywords.is_empty() {
            return None;
        }

        let mut numbers = vec![r"\d+".to_string()];
        if self.allow_roman {
            numbers.push(r"(?-i:[IVXLCDM]+)".to_string());
        }
        numbers.extend(
            self.spelled_numbers
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(regex::escape),
        );

        Some(format!(
            r"(?mi)^[^\S\n]*((?:{})[^\S\n]+(?:{}))\b[:.]?[^\S\n]*([^\n]*)$",
            keywords.join("|"),
            numbers.join("|"),
        ))
    }
}

/// Compiled heading matcher.
#[derive(Debug, Clone)]
pub struct ChapterSplitter {
    heading: Option<Regex>,
    leading_label: String,
    fallback_label: String,
}

impl ChapterSplitter {
    pub fn new(rules: &HeadingRules) -> Self {
        let heading = rules.pattern().and_then(|pattern| match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!("Chapter heading pattern rejected, chapters disabled: {err}");
                None
            }
        });
        Self {
            heading,
            leading_label: rules.leading_label.clone(),
            fallback_label: rules.fallback_label.clone(),
        }
    }

    /// Split `text` at every heading line. Text ahead of the first heading
    /// becomes a leading chapter; headings without a body are skipped.
    pub fn split(&self, text: &str) -> ChapterMap {
        let mut chapters = ChapterMap::new();

        let headings: Vec<Heading> = match &self.heading {
            Some(regex) => regex
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let name = caps.get(1)?.as_str().split_whitespace().collect::<Vec<_>>();
                    let title = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                    let name = name.join(" ");
                    let label = if title.is_empty() {
                        name
                    } else {
                        format!("{name}: {title}")
                    };
                    Some(Heading {
                        start: whole.start(),
                        end: whole.end(),
                        label,
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        if let Some(first) = headings.first() {
            let leading = TokenSequence::from_text(&text[..first.start]);
            if !leading.is_empty() {
                insert_unique(&mut chapters, self.leading_label.clone(), leading);
            }
        }

        for (idx, heading) in headings.iter().enumerate() {
            let body_end = headings
                .get(idx + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());
            let body = TokenSequence::from_text(&text[heading.end..body_end]);
            if body.is_empty() {
                debug!(label = %heading.label, "Skipping heading without body text");
                continue;
            }
            insert_unique(&mut chapters, heading.label.clone(), body);
        }

        if chapters.is_empty() {
            let all = TokenSequence::from_text(text);
            if !all.is_empty() {
                chapters.insert(self.fallback_label.clone(), all);
            }
        }

        debug!(
            headings = headings.len(),
            chapters = chapters.len(),
            "Segmented text into chapters"
        );
        chapters
    }
}

struct Heading {
    start: usize,
    end: usize,
    label: String,
}

fn insert_unique(chapters: &mut ChapterMap, label: String, tokens: TokenSequence) {
    if !chapters.contains_key(&label) {
        chapters.insert(label, tokens);
        return;
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{label} ({n})");
        if !chapters.contains_key(&candidate) {
            chapters.insert(candidate, tokens);
            return;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> ChapterMap {
        ChapterSplitter::new(&HeadingRules::default()).split(text)
    }

    fn labels(chapters: &ChapterMap) -> Vec<&str> {
        chapters.keys().map(String::as_str).collect()
    }

    #[test]
    fn two_headings_give_two_chapters_with_their_own_bodies() {
        let chapters = split("Chapter 1\nThe first body.\nChapter 2\nThe second body.\n");
        assert_eq!(labels(&chapters), ["Chapter 1", "Chapter 2"]);
        assert_eq!(chapters["Chapter 1"].as_slice(), ["The", "first", "body."]);
        assert_eq!(chapters["Chapter 2"].as_slice(), ["The", "second", "body."]);
    }

    #[test]
    fn leading_text_becomes_first_chapter() {
        let chapters = split("A short foreword.\nChapter 1\nBody one.\nChapter 2\nBody two.");
        assert_eq!(labels(&chapters), ["Preface", "Chapter 1", "Chapter 2"]);
        assert_eq!(chapters["Preface"].as_slice(), ["A", "short", "foreword."]);
    }

    #[test]
    fn heading_titles_are_part_of_the_label() {
        let chapters = split("  CHAPTER IV: The Storm\nRain fell.\npart two. Aftermath\nCalm.");
        assert_eq!(labels(&chapters), ["CHAPTER IV: The Storm", "part two: Aftermath"]);
    }

    #[test]
    fn mentions_inside_a_line_do_not_split() {
        let chapters = split("Chapter 1\nAs noted in Chapter 2 below, nothing happens.");
        assert_eq!(labels(&chapters), ["Chapter 1"]);
        assert_eq!(chapters["Chapter 1"].len(), 8);
    }

    #[test]
    fn lowercase_words_are_not_roman_numerals() {
        let chapters = split("Part civil war raged on.\nSection mix of things.");
        assert_eq!(labels(&chapters), ["Content"]);
        assert_eq!(chapters["Content"].len(), 9);
    }

    #[test]
    fn text_without_headings_is_one_fallback_chapter() {
        let chapters = split("Just some prose here.");
        assert_eq!(labels(&chapters), ["Content"]);
    }

    #[test]
    fn empty_text_has_no_chapters() {
        assert!(split(" \n ").is_empty());
    }

    #[test]
    fn headings_without_bodies_are_skipped() {
        let chapters = split("Part 1\nChapter 1\nBody text.");
        assert_eq!(labels(&chapters), ["Chapter 1"]);
    }

    #[test]
    fn duplicate_labels_are_kept_apart() {
        let chapters = split("Chapter 1\nFirst.\nChapter 1\nAgain.");
        assert_eq!(labels(&chapters), ["Chapter 1", "Chapter 1 (2)"]);
        assert_eq!(chapters["Chapter 1 (2)"].as_slice(), ["Again."]);
    }

    #[test]
    fn custom_keywords_replace_the_defaults() {
        let rules = HeadingRules {
            keywords: vec!["Book".to_string()],
            ..HeadingRules::default()
        };
        let chapters = ChapterSplitter::new(&rules).split("Book 1\nAlpha.\nChapter 2\nBeta.");
        assert_eq!(labels(&chapters), ["Book 1"]);
        assert_eq!(chapters["Book 1"].as_slice(), ["Alpha.", "Chapter", "2", "Beta."]);
    }

    #[test]
    fn no_keywords_disables_splitting() {
        let rules = HeadingRules {
            keywords: Vec::new(),
            ..HeadingRules::default()
        };
        let chapters = ChapterSplitter::new(&rules).split("Chapter 1\nBody.");
        assert_eq!(labels(&chapters), ["Content"]);
    }
}
