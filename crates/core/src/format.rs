//! The block-to-paragraph transform.
//!
//! Walks the ordered source blocks once, applies the per-level format rule,
//! and produces the paragraph sequence the writer serializes. A visible
//! blank line follows every content paragraph.

use crate::style::{BulletIndent, FormatRule, PeriodPolicy};
use crate::text::{ensure_terminal_period, sentence_case};
use crate::{LevelCounts, StyledBlock};
use serde::{Deserialize, Serialize};

/// A paragraph of the output document, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputParagraph {
    /// ALL-CAPS heading (bold for H2, plain for H3; underlined for both).
    Heading {
        text: String,
        bold: bool,
        underline: bool,
    },
    /// Bullet point at the given indent depth.
    Bullet { text: String, indent: BulletIndent },
    /// Visible blank line (non-breaking space) separating content.
    Spacer,
}

/// Transforms styled blocks into Key Points output paragraphs.
#[derive(Debug, Clone)]
pub struct KeyPointsFormatter {
    /// Whether Heading 4 bullets get a terminal period when missing one.
    ensure_h4_period: bool,
}

impl Default for KeyPointsFormatter {
    fn default() -> Self {
        Self {
            ensure_h4_period: true,
        }
    }
}

impl KeyPointsFormatter {
    /// Create a formatter with the default settings (H4 period on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether Heading 4 bullets are normalized to end with a period.
    pub fn with_h4_period(mut self, ensure: bool) -> Self {
        self.ensure_h4_period = ensure;
        self
    }

    /// Transform source blocks into output paragraphs, in source order.
    ///
    /// Paragraphs not tagged Heading 2-5 are dropped. Returns the paragraph
    /// sequence and the per-level counts.
    pub fn transform(&self, blocks: &[StyledBlock]) -> (Vec<OutputParagraph>, LevelCounts) {
        let mut paragraphs = Vec::new();
        let mut counts = LevelCounts::default();

        for block in blocks {
            if block.text.is_empty() {
                continue;
            }

            let Some(rule) = FormatRule::for_level(block.level) else {
                log::debug!("dropping non-heading paragraph: {:?}", block.text);
                continue;
            };

            paragraphs.push(self.apply_rule(&rule, block));
            paragraphs.push(OutputParagraph::Spacer);
            counts.record(block.level);
        }

        (paragraphs, counts)
    }

    /// Apply one level's rule to a block.
    fn apply_rule(&self, rule: &FormatRule, block: &StyledBlock) -> OutputParagraph {
        let mut text = if rule.sentence_case {
            sentence_case(&block.text)
        } else {
            block.text.clone()
        };

        if rule.all_caps {
            text = text.to_uppercase();
        }

        let ensure_period = match rule.period {
            PeriodPolicy::Never => false,
            PeriodPolicy::Optional => self.ensure_h4_period,
            PeriodPolicy::Always => true,
        };
        if ensure_period {
            text = ensure_terminal_period(&text);
        }

        match rule.bullet {
            Some(indent) => OutputParagraph::Bullet { text, indent },
            None => OutputParagraph::Heading {
                text,
                bold: rule.bold,
                underline: rule.underline,
            },
        }
    }
}
