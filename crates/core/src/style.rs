//! The fixed Key Points style sheet.
//!
//! Every output document uses the same typography regardless of input:
//! Arial 10, single-spaced, zero space before/after, narrow side margins.

use crate::HeadingLevel;
use serde::{Deserialize, Serialize};

/// Bullet indent depth for transformed paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletIndent {
    /// Second-level bullet ("List Bullet 2"), used for Heading 4.
    Indented,
    /// Deep sub-bullet ("H5Subbullet"), used for Heading 5.
    Deep,
}

/// Terminal punctuation policy for a heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodPolicy {
    /// Never touch terminal punctuation.
    Never,
    /// Ensure a period only when the user toggle is on (Heading 4).
    Optional,
    /// Always ensure a period (Heading 5).
    Always,
}

/// Per-level formatting rule.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    /// Upper-case the whole text.
    pub all_caps: bool,
    /// Bold run.
    pub bold: bool,
    /// Underlined run.
    pub underline: bool,
    /// Apply sentence casing before output.
    pub sentence_case: bool,
    /// Bullet indent, or `None` for a plain heading paragraph.
    pub bullet: Option<BulletIndent>,
    /// Terminal punctuation policy.
    pub period: PeriodPolicy,
}

impl FormatRule {
    /// The rule for a recognized heading level. `Body` has no rule: those
    /// paragraphs are dropped by design.
    pub fn for_level(level: HeadingLevel) -> Option<Self> {
        match level {
            HeadingLevel::H2 => Some(Self {
                all_caps: true,
                bold: true,
                underline: true,
                sentence_case: false,
                bullet: None,
                period: PeriodPolicy::Never,
            }),
            HeadingLevel::H3 => Some(Self {
                all_caps: true,
                bold: false,
                underline: true,
                sentence_case: false,
                bullet: None,
                period: PeriodPolicy::Never,
            }),
            HeadingLevel::H4 => Some(Self {
                all_caps: false,
                bold: false,
                underline: false,
                sentence_case: true,
                bullet: Some(BulletIndent::Indented),
                period: PeriodPolicy::Optional,
            }),
            HeadingLevel::H5 => Some(Self {
                all_caps: false,
                bold: false,
                underline: false,
                sentence_case: true,
                bullet: Some(BulletIndent::Deep),
                period: PeriodPolicy::Always,
            }),
            HeadingLevel::Body => None,
        }
    }
}

/// Fixed typography constants shared by all output documents.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    /// Font family for every run.
    pub font_name: &'static str,
    /// Font size in half-points (20 = 10 pt).
    pub font_size_half_points: u32,
    /// Line spacing in twentieths of a point (240 = single).
    pub line_twentieths: u32,
    /// Space before/after each paragraph, in twentieths of a point.
    pub space_before: u32,
    pub space_after: u32,
    /// Left and right page margins in twips (720 = 0.5 inch).
    pub side_margin_twips: u32,
    /// Top and bottom page margins in twips.
    pub vertical_margin_twips: u32,
    /// H5 sub-bullet text indent in twips (1080 = 0.75 inch).
    pub deep_indent_twips: u32,
    /// H5 sub-bullet hanging indent in twips (360 = 0.25 inch).
    pub deep_hanging_twips: u32,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            font_name: "Arial",
            font_size_half_points: 20,
            line_twentieths: 240,
            space_before: 0,
            space_after: 0,
            side_margin_twips: 720,
            vertical_margin_twips: 1440,
            deep_indent_twips: 1080,
            deep_hanging_twips: 360,
        }
    }
}
