//! Core domain types, text transforms, and the Key Points style sheet
//! for DOCX reformatting.

pub mod error;
pub mod format;
pub mod style;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use format::{KeyPointsFormatter, OutputParagraph};
pub use style::{BulletIndent, FormatRule, PeriodPolicy, StyleSheet};
pub use types::{HeadingLevel, LevelCounts, SourceDocument, SourceFormat, StyledBlock};
