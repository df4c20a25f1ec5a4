//! General ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, PostingError, Result};

/// Kind of source document that can be posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "jurnal")]
    Journal,
    #[serde(rename = "penyusutan")]
    Depreciation,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Journal => "jurnal",
            SourceType::Depreciation => "penyusutan",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jurnal" | "journal" => Ok(SourceType::Journal),
            "penyusutan" | "depreciation" => Ok(SourceType::Depreciation),
            other => Err(PostingError::UnknownSourceType(other.to_string()).into()),
        }
    }
}

/// Reference to exactly one source document.
///
/// Serialized as `{"type": "jurnal", "id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum SourceRef {
    #[serde(rename = "jurnal")]
    Journal(String),
    #[serde(rename = "penyusutan")]
    Depreciation(String),
}

impl SourceRef {
    pub fn new(source_type: SourceType, id: impl Into<String>) -> Self {
        match source_type {
            SourceType::Journal => SourceRef::Journal(id.into()),
            SourceType::Depreciation => SourceRef::Depreciation(id.into()),
        }
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            SourceRef::Journal(_) => SourceType::Journal,
            SourceRef::Depreciation(_) => SourceType::Depreciation,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SourceRef::Journal(id) | SourceRef::Depreciation(id) => id,
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source_type(), self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    Posted,
    Unposted,
}

impl PostingStatus {
    pub fn matches(&self, posted: bool) -> bool {
        match self {
            PostingStatus::Posted => posted,
            PostingStatus::Unposted => !posted,
        }
    }
}

impl FromStr for PostingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posted" => Ok(PostingStatus::Posted),
            "unposted" => Ok(PostingStatus::Unposted),
            other => Err(Error::Validation(
                crate::errors::ValidationError::InvalidInput(format!(
                    "Unknown posting status '{}'",
                    other
                )),
            )),
        }
    }
}

/// Header grouping the lines produced by posting one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlHeader {
    pub id: String,
    pub source: SourceRef,
    pub posting_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A posted, immutable double-entry line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlLine {
    pub id: String,
    pub header_id: String,
    pub line_no: i32,
    pub account_id: String,
    pub cost_center_id: Option<String>,
    pub asset_id: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub memo: Option<String>,
    pub source: SourceRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlHeaderSummary {
    pub id: String,
    pub source: SourceRef,
    pub posting_date: NaiveDate,
    pub description: Option<String>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub line_count: usize,
}

/// Ledger line joined with its account for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlLineView {
    #[serde(flatten)]
    pub line: GlLine,
    pub account_code: String,
    pub account_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlHeaderDetail {
    pub header: GlHeader,
    pub lines: Vec<GlLineView>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Matches the header description, the source id or a line's account code.
    pub q: Option<String>,
    pub source: Option<SourceType>,
}

/// Line to be written by a posting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGlLine {
    pub account_id: String,
    pub cost_center_id: Option<String>,
    pub asset_id: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub memo: Option<String>,
}

/// A complete, validated posting of one source document.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosting {
    pub source: SourceRef,
    pub posting_date: NaiveDate,
    pub description: Option<String>,
    pub lines: Vec<NewGlLine>,
}

/// Segment restricting which ledger lines count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum Segment {
    #[default]
    All,
    CostCenter(String),
    Asset(String),
}

/// Debit/credit movement of one ledger line, for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedAmount {
    pub account_id: String,
    pub posting_date: NaiveDate,
    pub debit: Decimal,
    pub credit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    pub account_id: Option<String>,
    pub account_code: Option<String>,
    pub account_name: Option<String>,
    pub cost_center_id: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub memo: Option<String>,
}

/// Dry-run view of what posting a source would write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingPreview {
    pub source: SourceRef,
    pub posting_date: NaiveDate,
    pub description: Option<String>,
    pub lines: Vec<PreviewLine>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub balanced: bool,
    pub already_posted: bool,
    /// Problems that block posting, e.g. a missing account mapping.
    pub issues: Vec<String>,
}

impl PostingPreview {
    pub fn can_post(&self) -> bool {
        self.balanced && !self.already_posted && self.issues.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub items: Vec<PostItem>,
}

/// One requested source. The type stays a string so an unknown type fails
/// only its own item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostItem {
    #[serde(rename = "type")]
    pub source_type: String,
    pub id: String,
}

impl PostItem {
    pub fn resolve(&self) -> Result<SourceRef> {
        let source_type: SourceType = self.source_type.parse()?;
        Ok(SourceRef::new(source_type, self.id.clone()))
    }
}

impl From<SourceRef> for PostItem {
    fn from(source: SourceRef) -> Self {
        Self {
            source_type: source.source_type().to_string(),
            id: source.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostItemError {
    #[serde(rename = "type")]
    pub source_type: String,
    pub id: String,
    pub message: String,
}

/// Outcome of a batch post. Successful items stay posted even when others fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResult {
    pub posted: usize,
    pub skipped: usize,
    pub errors: Vec<PostItemError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFilter {
    #[serde(rename = "type")]
    pub source_type: Option<SourceType>,
    pub status: Option<PostingStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub q: Option<String>,
}

/// A document that can be (or has been) posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCandidate {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub id: String,
    pub date: NaiveDate,
    pub reference: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub posted: bool,
}
