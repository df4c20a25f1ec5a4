//! Ledger repository and posting service traits.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::ledger_model::{
    GlFilter, GlHeader, GlHeaderDetail, GlHeaderSummary, GlLine, NewPosting, PostRequest,
    PostResult, PostedAmount, PostingPreview, Segment, SourceCandidate, SourceFilter, SourceRef,
    SourceType,
};
use crate::errors::Result;

/// Trait defining the contract for general ledger persistence.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    fn list_headers(&self, filter: &GlFilter) -> Result<Vec<GlHeaderSummary>>;
    fn get_header(&self, header_id: &str) -> Result<GlHeader>;
    fn get_lines(&self, header_id: &str) -> Result<Vec<GlLine>>;

    /// True when at least one ledger line references the source.
    fn is_posted(&self, source: &SourceRef) -> Result<bool>;

    /// Ids of every posted source of the given type.
    fn posted_source_ids(&self, source_type: SourceType) -> Result<HashSet<String>>;

    fn account_has_lines(&self, account_id: &str) -> Result<bool>;

    /// Movements of every line posted on or before `as_of` within the segment.
    fn load_postings(&self, as_of: NaiveDate, segment: &Segment) -> Result<Vec<PostedAmount>>;

    /// Writes the header and its lines in one transaction. A second posting of
    /// the same source fails with a unique violation.
    async fn insert_posting(&self, posting: NewPosting) -> Result<GlHeader>;

    /// Deletes the header and lines of a source, returning the lines removed.
    async fn delete_posting(&self, source: &SourceRef) -> Result<usize>;
}

/// Trait defining the contract for posting and ledger queries.
#[async_trait]
pub trait PostingServiceTrait: Send + Sync {
    /// Posts each item in its own transaction. Failures are reported per item
    /// and never undo the items that succeeded.
    async fn post(&self, request: PostRequest) -> Result<PostResult>;

    /// Removes the ledger lines of a posted source.
    async fn unpost(&self, source: &SourceRef) -> Result<()>;

    fn preview(&self, source: &SourceRef) -> Result<PostingPreview>;

    fn list(&self, filter: &GlFilter) -> Result<Vec<GlHeaderSummary>>;

    fn detail(&self, header_id: &str) -> Result<GlHeaderDetail>;

    fn sources(&self, filter: &SourceFilter) -> Result<Vec<SourceCandidate>>;
}
