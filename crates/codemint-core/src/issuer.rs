use crate::code::Code;
use crate::record::CreationRequest;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::IssueError>;

/// The caller-facing contract for issuing unique codes.
#[async_trait]
pub trait CodeIssuer: Send + Sync + 'static {
    /// Issues a fresh unique code and durably records it exactly once.
    ///
    /// Fails with [`IssueError::Exhausted`](crate::IssueError::Exhausted)
    /// when every attempt collides; the caller decides whether to re-issue
    /// a whole new request.
    async fn create(&self, request: CreationRequest) -> Result<Code>;
}
