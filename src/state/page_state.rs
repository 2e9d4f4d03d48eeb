/// Page state definitions for tracking crawl progress
///
/// Every URL the scheduler hands out carries one of these states; the
/// terminal ones are what the crawl statistics are built from.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    // ===== Active States =====
    /// Page is in the frontier waiting to be fetched
    Queued,

    /// Page fetch has been issued and not yet answered
    Fetching,

    // ===== Terminal Success States =====
    /// Page was fetched and its links were extracted
    Processed,

    // ===== Terminal Error States =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned HTTP 429
    RateLimited,

    /// Page could not be reached (connection failure or timeout)
    Unreachable,

    /// Page fetch failed for any other reason
    Failed,
}

impl PageState {
    /// All states, in report order
    pub const ALL: [PageState; 7] = [
        Self::Queued,
        Self::Fetching,
        Self::Processed,
        Self::DeadLink,
        Self::RateLimited,
        Self::Unreachable,
        Self::Failed,
    ];

    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::Fetching)
    }

    /// Returns true if this represents a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if this represents a failed fetch
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DeadLink | Self::RateLimited | Self::Unreachable | Self::Failed
        )
    }

    /// Short machine-friendly name, used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Fetching => "fetching",
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::RateLimited => "rate_limited",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }

    /// Human-readable label, used in tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Fetching => "Fetching",
            Self::Processed => "Processed",
            Self::DeadLink => "Dead Link (404)",
            Self::RateLimited => "Rate Limited (429)",
            Self::Unreachable => "Unreachable",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
