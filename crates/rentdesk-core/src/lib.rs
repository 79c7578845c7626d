// rentdesk-core: Session, authorization, and review-workflow layer between
// rentdesk-api and consumers (CLI).

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod notify;
pub mod overrides;
pub mod permissions;
pub mod session;
pub mod stream;
pub mod workflow;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{OperatorCredentials, SessionConfig, TlsVerification};
pub use error::CoreError;
pub use notify::{PendingAlert, PendingSnapshot, PendingTracker};
pub use overrides::OverrideStore;
pub use permissions::{Access, check_access, is_authorized};
pub use session::{Session, SessionState};
pub use stream::EntityStream;
pub use workflow::{RequestLedger, display_order};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    CalendarOverride, Capability, DashboardMetrics, Operator, OperatorActivity, OperatorId,
    OperatorRole, OverrideRule, PermissionSet, RequestId, RequestStatus, ReviewCategory,
    ReviewOutcome, ReviewableRequest,
};
