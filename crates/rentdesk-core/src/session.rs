// ── Operator session ──
//
// Full lifecycle management for one operator's console session: login,
// background polling (dashboard metrics on a short timer, pending-count
// alerting on a longer one), review submission, and calendar override
// writes. Every background task is tied to the session's cancellation
// token and joined on close -- a timer that outlives its session is a
// defect, not a cleanup detail.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rentdesk_api::ConsoleClient;
use rentdesk_api::models::{KycActionBody, OverrideWriteBody, RentalActionBody};
use rentdesk_api::transport::{TlsMode, TransportConfig};

use crate::config::{SessionConfig, TlsVerification};
use crate::convert::override_from_wire;
use crate::error::CoreError;
use crate::model::{
    CalendarOverride, Capability, DashboardMetrics, Operator, OperatorActivity, OverrideRule,
    RequestId, ReviewCategory, ReviewOutcome, ReviewableRequest,
};
use crate::notify::{PendingAlert, PendingSnapshot, PendingTracker};
use crate::overrides::OverrideStore;
use crate::permissions;
use crate::permissions::Access;
use crate::workflow::RequestLedger;

const ALERT_CHANNEL_SIZE: usize = 64;

// ── SessionState ─────────────────────────────────────────────────

/// Session lifecycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    Authenticating,
    Active,
    Ended,
}

// ── Session ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Owns the API client, the
/// current-operator record, the per-category request ledgers, the
/// override mirror, and the two polling timers.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    /// Built on login, dropped on close. Single writer (the lifecycle
    /// methods); everything else takes cheap full loads.
    client: ArcSwapOption<ConsoleClient>,
    /// Single writer: login/close. Multi-reader via full loads -- replaced
    /// wholesale, never mutated in place.
    operator: ArcSwapOption<Operator>,
    state: watch::Sender<SessionState>,
    rentals: RequestLedger,
    kyc: RequestLedger,
    overrides: OverrideStore,
    metrics: watch::Sender<Option<Arc<DashboardMetrics>>>,
    /// Latest successful pending observation. Written only by the pending
    /// poll task (and the initial login fetch).
    pending: watch::Sender<Option<Arc<PendingSnapshot>>>,
    alert_tx: broadcast::Sender<PendingAlert>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Session {
    /// Create a new Session from configuration. Does NOT authenticate --
    /// call [`login()`](Self::login) to connect and start polling.
    pub fn new(config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        let (metrics, _) = watch::channel(None);
        let (pending, _) = watch::channel(None);
        let (alert_tx, _) = broadcast::channel(ALERT_CHANNEL_SIZE);

        Self {
            inner: Arc::new(SessionInner {
                config,
                client: ArcSwapOption::empty(),
                operator: ArcSwapOption::empty(),
                state,
                rentals: RequestLedger::new(),
                kyc: RequestLedger::new(),
                overrides: OverrideStore::new(),
                metrics,
                pending,
                alert_tx,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Authenticate and start the session.
    ///
    /// Builds the HTTP client, logs in, stores the operator record,
    /// performs the initial data fetches, and spawns the two poll timers
    /// (when their intervals are non-zero).
    pub async fn login(&self) -> Result<(), CoreError> {
        let _ = self.inner.state.send(SessionState::Authenticating);

        let config = &self.inner.config;
        let transport = build_transport(config);
        let client = ConsoleClient::new(config.url.clone(), &transport).map_err(|e| {
            let _ = self.inner.state.send(SessionState::LoggedOut);
            CoreError::from(e)
        })?;

        let record = client
            .login(&config.credentials.username, &config.credentials.password)
            .await
            .map_err(|e| {
                let _ = self.inner.state.send(SessionState::LoggedOut);
                CoreError::from(e)
            })?;

        let operator = Operator::from(record);
        debug!(operator = %operator.username, role = %operator.role, "login successful");

        self.inner.client.store(Some(Arc::new(client)));
        self.inner.operator.store(Some(Arc::new(operator)));

        // Initial data load. Review queues are fetched only for categories
        // the operator can see; a fresh tracker in the poll task will
        // baseline on its first tick.
        self.refresh_visible_requests().await?;
        self.refresh_overrides().await?;
        if self.inner.config.metrics_interval_secs > 0 {
            self.refresh_metrics().await?;
        }

        // Spawn background timers.
        let mut handles = self.inner.task_handles.lock().await;

        if self.inner.config.metrics_interval_secs > 0 {
            let session = self.clone();
            let cancel = self.inner.cancel.clone();
            let secs = self.inner.config.metrics_interval_secs;
            handles.push(tokio::spawn(metrics_task(session, secs, cancel)));
        }

        if self.inner.config.pending_interval_secs > 0 {
            let session = self.clone();
            let cancel = self.inner.cancel.clone();
            let secs = self.inner.config.pending_interval_secs;
            handles.push(tokio::spawn(pending_task(session, secs, cancel)));
        }
        drop(handles);

        let _ = self.inner.state.send(SessionState::Active);
        info!("session active");
        Ok(())
    }

    /// End the session.
    ///
    /// Cancels and joins every background task, then drops the client and
    /// operator record. Idempotent.
    pub async fn close(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        drop(handles);

        self.inner.client.store(None);
        self.inner.operator.store(None);
        let _ = self.inner.state.send(SessionState::Ended);
        debug!("session ended");
    }

    /// One-shot: login, run closure, close.
    ///
    /// Optimized for CLI commands that need a single request-response
    /// cycle: both poll timers are disabled.
    pub async fn oneshot<F, Fut, T>(config: SessionConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Session) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let session = Session::new(config.oneshot());
        session.login().await?;
        let result = f(session.clone()).await;
        session.close().await;
        result
    }

    fn api(&self) -> Result<Arc<ConsoleClient>, CoreError> {
        self.inner.client.load_full().ok_or(CoreError::SessionEnded)
    }

    // ── Authorization ────────────────────────────────────────────

    /// The current operator record, if login has completed.
    pub fn operator(&self) -> Option<Arc<Operator>> {
        self.inner.operator.load_full()
    }

    /// Tri-state capability check for the current operator.
    pub fn access(&self, capability: Capability) -> Access {
        permissions::check_access(self.operator().as_deref(), capability)
    }

    /// Boolean capability check for the current operator.
    pub fn is_authorized(&self, capability: Capability) -> bool {
        permissions::is_authorized(self.operator().as_deref(), capability)
    }

    /// Re-fetch the current operator record (e.g. after a permission-set
    /// edit elsewhere) and replace the shared copy wholesale.
    pub async fn refresh_operator(&self) -> Result<(), CoreError> {
        let Some(current) = self.operator() else {
            return Err(CoreError::SessionEnded);
        };

        let record = self.api()?.get_operator(current.id.as_str()).await?;
        self.inner.operator.store(Some(Arc::new(Operator::from(record))));
        Ok(())
    }

    // ── Review queues ────────────────────────────────────────────

    fn ledger(&self, category: ReviewCategory) -> &RequestLedger {
        match category {
            ReviewCategory::Rental => &self.inner.rentals,
            ReviewCategory::Kyc => &self.inner.kyc,
        }
    }

    /// Current display-ordered snapshot of one review queue.
    pub fn requests(&self, category: ReviewCategory) -> Arc<Vec<Arc<ReviewableRequest>>> {
        self.ledger(category).snapshot()
    }

    /// Re-fetch one review queue from the backend.
    pub async fn refresh_requests(&self, category: ReviewCategory) -> Result<(), CoreError> {
        let client = self.api()?;

        let requests: Vec<ReviewableRequest> = match category {
            ReviewCategory::Rental => client
                .list_rental_requests()
                .await?
                .into_iter()
                .map(ReviewableRequest::from)
                .collect(),
            ReviewCategory::Kyc => client
                .list_kyc_requests()
                .await?
                .into_iter()
                .map(ReviewableRequest::from)
                .collect(),
        };

        debug!(category = %category, count = requests.len(), "review queue refreshed");
        self.ledger(category).replace_all(requests);
        Ok(())
    }

    /// Refresh every queue the current operator is allowed to see.
    pub async fn refresh_visible_requests(&self) -> Result<(), CoreError> {
        for category in ReviewCategory::ALL {
            if self.is_authorized(category.required_capability()) {
                self.refresh_requests(category).await?;
            }
        }
        Ok(())
    }

    /// Submit a review decision.
    ///
    /// The cached copy is checked first: a request that is already
    /// terminal fails with [`CoreError::Conflict`] before any network
    /// traffic (the double-click guard). The backend performs the same
    /// precondition check authoritatively -- its conflict answer surfaces
    /// as the same error and is never retried automatically.
    pub async fn review(
        &self,
        category: ReviewCategory,
        id: &RequestId,
        outcome: ReviewOutcome,
        note: Option<String>,
    ) -> Result<Arc<ReviewableRequest>, CoreError> {
        let operator = self.operator().ok_or(CoreError::SessionEnded)?;

        if let Some(cached) = self.ledger(category).get(id) {
            if cached.status.is_terminal() {
                return Err(CoreError::Conflict {
                    message: format!("request {id} is already {}", cached.status),
                });
            }
        }

        let client = self.api()?;
        match category {
            ReviewCategory::Rental => {
                let body = RentalActionBody {
                    id: id.to_string(),
                    action: outcome.wire_action().to_owned(),
                    admin_id: operator.id.to_string(),
                    note: note.clone(),
                };
                client.submit_rental_review(&body).await?;
            }
            ReviewCategory::Kyc => {
                let body = KycActionBody {
                    request_id: id.to_string(),
                    action: outcome.wire_action().to_owned(),
                    admin_id: operator.id.to_string(),
                    note: note.clone(),
                };
                client.submit_kyc_review(&body).await?;
            }
        }

        // Mirror the accepted transition locally so the next snapshot and
        // pending count agree with the backend without waiting for a poll.
        self.ledger(category)
            .apply_review(id, outcome, operator.id.clone(), note, Utc::now())
    }

    // ── Calendar overrides ───────────────────────────────────────

    /// The override in effect for a date, if any.
    pub fn override_for(&self, date: NaiveDate) -> Option<Arc<CalendarOverride>> {
        self.inner.overrides.get(date)
    }

    /// Direct access to the override mirror.
    pub fn overrides(&self) -> &OverrideStore {
        &self.inner.overrides
    }

    /// Re-fetch the full override collection.
    pub async fn refresh_overrides(&self) -> Result<(), CoreError> {
        let records = self.api()?.list_overrides().await?;

        let mut overrides = Vec::with_capacity(records.len());
        for (date, record) in records {
            match override_from_wire(&date, record) {
                Ok(Some(ov)) => overrides.push(ov),
                Ok(None) => {}
                Err(e) => warn!(date = %date, error = %e, "skipping malformed override record"),
            }
        }

        self.inner.overrides.replace_all(overrides);
        Ok(())
    }

    /// Write an override for its date, replacing any existing record.
    ///
    /// Validation already happened when the [`CalendarOverride`] was
    /// constructed, so nothing invalid can reach the wire.
    pub async fn set_override(&self, record: CalendarOverride) -> Result<(), CoreError> {
        let body = match &record.rule {
            OverrideRule::Discount { percent } => OverrideWriteBody {
                date: record.date.to_string(),
                kind: Some("discount".into()),
                value: Some(i64::from(*percent)),
                description: record.description.clone(),
                delete: None,
            },
            OverrideRule::Blackout => OverrideWriteBody {
                date: record.date.to_string(),
                kind: Some("blackout".into()),
                value: None,
                description: record.description.clone(),
                delete: None,
            },
        };

        self.api()?.save_override(&body).await?;
        self.inner.overrides.upsert(record);
        Ok(())
    }

    /// Remove the override for a date. Deletion rides the write payload
    /// as a boolean flag; clearing a date with no record is a no-op.
    pub async fn clear_override(&self, date: NaiveDate) -> Result<(), CoreError> {
        let body = OverrideWriteBody {
            date: date.to_string(),
            kind: None,
            value: None,
            description: None,
            delete: Some(true),
        };

        self.api()?.save_override(&body).await?;
        self.inner.overrides.remove(date);
        Ok(())
    }

    // ── Dashboard metrics ────────────────────────────────────────

    /// Latest dashboard metrics, if any fetch has succeeded.
    pub fn metrics(&self) -> Option<Arc<DashboardMetrics>> {
        self.inner.metrics.borrow().clone()
    }

    /// Subscribe to metrics refreshes.
    pub fn subscribe_metrics(&self) -> watch::Receiver<Option<Arc<DashboardMetrics>>> {
        self.inner.metrics.subscribe()
    }

    /// Re-fetch dashboard metrics and replace the shared copy.
    pub async fn refresh_metrics(&self) -> Result<(), CoreError> {
        let stats = self.api()?.get_stats().await?;
        let _ = self
            .inner
            .metrics
            .send(Some(Arc::new(DashboardMetrics::from(stats))));
        Ok(())
    }

    // ── Pending-work alerting ────────────────────────────────────

    /// Subscribe to pending-count increase alerts.
    pub fn alerts(&self) -> broadcast::Receiver<PendingAlert> {
        self.inner.alert_tx.subscribe()
    }

    /// The most recent successful pending observation.
    pub fn latest_pending(&self) -> Option<Arc<PendingSnapshot>> {
        self.inner.pending.borrow().clone()
    }

    /// Subscribe to pending snapshot replacements.
    pub fn subscribe_pending(&self) -> watch::Receiver<Option<Arc<PendingSnapshot>>> {
        self.inner.pending.subscribe()
    }

    /// One full poll cycle: fetch every visible queue, derive the pending
    /// snapshot, feed the tracker, publish snapshot and (maybe) alert.
    ///
    /// Any fetch failure abandons the whole tick before the tracker is
    /// touched -- the previous snapshot stays authoritative and no alert
    /// fires until the next scheduled attempt.
    pub async fn poll_pending_once(
        &self,
        tracker: &mut PendingTracker,
    ) -> Result<PendingSnapshot, CoreError> {
        let mut per_category = BTreeMap::new();
        for category in ReviewCategory::ALL {
            if self.is_authorized(category.required_capability()) {
                self.refresh_requests(category).await?;
                per_category.insert(category, self.ledger(category).pending_count());
            }
        }

        let snapshot = PendingSnapshot::new(per_category);

        if let Some(alert) = tracker.observe(&snapshot) {
            debug!(
                total = alert.total,
                previous = alert.previous_total,
                "pending count increased"
            );
            let _ = self.inner.alert_tx.send(alert);
        }

        let _ = self.inner.pending.send(Some(Arc::new(snapshot.clone())));
        Ok(snapshot)
    }

    // ── Staff directory (fetch-through, not cached) ──────────────

    /// Fetch the operator directory.
    pub async fn staff(&self) -> Result<Vec<Operator>, CoreError> {
        let records = self.api()?.list_operators().await?;
        Ok(records.into_iter().map(Operator::from).collect())
    }

    /// Fetch the per-operator daily activity report.
    pub async fn activity_report(&self) -> Result<Vec<OperatorActivity>, CoreError> {
        let rows = self.api()?.daily_report().await?;
        Ok(rows.into_iter().map(OperatorActivity::from).collect())
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to session state changes.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Short timer: refresh dashboard metrics. Failures are logged and the
/// stale copy stands until the next tick.
async fn metrics_task(session: Session, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = session.refresh_metrics().await {
                    warn!(error = %e, "metrics refresh failed");
                }
            }
        }
    }
}

/// Long timer: the pending-count poll with alerting semantics.
///
/// The edge-trigger state lives on this task's stack and is handed into
/// each tick explicitly; nothing else can reach it, which keeps the
/// comparison auditable. Failed ticks are logged and skipped -- no
/// out-of-cycle retry.
async fn pending_task(session: Session, interval_secs: u64, cancel: CancellationToken) {
    let mut tracker = PendingTracker::new();
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = session.poll_pending_once(&mut tracker).await {
                    warn!(error = %e, "pending poll failed");
                }
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Build a [`TransportConfig`] from the session configuration.
fn build_transport(config: &SessionConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
