use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_SUMMARY_INTERVAL: u32 = 10;

/// Sessions idle longer than this are evicted
const SESSION_TIME_TO_IDLE: Duration = Duration::from_secs(2 * 60 * 60);

/// Per-session tutoring state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    turns: u64,
    summary: Option<String>,
}

impl SessionContext {
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Count a learner turn and return its 1-based number
    pub fn record_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }

    /// Replace the lesson summary. Summaries are kept until overwritten.
    pub fn store_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }

    pub fn reset(&mut self) {
        *self = SessionContext::default();
    }
}

pub type SharedSession = Arc<Mutex<SessionContext>>;

/// Session-keyed store. Each session sits behind its own mutex, so updates to
/// one session are serialized while different sessions proceed independently.
pub struct SessionStore {
    sessions: Cache<String, SharedSession>,
    summary_interval: u32,
}

impl SessionStore {
    pub fn new(capacity: u64, summary_interval: u32) -> Self {
        let sessions = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(SESSION_TIME_TO_IDLE)
            .build();

        Self {
            sessions,
            summary_interval: summary_interval.max(1),
        }
    }

    /// Fetch the session, creating an empty one on first use
    pub async fn context(&self, session_id: &str) -> SharedSession {
        self.sessions
            .get_with(session_id.to_string(), async {
                Arc::new(Mutex::new(SessionContext::default()))
            })
            .await
    }

    /// Whether a turn number is due for a fresh summary
    pub fn summary_due(&self, turn: u64) -> bool {
        turn > 0 && turn % self.summary_interval as u64 == 0
    }

    pub async fn store_summary(&self, session_id: &str, summary: String) {
        let session = self.context(session_id).await;
        session.lock().await.store_summary(summary);
    }

    /// Start the session over: zero turns, no summary
    pub async fn reset(&self, session_id: &str) {
        if let Some(session) = self.sessions.get(session_id).await {
            session.lock().await.reset();
        }
    }

    pub async fn summary(&self, session_id: &str) -> Option<String> {
        let session = self.sessions.get(session_id).await?;
        let summary = session.lock().await.summary().map(str::to_string);
        summary
    }
}
