pub mod store;

pub use store::{SessionContext, SessionStore, SharedSession, DEFAULT_SUMMARY_INTERVAL};
