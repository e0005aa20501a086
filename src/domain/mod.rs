pub mod session;
pub mod speech;
pub mod transcription;
pub mod tutor;
