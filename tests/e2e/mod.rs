// End-to-end tests for the Habla Backend API
//
// Each test gets its own server bound to an ephemeral port via test-context
// lifecycle hooks. The chat, text-to-speech and transcription backends are
// replaced by in-memory mock repositories, while the real services, router
// and middleware run unchanged.

mod helpers;
mod test_health;
mod test_learn;
mod test_speech;
