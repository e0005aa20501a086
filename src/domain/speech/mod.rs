pub mod audio;
pub mod error;
pub mod language;
pub mod normalizer;
pub mod numbers;
pub mod segmenter;
pub mod service;
pub mod synthesizer;

pub use audio::{AudioArtifact, AudioClip, AudioEncoding, EncodedAudio};
pub use error::{AudioError, DetectionError, SpeechServiceError, SynthesisError};
pub use language::{LanguageCode, LanguageIdentifier};
pub use normalizer::Normalizer;
pub use segmenter::{SegmentMode, Segmenter, SpeechUnit};
pub use service::{FailurePolicy, PipelineSettings, SpeechService, SpeechServiceApi};
pub use synthesizer::Synthesizer;
