use super::error::AudioError;
use base64::{engine::general_purpose, Engine as _};
use std::io::Cursor;
use std::time::Duration;

pub const WAV_MIME_TYPE: &str = "audio/wav";

/// How a TTS backend encoded the audio it returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    /// RIFF/WAVE container
    Wav,
    /// Headerless signed 16-bit little-endian PCM
    Pcm16 { sample_rate: u32, channels: u16 },
}

/// Raw backend output, before decoding
#[derive(Debug, Clone)]
pub struct EncodedAudio {
    pub bytes: Vec<u8>,
    pub encoding: AudioEncoding,
}

/// Decoded mono audio for one speech unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// Final encoded audio for a whole utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub bytes: Vec<u8>,
    pub sample_rate: u32,
    pub duration: Duration,
    /// Number of clips joined into this artifact
    pub clip_count: usize,
}

impl AudioArtifact {
    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

impl AudioClip {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.samples.len() as u64 * 1_000_000_000 / self.sample_rate as u64)
    }

    /// Decode backend output into a mono clip
    pub fn decode(audio: &EncodedAudio) -> Result<Self, AudioError> {
        match audio.encoding {
            AudioEncoding::Wav => decode_wav(&audio.bytes),
            AudioEncoding::Pcm16 {
                sample_rate,
                channels,
            } => decode_pcm16(&audio.bytes, sample_rate, channels),
        }
    }

    /// Encode as a 16-bit mono WAV buffer
    pub fn encode_wav(&self) -> Result<Vec<u8>, AudioError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut buffer = Vec::with_capacity(44 + self.samples.len() * 2);
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut buffer), spec)?;
            let mut sample_writer = writer.get_i16_writer(self.samples.len() as u32);
            for &sample in &self.samples {
                sample_writer.write_sample(sample);
            }
            sample_writer.flush()?;
            writer.finalize()?;
        }
        Ok(buffer)
    }
}

fn decode_wav(bytes: &[u8]) -> Result<AudioClip, AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader.samples::<i16>().collect::<Result<_, _>>()?,
        (hound::SampleFormat::Int, bits) => {
            let shift = bits as i32 - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| scale_int(v, shift)))
                .collect::<Result<_, _>>()?
        }
        (hound::SampleFormat::Float, _) => reader
            .samples::<f32>()
            .map(|s| s.map(float_to_i16))
            .collect::<Result<_, _>>()?,
    };

    Ok(AudioClip {
        samples: downmix(&interleaved, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

fn decode_pcm16(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<AudioClip, AudioError> {
    if bytes.len() % 2 != 0 {
        return Err(AudioError::Pcm(format!(
            "odd byte count {} for 16-bit samples",
            bytes.len()
        )));
    }
    if sample_rate == 0 || channels == 0 {
        return Err(AudioError::Pcm(format!(
            "invalid format: {} Hz, {} channels",
            sample_rate, channels
        )));
    }

    let interleaved: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(AudioClip {
        samples: downmix(&interleaved, channels),
        sample_rate,
    })
}

fn scale_int(value: i32, shift: i32) -> i16 {
    let scaled = if shift >= 0 {
        value >> shift
    } else {
        value << -shift
    };
    scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

fn float_to_i16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn downmix(interleaved: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Linear-interpolation resampling; good enough for speech between TTS rates
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).round() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * ratio;
            let index = (position.floor() as usize).min(last);
            let next = (index + 1).min(last);
            let fraction = position - index as f64;
            let value = samples[index] as f64 * (1.0 - fraction) + samples[next] as f64 * fraction;
            value.round() as i16
        })
        .collect()
}

/// Join clips end to end, in the order given, into one WAV artifact.
///
/// Returns `None` for an empty input. Clips recorded at a different rate than
/// the first one are resampled to it.
pub fn concatenate(clips: &[AudioClip]) -> Result<Option<AudioArtifact>, AudioError> {
    let Some(first) = clips.first() else {
        return Ok(None);
    };
    let sample_rate = first.sample_rate;

    let total: usize = clips.iter().map(|c| c.samples.len()).sum();
    let mut samples = Vec::with_capacity(total);
    for clip in clips {
        if clip.sample_rate == sample_rate {
            samples.extend_from_slice(&clip.samples);
        } else {
            samples.extend(resample(&clip.samples, clip.sample_rate, sample_rate));
        }
    }

    let combined = AudioClip {
        samples,
        sample_rate,
    };
    let bytes = combined.encode_wav()?;

    Ok(Some(AudioArtifact {
        bytes,
        sample_rate,
        duration: combined.duration(),
        clip_count: clips.len(),
    }))
}
