// Domain rules - Business logic and policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for slicing a source into fixed-length chunks
pub struct ChunkPlanner;

impl ChunkPlanner {
    /// Plan chunks for a source of `total_duration` seconds.
    ///
    /// The number of full chunks is `floor(total / chunk)`. A shorter trailing
    /// segment is only planned under [`TailPolicy::Emit`], and only when it is
    /// at least [`MIN_TAIL_SECONDS`] long.
    pub fn plan(
        total_duration: f64,
        chunk_duration: u32,
        tail_policy: TailPolicy,
    ) -> Result<ChunkPlan, DomainError> {
        if !total_duration.is_finite() || total_duration < 0.0 {
            return Err(DomainError::ProbeFail(format!(
                "Invalid media duration: {}",
                total_duration
            )));
        }
        if chunk_duration == 0 {
            return Err(DomainError::BadArgs(
                "Chunk duration must be at least 1 second".to_string(),
            ));
        }

        let chunk = chunk_duration as f64;
        let full_chunks = Self::full_chunk_count(total_duration, chunk_duration);

        let mut spans: Vec<ChunkSpan> = (0..full_chunks)
            .map(|index| ChunkSpan {
                index,
                start: TimeSpec::from_seconds(index as f64 * chunk),
                duration: TimeSpec::from_seconds(chunk),
            })
            .collect();

        if tail_policy == TailPolicy::Emit {
            let covered = full_chunks as f64 * chunk;
            let remainder = total_duration - covered;
            if remainder >= MIN_TAIL_SECONDS {
                spans.push(ChunkSpan {
                    index: full_chunks,
                    start: TimeSpec::from_seconds(covered),
                    duration: TimeSpec::from_seconds(remainder),
                });
            }
        }

        Ok(ChunkPlan {
            total_duration: TimeSpec::from_seconds(total_duration),
            chunk_duration,
            spans,
        })
    }

    /// `floor(total / chunk)`, zero for a zero-length chunk
    pub fn full_chunk_count(total_duration: f64, chunk_duration: u32) -> u32 {
        if chunk_duration == 0 || total_duration <= 0.0 {
            return 0;
        }
        (total_duration / chunk_duration as f64).floor() as u32
    }
}

/// How audio is treated for a given output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioHandling {
    /// Strip audio entirely
    Drop,
    /// Copy the source audio stream without re-encoding
    Copy,
}

/// Business rules for per-format encoding
pub struct EncodingPolicy;

impl EncodingPolicy {
    /// Audio handling for the output format: GIF has no audio track,
    /// MP4 keeps the source audio untouched.
    pub fn audio_handling(format: OutputFormat) -> AudioHandling {
        match format {
            OutputFormat::Gif => AudioHandling::Drop,
            OutputFormat::Mp4 => AudioHandling::Copy,
        }
    }

    /// Audio arguments for ffmpeg
    pub fn audio_args(format: OutputFormat) -> &'static [&'static str] {
        match Self::audio_handling(format) {
            AudioHandling::Drop => &["-an"],
            AudioHandling::Copy => &["-c:a", "copy"],
        }
    }
}

/// Business rules for output file collisions
pub struct OverwriteGuard;

impl OverwriteGuard {
    /// Decide whether writing to an output that `exists` may proceed
    pub fn check(policy: OverwritePolicy, exists: bool, path: &str) -> Result<(), DomainError> {
        match (policy, exists) {
            (OverwritePolicy::Never, true) => Err(DomainError::FsFail(format!(
                "Output file already exists: {} (use --overwrite always to replace it)",
                path
            ))),
            _ => Ok(()),
        }
    }

    /// ffmpeg flag matching the policy
    pub fn ffmpeg_flag(policy: OverwritePolicy) -> &'static str {
        match policy {
            OverwritePolicy::Always => "-y",
            OverwritePolicy::Never => "-n",
        }
    }
}

#[cfg(test)]
mod tests;
