use super::FrameSource;
use crate::error::{GesturecamError, Result};
use crate::frame::FrameData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};

/// One line of a landmark trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Capture time in milliseconds since the start of the recording
    #[serde(default)]
    pub t_ms: Option<u64>,
    /// `[x, y, z]` keypoints of the detected hand, absent when no hand was
    /// found. Kept as raw JSON so that unusable detector output still reaches
    /// the pipeline as a frame.
    #[serde(default)]
    pub landmarks: Option<serde_json::Value>,
}

/// How replayed frames are placed on the monotonic clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayTiming {
    /// Use the recorded `t_ms`, optionally sleeping so frames arrive at the
    /// recorded pace
    Recorded { realtime: bool },
    /// Stamp each frame when its line is read, for live pipes
    Arrival,
}

/// Frame source reading a JSON-lines landmark trace
pub struct ReplaySource<R> {
    lines: Lines<R>,
    timing: ReplayTiming,
    line_number: usize,
    next_id: u64,
    /// Instant of the first frame and its recorded time
    origin: Option<(Instant, u64)>,
}

impl ReplaySource<BufReader<File>> {
    /// Open a trace file
    pub async fn open<P: AsRef<Path>>(path: P, timing: ReplayTiming) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening landmark trace {}", path.display());
        let file = File::open(path).await?;
        Ok(Self::new(BufReader::new(file), timing))
    }
}

impl ReplaySource<BufReader<Stdin>> {
    /// Read a live trace from standard input
    pub fn stdin() -> Self {
        info!("Reading landmark trace from stdin");
        Self::new(BufReader::new(tokio::io::stdin()), ReplayTiming::Arrival)
    }
}

impl<R: AsyncBufRead + Unpin + Send> ReplaySource<R> {
    pub fn new(reader: R, timing: ReplayTiming) -> Self {
        Self {
            lines: reader.lines(),
            timing,
            line_number: 0,
            next_id: 0,
            origin: None,
        }
    }

    fn capture_instant(&mut self, t_ms: Option<u64>) -> Result<Instant> {
        if self.timing == ReplayTiming::Arrival {
            return Ok(Instant::now());
        }

        let t_ms = t_ms.ok_or_else(|| GesturecamError::Replay {
            line: self.line_number,
            details: "missing t_ms in recorded trace".to_string(),
        })?;
        let (origin, origin_ms) = *self.origin.get_or_insert((Instant::now(), t_ms));

        // Earlier timestamps are kept as-is; the tracker treats regressions
        // as zero elapsed time.
        let instant = if t_ms >= origin_ms {
            origin + Duration::from_millis(t_ms - origin_ms)
        } else {
            origin
                .checked_sub(Duration::from_millis(origin_ms - t_ms))
                .unwrap_or(origin)
        };
        Ok(instant)
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FrameSource for ReplaySource<R> {
    async fn next_frame(&mut self) -> Result<Option<FrameData>> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                debug!("Trace ended after {} lines", self.line_number);
                return Ok(None);
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let record: TraceRecord =
                serde_json::from_str(&line).map_err(|e| GesturecamError::Replay {
                    line: self.line_number,
                    details: e.to_string(),
                })?;

            let captured_at = self.capture_instant(record.t_ms)?;
            if let ReplayTiming::Recorded { realtime: true } = self.timing {
                tokio::time::sleep_until(tokio::time::Instant::from_std(captured_at)).await;
            }

            let payload = serde_json::to_vec(&record.landmarks)?;
            let frame = FrameData::new(self.next_id, captured_at, payload);
            self.next_id += 1;
            return Ok(Some(frame));
        }
    }

    fn name(&self) -> &str {
        "replay"
    }
}
