mod channel;
mod detector;
mod replay;


pub use channel::ChannelFrameSource;
pub use detector::{HandDetector, TraceDetector};
pub use replay::{ReplaySource, ReplayTiming, TraceRecord};

use crate::error::Result;
use crate::frame::FrameData;
use async_trait::async_trait;

/// Producer of frames for a recognition session
#[async_trait]
pub trait FrameSource: Send {
    /// Wait for the next frame. `Ok(None)` means the stream has ended.
    async fn next_frame(&mut self) -> Result<Option<FrameData>>;

    /// Name used in logs
    fn name(&self) -> &str {
        "frame_source"
    }
}
