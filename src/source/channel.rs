use super::FrameSource;
use crate::error::Result;
use crate::frame::FrameData;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Frame source fed by the host application through a bounded channel.
/// The stream ends once every sender is dropped.
pub struct ChannelFrameSource {
    receiver: mpsc::Receiver<FrameData>,
}

impl ChannelFrameSource {
    pub fn new(capacity: usize) -> (mpsc::Sender<FrameData>, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        (sender, Self { receiver })
    }
}

#[async_trait]
impl FrameSource for ChannelFrameSource {
    async fn next_frame(&mut self) -> Result<Option<FrameData>> {
        Ok(self.receiver.recv().await)
    }

    fn name(&self) -> &str {
        "channel"
    }
}
