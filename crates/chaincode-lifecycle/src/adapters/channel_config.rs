//! # Static Channel Configuration

use crate::domain::entities::ChannelConfig;
use crate::ports::outbound::ChannelConfigSource;
use std::collections::HashMap;

/// A fixed set of channel configurations.
#[derive(Debug, Clone, Default)]
pub struct StaticChannelConfigSource {
    channels: HashMap<String, ChannelConfig>,
}

impl StaticChannelConfigSource {
    /// Create a source that knows no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a channel with its member organizations.
    #[must_use]
    pub fn with_channel<I, S>(mut self, channel_id: &str, organizations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels.insert(
            channel_id.to_string(),
            ChannelConfig {
                channel_id: channel_id.to_string(),
                organizations: organizations.into_iter().map(Into::into).collect(),
            },
        );
        self
    }
}

impl ChannelConfigSource for StaticChannelConfigSource {
    fn channel_config(&self, channel_id: &str) -> Option<ChannelConfig> {
        self.channels.get(channel_id).cloned()
    }
}
