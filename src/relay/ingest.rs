//! Inbound message evaluation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::keywords::KeywordStore;
use crate::matching::{AlertPayload, MatchEngine};
use crate::observability::metrics;

/// A message event delivered by the (external) chat transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The message text.
    pub text: String,
    /// Chat/room identifier the message came from.
    pub origin: String,
    /// Sender identifier, as reported by the transport.
    #[serde(default)]
    pub sender: String,
}

/// Evaluation pipeline: live keyword set + match engine.
pub struct Relay {
    store: Arc<KeywordStore>,
    engine: MatchEngine,
}

impl Relay {
    pub fn new(store: Arc<KeywordStore>, engine: MatchEngine) -> Self {
        Self { store, engine }
    }

    /// Evaluate one message against the live keyword set.
    ///
    /// Produces at most one alert payload; a reload triggered under the
    /// hood never surfaces here.
    pub async fn evaluate(&self, message: &InboundMessage) -> Option<AlertPayload> {
        let keywords = self.store.current().await;
        let hit = self.engine.decide(&message.text, &keywords);
        metrics::record_message(hit.is_some());

        let keyword = hit?;
        tracing::info!(
            keyword = %keyword,
            origin = %message.origin,
            sender = %message.sender,
            "Keyword match"
        );
        Some(self.engine.alert_for(keyword, &message.text, &message.origin))
    }
}
