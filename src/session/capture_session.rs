use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    diff::{structural::diff_structural, style::diff_style},
    dom::dom_model::NodeRef,
    mutation::{
        compressor::compress,
        mutation_model::{CompressedIntent, IntentRecord, MutationRecord},
    },
    profile::{profile_model::AnimationProfile, synthesizer::synthesize},
    snapshot::{
        capture::SnapshotCapturer,
        snapshot_model::{ElementSnapshot, StyleSnapshot},
    },
    trace::record::{InteractionEvent, InteractionRecord},
};

/// Handle returned by [`CaptureSession::capture_before`] and redeemed by
/// [`CaptureSession::capture_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureToken(pub u64);

#[derive(Debug)]
struct PendingCapture {
    event: InteractionEvent,
    structural: ElementSnapshot,
    style: StyleSnapshot,
}

/// Everything a session has accumulated, ready for the export collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub records: Vec<InteractionRecord>,
    pub intents: Vec<IntentRecord>,
    pub profiles: Vec<AnimationProfile>,
}

/// Per-session capture state.
///
/// Capture is two-phase: `capture_before` at event time, then, once the
/// caller has waited [`settle_delay`](Self::settle_delay),
/// `capture_after` with the returned token. The session never sleeps or
/// schedules anything itself.
#[derive(Debug)]
pub struct CaptureSession {
    capturer: SnapshotCapturer,
    settle_delay: Duration,
    next_token: u64,
    pending: HashMap<CaptureToken, PendingCapture>,
    records: Vec<InteractionRecord>,
    intents: Vec<IntentRecord>,
}

impl CaptureSession {
    pub fn new(capturer: SnapshotCapturer, settle_delay: Duration) -> Self {
        Self {
            capturer,
            settle_delay,
            next_token: 0,
            pending: HashMap::new(),
            records: vec![],
            intents: vec![],
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn capturer(&self) -> &SnapshotCapturer {
        &self.capturer
    }

    /// Snapshot `node` as it is when `event` fires. `None` when the node is
    /// not an element.
    pub fn capture_before(
        &mut self,
        node: NodeRef<'_>,
        event: InteractionEvent,
    ) -> Option<CaptureToken> {
        let structural = self.capturer.capture_structural(node)?;
        let style = self.capturer.capture_style(node)?;

        let token = CaptureToken(self.next_token);
        self.next_token += 1;

        debug!(
            token = token.0,
            event = %event.kind,
            selector = %structural.selector,
            "captured before-state"
        );
        self.pending.insert(
            token,
            PendingCapture {
                event,
                structural,
                style,
            },
        );
        Some(token)
    }

    /// Complete a capture started with `capture_before`. The record keeps the
    /// selector resolved at event time. An unknown token yields `None`; a
    /// non-element `node` still records the interaction, without after-state.
    pub fn capture_after(
        &mut self,
        token: CaptureToken,
        node: NodeRef<'_>,
    ) -> Option<&InteractionRecord> {
        let Some(pending) = self.pending.remove(&token) else {
            warn!(token = token.0, "capture_after called with unknown token");
            return None;
        };

        let after_structural = self.capturer.capture_structural(node);
        let after_style = self.capturer.capture_style(node);

        let changes = after_structural
            .as_ref()
            .and_then(|after| diff_structural(&pending.structural, after));
        let style_changes = after_style
            .as_ref()
            .map(|after| diff_style(&pending.style, after))
            .unwrap_or_default();

        let PendingCapture {
            event,
            structural,
            style,
        } = pending;

        self.records.push(InteractionRecord {
            timestamp: event.timestamp,
            event_kind: event.kind,
            selector: structural.selector.clone(),
            coordinates: event.coordinates,
            value: event.value,
            key: event.key,
            before_structural: Some(structural),
            before_style: Some(style),
            after_structural,
            after_style,
            changes,
            style_changes,
        });
        self.records.last()
    }

    /// Drop a capture that will never be completed.
    pub fn cancel(&mut self, token: CaptureToken) -> bool {
        self.pending.remove(&token).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Compress a mutation batch and keep the result alongside the records.
    pub fn observe_mutations(&mut self, timestamp: u64, batch: &[MutationRecord]) -> &CompressedIntent {
        let intent = compress(batch);
        debug!(
            intent = %intent.intent,
            affected = intent.affected_element_count,
            "compressed mutation batch"
        );
        self.intents.push(IntentRecord { timestamp, intent });
        let last = self.intents.len() - 1;
        &self.intents[last].intent
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn intents(&self) -> &[IntentRecord] {
        &self.intents
    }

    /// Run profile synthesis over every record captured so far.
    pub fn synthesize(&self) -> Vec<AnimationProfile> {
        synthesize(&self.records)
    }

    pub fn export(&self) -> SessionExport {
        SessionExport {
            records: self.records.clone(),
            intents: self.intents.clone(),
            profiles: self.synthesize(),
        }
    }
}
