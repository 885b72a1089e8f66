//! Pointer normalizer: native events in, canonical samples out

use crate::math::Vec2;
use crate::window::PanelId;

use super::{NativePointerEvent, PointerButtons, PointerPhase, PointerSample};

/// Handle returned by [`PointerNormalizer::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Clone, Debug)]
struct Subscription {
    id: SubscriptionId,
    owner: PanelId,
    phases: Vec<PointerPhase>,
}

/// Converts native mouse/touch/pointer events into [`PointerSample`]s and
/// keeps the registry of who listens to which phase.
///
/// Every native event yields exactly one sample; nothing is coalesced or
/// dropped. `down` is not subscribable: controllers capture it themselves.
#[derive(Clone, Debug)]
pub struct PointerNormalizer {
    /// Position at the last `down`
    origin: Option<Vec2>,
    /// Position of the previous sample in the session
    previous: Option<Vec2>,
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl Default for PointerNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerNormalizer {
    /// Create a new normalizer with no session and no subscribers
    pub fn new() -> Self {
        Self {
            origin: None,
            previous: None,
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }

    /// Check if a pointer session (down without up/cancel yet) is open
    #[inline]
    pub fn in_session(&self) -> bool {
        self.origin.is_some()
    }

    /// Convert one native event into its canonical sample
    pub fn normalize(&mut self, event: &NativePointerEvent) -> PointerSample {
        let phase = event.kind.phase();
        let client = event.client.or_zero();

        if phase == PointerPhase::Down {
            self.origin = Some(client);
            self.previous = Some(client);
        }

        let delta = client - self.origin.unwrap_or(client);
        let step = client - self.previous.unwrap_or(client);

        if phase.is_terminal() {
            self.origin = None;
            self.previous = None;
        } else {
            self.previous = Some(client);
        }

        // Touch contacts carry no button mask; a live contact is a primary press
        let buttons = if event.kind.is_touch() {
            match phase {
                PointerPhase::Down | PointerPhase::Move => PointerButtons::PRIMARY,
                PointerPhase::Up | PointerPhase::Cancel => PointerButtons::NONE,
            }
        } else {
            event.buttons
        };

        PointerSample {
            phase,
            origin: event.origin(),
            client,
            screen: event.screen.or_zero(),
            delta,
            step,
            buttons,
            target: event.target,
            timestamp_ms: event.timestamp_ms,
        }
    }

    /// Subscribe `owner` to the given phases (`down` is ignored)
    pub fn subscribe(&mut self, owner: &PanelId, phases: &[PointerPhase]) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let phases = phases
            .iter()
            .copied()
            .filter(|p| *p != PointerPhase::Down)
            .collect();
        self.subscriptions.push(Subscription {
            id,
            owner: owner.clone(),
            phases,
        });
        id
    }

    /// Drop a single subscription
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Drop every subscription held by `owner`
    pub fn unsubscribe_owner(&mut self, owner: &PanelId) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| &s.owner != owner);
        before - self.subscriptions.len()
    }

    /// Owners subscribed to `phase`, in subscription order
    pub fn subscribers(&self, phase: PointerPhase) -> Vec<PanelId> {
        let mut owners: Vec<PanelId> = Vec::new();
        for sub in self.subscriptions.iter().filter(|s| s.phases.contains(&phase)) {
            if !owners.contains(&sub.owner) {
                owners.push(sub.owner.clone());
            }
        }
        owners
    }

    /// Check if `owner` holds any subscription
    pub fn is_subscribed(&self, owner: &PanelId) -> bool {
        self.subscriptions.iter().any(|s| &s.owner == owner)
    }

    /// Total number of live subscriptions
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}
