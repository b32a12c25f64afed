//! One-slot message channels between teammates
//!
//! A [`MessageChannel`] carries a single integer per tick in one direction.
//! Sends are staged and only become visible once the channel is delivered at
//! the tick boundary, so a value sent during tick `t` is first observed
//! during tick `t + 1` no matter in which order the two agents are stepped.

use super::types::Role;

/// Slot value meaning "nothing received yet"
pub const NO_MESSAGE: i64 = -1;

/// Single-slot, last-write-wins mailbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChannel {
    delivered: i64,
    staged: Option<i64>,
}

impl MessageChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self { delivered: NO_MESSAGE, staged: None }
    }

    /// Overwrite the outgoing slot; no queuing, the last send in a tick wins
    pub fn send(&mut self, value: i64) {
        self.staged = Some(value);
    }

    /// Current delivered value; reading does not clear it
    pub fn receive(&self) -> i64 {
        self.delivered
    }

    /// Whether a send is waiting for the next tick boundary
    pub fn has_pending(&self) -> bool {
        self.staged.is_some()
    }

    /// Publish the staged value, if any; called once per tick boundary
    pub fn deliver(&mut self) {
        if let Some(value) = self.staged.take() {
            self.delivered = value;
        }
    }

    /// Back to "no message"
    pub fn reset(&mut self) {
        self.delivered = NO_MESSAGE;
        self.staged = None;
    }
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// The two directed channels of a Spotter/Seeker pair
#[derive(Debug, Clone, Default)]
pub struct PairChannels {
    to_seeker: MessageChannel,
    to_spotter: MessageChannel,
}

impl PairChannels {
    /// Create both channels empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel the given role reads from
    pub fn inbox(&self, role: Role) -> &MessageChannel {
        match role {
            Role::Spotter => &self.to_spotter,
            Role::Seeker => &self.to_seeker,
        }
    }

    /// Channel the given role writes to (its teammate's inbox)
    pub fn outbox_mut(&mut self, role: Role) -> &mut MessageChannel {
        match role {
            Role::Spotter => &mut self.to_seeker,
            Role::Seeker => &mut self.to_spotter,
        }
    }

    /// Deliver both channels at the tick boundary
    pub fn deliver(&mut self) {
        self.to_seeker.deliver();
        self.to_spotter.deliver();
    }

    /// Clear both channels for a new episode
    pub fn reset(&mut self) {
        self.to_seeker.reset();
        self.to_spotter.reset();
    }
}

/// One-hot encoding of a message over `vocab` values
///
/// [`NO_MESSAGE`] and out-of-range values encode as all zeros.
pub fn encode_one_hot(message: i64, vocab: usize) -> Vec<f32> {
    let mut onehot = vec![0.0; vocab];
    if let Ok(index) = usize::try_from(message) {
        if let Some(slot) = onehot.get_mut(index) {
            *slot = 1.0;
        }
    }
    onehot
}
