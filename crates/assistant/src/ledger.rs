//! Conversation ledger and activity log.
//!
//! Turns are append-only per conversation key. The activity log keeps only
//! the most recent `cap` entries.

use eduassist_core::{ActivityEntry, ConversationKey, ConversationTurn, DataStore};
use tracing::debug;

/// Append `turn` to the history under `key`, creating it if needed.
/// Returns the history length afterwards.
pub fn append_turn(store: &mut DataStore, key: &ConversationKey, turn: ConversationTurn) -> usize {
    let history = store.conversations.entry(key.clone()).or_default();
    history.push(turn);
    debug!(conversation = %key, turns = history.len(), "Turn appended");
    history.len()
}

/// Append an activity entry and drop the oldest entries beyond `cap`.
pub fn record_activity(store: &mut DataStore, entry: ActivityEntry, cap: usize) {
    store.activity.push(entry);
    if store.activity.len() > cap {
        let excess = store.activity.len() - cap;
        store.activity.drain(..excess);
    }
}

/// The most recent `n` activity entries, newest first.
pub fn recent_activity(store: &DataStore, n: usize) -> Vec<&ActivityEntry> {
    store.activity.iter().rev().take(n).collect()
}
