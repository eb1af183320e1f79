//! Staging area holding the pre-signed artifacts of the current approval cycle.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::*;

use crate::{
    Clock, PreSignError, PreSignedInteractionData, PreSignedSlot, PreSignedTransactionData,
    SigningGuard, SigningLatch, SystemClock,
};

/// The two pre-signed slots plus the pre-signing latch.
///
/// Every read goes through the TTL check, so expired data is never handed out.
#[derive(Debug)]
pub struct PreSignedStore {
    clock: Arc<dyn Clock>,
    interaction: Mutex<PreSignedSlot<PreSignedInteractionData>>,
    transaction: Mutex<PreSignedSlot<PreSignedTransactionData>>,
    latch: SigningLatch,
}

impl Default for PreSignedStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl PreSignedStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            interaction: Mutex::new(PreSignedSlot::new()),
            transaction: Mutex::new(PreSignedSlot::new()),
            latch: SigningLatch::new(),
        }
    }

    pub fn set_interaction_data(&self, data: PreSignedInteractionData) {
        let now = self.clock.now_millis();
        debug!(txid = %data.interaction_tx.txid, "storing pre-signed interaction");
        self.interaction.lock().set(data, now);
    }

    pub fn interaction_data(&self) -> Option<PreSignedInteractionData> {
        self.interaction.lock().get(self.clock.now_millis())
    }

    pub fn is_interaction_data_expired(&self) -> bool {
        self.interaction.lock().is_expired(self.clock.now_millis())
    }

    pub fn clear_interaction_data(&self) {
        self.interaction.lock().clear();
    }

    pub fn set_transaction_data(&self, data: PreSignedTransactionData) {
        let now = self.clock.now_millis();
        debug!(kind = ?data.kind, txs = data.transactions.len(), "storing pre-signed bundle");
        self.transaction.lock().set(data, now);
    }

    pub fn transaction_data(&self) -> Option<PreSignedTransactionData> {
        self.transaction.lock().get(self.clock.now_millis())
    }

    pub fn is_transaction_data_expired(&self) -> bool {
        self.transaction.lock().is_expired(self.clock.now_millis())
    }

    pub fn clear_transaction_data(&self) {
        self.transaction.lock().clear();
    }

    /// Empties both slots.
    pub fn clear_all(&self) {
        let had_interaction = self.interaction.lock().clear();
        let had_transaction = self.transaction.lock().clear();
        if had_interaction || had_transaction {
            debug!(%had_interaction, %had_transaction, "cleared pre-signed data");
        }
    }

    /// Takes the pre-signing latch for the lifetime of the returned guard.
    pub fn begin_pre_signing(&self) -> Result<SigningGuard, PreSignError> {
        self.latch.try_acquire().inspect_err(|_| {
            warn!("refusing to start a second pre-signing run");
        })
    }

    pub fn is_pre_signing_in_progress(&self) -> bool {
        self.latch.is_held()
    }

    pub fn set_pre_signing_in_progress(&self, in_progress: bool) {
        self.latch.set(in_progress);
    }
}
