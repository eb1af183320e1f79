use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde_json::Value;
use tokio::sync::{oneshot, Mutex};
use tracing::*;
use txgate_config::{BrokerConfig, FocusConfig};
use txgate_presign::PreSignedStore;

use crate::{
    ApprovalError, ApprovalId, ApprovalRequest, WindowError, WindowEvent, WindowFocus,
    WindowId, WindowManager, WindowOptions,
};

/// Reason given when the user dismisses the consent window directly.
const WINDOW_CLOSED_REASON: &str = "User rejected the request.";

/// Reason given when focus moves away from the consent window.
const FOCUS_LOST_REASON: &str = "Consent window lost focus.";

type ApprovalOutcome = Result<Value, ApprovalError>;

#[derive(Debug)]
struct PendingApproval {
    id: ApprovalId,
    request: ApprovalRequest,
    completion: oneshot::Sender<ApprovalOutcome>,
}

impl PendingApproval {
    fn settle(self, outcome: ApprovalOutcome) {
        if self.completion.send(outcome).is_err() {
            debug!(id = %self.id, "requester went away before settlement");
        }
    }
}

#[derive(Debug, Default)]
struct BrokerState {
    pending: Option<PendingApproval>,

    /// Completions of approvals replaced by a newer request. Their requesters stay parked
    /// until the broker is dropped or they stop waiting.
    orphaned: Vec<oneshot::Sender<ApprovalOutcome>>,

    window: Option<WindowId>,

    /// Parameters handed over by the last successful resolution, taken at most once.
    side_channel: Option<Value>,
}

/// Owns the single outstanding approval, its consent window and the pre-signed artifacts
/// produced for it.
///
/// Every operation runs under one async mutex, including the window open and close calls,
/// so operations never interleave.
#[derive(Debug)]
pub struct ApprovalBroker<W> {
    config: BrokerConfig,
    windows: Arc<W>,
    state: Mutex<BrokerState>,
    presigned: PreSignedStore,
    next_id: AtomicU64,
}

impl<W: WindowManager> ApprovalBroker<W> {
    pub fn new(config: BrokerConfig, windows: Arc<W>, presigned: PreSignedStore) -> Self {
        Self {
            config,
            windows,
            state: Mutex::new(BrokerState::default()),
            presigned,
            next_id: AtomicU64::new(1),
        }
    }

    /// Window geometry used when the caller has no preference.
    pub fn default_window_options(&self) -> WindowOptions {
        WindowOptions::from(&self.config.window)
    }

    /// Asks the user to approve `request` and waits for the decision.
    ///
    /// A request made while another one is pending replaces it. The replaced requester is
    /// not notified and keeps waiting; see [`Self::orphaned_approvals`].
    pub async fn request_approval(
        &self,
        request: ApprovalRequest,
        options: WindowOptions,
    ) -> Result<Value, ApprovalError> {
        let decision = {
            let mut state = self.state.lock().await;

            let id = ApprovalId(self.next_id.fetch_add(1, Ordering::Relaxed));
            let (completion, decision) = oneshot::channel();
            info!(%id, kind = ?request.kind, origin = ?request.origin, "approval requested");

            let pending = PendingApproval {
                id,
                request,
                completion,
            };
            if let Some(replaced) = state.pending.replace(pending) {
                warn!(replaced = %replaced.id, by = %id, "pending approval replaced, its requester is left waiting");
                state.orphaned.push(replaced.completion);
                state.orphaned.retain(|completion| !completion.is_closed());
            }

            if let Err(err) = self.reopen_window(&mut state, &options).await {
                error!(%id, %err, "failed to open consent window");
                if let Some(pending) = state.pending.take() {
                    pending.settle(Err(ApprovalError::Internal(err.to_string())));
                }
            }

            decision
        };

        decision.await.unwrap_or_else(|_| {
            Err(ApprovalError::Internal(
                "approval dropped without a decision".to_owned(),
            ))
        })
    }

    /// Settles the pending approval with `response`, or with a user rejection when
    /// `force_reject` is set.
    ///
    /// Both pre-signed slots are cleared even when nothing is pending. The consent window
    /// is left to close itself.
    pub async fn resolve_approval(
        &self,
        response: Value,
        side_channel: Option<Value>,
        force_reject: bool,
    ) {
        let mut state = self.state.lock().await;
        self.presigned.clear_all();

        let Some(pending) = state.pending.take() else {
            debug!("no pending approval to resolve");
            return;
        };

        if force_reject {
            info!(id = %pending.id, "approval force-rejected");
            pending.settle(Err(ApprovalError::UserRejected(
                WINDOW_CLOSED_REASON.to_owned(),
            )));
            return;
        }

        info!(id = %pending.id, "approval resolved");
        state.side_channel = side_channel;
        pending.settle(Ok(response));
    }

    /// Rejects the pending approval and closes the consent window unless
    /// `keep_window_open` is set.
    ///
    /// Both pre-signed slots are cleared even when nothing is pending.
    pub async fn reject_approval(
        &self,
        reason: impl Into<String>,
        keep_window_open: bool,
        is_internal_error: bool,
    ) {
        let reason = reason.into();
        let error = if is_internal_error {
            ApprovalError::Internal(reason)
        } else {
            ApprovalError::UserRejected(reason)
        };

        let mut state = self.state.lock().await;
        self.reject_locked(&mut state, error, keep_window_open).await;
    }

    /// Drops the pending approval without a decision and closes its consent window. Its
    /// requester sees an internal error.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        self.presigned.clear_all();
        state.side_channel = None;
        if let Some(pending) = state.pending.take() {
            info!(id = %pending.id, "pending approval cleared");
        }
        self.close_window(&mut state).await;
    }

    pub async fn handle_window_event(&self, event: WindowEvent) {
        match event {
            WindowEvent::Removed(window) => self.on_window_removed(window).await,
            WindowEvent::FocusChanged(focus) => self.on_focus_changed(focus).await,
        }
    }

    pub async fn get_approval(&self) -> Option<ApprovalRequest> {
        let state = self.state.lock().await;
        state.pending.as_ref().map(|pending| pending.request.clone())
    }

    pub async fn has_active_approval(&self) -> bool {
        self.state.lock().await.pending.is_some()
    }

    /// The window currently bound to the broker, if any.
    pub async fn current_window(&self) -> Option<WindowId> {
        self.state.lock().await.window
    }

    /// Number of replaced approvals whose requesters are still waiting.
    pub async fn orphaned_approvals(&self) -> usize {
        self.state.lock().await.orphaned.len()
    }

    pub async fn take_side_channel_params(&self) -> Option<Value> {
        self.state.lock().await.side_channel.take()
    }

    pub async fn clear_side_channel_params(&self) {
        self.state.lock().await.side_channel = None;
    }

    /// Pre-signed artifacts for the current approval cycle.
    pub fn presigned(&self) -> &PreSignedStore {
        &self.presigned
    }

    pub fn is_pre_signing_in_progress(&self) -> bool {
        self.presigned.is_pre_signing_in_progress()
    }

    pub fn set_pre_signing_in_progress(&self, in_progress: bool) {
        self.presigned.set_pre_signing_in_progress(in_progress);
    }

    async fn reject_locked(
        &self,
        state: &mut BrokerState,
        error: ApprovalError,
        keep_window_open: bool,
    ) {
        self.presigned.clear_all();

        let Some(pending) = state.pending.take() else {
            debug!("no pending approval to reject");
            return;
        };

        info!(id = %pending.id, code = error.code(), reason = %error.reason(), "approval rejected");
        pending.settle(Err(error));

        if !keep_window_open {
            self.close_window(state).await;
        }
    }

    async fn reopen_window(
        &self,
        state: &mut BrokerState,
        options: &WindowOptions,
    ) -> Result<(), WindowError> {
        self.close_window(state).await;

        let window = self.windows.open(options).await?;
        debug!(%window, width = options.width, height = options.height, "opened consent window");
        state.window = Some(window);
        Ok(())
    }

    async fn close_window(&self, state: &mut BrokerState) {
        let Some(window) = state.window.take() else {
            return;
        };

        match self.windows.close(window).await {
            Ok(()) => debug!(%window, "closed consent window"),
            Err(err) => warn!(%window, %err, "failed to close consent window"),
        }
    }

    async fn on_window_removed(&self, window: WindowId) {
        let mut state = self.state.lock().await;
        if state.window != Some(window) {
            trace!(%window, "ignoring removal of unbound window");
            return;
        }

        debug!(%window, "consent window removed by user");
        state.window = None;
        let error = ApprovalError::UserRejected(WINDOW_CLOSED_REASON.to_owned());
        self.reject_locked(&mut state, error, false).await;
    }

    async fn on_focus_changed(&self, focus: WindowFocus) {
        let FocusConfig {
            auto_reject_on_blur,
            ignore_transient_blur,
        } = self.config.focus;

        if !auto_reject_on_blur {
            trace!(?focus, "focus change ignored");
            return;
        }

        if focus == WindowFocus::None && ignore_transient_blur {
            debug!("ignoring transient blur");
            return;
        }

        let mut state = self.state.lock().await;
        if state.pending.is_none() {
            return;
        }

        if let WindowFocus::Window(window) = focus {
            if state.window == Some(window) {
                return;
            }
        }

        let error = ApprovalError::UserRejected(FOCUS_LOST_REASON.to_owned());
        self.reject_locked(&mut state, error, false).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bitcoin::Network;
    use serde_json::json;
    use tokio::{task::JoinHandle, time::timeout};
    use txgate_decoder::{decode_simple_transfer, UnspentOutput};
    use txgate_presign::{
        PreSignedInteractionData, PreSignedKind, PreSignedTransactionData, RawBroadcastPayload,
    };
    use txgate_test_utils_btc::{build_tx, p2wpkh_script, test_outpoint, test_txid, tx_hex};

    use super::*;
    use crate::{ApprovalKind, MockWindowManager, USER_REJECTED_CODE};

    type TestBroker = Arc<ApprovalBroker<MockWindowManager>>;

    /// Mock that hands out sequential window ids starting at 1.
    fn sequential_windows(opens: usize, closes: usize) -> MockWindowManager {
        let next = AtomicU64::new(1);
        let mut windows = MockWindowManager::new();
        windows
            .expect_open()
            .times(opens)
            .returning(move |_| Ok(WindowId(next.fetch_add(1, Ordering::SeqCst))));
        windows.expect_close().times(closes).returning(|_| Ok(()));
        windows
    }

    fn broker_with(windows: MockWindowManager, config: BrokerConfig) -> TestBroker {
        Arc::new(ApprovalBroker::new(
            config,
            Arc::new(windows),
            PreSignedStore::default(),
        ))
    }

    fn request(label: &str) -> ApprovalRequest {
        ApprovalRequest::new(ApprovalKind::SignInteraction, json!({ "label": label }))
            .with_origin("https://dapp.example")
    }

    /// Spawns a requester and waits until the broker has registered its request.
    async fn spawn_request(
        broker: &TestBroker,
        label: &str,
    ) -> JoinHandle<Result<Value, ApprovalError>> {
        let req = request(label);
        let handle = {
            let broker = broker.clone();
            let req = req.clone();
            let options = broker.default_window_options();
            tokio::spawn(async move { broker.request_approval(req, options).await })
        };

        timeout(Duration::from_secs(1), async {
            while broker.get_approval().await.as_ref() != Some(&req) {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("request was never registered");

        handle
    }

    async fn settled(
        handle: JoinHandle<Result<Value, ApprovalError>>,
    ) -> Result<Value, ApprovalError> {
        timeout(Duration::from_secs(1), handle)
            .await
            .expect("approval was not settled")
            .expect("requester task panicked")
    }

    fn transfer_data() -> PreSignedTransactionData {
        let tx = build_tx(&[test_outpoint(1, 0)], &[(p2wpkh_script(2), 9_000)]);
        let hex = tx_hex(&tx);
        let utxos = [UnspentOutput::new(test_txid(1), 0, 10_000)];
        let bundle = decode_simple_transfer(&hex, &utxos, Network::Regtest).unwrap();
        let payload = RawBroadcastPayload {
            funding_tx_hex: None,
            interaction_tx_hex: None,
            deployment_tx_pair: None,
            bitcoin_tx_hex: Some(hex),
            next_utxos: Vec::new(),
        };
        PreSignedTransactionData::from_bundle(PreSignedKind::BitcoinTransfer, bundle, payload)
    }

    fn interaction_data() -> PreSignedInteractionData {
        let tx = build_tx(
            &[test_outpoint(1, 0)],
            &[(p2wpkh_script(3), 330), (p2wpkh_script(4), 9_000)],
        );
        let hex = tx_hex(&tx);
        let utxos = [UnspentOutput::new(test_txid(1), 0, 10_000)];
        let bundle = decode_simple_transfer(&hex, &utxos, Network::Regtest).unwrap();
        let payload = RawBroadcastPayload {
            funding_tx_hex: None,
            interaction_tx_hex: Some(hex),
            deployment_tx_pair: None,
            bitcoin_tx_hex: None,
            next_utxos: Vec::new(),
        };
        PreSignedInteractionData::from_bundle(bundle, payload).unwrap()
    }

    fn fill_presigned(broker: &TestBroker) {
        broker.presigned().set_transaction_data(transfer_data());
        broker.presigned().set_interaction_data(interaction_data());
        assert!(broker.presigned().transaction_data().is_some());
        assert!(broker.presigned().interaction_data().is_some());
    }

    fn assert_presigned_empty(broker: &TestBroker) {
        assert!(broker.presigned().transaction_data().is_none());
        assert!(broker.presigned().interaction_data().is_none());
    }

    #[tokio::test]
    async fn test_resolve_delivers_response() {
        let broker = broker_with(sequential_windows(1, 0), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        assert!(broker.has_active_approval().await);
        assert_eq!(broker.current_window().await, Some(WindowId(1)));

        broker
            .resolve_approval(json!({ "approved": true }), None, false)
            .await;

        assert_eq!(settled(handle).await, Ok(json!({ "approved": true })));
        assert!(!broker.has_active_approval().await);
        assert_eq!(broker.current_window().await, Some(WindowId(1)));
    }

    #[tokio::test]
    async fn test_second_request_replaces_first() {
        let mut windows = MockWindowManager::new();
        let next = AtomicU64::new(1);
        windows
            .expect_open()
            .times(2)
            .returning(move |_| Ok(WindowId(next.fetch_add(1, Ordering::SeqCst))));
        windows
            .expect_close()
            .withf(|window| *window == WindowId(1))
            .times(1)
            .returning(|_| Ok(()));
        let broker = broker_with(windows, BrokerConfig::default());

        let first = spawn_request(&broker, "a").await;
        let second = spawn_request(&broker, "b").await;

        assert_eq!(broker.get_approval().await, Some(request("b")));
        assert_eq!(broker.current_window().await, Some(WindowId(2)));
        assert_eq!(broker.orphaned_approvals().await, 1);

        broker.resolve_approval(json!("b-ok"), None, false).await;
        assert_eq!(settled(second).await, Ok(json!("b-ok")));

        // The replaced requester is never settled.
        assert!(timeout(Duration::from_millis(50), first).await.is_err());
        assert_eq!(broker.orphaned_approvals().await, 1);
    }

    #[tokio::test]
    async fn test_abandoned_orphans_are_released() {
        let broker = broker_with(sequential_windows(3, 2), BrokerConfig::default());

        let first = spawn_request(&broker, "a").await;
        first.abort();
        assert!(first.await.unwrap_err().is_cancelled());

        let second = spawn_request(&broker, "b").await;
        assert_eq!(broker.orphaned_approvals().await, 0);

        let _third = spawn_request(&broker, "c").await;
        assert_eq!(broker.orphaned_approvals().await, 1);
        assert!(timeout(Duration::from_millis(50), second).await.is_err());
    }

    #[tokio::test]
    async fn test_settlement_happens_once() {
        let broker = broker_with(sequential_windows(1, 1), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        broker.reject_approval("declined", false, false).await;

        let err = settled(handle).await.unwrap_err();
        assert_eq!(err, ApprovalError::UserRejected("declined".into()));
        assert_eq!(err.code(), USER_REJECTED_CODE);
        assert_eq!(broker.current_window().await, None);

        broker.reject_approval("again", false, false).await;
        broker.resolve_approval(json!(null), None, false).await;
        broker.resolve_approval(json!(null), None, true).await;
        assert!(!broker.has_active_approval().await);
        assert_eq!(broker.take_side_channel_params().await, None);
    }

    #[tokio::test]
    async fn test_internal_rejection_keeps_window() {
        let broker = broker_with(sequential_windows(1, 0), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        broker.reject_approval("signer crashed", true, true).await;

        let err = settled(handle).await.unwrap_err();
        assert_eq!(err, ApprovalError::Internal("signer crashed".into()));
        assert!(!err.is_user_rejection());
        assert_eq!(broker.current_window().await, Some(WindowId(1)));
    }

    #[tokio::test]
    async fn test_resolve_clears_presigned_data() {
        let broker = broker_with(sequential_windows(1, 0), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        fill_presigned(&broker);
        broker.resolve_approval(json!("ok"), None, false).await;

        assert!(settled(handle).await.is_ok());
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_reject_clears_presigned_data() {
        let broker = broker_with(sequential_windows(1, 1), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        fill_presigned(&broker);
        broker.reject_approval("no", false, false).await;

        assert!(settled(handle).await.is_err());
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_idle_settlement_still_clears_presigned_data() {
        let broker = broker_with(sequential_windows(0, 0), BrokerConfig::default());

        fill_presigned(&broker);
        broker.resolve_approval(json!("ok"), None, false).await;
        assert_presigned_empty(&broker);

        fill_presigned(&broker);
        broker.reject_approval("no", false, false).await;
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_force_reject() {
        let broker = broker_with(sequential_windows(1, 0), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        fill_presigned(&broker);
        broker
            .resolve_approval(json!("ignored"), Some(json!({ "fee_rate": 5 })), true)
            .await;

        let err = settled(handle).await.unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(broker.take_side_channel_params().await, None);
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_side_channel_params_taken_once() {
        let broker = broker_with(sequential_windows(2, 1), BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        broker
            .resolve_approval(json!("ok"), Some(json!({ "fee_rate": 5 })), false)
            .await;
        assert!(settled(handle).await.is_ok());

        assert_eq!(
            broker.take_side_channel_params().await,
            Some(json!({ "fee_rate": 5 }))
        );
        assert_eq!(broker.take_side_channel_params().await, None);

        let handle = spawn_request(&broker, "b").await;
        broker
            .resolve_approval(json!("ok"), Some(json!({ "fee_rate": 9 })), false)
            .await;
        assert!(settled(handle).await.is_ok());

        broker.clear_side_channel_params().await;
        assert_eq!(broker.take_side_channel_params().await, None);
    }

    #[tokio::test]
    async fn test_removal_of_stale_window_is_ignored() {
        let mut windows = MockWindowManager::new();
        let next = AtomicU64::new(1);
        windows
            .expect_open()
            .times(2)
            .returning(move |_| Ok(WindowId(next.fetch_add(1, Ordering::SeqCst))));
        windows
            .expect_close()
            .withf(|window| *window == WindowId(1))
            .times(1)
            .returning(|_| Ok(()));
        let broker = broker_with(windows, BrokerConfig::default());

        let _first = spawn_request(&broker, "a").await;
        let second = spawn_request(&broker, "b").await;
        fill_presigned(&broker);

        broker
            .handle_window_event(WindowEvent::Removed(WindowId(1)))
            .await;
        assert!(broker.has_active_approval().await);
        assert_eq!(broker.current_window().await, Some(WindowId(2)));
        assert!(broker.presigned().transaction_data().is_some());
        assert!(broker.presigned().interaction_data().is_some());

        broker
            .handle_window_event(WindowEvent::Removed(WindowId(2)))
            .await;
        let err = settled(second).await.unwrap_err();
        assert_eq!(err, ApprovalError::UserRejected(WINDOW_CLOSED_REASON.into()));
        assert_eq!(broker.current_window().await, None);
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_focus_changes_inert_by_default() {
        let broker = broker_with(sequential_windows(1, 0), BrokerConfig::default());

        let _handle = spawn_request(&broker, "a").await;
        broker
            .handle_window_event(WindowEvent::FocusChanged(WindowFocus::None))
            .await;
        broker
            .handle_window_event(WindowEvent::FocusChanged(WindowFocus::Window(WindowId(42))))
            .await;

        assert!(broker.has_active_approval().await);
    }

    #[tokio::test]
    async fn test_focus_auto_reject_when_enabled() {
        let config = BrokerConfig {
            focus: FocusConfig {
                auto_reject_on_blur: true,
                ignore_transient_blur: true,
            },
            ..Default::default()
        };
        let broker = broker_with(sequential_windows(1, 1), config);

        let handle = spawn_request(&broker, "a").await;
        fill_presigned(&broker);

        broker
            .handle_window_event(WindowEvent::FocusChanged(WindowFocus::None))
            .await;
        broker
            .handle_window_event(WindowEvent::FocusChanged(WindowFocus::Window(WindowId(1))))
            .await;
        assert!(broker.has_active_approval().await);
        assert!(broker.presigned().transaction_data().is_some());

        broker
            .handle_window_event(WindowEvent::FocusChanged(WindowFocus::Window(WindowId(42))))
            .await;
        let err = settled(handle).await.unwrap_err();
        assert_eq!(err, ApprovalError::UserRejected(FOCUS_LOST_REASON.into()));
        assert_eq!(broker.current_window().await, None);
        assert_presigned_empty(&broker);
    }

    #[tokio::test]
    async fn test_open_failure_settles_as_internal_error() {
        let mut windows = MockWindowManager::new();
        windows
            .expect_open()
            .times(1)
            .returning(|_| Err(WindowError::Backend("no display".into())));
        windows.expect_close().times(0);
        let broker = broker_with(windows, BrokerConfig::default());

        let outcome = broker
            .request_approval(request("a"), broker.default_window_options())
            .await;

        let err = outcome.unwrap_err();
        assert!(matches!(err, ApprovalError::Internal(_)));
        assert!(!broker.has_active_approval().await);
        assert_eq!(broker.current_window().await, None);
    }

    #[tokio::test]
    async fn test_clear_drops_pending_approval() {
        let mut windows = MockWindowManager::new();
        windows
            .expect_open()
            .times(1)
            .returning(|_| Ok(WindowId(1)));
        windows
            .expect_close()
            .withf(|window| *window == WindowId(1))
            .times(1)
            .returning(|_| Ok(()));
        let broker = broker_with(windows, BrokerConfig::default());

        let handle = spawn_request(&broker, "a").await;
        fill_presigned(&broker);
        broker.clear().await;

        let err = settled(handle).await.unwrap_err();
        assert!(matches!(err, ApprovalError::Internal(_)));
        assert!(!broker.has_active_approval().await);
        assert_eq!(broker.current_window().await, None);
        assert_presigned_empty(&broker);

        // Nothing left to close, and a late removal of the old window is a no-op.
        broker.clear().await;
        broker
            .handle_window_event(WindowEvent::Removed(WindowId(1)))
            .await;
        assert_eq!(broker.current_window().await, None);
    }

    #[tokio::test]
    async fn test_window_opened_with_configured_geometry() {
        let mut windows = MockWindowManager::new();
        windows
            .expect_open()
            .withf(|options| options.width == 357 && options.height == 600)
            .times(1)
            .returning(|_| Ok(WindowId(1)));
        let broker = broker_with(windows, BrokerConfig::default());

        let _handle = spawn_request(&broker, "a").await;
        assert_eq!(broker.current_window().await, Some(WindowId(1)));
    }

    #[tokio::test]
    async fn test_pre_signing_latch_passthrough() {
        let broker = broker_with(sequential_windows(0, 0), BrokerConfig::default());

        let guard = broker.presigned().begin_pre_signing().unwrap();
        assert!(broker.is_pre_signing_in_progress());
        drop(guard);
        assert!(!broker.is_pre_signing_in_progress());

        broker.set_pre_signing_in_progress(true);
        assert!(broker.presigned().begin_pre_signing().is_err());
    }
}
