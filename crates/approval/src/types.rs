use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use txgate_config::WindowConfig;

/// Opaque handle of a consent window, issued by the window collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Broker-local sequence number of an approval request, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApprovalId(pub u64);

impl fmt::Display for ApprovalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approval#{}", self.0)
    }
}

/// What the user is being asked to consent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalKind {
    Connect,
    SignMessage,
    SignTransaction,
    SignInteraction,
    Deployment,
    SwitchNetwork,
}

/// Payload shown in the consent window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub kind: ApprovalKind,

    /// Requesting site, when the request came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default)]
    pub params: Value,
}

impl ApprovalRequest {
    pub fn new(kind: ApprovalKind, params: Value) -> Self {
        Self {
            kind,
            origin: None,
            params,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOptions {
    pub width: u32,
    pub height: u32,
    pub left: Option<i32>,
    pub top: Option<i32>,
}

impl From<&WindowConfig> for WindowOptions {
    fn from(config: &WindowConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            left: config.left,
            top: config.top,
        }
    }
}

/// Which window holds focus after a focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFocus {
    /// No wallet window is focused.
    None,
    Window(WindowId),
}

/// Events emitted by the window collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Removed(WindowId),
    FocusChanged(WindowFocus),
}
