//! Serialized user-approval broker.
//!
//! At most one approval is outstanding at a time. Every settlement clears the pre-signed
//! artifacts held by the broker, whatever the outcome.

mod broker;
mod errors;
mod events;
mod types;
mod window;

pub use broker::ApprovalBroker;
pub use errors::{ApprovalError, WindowError, INTERNAL_ERROR_CODE, USER_REJECTED_CODE};
pub use events::spawn_window_event_loop;
pub use types::{
    ApprovalId, ApprovalKind, ApprovalRequest, WindowEvent, WindowFocus, WindowId, WindowOptions,
};
#[cfg(any(test, feature = "test-utils"))]
pub use window::MockWindowManager;
pub use window::WindowManager;
