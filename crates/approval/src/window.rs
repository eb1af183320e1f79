use async_trait::async_trait;

use crate::{WindowError, WindowId, WindowOptions};

/// Opens and closes the consent surface.
///
/// Removal and focus events travel the other way, as [`WindowEvent`](crate::WindowEvent)s
/// fed to the broker.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait WindowManager: Send + Sync + 'static {
    async fn open(&self, options: &WindowOptions) -> Result<WindowId, WindowError>;

    async fn close(&self, window: WindowId) -> Result<(), WindowError>;
}
