//! Plugin lifecycle hooks consumed by the host application.

use async_trait::async_trait;

#[async_trait]
pub trait Plugin {
    /// Registers host resources owned by this plugin.
    async fn install(&self);

    /// Removes the resources registered by [`Plugin::install`].
    async fn uninstall(&self);
}
