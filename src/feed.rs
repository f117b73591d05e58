//! Price feed activation.

use tokio::sync::mpsc;
use tracing::trace;

use crate::types::ProductId;

/// Receives notifications about products that appear on screen, so that
/// their live prices get subscribed to.
///
/// Notifications are fire-and-forget and may repeat for the same product.
pub trait PriceFeed {
    fn notify_product_active(&self, product_id: ProductId);
}

impl<T: PriceFeed + ?Sized> PriceFeed for &T {
    fn notify_product_active(&self, product_id: ProductId) {
        (**self).notify_product_active(product_id)
    }
}

impl PriceFeed for mpsc::UnboundedSender<ProductId> {
    fn notify_product_active(&self, product_id: ProductId) {
        if self.send(product_id).is_err() {
            trace!(product_id, "price feed receiver dropped");
        }
    }
}

/// Price feed ignoring all notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeed;

impl PriceFeed for NoFeed {
    fn notify_product_active(&self, _product_id: ProductId) {}
}
