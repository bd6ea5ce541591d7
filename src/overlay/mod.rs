//! Tenant overlay fetching and synchronization.
mod fetch;
mod sync;

pub use fetch::{
    OverlayClient,
    OverlayFetchError,
    TenantId,
};
pub use sync::OverlaySync;
