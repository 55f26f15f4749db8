//! Network link state

/// Connectivity of the network the time source talks over
///
/// Link management (joining, rejoining) lives with the implementation;
/// the clock only reads the state.
#[allow(async_fn_in_trait)]
pub trait NetworkLink {
    /// Whether the link is up and has an address
    fn is_connected(&self) -> bool;

    /// Wait until [`NetworkLink::is_connected`] holds
    async fn wait_connected(&mut self);
}
