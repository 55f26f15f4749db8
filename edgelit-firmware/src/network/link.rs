//! Network link state over the embassy-net stack

use edgelit_core::traits::NetworkLink;
use embassy_net::Stack;

/// Link view of the WiFi stack
///
/// Joining and rejoining happen in [`super::wifi::supervisor_task`]; this
/// only observes the result.
#[derive(Clone, Copy)]
pub struct WifiLink {
    stack: Stack<'static>,
}

impl WifiLink {
    pub fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl NetworkLink for WifiLink {
    fn is_connected(&self) -> bool {
        self.stack.is_link_up() && self.stack.is_config_up()
    }

    async fn wait_connected(&mut self) {
        self.stack.wait_link_up().await;
        self.stack.wait_config_up().await;
    }
}
