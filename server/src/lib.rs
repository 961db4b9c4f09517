pub mod config;
pub mod handlers;
pub mod net;
pub mod run;
pub mod state;

#[cfg(test)]
mod test_helpers;

pub use handlers::{handle_messages, process_events};
pub use net::{RenetServerNetworkHandle, ServerNetworkEvent, ServerNetworkHandle};
