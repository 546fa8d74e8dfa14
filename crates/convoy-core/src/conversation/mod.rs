//! Conversation reads: the store ports, the access gateway, and the slot that
//! holds the process-wide gateway instance.

pub mod gateway;
pub mod slot;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use gateway::{AccessGateway, ReadOptions};
pub use slot::GatewaySlot;
pub use store::{ConversationStore, StoreConnector};
