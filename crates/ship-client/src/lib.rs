//! HTTP implementations of the session collaborators and the shipment API client.

pub mod credential_client;
pub mod device_code;
pub mod error;
pub mod pagination;
pub mod shipment;
pub mod shipment_client;

mod http;

#[cfg(test)]
mod tests;

pub use credential_client::CredentialClient;
pub use device_code::{AccountCache, CachedAccount, DeviceCodePrompt, DeviceCodeProvider, PromptFn};
pub use error::{ClientError, Result as ClientResult};
pub use pagination::{DEFAULT_ROWS_PER_PAGE, Paginator, ROWS_PER_PAGE_OPTIONS};
pub use shipment::Shipment;
pub use shipment_client::ShipmentClient;
