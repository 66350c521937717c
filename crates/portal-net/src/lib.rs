//! Wire types and request builders for the grievance portal
//!
//! Everything here is IO-free: requests are built as plain values for a
//! host boundary to execute, and responses come back as plain values to
//! parse. The same types serve the browser client and the native relay.
//!
//! - [`http`]: Request and response values crossing the host boundary
//! - [`store`]: Remote document-store endpoints and response parsing
//! - [`feed`]: Live change-feed payload parsing
//! - [`relay`]: Notification relay request and webhook formatting

pub mod feed;
pub mod http;
pub mod relay;
pub mod store;

pub use feed::parse_change;
pub use http::{HttpMethod, HttpRequest, HttpResponse, NetError};
pub use relay::{RelayRequest, WebhookPayload};
pub use store::StoreClient;
