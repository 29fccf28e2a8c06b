//! Trait definitions for the remote connector API.
//!
//! The playground never talks to a connector directly. Every integration
//! concern (authorization, field discovery, listing, mutation) is delegated
//! to a hosted service reachable through [`ConnectorApi`].

mod api;
mod session;
mod request;

pub use api::ConnectorApi;
pub use request::{FieldUpdate, ListRecordsOptions};
pub use session::{Connection, ConnectionStatus, KeyPair, Session, SessionCredentials, SessionRequest};
