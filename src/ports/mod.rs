//! Port traits decoupling the domain from its collaborators.

pub mod config_port;
pub mod holdings_port;
pub mod quote_port;
