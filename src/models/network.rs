// Active network address model

use serde::Serialize;

/// One reportable (interface, address) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAddress {
    pub interface_name: String,
    pub ip_address: String,
}
