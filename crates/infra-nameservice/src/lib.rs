// Time Tracker Infrastructure - Name Service Adapter
// Implements: NameResolver

mod http_resolver;

pub use http_resolver::{HttpNameResolver, NameServiceConfig};
