//! Cloud metric scrape configuration and metric identity.

mod collector;

pub use collector::Collector;

pub use nimbus_adapter_catalog as catalog;
pub use nimbus_application as application;
pub use nimbus_domain as domain;
pub use nimbus_ports as ports;
