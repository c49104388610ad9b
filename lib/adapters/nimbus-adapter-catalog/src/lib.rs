//! Built-in catalog of supported services.

mod services;

use nimbus_domain::ServiceDescriptor;
use nimbus_ports::ServiceRegistry;

pub use services::builtin_services;

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<ServiceDescriptor>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_services())
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }
}

impl ServiceRegistry for ServiceCatalog {
    fn lookup_by_namespace(&self, namespace: &str) -> Option<&ServiceDescriptor> {
        self.services
            .iter()
            .find(|service| service.namespace == namespace)
    }

    fn lookup_by_alias(&self, alias: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|service| service.alias == alias)
    }
}
