//! Ports consumed by the resolution engine.

use std::sync::Arc;

use nimbus_domain::ServiceDescriptor;

/// Read-only lookup into the catalog of supported services.
pub trait ServiceRegistry: Send + Sync {
    fn lookup_by_namespace(&self, namespace: &str) -> Option<&ServiceDescriptor>;
    fn lookup_by_alias(&self, alias: &str) -> Option<&ServiceDescriptor>;
}

#[derive(Clone)]
pub struct PortSet {
    pub registry: Arc<dyn ServiceRegistry>,
}

impl PortSet {
    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Ports with a registry that knows no services.
    pub fn empty() -> Self {
        Self {
            registry: Arc::new(NullServiceRegistry),
        }
    }
}

#[derive(Clone, Copy, Default)]
struct NullServiceRegistry;

impl ServiceRegistry for NullServiceRegistry {
    fn lookup_by_namespace(&self, _namespace: &str) -> Option<&ServiceDescriptor> {
        None
    }

    fn lookup_by_alias(&self, _alias: &str) -> Option<&ServiceDescriptor> {
        None
    }
}
