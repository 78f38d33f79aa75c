use crate::models::{Insurer, Lab, ServiceEntry, Specialist};

/// Read-only catalog contract consumed by the lifecycle engine.
///
/// Lookups are pure and return `None` for unknown identifiers; the engine
/// decides whether a miss is an error.
pub trait CatalogLookup: Send + Sync {
    /// Finds a test service by its catalog id
    fn find_service_by_id(&self, id: &str) -> Option<ServiceEntry>;

    /// Finds a test service by its display name
    fn find_service_by_name(&self, name: &str) -> Option<ServiceEntry>;

    /// Finds an insurer by its catalog id
    fn find_insurer_by_id(&self, id: &str) -> Option<Insurer>;

    /// Finds a referring specialist by phone number
    fn find_specialist_by_phone(&self, phone: &str) -> Option<Specialist>;
}

/// Catalog backed by in-memory reference data supplied at construction
#[derive(Debug, Default)]
pub struct StaticCatalog {
    services: Vec<ServiceEntry>,
    insurers: Vec<Insurer>,
    specialists: Vec<Specialist>,
    labs: Vec<Lab>,
}

impl StaticCatalog {
    /// Builds a catalog from reference data
    pub fn new(
        services: Vec<ServiceEntry>,
        insurers: Vec<Insurer>,
        specialists: Vec<Specialist>,
        labs: Vec<Lab>,
    ) -> Self {
        Self {
            services,
            insurers,
            specialists,
            labs,
        }
    }

    /// All laboratories in the catalog
    pub fn labs(&self) -> &[Lab] {
        &self.labs
    }
}

impl CatalogLookup for StaticCatalog {
    fn find_service_by_id(&self, id: &str) -> Option<ServiceEntry> {
        self.services.iter().find(|s| s.id == id).cloned()
    }

    fn find_service_by_name(&self, name: &str) -> Option<ServiceEntry> {
        self.services.iter().find(|s| s.name == name).cloned()
    }

    fn find_insurer_by_id(&self, id: &str) -> Option<Insurer> {
        self.insurers.iter().find(|i| i.id == id).cloned()
    }

    fn find_specialist_by_phone(&self, phone: &str) -> Option<Specialist> {
        self.specialists.iter().find(|s| s.phone == phone).cloned()
    }
}
