use crate::models::{PaymentMethod, ServiceSelection};
use crate::repository::{ServiceRequestRepository, ServiceSelectionRepository};
use catalog_service::CatalogLookup;
use error_common::{CoreError, CoreResult};
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

/// Service selection operations: attach a catalog service, quantity, and
/// payer data to a request
#[derive(Clone)]
pub struct SelectionService {
    requests: ServiceRequestRepository,
    selections: ServiceSelectionRepository,
    catalog: Arc<dyn CatalogLookup>,
}

impl SelectionService {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            requests: ServiceRequestRepository::new(store.clone()),
            selections: ServiceSelectionRepository::new(store),
            catalog,
        }
    }

    /// Loads the selection for a request, if any
    pub async fn get_selection(&self, request_id: Uuid) -> CoreResult<Option<ServiceSelection>> {
        self.requests.require(request_id).await?;
        self.selections.get(request_id).await
    }

    /// Attaches a catalog service, rewriting lab, unit price, and turnaround
    /// from the catalog entry. Payment method, insurer fields, and quantity
    /// are left untouched.
    pub async fn set_service(
        &self,
        request_id: Uuid,
        catalog_service_id: &str,
    ) -> CoreResult<ServiceSelection> {
        self.requests.require(request_id).await?;
        let entry = self
            .catalog
            .find_service_by_id(catalog_service_id)
            .ok_or_else(|| CoreError::not_found("ServiceEntry", catalog_service_id))?;

        let mut selection = self.selections.get_or_new(request_id).await?;
        selection.service_id = entry.id;
        selection.service_name = entry.name;
        selection.lab_name = entry.lab_name;
        selection.unit_price = entry.unit_price;
        selection.turnaround = entry.turnaround;
        self.selections.save(&selection).await?;
        tracing::info!(request_id = %request_id, service_id = %selection.service_id, "attached catalog service");
        Ok(selection)
    }

    /// Sets the quantity (must be at least 1)
    pub async fn set_quantity(&self, request_id: Uuid, quantity: u32) -> CoreResult<ServiceSelection> {
        if quantity < 1 {
            return Err(CoreError::validation("Quantity must be at least 1"));
        }
        self.requests.require(request_id).await?;
        let mut selection = self.selections.get_or_new(request_id).await?;
        selection.quantity = quantity;
        self.selections.save(&selection).await?;
        Ok(selection)
    }

    /// Sets the payment method.
    ///
    /// Switching to self-pay clears all insurer references; switching to
    /// insurer-billed keeps whatever was last set, which may be empty. That
    /// incomplete state is valid here and only blocks the insurance submit.
    pub async fn set_payment_method(
        &self,
        request_id: Uuid,
        method: PaymentMethod,
    ) -> CoreResult<ServiceSelection> {
        self.requests.require(request_id).await?;
        let mut selection = self.selections.get_or_new(request_id).await?;
        selection.payment_method = method;
        if method == PaymentMethod::SelfPay {
            selection.clear_insurer();
        }
        self.selections.save(&selection).await?;
        Ok(selection)
    }

    /// Records the billed insurer from the catalog.
    ///
    /// A no-op unless the payment method is currently insurer-billed.
    pub async fn set_insurer(
        &self,
        request_id: Uuid,
        insurer_id: &str,
    ) -> CoreResult<ServiceSelection> {
        self.requests.require(request_id).await?;
        let mut selection = self.selections.get_or_new(request_id).await?;
        if selection.payment_method != PaymentMethod::InsurerBilled {
            tracing::debug!(request_id = %request_id, "ignoring insurer for self-pay selection");
            return Ok(selection);
        }

        let insurer = self
            .catalog
            .find_insurer_by_id(insurer_id)
            .ok_or_else(|| CoreError::not_found("Insurer", insurer_id))?;
        selection.insurer_id = Some(insurer.id);
        selection.insurer_name = Some(insurer.name);
        selection.insurer_tax_id = Some(insurer.tax_id);
        self.selections.save(&selection).await?;
        Ok(selection)
    }
}
