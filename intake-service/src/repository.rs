use crate::models::{PatientProfile, ServiceRequest, ServiceSelection, VtRequest};
use error_common::{CoreError, CoreResult};
use std::sync::Arc;
use storage_layer::{fetch_record, fetch_record_raw, put_record, put_record_if, KeyValueStore};
use uuid::Uuid;

/// Storage key for a service request
pub fn request_key(id: Uuid) -> String {
    format!("request:{id}")
}

/// Storage key for a patient profile
pub fn patient_key(id: Uuid) -> String {
    format!("patient:{id}")
}

/// Storage key for a service selection
pub fn service_key(id: Uuid) -> String {
    format!("service:{id}")
}

/// Storage key for a VT request
pub fn vt_key(id: Uuid) -> String {
    format!("vt:{id}")
}

/// Repository for [`ServiceRequest`] records
#[derive(Clone)]
pub struct ServiceRequestRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ServiceRequestRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: Uuid) -> CoreResult<Option<ServiceRequest>> {
        fetch_record(self.store.as_ref(), &request_key(id)).await
    }

    /// Loads the request or fails with a not-found error
    pub async fn require(&self, id: Uuid) -> CoreResult<ServiceRequest> {
        self.get(id)
            .await?
            .ok_or_else(|| CoreError::not_found("ServiceRequest", id.to_string()))
    }

    pub async fn save(&self, request: &ServiceRequest) -> CoreResult<()> {
        put_record(self.store.as_ref(), &request_key(request.id), request).await
    }
}

/// Repository for [`PatientProfile`] records
#[derive(Clone)]
pub struct PatientProfileRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PatientProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, request_id: Uuid) -> CoreResult<Option<PatientProfile>> {
        fetch_record(self.store.as_ref(), &patient_key(request_id)).await
    }

    pub async fn save(&self, profile: &PatientProfile) -> CoreResult<()> {
        put_record(self.store.as_ref(), &patient_key(profile.request_id), profile).await
    }
}

/// Repository for [`ServiceSelection`] records
#[derive(Clone)]
pub struct ServiceSelectionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ServiceSelectionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, request_id: Uuid) -> CoreResult<Option<ServiceSelection>> {
        fetch_record(self.store.as_ref(), &service_key(request_id)).await
    }

    /// Loads the selection, or a fresh empty one when the request has not
    /// touched service data yet
    pub async fn get_or_new(&self, request_id: Uuid) -> CoreResult<ServiceSelection> {
        Ok(self
            .get(request_id)
            .await?
            .unwrap_or_else(|| ServiceSelection::new(request_id)))
    }

    pub async fn save(&self, selection: &ServiceSelection) -> CoreResult<()> {
        put_record(
            self.store.as_ref(),
            &service_key(selection.request_id),
            selection,
        )
        .await
    }
}

/// Repository for [`VtRequest`] records.
///
/// The pending → submitted transition goes through a compare-and-set so the
/// folio can never be assigned twice, even under rapid repeated calls.
#[derive(Clone)]
pub struct VtRequestRepository {
    store: Arc<dyn KeyValueStore>,
}

impl VtRequestRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the VT record; an absent record reads as a fresh pending one
    pub async fn get_or_new(&self, request_id: Uuid) -> CoreResult<VtRequest> {
        Ok(fetch_record(self.store.as_ref(), &vt_key(request_id))
            .await?
            .unwrap_or_else(|| VtRequest::new(request_id)))
    }

    /// Loads the VT record together with the raw stored text, for use with
    /// [`submit_if_unchanged`](Self::submit_if_unchanged)
    pub async fn get_raw(&self, request_id: Uuid) -> CoreResult<Option<(VtRequest, String)>> {
        fetch_record_raw(self.store.as_ref(), &vt_key(request_id)).await
    }

    pub async fn save(&self, vt: &VtRequest) -> CoreResult<()> {
        put_record(self.store.as_ref(), &vt_key(vt.request_id), vt).await
    }

    /// Atomically replaces the stored record with `submitted` iff the stored
    /// text still equals `observed_raw` (`None`: the record must still be
    /// absent). Returns `false` when another caller got there first.
    pub async fn submit_if_unchanged(
        &self,
        submitted: &VtRequest,
        observed_raw: Option<&str>,
    ) -> CoreResult<bool> {
        put_record_if(
            self.store.as_ref(),
            &vt_key(submitted.request_id),
            observed_raw,
            submitted,
        )
        .await
    }
}
