use crate::models::{
    NewServiceRequest, PatientProfile, RequestEdit, ServiceRequest, VtRequest, VtStatus,
};
use crate::repository::{PatientProfileRepository, ServiceRequestRepository, VtRequestRepository};
use chrono::Utc;
use error_common::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::KeyValueStore;
use uuid::Uuid;

fn require_field(value: &str, message: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(message));
    }
    Ok(())
}

/// Request intake service: creation and sales-side editing of service
/// requests, patient profiles, and the request-scoped VT record
#[derive(Clone)]
pub struct IntakeService {
    requests: ServiceRequestRepository,
    patients: PatientProfileRepository,
    vts: VtRequestRepository,
}

impl IntakeService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            requests: ServiceRequestRepository::new(store.clone()),
            patients: PatientProfileRepository::new(store.clone()),
            vts: VtRequestRepository::new(store),
        }
    }

    /// Creates a service request and its pre-seeded patient profile.
    ///
    /// Every field of [`NewServiceRequest`] is required; the patient display
    /// name must contain at least a first and a last name.
    pub async fn create_request(&self, new: NewServiceRequest) -> CoreResult<ServiceRequest> {
        require_field(&new.doctor_name, "Doctor name is required")?;
        require_field(&new.condition, "Condition is required")?;
        require_field(&new.test_type, "Test type is required")?;
        require_field(&new.contact_phone, "Contact phone is required")?;
        require_field(&new.specialist_phone, "Specialist phone is required")?;
        if new.patient_name.split_whitespace().count() < 2 {
            return Err(CoreError::validation(
                "Patient first and last name are required",
            ));
        }

        let request = ServiceRequest {
            id: Uuid::new_v4(),
            doctor_name: new.doctor_name,
            patient_name: new.patient_name,
            condition: new.condition,
            test_type: new.test_type,
            contact_phone: new.contact_phone,
            specialist_phone: new.specialist_phone,
            created_at: Utc::now(),
        };
        let profile = PatientProfile::seeded_from_name(request.id, &request.patient_name);

        self.requests.save(&request).await?;
        self.patients.save(&profile).await?;
        tracing::info!(request_id = %request.id, "created service request");
        Ok(request)
    }

    /// Loads a request by id
    pub async fn get_request(&self, id: Uuid) -> CoreResult<ServiceRequest> {
        self.requests.require(id).await
    }

    /// Edits the display fields of a request.
    ///
    /// Allowed only until the VT request is submitted; the creation
    /// timestamp is never touched.
    pub async fn update_request(&self, id: Uuid, edit: RequestEdit) -> CoreResult<ServiceRequest> {
        let mut request = self.requests.require(id).await?;
        let vt = self.vts.get_or_new(id).await?;
        if vt.status != VtStatus::Pending {
            return Err(CoreError::precondition(
                "request is locked after VT submission",
            ));
        }

        if let Some(doctor_name) = edit.doctor_name {
            require_field(&doctor_name, "Doctor name is required")?;
            request.doctor_name = doctor_name;
        }
        if let Some(patient_name) = edit.patient_name {
            require_field(&patient_name, "Patient name is required")?;
            request.patient_name = patient_name;
        }
        if let Some(condition) = edit.condition {
            request.condition = condition;
        }
        if let Some(test_type) = edit.test_type {
            request.test_type = test_type;
        }
        if let Some(contact_phone) = edit.contact_phone {
            request.contact_phone = contact_phone;
        }
        if let Some(specialist_phone) = edit.specialist_phone {
            request.specialist_phone = specialist_phone;
        }

        self.requests.save(&request).await?;
        Ok(request)
    }

    /// Loads the patient profile for a request, if one has been saved
    pub async fn get_patient(&self, request_id: Uuid) -> CoreResult<Option<PatientProfile>> {
        self.patients.get(request_id).await
    }

    /// Overwrites the patient profile wholesale (no history is kept).
    ///
    /// The owning request must exist; the profile is created lazily when it
    /// was never seeded.
    pub async fn save_patient(&self, profile: PatientProfile) -> CoreResult<()> {
        self.requests.require(profile.request_id).await?;
        self.patients.save(&profile).await
    }

    /// Loads the VT record for a request (absent reads as pending)
    pub async fn get_vt(&self, request_id: Uuid) -> CoreResult<VtRequest> {
        self.vts.get_or_new(request_id).await
    }

    /// Updates the free-text notes on the VT record
    pub async fn update_vt_notes(&self, request_id: Uuid, notes: String) -> CoreResult<VtRequest> {
        self.requests.require(request_id).await?;
        let mut vt = self.vts.get_or_new(request_id).await?;
        vt.notes = notes;
        self.vts.save(&vt).await?;
        Ok(vt)
    }

    /// Sets or clears the explicit quoted amount used when the admin case is
    /// spawned. Rejected once the VT request has been submitted, since the
    /// snapshot amount is already fixed.
    pub async fn set_quoted_amount(
        &self,
        request_id: Uuid,
        amount: Option<Decimal>,
    ) -> CoreResult<VtRequest> {
        self.requests.require(request_id).await?;
        let mut vt = self.vts.get_or_new(request_id).await?;
        if vt.status != VtStatus::Pending {
            return Err(CoreError::precondition("VT request already submitted"));
        }
        vt.quoted_amount = amount;
        self.vts.save(&vt).await?;
        Ok(vt)
    }
}
