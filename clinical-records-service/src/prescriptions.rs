use crate::error::{ClinicalRecordsError, ClinicalRecordsResult};
use crate::models::NewPrescription;
use entity_store::{
    Clock, DoctorRepository, IdSource, MedicalRecordRepository, MedicineRepository,
    PatientRepository, Prescription, PrescriptionDetail, PrescriptionRepository,
    PrescriptionStatus,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// The only sanctioned mutation path for prescriptions.
pub struct PrescriptionService {
    prescriptions: Arc<dyn PrescriptionRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    records: Arc<dyn MedicalRecordRepository>,
    medicines: Arc<dyn MedicineRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl PrescriptionService {
    pub fn new(
        prescriptions: Arc<dyn PrescriptionRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        records: Arc<dyn MedicalRecordRepository>,
        medicines: Arc<dyn MedicineRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            prescriptions,
            patients,
            doctors,
            records,
            medicines,
            clock,
            ids,
        }
    }

    /// Create a prescription with all of its lines, or nothing.
    ///
    /// Every line is validated and priced before anything is written,
    /// so a single bad line cannot leave partial rows behind. Each
    /// line's `unit_price` is a snapshot of the medicine's price at
    /// this moment and is never recomputed.
    pub async fn create_prescription(
        &self,
        request: NewPrescription,
    ) -> ClinicalRecordsResult<Prescription> {
        if request.details.is_empty() {
            return Err(ClinicalRecordsError::Validation(
                "a prescription needs at least one detail line".to_string(),
            ));
        }

        if self.patients.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("patient", request.patient_id));
        }
        if self.doctors.find_by_id(request.doctor_id).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("doctor", request.doctor_id));
        }
        if let Some(record_id) = request.record_id {
            if self.records.find_by_id(record_id).await?.is_none() {
                return Err(ClinicalRecordsError::not_found("medical record", record_id));
            }
        }

        let mut details = Vec::with_capacity(request.details.len());
        for line in &request.details {
            if line.quantity < 1 {
                return Err(ClinicalRecordsError::Validation(
                    "prescription detail quantity must be a positive integer".to_string(),
                ));
            }
            if line.dosage.trim().is_empty() {
                return Err(ClinicalRecordsError::Validation(
                    "prescription detail dosage must not be blank".to_string(),
                ));
            }

            let medicine = self
                .medicines
                .find_by_id(line.medicine_id)
                .await?
                .ok_or_else(|| ClinicalRecordsError::not_found("medicine", line.medicine_id))?;

            details.push(PrescriptionDetail {
                id: self.ids.new_id(),
                medicine_id: medicine.id,
                quantity: line.quantity,
                dosage: line.dosage.clone(),
                instructions: line.instructions.clone(),
                unit_price: medicine.price,
            });
        }

        let now = self.clock.now();
        let prescription = Prescription {
            id: self.ids.new_id(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            record_id: request.record_id,
            status: PrescriptionStatus::Active,
            notes: request.notes,
            details,
            created_at: now,
            updated_at: now,
        };
        let saved = self.prescriptions.save(&prescription).await?;
        info!(
            prescription_id = %saved.id,
            lines = saved.details.len(),
            "prescription created"
        );
        Ok(saved)
    }

    /// Set a prescription's status.
    ///
    /// Deliberately unconstrained: any status may follow any other,
    /// mirroring the legacy behavior until product defines a table.
    pub async fn update_status(
        &self,
        prescription_id: Uuid,
        new_status: PrescriptionStatus,
    ) -> ClinicalRecordsResult<Prescription> {
        let mut prescription = self.load(prescription_id).await?;

        debug!(
            %prescription_id,
            from = ?prescription.status,
            to = ?new_status,
            "prescription status updated"
        );
        prescription.status = new_status;
        prescription.updated_at = self.clock.now();
        Ok(self.prescriptions.save(&prescription).await?)
    }

    pub async fn cancel(&self, prescription_id: Uuid) -> ClinicalRecordsResult<Prescription> {
        self.update_status(prescription_id, PrescriptionStatus::Cancelled)
            .await
    }

    pub async fn prescription(&self, prescription_id: Uuid) -> ClinicalRecordsResult<Prescription> {
        self.load(prescription_id).await
    }

    async fn load(&self, prescription_id: Uuid) -> ClinicalRecordsResult<Prescription> {
        self.prescriptions
            .find_by_id(prescription_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("prescription", prescription_id))
    }
}
