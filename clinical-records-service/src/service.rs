use crate::error::{ClinicalRecordsError, ClinicalRecordsResult};
use crate::models::{NewDiagnosis, NewMedicalRecord};
use entity_store::{
    AppointmentRepository, Clock, Diagnosis, DiagnosisRepository, DiseaseRepository,
    DoctorRepository, IdSource, MedicalRecord, MedicalRecordRepository, PatientRepository,
    PrescriptionRepository,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The only sanctioned mutation path for medical records and diagnoses.
pub struct MedicalRecordService {
    records: Arc<dyn MedicalRecordRepository>,
    diagnoses: Arc<dyn DiagnosisRepository>,
    prescriptions: Arc<dyn PrescriptionRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    diseases: Arc<dyn DiseaseRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl MedicalRecordService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        records: Arc<dyn MedicalRecordRepository>,
        diagnoses: Arc<dyn DiagnosisRepository>,
        prescriptions: Arc<dyn PrescriptionRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        patients: Arc<dyn PatientRepository>,
        doctors: Arc<dyn DoctorRepository>,
        diseases: Arc<dyn DiseaseRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            records,
            diagnoses,
            prescriptions,
            appointments,
            patients,
            doctors,
            diseases,
            clock,
            ids,
        }
    }

    /// Open a medical record, linked to an appointment or as a walk-in.
    ///
    /// One appointment maps to at most one record; the back-reference
    /// must agree with the appointment's own patient and doctor.
    pub async fn create_medical_record(
        &self,
        request: NewMedicalRecord,
    ) -> ClinicalRecordsResult<MedicalRecord> {
        if self.patients.find_by_id(request.patient_id).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("patient", request.patient_id));
        }
        if self.doctors.find_by_id(request.doctor_id).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("doctor", request.doctor_id));
        }

        if let Some(appointment_id) = request.appointment_id {
            let appointment = self
                .appointments
                .find_by_id(appointment_id)
                .await?
                .ok_or_else(|| ClinicalRecordsError::not_found("appointment", appointment_id))?;

            if appointment.patient_id != request.patient_id
                || appointment.doctor_id != request.doctor_id
            {
                return Err(ClinicalRecordsError::Validation(
                    "medical record must reference the appointment's own patient and doctor"
                        .to_string(),
                ));
            }

            if self.records.find_by_appointment(appointment_id).await?.is_some() {
                warn!(%appointment_id, "second medical record for one appointment rejected");
                return Err(ClinicalRecordsError::DuplicateRecord { appointment_id });
            }
        }

        let now = self.clock.now();
        let record = MedicalRecord {
            id: self.ids.new_id(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            appointment_id: request.appointment_id,
            record_date: request.record_date.unwrap_or(now),
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };
        let saved = self.records.save(&record).await?;
        info!(record_id = %saved.id, walk_in = saved.appointment_id.is_none(), "medical record created");
        Ok(saved)
    }

    /// Append a diagnosis to a record and refresh the record's
    /// modification time.
    pub async fn add_diagnosis(&self, request: NewDiagnosis) -> ClinicalRecordsResult<Diagnosis> {
        if request.description.trim().is_empty() {
            return Err(ClinicalRecordsError::Validation(
                "diagnosis description must not be blank".to_string(),
            ));
        }

        let mut record = self
            .records
            .find_by_id(request.record_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("medical record", request.record_id))?;

        if self.diseases.find_by_code(&request.disease_code).await?.is_none() {
            return Err(ClinicalRecordsError::not_found("disease", &request.disease_code));
        }

        let now = self.clock.now();
        let diagnosis = Diagnosis {
            id: self.ids.new_id(),
            record_id: request.record_id,
            disease_code: request.disease_code,
            description: request.description,
            diagnosis_date: request.diagnosis_date,
            status: request.status,
            created_at: now,
        };
        let saved = self.diagnoses.save(&diagnosis).await?;

        record.updated_at = now;
        self.records.save(&record).await?;

        debug!(record_id = %record.id, diagnosis_id = %saved.id, "diagnosis added");
        Ok(saved)
    }

    pub async fn update_notes(
        &self,
        record_id: Uuid,
        notes: String,
    ) -> ClinicalRecordsResult<MedicalRecord> {
        let mut record = self
            .records
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("medical record", record_id))?;

        record.notes = notes;
        record.updated_at = self.clock.now();
        Ok(self.records.save(&record).await?)
    }

    pub async fn delete_diagnosis(&self, diagnosis_id: Uuid) -> ClinicalRecordsResult<()> {
        let diagnosis = self
            .diagnoses
            .find_by_id(diagnosis_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("diagnosis", diagnosis_id))?;

        self.diagnoses.delete(diagnosis_id).await?;

        if let Some(mut record) = self.records.find_by_id(diagnosis.record_id).await? {
            record.updated_at = self.clock.now();
            self.records.save(&record).await?;
        }
        Ok(())
    }

    /// Delete a record and the diagnoses it owns.
    ///
    /// Prescriptions reference records weakly; while any remain the
    /// delete is blocked rather than silently orphaning them.
    pub async fn delete_medical_record(&self, record_id: Uuid) -> ClinicalRecordsResult<()> {
        let record = self
            .records
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("medical record", record_id))?;

        let dependents = self.prescriptions.find_by_record(record_id).await?;
        if !dependents.is_empty() {
            warn!(
                %record_id,
                prescriptions = dependents.len(),
                "medical record delete blocked by prescriptions"
            );
            return Err(ClinicalRecordsError::ReferencedEntity {
                entity: "medical record",
                id: record_id.to_string(),
                dependents: "prescriptions",
            });
        }

        self.diagnoses.delete_by_record(record_id).await?;
        self.records.delete(record_id).await?;
        info!(%record_id, patient_id = %record.patient_id, "medical record deleted with its diagnoses");
        Ok(())
    }

    pub async fn record(&self, record_id: Uuid) -> ClinicalRecordsResult<MedicalRecord> {
        self.records
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| ClinicalRecordsError::not_found("medical record", record_id))
    }
}
