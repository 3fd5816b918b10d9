use crate::error::StoreResult;
use crate::models::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Patient storage
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn save(&self, patient: &Patient) -> StoreResult<Patient>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Patient>>;
    async fn list(&self) -> StoreResult<Vec<Patient>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Doctor storage
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn save(&self, doctor: &Doctor) -> StoreResult<Doctor>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Doctor>>;
    async fn list(&self) -> StoreResult<Vec<Doctor>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Appointment storage
///
/// `find_scheduled_in_window` is the conflict-check read: every
/// `Scheduled` appointment for the doctor whose window intersects the
/// half-open `[window_start, window_end)`, optionally excluding one id
/// (the appointment being updated).
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn save(&self, appointment: &Appointment) -> StoreResult<Appointment>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Appointment>>;
    async fn find_scheduled_in_window(
        &self,
        doctor_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> StoreResult<Vec<Appointment>>;
    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Appointment>>;
    async fn find_by_doctor(&self, doctor_id: Uuid) -> StoreResult<Vec<Appointment>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Medical record storage
#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    async fn save(&self, record: &MedicalRecord) -> StoreResult<MedicalRecord>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<MedicalRecord>>;
    async fn find_by_appointment(&self, appointment_id: Uuid)
        -> StoreResult<Option<MedicalRecord>>;
    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<MedicalRecord>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Diagnosis storage
#[async_trait]
pub trait DiagnosisRepository: Send + Sync {
    async fn save(&self, diagnosis: &Diagnosis) -> StoreResult<Diagnosis>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Diagnosis>>;
    async fn find_by_record(&self, record_id: Uuid) -> StoreResult<Vec<Diagnosis>>;
    /// Ownership cascade used when a record is deleted.
    async fn delete_by_record(&self, record_id: Uuid) -> StoreResult<()>;
    /// Referential guard for disease deletion.
    async fn exists_for_disease(&self, disease_code: &str) -> StoreResult<bool>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Disease catalog storage
#[async_trait]
pub trait DiseaseRepository: Send + Sync {
    async fn save(&self, disease: &Disease) -> StoreResult<Disease>;
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Disease>>;
    async fn list(&self) -> StoreResult<Vec<Disease>>;
    async fn delete(&self, code: &str) -> StoreResult<()>;
}

/// Medicine storage
#[async_trait]
pub trait MedicineRepository: Send + Sync {
    async fn save(&self, medicine: &Medicine) -> StoreResult<Medicine>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Medicine>>;
    async fn list(&self) -> StoreResult<Vec<Medicine>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Prescription storage (whole aggregate per write)
#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    async fn save(&self, prescription: &Prescription) -> StoreResult<Prescription>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Prescription>>;
    async fn find_by_record(&self, record_id: Uuid) -> StoreResult<Vec<Prescription>>;
    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Prescription>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Bill storage (whole aggregate per write)
#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn save(&self, bill: &Bill) -> StoreResult<Bill>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Bill>>;
    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Bill>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// User account storage, uniqueness by username
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    async fn save(&self, account: &UserAccount) -> StoreResult<UserAccount>;
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserAccount>>;
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserAccount>>;
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
