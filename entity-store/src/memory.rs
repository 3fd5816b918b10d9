//! In-memory reference implementation of the repository traits.
//!
//! Backed by `DashMap`, suitable for development and tests. A durable
//! backend implements the same traits; services are written against the
//! traits only.

use crate::error::StoreResult;
use crate::models::*;
use crate::repository::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryPatientRepository {
    patients: DashMap<Uuid, Patient>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn save(&self, patient: &Patient) -> StoreResult<Patient> {
        self.patients.insert(patient.id, patient.clone());
        Ok(patient.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        Ok(self.patients.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.patients.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.patients.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDoctorRepository {
    doctors: DashMap<Uuid, Doctor>,
}

impl InMemoryDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DoctorRepository for InMemoryDoctorRepository {
    async fn save(&self, doctor: &Doctor) -> StoreResult<Doctor> {
        self.doctors.insert(doctor.id, doctor.clone());
        Ok(doctor.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Doctor>> {
        Ok(self.doctors.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.doctors.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.doctors.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: DashMap<Uuid, Appointment>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn save(&self, appointment: &Appointment) -> StoreResult<Appointment> {
        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Appointment>> {
        Ok(self.appointments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_scheduled_in_window(
        &self,
        doctor_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> StoreResult<Vec<Appointment>> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|entry| {
                let appointment = entry.value();
                appointment.doctor_id == doctor_id
                    && appointment.status == AppointmentStatus::Scheduled
                    && Some(appointment.id) != exclude
                    && appointment.overlaps(window_start, window_end)
            })
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|appointment| appointment.start_time);
        Ok(matches)
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|entry| entry.value().patient_id == patient_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|appointment| appointment.start_time);
        Ok(matches)
    }

    async fn find_by_doctor(&self, doctor_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|entry| entry.value().doctor_id == doctor_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|appointment| appointment.start_time);
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.appointments.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMedicalRecordRepository {
    records: DashMap<Uuid, MedicalRecord>,
}

impl InMemoryMedicalRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MedicalRecordRepository for InMemoryMedicalRecordRepository {
    async fn save(&self, record: &MedicalRecord) -> StoreResult<MedicalRecord> {
        self.records.insert(record.id, record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<MedicalRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_appointment(
        &self,
        appointment_id: Uuid,
    ) -> StoreResult<Option<MedicalRecord>> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.value().appointment_id == Some(appointment_id))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<MedicalRecord>> {
        let mut matches: Vec<MedicalRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().patient_id == patient_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|record| record.record_date);
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.records.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDiagnosisRepository {
    diagnoses: DashMap<Uuid, Diagnosis>,
}

impl InMemoryDiagnosisRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiagnosisRepository for InMemoryDiagnosisRepository {
    async fn save(&self, diagnosis: &Diagnosis) -> StoreResult<Diagnosis> {
        self.diagnoses.insert(diagnosis.id, diagnosis.clone());
        Ok(diagnosis.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Diagnosis>> {
        Ok(self.diagnoses.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_record(&self, record_id: Uuid) -> StoreResult<Vec<Diagnosis>> {
        let mut matches: Vec<Diagnosis> = self
            .diagnoses
            .iter()
            .filter(|entry| entry.value().record_id == record_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|diagnosis| diagnosis.created_at);
        Ok(matches)
    }

    async fn delete_by_record(&self, record_id: Uuid) -> StoreResult<()> {
        self.diagnoses.retain(|_, diagnosis| diagnosis.record_id != record_id);
        Ok(())
    }

    async fn exists_for_disease(&self, disease_code: &str) -> StoreResult<bool> {
        Ok(self
            .diagnoses
            .iter()
            .any(|entry| entry.value().disease_code == disease_code))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.diagnoses.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDiseaseRepository {
    diseases: DashMap<String, Disease>,
}

impl InMemoryDiseaseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiseaseRepository for InMemoryDiseaseRepository {
    async fn save(&self, disease: &Disease) -> StoreResult<Disease> {
        self.diseases.insert(disease.code.clone(), disease.clone());
        Ok(disease.clone())
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Disease>> {
        Ok(self.diseases.get(code).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Disease>> {
        let mut all: Vec<Disease> =
            self.diseases.iter().map(|entry| entry.value().clone()).collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        self.diseases.remove(code);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMedicineRepository {
    medicines: DashMap<Uuid, Medicine>,
}

impl InMemoryMedicineRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MedicineRepository for InMemoryMedicineRepository {
    async fn save(&self, medicine: &Medicine) -> StoreResult<Medicine> {
        self.medicines.insert(medicine.id, medicine.clone());
        Ok(medicine.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Medicine>> {
        Ok(self.medicines.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Medicine>> {
        let mut all: Vec<Medicine> =
            self.medicines.iter().map(|entry| entry.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.medicines.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPrescriptionRepository {
    prescriptions: DashMap<Uuid, Prescription>,
}

impl InMemoryPrescriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrescriptionRepository for InMemoryPrescriptionRepository {
    async fn save(&self, prescription: &Prescription) -> StoreResult<Prescription> {
        self.prescriptions.insert(prescription.id, prescription.clone());
        Ok(prescription.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Prescription>> {
        Ok(self.prescriptions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_record(&self, record_id: Uuid) -> StoreResult<Vec<Prescription>> {
        let mut matches: Vec<Prescription> = self
            .prescriptions
            .iter()
            .filter(|entry| entry.value().record_id == Some(record_id))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|prescription| prescription.created_at);
        Ok(matches)
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Prescription>> {
        let mut matches: Vec<Prescription> = self
            .prescriptions
            .iter()
            .filter(|entry| entry.value().patient_id == patient_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|prescription| prescription.created_at);
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.prescriptions.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBillRepository {
    bills: DashMap<Uuid, Bill>,
}

impl InMemoryBillRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillRepository for InMemoryBillRepository {
    async fn save(&self, bill: &Bill) -> StoreResult<Bill> {
        self.bills.insert(bill.id, bill.clone());
        Ok(bill.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Bill>> {
        Ok(self.bills.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<Bill>> {
        let mut matches: Vec<Bill> = self
            .bills
            .iter()
            .filter(|entry| entry.value().patient_id == patient_id)
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|bill| bill.bill_date);
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.bills.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserAccountRepository {
    accounts: DashMap<Uuid, UserAccount>,
}

impl InMemoryUserAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccountRepository {
    async fn save(&self, account: &UserAccount) -> StoreResult<UserAccount> {
        self.accounts.insert(account.id, account.clone());
        Ok(account.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserAccount>> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserAccount>> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.accounts.remove(&id);
        Ok(())
    }
}
