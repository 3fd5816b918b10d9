use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Practicing doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

/// Appointment lifecycle state
///
/// `Scheduled` is the only mutable state; the other three are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Checkup,
    Emergency,
    Procedure,
}

/// Booked appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub reason: String,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(self.duration_minutes)
    }

    /// Half-open intersection with `[start, end)`.
    ///
    /// Back-to-back windows share an instant and do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time()
    }
}

/// Documentation of a visit
///
/// `appointment_id` is a back-reference, not ownership: walk-ins have
/// none, and deleting an appointment never deletes its record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub record_date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog disease, keyed by code (ICD-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disease {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStatus {
    Suspected,
    Confirmed,
    Resolved,
}

/// Diagnosis attached to a medical record
///
/// Owned by its record: deleting the record removes its diagnoses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub record_id: Uuid,
    pub disease_code: String,
    pub description: String,
    pub diagnosis_date: NaiveDate,
    pub status: DiagnosisStatus,
    pub created_at: DateTime<Utc>,
}

/// Dispensable medicine with its current list price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionStatus {
    Active,
    Dispensed,
    Cancelled,
}

/// Prescription aggregate
///
/// Details are part of the aggregate, so a prescription and its lines
/// are written in one store operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub record_id: Option<Uuid>,
    pub status: PrescriptionStatus,
    pub notes: Option<String>,
    pub details: Vec<PrescriptionDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One prescribed medicine line
///
/// `unit_price` is copied from the medicine at creation time and never
/// recomputed — later price changes do not alter history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionDetail {
    pub id: Uuid,
    pub medicine_id: Uuid,
    pub quantity: u32,
    pub dosage: String,
    pub instructions: String,
    pub unit_price: Decimal,
}

impl PrescriptionDetail {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillItemType {
    Consultation,
    Medicine,
    LabTest,
    Procedure,
    Other,
}

/// Bill aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub bill_date: DateTime<Utc>,
    pub status: BillStatus,
    pub items: Vec<BillItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Sum of the items' line totals, computed at read time.
    ///
    /// Never stored, so it cannot drift from the items.
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(BillItem::line_total).sum()
    }
}

/// One billed line
///
/// `prescription_detail_id` is a weak traceability reference for
/// medicine charges; billing history survives prescription deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillItem {
    pub id: Uuid,
    pub item_type: BillItemType,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub prescription_detail_id: Option<Uuid>,
}

impl BillItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Doctor,
    Receptionist,
}

/// Login account, stored only — authentication lives outside the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
