//! Record linker consistency tests: one record per appointment, owned
//! diagnoses, referential delete guards, and appointment independence.

use chrono::{NaiveDate, TimeZone, Utc};
use clinical_records_service::*;
use entity_store::*;
use scheduling_service::{
    BookingRequest, NullNotificationSink, SchedulingConfig, SchedulingService,
};
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    records_service: MedicalRecordService,
    catalog: DiseaseCatalog,
    scheduling: SchedulingService,
    records: Arc<InMemoryMedicalRecordRepository>,
    diagnoses: Arc<InMemoryDiagnosisRepository>,
    prescriptions: Arc<InMemoryPrescriptionRepository>,
    patients: Arc<InMemoryPatientRepository>,
    clock: Arc<FixedClock>,
    patient_id: Uuid,
    doctor_id: Uuid,
}

async fn harness() -> Harness {
    let records = Arc::new(InMemoryMedicalRecordRepository::new());
    let diagnoses = Arc::new(InMemoryDiagnosisRepository::new());
    let prescriptions = Arc::new(InMemoryPrescriptionRepository::new());
    let appointments = Arc::new(InMemoryAppointmentRepository::new());
    let patients = Arc::new(InMemoryPatientRepository::new());
    let doctors = Arc::new(InMemoryDoctorRepository::new());
    let diseases = Arc::new(InMemoryDiseaseRepository::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap(),
    ));
    let ids = Arc::new(UuidSource);

    let patient_id = Uuid::new_v4();
    patients
        .save(&Patient {
            id: patient_id,
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1984, 6, 2).unwrap(),
            gender: Gender::Female,
            phone: None,
            email: None,
            address: None,
            created_at: clock.now(),
            updated_at: clock.now(),
        })
        .await
        .unwrap();

    let doctor_id = Uuid::new_v4();
    doctors
        .save(&Doctor {
            id: doctor_id,
            first_name: "Elena".to_string(),
            last_name: "Petrova".to_string(),
            specialization: "General Medicine".to_string(),
            phone: None,
            email: None,
            created_at: clock.now(),
            updated_at: clock.now(),
        })
        .await
        .unwrap();

    diseases
        .save(&Disease {
            code: "J06.9".to_string(),
            name: "Acute upper respiratory infection".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let records_service = MedicalRecordService::new(
        records.clone(),
        diagnoses.clone(),
        prescriptions.clone(),
        appointments.clone(),
        patients.clone(),
        doctors.clone(),
        diseases.clone(),
        clock.clone(),
        ids.clone(),
    );
    let catalog = DiseaseCatalog::new(diseases.clone(), diagnoses.clone());
    let scheduling = SchedulingService::new(
        appointments,
        patients.clone(),
        doctors,
        Arc::new(NullNotificationSink),
        clock.clone(),
        ids,
        SchedulingConfig::default(),
    );

    Harness {
        records_service,
        catalog,
        scheduling,
        records,
        diagnoses,
        prescriptions,
        patients,
        clock,
        patient_id,
        doctor_id,
    }
}

impl Harness {
    async fn completed_appointment(&self) -> Appointment {
        let booked = self
            .scheduling
            .book(BookingRequest {
                patient_id: self.patient_id,
                doctor_id: self.doctor_id,
                start_time: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
                duration_minutes: 30,
                reason: "persistent cough".to_string(),
                appointment_type: AppointmentType::Consultation,
            })
            .await
            .unwrap();
        self.scheduling.mark_completed(booked.id).await.unwrap()
    }

    fn record_request(&self, appointment_id: Option<Uuid>) -> NewMedicalRecord {
        NewMedicalRecord {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            appointment_id,
            record_date: None,
            notes: "examined, mild inflammation".to_string(),
        }
    }
}

#[tokio::test]
async fn one_record_per_appointment() {
    let h = harness().await;
    let appointment = h.completed_appointment().await;

    let record = h
        .records_service
        .create_medical_record(h.record_request(Some(appointment.id)))
        .await
        .unwrap();
    assert_eq!(record.appointment_id, Some(appointment.id));

    let err = h
        .records_service
        .create_medical_record(h.record_request(Some(appointment.id)))
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicalRecordsError::DuplicateRecord { .. }));
}

#[tokio::test]
async fn walk_in_records_need_no_appointment() {
    let h = harness().await;

    let first = h
        .records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();
    assert!(first.appointment_id.is_none());

    // The one-to-one rule only binds appointment-linked records.
    h.records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();
}

#[tokio::test]
async fn record_must_match_appointment_parties() {
    let h = harness().await;
    let appointment = h.completed_appointment().await;

    // A second, registered patient who was not at the appointment.
    let other_patient = Uuid::new_v4();
    h.patients
        .save(&Patient {
            id: other_patient,
            first_name: "Ben".to_string(),
            last_name: "Okafor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 11, 20).unwrap(),
            gender: Gender::Male,
            phone: None,
            email: None,
            address: None,
            created_at: h.clock.now(),
            updated_at: h.clock.now(),
        })
        .await
        .unwrap();

    let mut mismatched = h.record_request(Some(appointment.id));
    mismatched.patient_id = other_patient;
    let err = h
        .records_service
        .create_medical_record(mismatched)
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicalRecordsError::Validation(_)));

    // The appointment's own parties pass.
    h.records_service
        .create_medical_record(h.record_request(Some(appointment.id)))
        .await
        .unwrap();
}

#[tokio::test]
async fn diagnosis_requires_known_disease_and_touches_record() {
    let h = harness().await;
    let record = h
        .records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();

    let later = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();
    h.clock.set(later);

    let diagnosis = h
        .records_service
        .add_diagnosis(NewDiagnosis {
            record_id: record.id,
            disease_code: "J06.9".to_string(),
            description: "acute URI, likely viral".to_string(),
            diagnosis_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            status: DiagnosisStatus::Suspected,
        })
        .await
        .unwrap();
    assert_eq!(diagnosis.record_id, record.id);

    let touched = h.records.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(touched.updated_at, later);

    let err = h
        .records_service
        .add_diagnosis(NewDiagnosis {
            record_id: record.id,
            disease_code: "Z99.9".to_string(),
            description: "unknown code".to_string(),
            diagnosis_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            status: DiagnosisStatus::Suspected,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicalRecordsError::NotFound { entity: "disease", .. }));
}

#[tokio::test]
async fn deleting_record_cascades_diagnoses() {
    let h = harness().await;
    let record = h
        .records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();
    h.records_service
        .add_diagnosis(NewDiagnosis {
            record_id: record.id,
            disease_code: "J06.9".to_string(),
            description: "acute URI".to_string(),
            diagnosis_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status: DiagnosisStatus::Confirmed,
        })
        .await
        .unwrap();

    h.records_service.delete_medical_record(record.id).await.unwrap();

    assert!(h.records.find_by_id(record.id).await.unwrap().is_none());
    assert!(h.diagnoses.find_by_record(record.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_record_is_blocked_by_prescriptions() {
    let h = harness().await;
    let record = h
        .records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();

    // A prescription referencing the record, created out of band for
    // the guard check.
    let prescription = Prescription {
        id: Uuid::new_v4(),
        patient_id: h.patient_id,
        doctor_id: h.doctor_id,
        record_id: Some(record.id),
        status: PrescriptionStatus::Active,
        notes: None,
        details: vec![PrescriptionDetail {
            id: Uuid::new_v4(),
            medicine_id: Uuid::new_v4(),
            quantity: 1,
            dosage: "1x daily".to_string(),
            instructions: "after meals".to_string(),
            unit_price: "4.20".parse().unwrap(),
        }],
        created_at: h.clock.now(),
        updated_at: h.clock.now(),
    };
    h.prescriptions.save(&prescription).await.unwrap();

    let err = h
        .records_service
        .delete_medical_record(record.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ClinicalRecordsError::ReferencedEntity { .. }));
    assert!(h.records.find_by_id(record.id).await.unwrap().is_some());

    // Once the dependent prescription is gone the delete proceeds.
    h.prescriptions.delete(prescription.id).await.unwrap();
    h.records_service.delete_medical_record(record.id).await.unwrap();
}

#[tokio::test]
async fn disease_delete_guarded_by_diagnoses() {
    let h = harness().await;
    let record = h
        .records_service
        .create_medical_record(h.record_request(None))
        .await
        .unwrap();
    h.records_service
        .add_diagnosis(NewDiagnosis {
            record_id: record.id,
            disease_code: "J06.9".to_string(),
            description: "acute URI".to_string(),
            diagnosis_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status: DiagnosisStatus::Confirmed,
        })
        .await
        .unwrap();

    let err = h.catalog.delete("J06.9").await.unwrap_err();
    assert!(matches!(err, ClinicalRecordsError::ReferencedEntity { .. }));
    assert_eq!(h.catalog.list().await.unwrap().len(), 1);

    h.records_service.delete_medical_record(record.id).await.unwrap();
    h.catalog.delete("J06.9").await.unwrap();
    assert!(matches!(
        h.catalog.find("J06.9").await.unwrap_err(),
        ClinicalRecordsError::NotFound { .. }
    ));
}

#[tokio::test]
async fn deleting_appointment_leaves_record_intact() {
    let h = harness().await;
    let appointment = h.completed_appointment().await;
    let record = h
        .records_service
        .create_medical_record(h.record_request(Some(appointment.id)))
        .await
        .unwrap();

    // Administrative removal of the closed appointment.
    h.scheduling.delete(appointment.id, true).await.unwrap();

    let kept = h.records.find_by_id(record.id).await.unwrap();
    assert!(kept.is_some(), "medical record must survive appointment deletion");
}
