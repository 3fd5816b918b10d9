//! Billing invariants: computed totals, immutable prescription charges.

use billing_service::*;
use chrono::{NaiveDate, TimeZone, Utc};
use clinical_records_service::{NewPrescription, NewPrescriptionDetail, PrescriptionService};
use entity_store::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

struct Harness {
    billing: BillingService,
    reports: BillingReports,
    prescriptions_service: PrescriptionService,
    bills: Arc<InMemoryBillRepository>,
    prescriptions: Arc<InMemoryPrescriptionRepository>,
    medicines: Arc<InMemoryMedicineRepository>,
    patients: Arc<InMemoryPatientRepository>,
    patient_id: Uuid,
    doctor_id: Uuid,
    amoxicillin: Uuid,
}

fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

async fn harness() -> Harness {
    let bills = Arc::new(InMemoryBillRepository::new());
    let patients = Arc::new(InMemoryPatientRepository::new());
    let doctors = Arc::new(InMemoryDoctorRepository::new());
    let appointments = Arc::new(InMemoryAppointmentRepository::new());
    let prescriptions = Arc::new(InMemoryPrescriptionRepository::new());
    let medicines = Arc::new(InMemoryMedicineRepository::new());
    let records = Arc::new(InMemoryMedicalRecordRepository::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
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

    let amoxicillin = Uuid::new_v4();
    medicines
        .save(&Medicine {
            id: amoxicillin,
            name: "Amoxicillin 500mg".to_string(),
            description: None,
            unit: "capsule".to_string(),
            price: dec("15.00"),
            created_at: clock.now(),
            updated_at: clock.now(),
        })
        .await
        .unwrap();

    let billing = BillingService::new(
        bills.clone(),
        patients.clone(),
        appointments.clone(),
        prescriptions.clone(),
        medicines.clone(),
        clock.clone(),
        ids.clone(),
    );
    let reports = BillingReports::new(bills.clone());
    let prescriptions_service = PrescriptionService::new(
        prescriptions.clone(),
        patients.clone(),
        doctors,
        records,
        medicines.clone(),
        clock,
        ids,
    );

    Harness {
        billing,
        reports,
        prescriptions_service,
        bills,
        prescriptions,
        medicines,
        patients,
        patient_id,
        doctor_id,
        amoxicillin,
    }
}

impl Harness {
    fn consultation_item(&self) -> NewBillItem {
        NewBillItem {
            item_type: BillItemType::Consultation,
            description: "General consultation".to_string(),
            quantity: 1,
            unit_price: dec("50.00"),
        }
    }

    async fn active_prescription(&self, quantity: u32) -> Prescription {
        self.prescriptions_service
            .create_prescription(NewPrescription {
                patient_id: self.patient_id,
                doctor_id: self.doctor_id,
                record_id: None,
                notes: None,
                details: vec![NewPrescriptionDetail {
                    medicine_id: self.amoxicillin,
                    quantity,
                    dosage: "1 capsule".to_string(),
                    instructions: "three times daily".to_string(),
                }],
            })
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn bill_total_is_computed_from_items() {
    let h = harness().await;

    let bill = h
        .billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: None,
            items: vec![
                h.consultation_item(),
                NewBillItem {
                    item_type: BillItemType::LabTest,
                    description: "CBC panel".to_string(),
                    quantity: 2,
                    unit_price: dec("12.25"),
                },
            ],
        })
        .await
        .unwrap();

    assert_eq!(bill.status, BillStatus::Unpaid);
    assert_eq!(bill.total_amount(), dec("74.50"));

    // Adding an item moves the computed total with it.
    let bill = h
        .billing
        .add_item(
            bill.id,
            NewBillItem {
                item_type: BillItemType::Other,
                description: "Dressing kit".to_string(),
                quantity: 1,
                unit_price: dec("5.50"),
            },
        )
        .await
        .unwrap();
    assert_eq!(bill.total_amount(), dec("80.00"));
}

#[tokio::test]
async fn invalid_items_are_rejected() {
    let h = harness().await;

    let mut zero_quantity = h.consultation_item();
    zero_quantity.quantity = 0;
    let err = h
        .billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: None,
            items: vec![zero_quantity],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));

    let mut negative = h.consultation_item();
    negative.unit_price = dec("-1.00");
    assert!(matches!(
        h.billing
            .create_bill(NewBill {
                patient_id: h.patient_id,
                appointment_id: None,
                items: vec![negative],
            })
            .await
            .unwrap_err(),
        BillingError::Validation(_)
    ));

    // Nothing persisted for the rejected bills.
    assert!(h.bills.find_by_patient(h.patient_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_patient_or_appointment_is_not_found() {
    let h = harness().await;

    let err = h
        .billing
        .create_bill(NewBill {
            patient_id: Uuid::new_v4(),
            appointment_id: None,
            items: vec![h.consultation_item()],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::NotFound { entity: "patient", .. }));

    let err = h
        .billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: Some(Uuid::new_v4()),
            items: vec![h.consultation_item()],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::NotFound { entity: "appointment", .. }));
}

#[tokio::test]
async fn prescription_charges_use_snapshots_and_survive_everything() {
    let h = harness().await;
    let prescription = h.active_prescription(3).await;

    let bill = h
        .billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: None,
            items: vec![h.consultation_item()],
        })
        .await
        .unwrap();

    let bill = h
        .billing
        .add_prescription_charges(bill.id, prescription.id)
        .await
        .unwrap();

    let medicine_lines: Vec<_> = bill
        .items
        .iter()
        .filter(|item| item.item_type == BillItemType::Medicine)
        .collect();
    assert_eq!(medicine_lines.len(), 1);
    assert_eq!(medicine_lines[0].description, "Amoxicillin 500mg");
    assert_eq!(medicine_lines[0].line_total(), dec("45.00"));
    assert_eq!(
        medicine_lines[0].prescription_detail_id,
        Some(prescription.details[0].id)
    );
    assert_eq!(bill.total_amount(), dec("95.00"));

    // Re-running the generation adds nothing.
    let bill = h
        .billing
        .add_prescription_charges(bill.id, prescription.id)
        .await
        .unwrap();
    assert_eq!(bill.items.len(), 2);

    // Repricing the medicine and deleting the prescription leave the
    // billed history untouched.
    let mut medicine = h.medicines.find_by_id(h.amoxicillin).await.unwrap().unwrap();
    medicine.price = dec("99.99");
    h.medicines.save(&medicine).await.unwrap();
    h.prescriptions.delete(prescription.id).await.unwrap();

    let stored = h.billing.bill(bill.id).await.unwrap();
    assert_eq!(stored.total_amount(), dec("95.00"));
    assert_eq!(stored.items.len(), 2);
}

#[tokio::test]
async fn prescription_for_another_patient_is_rejected() {
    let h = harness().await;
    let prescription = h.active_prescription(1).await;

    let stranger = Uuid::new_v4();
    h.patients
        .save(&Patient {
            id: stranger,
            first_name: "Ben".to_string(),
            last_name: "Okafor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 11, 20).unwrap(),
            gender: Gender::Male,
            phone: None,
            email: None,
            address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();

    let bill = h
        .billing
        .create_bill(NewBill {
            patient_id: stranger,
            appointment_id: None,
            items: vec![h.consultation_item()],
        })
        .await
        .unwrap();

    let err = h
        .billing
        .add_prescription_charges(bill.id, prescription.id)
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[tokio::test]
async fn outstanding_balance_counts_only_unpaid_bills() {
    let h = harness().await;

    let first = h
        .billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: None,
            items: vec![h.consultation_item()],
        })
        .await
        .unwrap();
    h.billing
        .create_bill(NewBill {
            patient_id: h.patient_id,
            appointment_id: None,
            items: vec![NewBillItem {
                item_type: BillItemType::Procedure,
                description: "Wound care".to_string(),
                quantity: 1,
                unit_price: dec("30.00"),
            }],
        })
        .await
        .unwrap();

    assert_eq!(h.reports.outstanding_balance(h.patient_id).await.unwrap(), dec("80.00"));

    h.billing.mark_paid(first.id).await.unwrap();
    assert_eq!(h.reports.outstanding_balance(h.patient_id).await.unwrap(), dec("30.00"));
    assert_eq!(h.reports.billed_total(h.patient_id).await.unwrap(), dec("80.00"));
}
