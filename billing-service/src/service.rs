use crate::error::{BillingError, BillingResult};
use crate::models::{NewBill, NewBillItem};
use entity_store::{
    AppointmentRepository, Bill, BillItem, BillItemType, BillRepository, BillStatus, Clock,
    IdSource, MedicineRepository, PatientRepository, PrescriptionRepository,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// The only sanctioned mutation path for bills.
pub struct BillingService {
    bills: Arc<dyn BillRepository>,
    patients: Arc<dyn PatientRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    prescriptions: Arc<dyn PrescriptionRepository>,
    medicines: Arc<dyn MedicineRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl BillingService {
    pub fn new(
        bills: Arc<dyn BillRepository>,
        patients: Arc<dyn PatientRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        prescriptions: Arc<dyn PrescriptionRepository>,
        medicines: Arc<dyn MedicineRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            bills,
            patients,
            appointments,
            prescriptions,
            medicines,
            clock,
            ids,
        }
    }

    /// Open a bill, optionally tied to a visit, with initial items.
    pub async fn create_bill(&self, request: NewBill) -> BillingResult<Bill> {
        if self.patients.find_by_id(request.patient_id).await?.is_none() {
            return Err(BillingError::not_found("patient", request.patient_id));
        }
        if let Some(appointment_id) = request.appointment_id {
            if self.appointments.find_by_id(appointment_id).await?.is_none() {
                return Err(BillingError::not_found("appointment", appointment_id));
            }
        }

        let mut items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            items.push(self.build_item(item)?);
        }

        let now = self.clock.now();
        let bill = Bill {
            id: self.ids.new_id(),
            patient_id: request.patient_id,
            appointment_id: request.appointment_id,
            bill_date: now,
            status: BillStatus::Unpaid,
            items,
            created_at: now,
            updated_at: now,
        };
        let saved = self.bills.save(&bill).await?;
        info!(bill_id = %saved.id, total = %saved.total_amount(), "bill created");
        Ok(saved)
    }

    pub async fn add_item(&self, bill_id: Uuid, item: NewBillItem) -> BillingResult<Bill> {
        let mut bill = self.load(bill_id).await?;
        let built = self.build_item(&item)?;
        bill.items.push(built);
        bill.updated_at = self.clock.now();
        Ok(self.bills.save(&bill).await?)
    }

    /// Generate one medicine line per prescription detail.
    ///
    /// Prices come from each detail's snapshot. Additive only: details
    /// already billed on this bill are skipped, and nothing here is
    /// removed when the prescription later changes or disappears.
    pub async fn add_prescription_charges(
        &self,
        bill_id: Uuid,
        prescription_id: Uuid,
    ) -> BillingResult<Bill> {
        let mut bill = self.load(bill_id).await?;
        let prescription = self
            .prescriptions
            .find_by_id(prescription_id)
            .await?
            .ok_or_else(|| BillingError::not_found("prescription", prescription_id))?;

        if prescription.patient_id != bill.patient_id {
            return Err(BillingError::Validation(
                "prescription belongs to a different patient than the bill".to_string(),
            ));
        }

        let mut added = 0usize;
        for detail in &prescription.details {
            let already_billed = bill
                .items
                .iter()
                .any(|item| item.prescription_detail_id == Some(detail.id));
            if already_billed {
                debug!(detail_id = %detail.id, "prescription detail already billed, skipping");
                continue;
            }

            let description = match self.medicines.find_by_id(detail.medicine_id).await? {
                Some(medicine) => medicine.name,
                None => "Prescribed medicine".to_string(),
            };

            bill.items.push(BillItem {
                id: self.ids.new_id(),
                item_type: BillItemType::Medicine,
                description,
                quantity: detail.quantity,
                unit_price: detail.unit_price,
                prescription_detail_id: Some(detail.id),
            });
            added += 1;
        }

        bill.updated_at = self.clock.now();
        let saved = self.bills.save(&bill).await?;
        info!(
            bill_id = %saved.id,
            %prescription_id,
            added,
            "prescription charges added"
        );
        Ok(saved)
    }

    pub async fn mark_paid(&self, bill_id: Uuid) -> BillingResult<Bill> {
        let mut bill = self.load(bill_id).await?;
        bill.status = BillStatus::Paid;
        bill.updated_at = self.clock.now();
        let saved = self.bills.save(&bill).await?;
        info!(bill_id = %saved.id, total = %saved.total_amount(), "bill settled");
        Ok(saved)
    }

    pub async fn bill(&self, bill_id: Uuid) -> BillingResult<Bill> {
        self.load(bill_id).await
    }

    async fn load(&self, bill_id: Uuid) -> BillingResult<Bill> {
        self.bills
            .find_by_id(bill_id)
            .await?
            .ok_or_else(|| BillingError::not_found("bill", bill_id))
    }

    fn build_item(&self, item: &NewBillItem) -> BillingResult<BillItem> {
        if item.quantity < 1 {
            return Err(BillingError::Validation(
                "bill item quantity must be a positive integer".to_string(),
            ));
        }
        if item.description.trim().is_empty() {
            return Err(BillingError::Validation(
                "bill item description must not be blank".to_string(),
            ));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(BillingError::Validation(
                "bill item unit price must not be negative".to_string(),
            ));
        }

        Ok(BillItem {
            id: self.ids.new_id(),
            item_type: item.item_type,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            prescription_detail_id: None,
        })
    }
}
