use crate::error::BillingResult;
use entity_store::{BillRepository, BillStatus};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Read-side summaries over billing data.
pub struct BillingReports {
    bills: Arc<dyn BillRepository>,
}

impl BillingReports {
    pub fn new(bills: Arc<dyn BillRepository>) -> Self {
        Self { bills }
    }

    /// What the patient still owes: the sum of unpaid bill totals,
    /// recomputed from line items on every call.
    pub async fn outstanding_balance(&self, patient_id: Uuid) -> BillingResult<Decimal> {
        let bills = self.bills.find_by_patient(patient_id).await?;
        Ok(bills
            .iter()
            .filter(|bill| bill.status == BillStatus::Unpaid)
            .map(|bill| bill.total_amount())
            .sum())
    }

    /// Everything billed to the patient so far, paid or not.
    pub async fn billed_total(&self, patient_id: Uuid) -> BillingResult<Decimal> {
        let bills = self.bills.find_by_patient(patient_id).await?;
        Ok(bills.iter().map(|bill| bill.total_amount()).sum())
    }
}
