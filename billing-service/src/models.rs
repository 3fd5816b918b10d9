use entity_store::BillItemType;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Request to open a bill for a patient.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBill {
    pub patient_id: Uuid,
    /// Bill raised for a specific visit, if any.
    pub appointment_id: Option<Uuid>,
    pub items: Vec<NewBillItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBillItem {
    pub item_type: BillItemType,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}
