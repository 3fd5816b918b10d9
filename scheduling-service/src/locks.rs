use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-doctor serialization point for the booking path.
///
/// The conflict read and the subsequent write must be one atomic unit
/// per doctor; holding this lock across both means two concurrent
/// overlapping bookings for the same doctor cannot both pass the check.
/// Different doctors never contend.
#[derive(Default)]
pub struct DoctorScheduleLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl DoctorScheduleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, doctor_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(doctor_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
