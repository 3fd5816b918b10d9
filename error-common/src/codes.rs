// Standardized error codes for the ClinicCore engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const OUT_OF_RANGE: &str = "VALIDATION_1003";
}

pub mod scheduling {
    pub const SLOT_CONFLICT: &str = "SCHED_2001";
    pub const INVALID_TRANSITION: &str = "SCHED_2002";
    pub const OUTSIDE_BUSINESS_HOURS: &str = "SCHED_2003";
}

pub mod records {
    pub const DUPLICATE_RECORD: &str = "RECORD_3001";
    pub const REFERENCED_ENTITY: &str = "RECORD_3002";
}

pub mod store {
    pub const NOT_FOUND: &str = "STORE_4001";
    pub const BACKEND_FAILURE: &str = "STORE_4002";
}

pub mod external {
    pub const NOTIFICATION_FAILED: &str = "EXT_5001";
}
