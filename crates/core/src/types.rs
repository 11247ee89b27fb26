/// Backend primary keys are integer ids.
pub type DbId = i64;

/// Timestamps keep the offset the backend reported them with.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
