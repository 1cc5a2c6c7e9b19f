/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Bungie item and category hashes are unsigned 32-bit values, stored as
/// PostgreSQL BIGINT.
pub type ItemHash = i64;
