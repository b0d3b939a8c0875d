/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable identifier of a node type, e.g. `"LoadImage"`.
pub type TypeId = String;

/// Opaque identifier of a live client session.
pub type SessionId = String;
