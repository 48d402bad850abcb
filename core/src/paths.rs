//! Well-known collection names and singleton document ids.

/// Collection holding the singleton configuration documents.
pub const CONFIG_COLLECTION: &str = "config";

/// Singleton doc: the months 1–6 skill catalog (`months` field).
pub const MONTHLY_CATALOG_DOC: &str = "monthly_skills";

/// Singleton doc: the owner allow-list (`owners` field).
pub const ROLES_DOC: &str = "roles";

/// Singleton doc: the driver task catalog (`items` field).
pub const DRIVER_TASKS_DOC: &str = "driver_tasks";

/// Singleton doc: department reference information.
pub const DEPARTMENT_DOC: &str = "department";

/// Append-only monthly skill evaluation records.
pub const MONTHLY_SIGNOFFS_COLLECTION: &str = "monthly_skills_signoffs";

/// Append-only driver check-off records.
pub const DRIVER_SIGNOFFS_COLLECTION: &str = "driver_signoffs";

/// Roster of department members.
pub const ROSTER_COLLECTION: &str = "users";
