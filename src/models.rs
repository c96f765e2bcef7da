use serde::{Deserialize, Serialize};

/// One tracked job/internship application. Field order matches the
/// on-disk column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: u32,
    pub company: String,
    pub role: String,
    pub date_applied: String,
    pub status: String, // "Applied", "Interview", "Rejected", "Offer" (suggested, not enforced)
    pub notes: String,
}
