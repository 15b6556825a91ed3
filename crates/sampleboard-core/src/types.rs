//! Core types for the sample collection board
//!
//! Defines the entity model:
//! - Request and specialist identifiers
//! - Request status and priority vocabulary
//! - Request and specialist records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique request identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Ulid);

impl RequestId {
    /// Generate new request ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Specialist identifier, supplied by the roster
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialistId(pub String);

impl SpecialistId {
    /// Create a specialist ID
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpecialistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpecialistId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Request priority, fixed at creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

/// Lifecycle state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// New request, no specialist yet
    Pending,
    /// Specialist assigned, awaiting their acceptance
    Assigned,
    /// Specialist accepted the job
    Accepted,
    /// Specialist declined; needs reassignment
    Rejected,
    /// Customer has been contacted
    Contacted,
    /// Appointment fixed
    Scheduled,
    /// Sample collected
    Collected,
}

impl RequestStatus {
    /// Every status, in lifecycle order
    pub const ALL: [RequestStatus; 7] = [
        RequestStatus::Pending,
        RequestStatus::Assigned,
        RequestStatus::Accepted,
        RequestStatus::Rejected,
        RequestStatus::Contacted,
        RequestStatus::Scheduled,
        RequestStatus::Collected,
    ];

    /// Terminal statuses release the specialist's workload slot
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Collected)
    }

    /// Statuses in which a strictly transitioned request keeps its slot
    ///
    /// Forced changes can break this; ask [`crate::Board::holds_slot`] for
    /// a specific request.
    #[inline]
    #[must_use]
    pub fn holds_slot(self) -> bool {
        matches!(
            self,
            RequestStatus::Assigned
                | RequestStatus::Accepted
                | RequestStatus::Contacted
                | RequestStatus::Scheduled
        )
    }

    /// Human-readable board label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Pending => "New request",
            RequestStatus::Assigned => "Awaiting acceptance",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Contacted => "Contacted",
            RequestStatus::Scheduled => "Scheduled",
            RequestStatus::Collected => "Collected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Assigned => "ASSIGNED",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Contacted => "CONTACTED",
            RequestStatus::Scheduled => "SCHEDULED",
            RequestStatus::Collected => "COLLECTED",
        };
        f.write_str(s)
    }
}

/// Validated input for a new request
///
/// Produced by the intake surface; the board assumes every text field is
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub sample_type: String,
    #[serde(default)]
    pub priority: Priority,
}

/// A customer's sample-collection job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request ID
    pub id: RequestId,
    /// Customer name
    pub customer_name: String,
    /// Customer phone
    pub phone: String,
    /// Collection address
    pub address: String,
    /// Requested sample type
    pub sample_type: String,
    /// Priority
    pub priority: Priority,
    /// Current lifecycle state
    pub status: RequestStatus,
    /// Last assigned specialist; kept after rejection or collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialist_id: Option<SpecialistId>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Reserved, never populated by board operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    /// Reserved, never populated by board operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reserved, never populated by board operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Request {
    /// Create a pending request from validated input
    #[must_use]
    pub fn from_new(new: NewRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: RequestId::new(),
            customer_name: new.customer_name,
            phone: new.phone,
            address: new.address,
            sample_type: new.sample_type,
            priority: new.priority,
            status: RequestStatus::Pending,
            specialist_id: None,
            created_at,
            appointment_time: None,
            notes: None,
            rejection_reason: None,
        }
    }
}

/// A field worker eligible for assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialist {
    pub id: SpecialistId,
    pub name: String,
    pub phone: String,
    pub specialty: String,
    /// Requests assigned and not yet terminally resolved
    #[serde(default)]
    pub active_tasks: u32,
}

impl Specialist {
    /// Create a specialist with no active tasks
    pub fn new(
        id: impl Into<SpecialistId>,
        name: impl Into<String>,
        phone: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            specialty: specialty.into(),
            active_tasks: 0,
        }
    }

    /// With a preloaded active task count
    #[inline]
    #[must_use]
    pub fn with_active_tasks(mut self, active_tasks: u32) -> Self {
        self.active_tasks = active_tasks;
        self
    }
}
