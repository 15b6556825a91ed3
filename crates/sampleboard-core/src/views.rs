//! Read-only board views: columns and report counters

use crate::board::Board;
use crate::types::{RequestId, RequestStatus, SpecialistId};
use serde::{Deserialize, Serialize};

/// Board column layout: title and the statuses it collects
pub const COLUMNS: [(&str, &[RequestStatus]); 5] = [
    ("New request", &[RequestStatus::Pending]),
    ("Awaiting acceptance", &[RequestStatus::Assigned]),
    (
        "Accepted / Contacted",
        &[RequestStatus::Accepted, RequestStatus::Contacted],
    ),
    (
        "Scheduled / Collected",
        &[RequestStatus::Scheduled, RequestStatus::Collected],
    ),
    ("Rejected", &[RequestStatus::Rejected]),
];

/// One board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    pub title: String,
    pub statuses: Vec<RequestStatus>,
    pub requests: Vec<RequestId>,
}

impl BoardColumn {
    /// Number of requests in the column
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.requests.len()
    }
}

/// Group requests into board columns, keeping submission order
#[must_use]
pub fn board_columns(board: &Board) -> Vec<BoardColumn> {
    COLUMNS
        .iter()
        .map(|(title, statuses)| BoardColumn {
            title: (*title).to_string(),
            statuses: statuses.to_vec(),
            requests: board
                .requests()
                .filter(|r| statuses.contains(&r.status))
                .map(|r| r.id)
                .collect(),
        })
        .collect()
}

/// Workload entry in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadEntry {
    pub specialist_id: SpecialistId,
    pub name: String,
    pub active_tasks: u32,
}

/// Summary counters for the reports view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardReport {
    pub total_requests: usize,
    pub pending: usize,
    pub collected: usize,
    pub rejected: usize,
    pub workload: Vec<WorkloadEntry>,
}

impl BoardReport {
    /// Compute counters from the current board
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let count = |status: RequestStatus| board.requests().filter(|r| r.status == status).count();
        Self {
            total_requests: board.len(),
            pending: count(RequestStatus::Pending),
            collected: count(RequestStatus::Collected),
            rejected: count(RequestStatus::Rejected),
            workload: board
                .specialists()
                .map(|s| WorkloadEntry {
                    specialist_id: s.id.clone(),
                    name: s.name.clone(),
                    active_tasks: s.active_tasks,
                })
                .collect(),
        }
    }

    /// Plain-text rendering for terminals
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Board Report ===\n\n");
        report.push_str(&format!("Total Requests: {}\n", self.total_requests));
        report.push_str(&format!("Pending: {}\n", self.pending));
        report.push_str(&format!("Collected: {}\n", self.collected));
        report.push_str(&format!("Rejected: {}\n", self.rejected));
        report.push_str("\n=== Workload ===\n");
        for entry in &self.workload {
            report.push_str(&format!(
                "{} ({}): {}\n",
                entry.name, entry.specialist_id, entry.active_tasks
            ));
        }
        report
    }
}
