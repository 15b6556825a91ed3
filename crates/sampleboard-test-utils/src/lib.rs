//! Testing utilities for the sampleboard workspace
//!
//! Shared fixtures, rosters, and scripted advisory services.

#![allow(missing_docs)]

use async_trait::async_trait;
use sampleboard_core::{
    AdvisoryError, AdvisoryService, Board, BoardSnapshot, IntakeForm, NewRequest, Priority,
    RequestId, Specialist, SpecialistId,
};
use std::time::Duration;

/// Three specialists with no active tasks
pub fn roster() -> Vec<Specialist> {
    vec![
        Specialist::new("s1", "Sara Al-Mansour", "0501234567", "Laboratory tests"),
        Specialist::new("s2", "Mohammed Al-Otaibi", "0507654321", "Sample-collection nursing"),
        Specialist::new("s3", "Hind Al-Qahtani", "0559876543", "Lab technician"),
    ]
}

pub fn sid(id: &str) -> SpecialistId {
    SpecialistId::new(id)
}

pub fn new_request(customer: &str) -> NewRequest {
    IntakeForm::new(customer, "0550001112", "Riyadh - Al Yasmin", "Complete blood count")
        .with_priority(Priority::Medium)
        .validate()
        .unwrap()
}

pub fn setup_test_board() -> Board {
    Board::new(roster())
}

/// Board with `count` pending requests
pub fn board_with_pending(count: usize) -> (Board, Vec<RequestId>) {
    let mut board = setup_test_board();
    let ids = (0..count)
        .map(|i| board.submit(new_request(&format!("customer-{i}"))))
        .collect();
    (board, ids)
}

pub fn active_tasks(board: &Board, id: &str) -> u32 {
    board.ledger().active_tasks(&sid(id)).unwrap()
}

/// Advisory service answering with the snapshot revision after a delay
///
/// Revisions listed in `slow_revisions` take `slow` instead of `fast`.
#[derive(Debug, Clone)]
pub struct ScriptedAdvisor {
    pub fast: Duration,
    pub slow: Duration,
    pub slow_revisions: Vec<u64>,
}

#[async_trait]
impl AdvisoryService for ScriptedAdvisor {
    async fn summarize(&self, snapshot: &BoardSnapshot) -> Result<String, AdvisoryError> {
        let delay = if self.slow_revisions.contains(&snapshot.revision) {
            self.slow
        } else {
            self.fast
        };
        tokio::time::sleep(delay).await;
        Ok(format!("revision {}", snapshot.revision))
    }
}

/// Advisory service that always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAdvisor;

#[async_trait]
impl AdvisoryService for FailingAdvisor {
    async fn summarize(&self, _snapshot: &BoardSnapshot) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Unavailable("collaborator offline".to_string()))
    }
}
