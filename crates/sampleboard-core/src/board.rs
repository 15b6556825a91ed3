//! The board: single owner of requests and the workload ledger
//!
//! Every mutation is one `&mut self` call that reads the request, decides,
//! and applies both the request change and the ledger change before
//! returning. Failed calls leave the board untouched.

use crate::error::{BoardError, LifecycleError};
use crate::ledger::WorkloadLedger;
use crate::lifecycle;
use crate::types::{NewRequest, Request, RequestId, RequestStatus, Specialist, SpecialistId};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cloned view of the board, handed to the advisory collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board revision the snapshot was taken at
    pub revision: u64,
    /// Requests in submission order
    pub requests: Vec<Request>,
    /// Specialists in roster order
    pub specialists: Vec<Specialist>,
}

/// In-memory request board
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Requests in submission order
    requests: IndexMap<RequestId, Request>,
    /// Specialist roster and workload counters
    ledger: WorkloadLedger,
    /// Specialist each slot-holding request was counted against
    slots: HashMap<RequestId, SpecialistId>,
    /// Bumped on every successful mutation
    revision: u64,
}

impl Board {
    /// Create an empty board over a preloaded roster
    #[must_use]
    pub fn new(roster: impl IntoIterator<Item = Specialist>) -> Self {
        Self {
            requests: IndexMap::new(),
            ledger: WorkloadLedger::new(roster),
            slots: HashMap::new(),
            revision: 0,
        }
    }

    /// Create a new pending request
    pub fn submit(&mut self, new: NewRequest) -> RequestId {
        let request = Request::from_new(new, Utc::now());
        let id = request.id;
        tracing::info!(request = %id, priority = %request.priority, "request submitted");
        self.requests.insert(id, request);
        self.bump();
        id
    }

    /// Hand a pending or rejected request to a specialist
    ///
    /// The specialist's load is not checked; any roster member may take
    /// any number of requests.
    ///
    /// # Errors
    /// - `BoardError::RequestNotFound` for an unknown request
    /// - `LifecycleError::IllegalTransition` unless the request is
    ///   `PENDING` or `REJECTED`
    /// - `BoardError::SpecialistNotFound` for an unknown specialist
    pub fn assign(
        &mut self,
        request_id: RequestId,
        specialist_id: &SpecialistId,
    ) -> Result<(), BoardError> {
        let request = self
            .requests
            .get(&request_id)
            .ok_or(BoardError::RequestNotFound(request_id))?;
        if !lifecycle::can_assign(request.status) {
            return Err(LifecycleError::IllegalTransition {
                from: request.status,
                to: RequestStatus::Assigned,
            }
            .into());
        }
        if !self.ledger.contains(specialist_id) {
            return Err(BoardError::SpecialistNotFound(specialist_id.clone()));
        }

        // Only reachable after a forced status change left a slot behind.
        if let Some(stale) = self.slots.remove(&request_id) {
            self.ledger.release(&stale);
        }
        self.ledger.acquire(specialist_id)?;
        self.slots.insert(request_id, specialist_id.clone());

        if let Some(request) = self.requests.get_mut(&request_id) {
            request.status = RequestStatus::Assigned;
            request.specialist_id = Some(specialist_id.clone());
        }
        tracing::info!(request = %request_id, specialist = %specialist_id, "request assigned");
        self.bump();
        Ok(())
    }

    /// Apply a transition from the lifecycle table
    ///
    /// Moving into `REJECTED` or `COLLECTED` releases the slot held on the
    /// specialist the request was counted against.
    ///
    /// # Errors
    /// - `BoardError::RequestNotFound` for an unknown request
    /// - `LifecycleError::IllegalTransition` for a transition outside the table
    pub fn transition(
        &mut self,
        request_id: RequestId,
        to: RequestStatus,
    ) -> Result<(), BoardError> {
        let from = self
            .requests
            .get(&request_id)
            .ok_or(BoardError::RequestNotFound(request_id))?
            .status;
        lifecycle::validate_transition(from, to)?;
        self.apply_status(request_id, from, to);
        Ok(())
    }

    /// `ASSIGNED -> ACCEPTED`
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn accept(&mut self, request_id: RequestId) -> Result<(), BoardError> {
        self.transition(request_id, RequestStatus::Accepted)
    }

    /// `ASSIGNED -> REJECTED`, releasing the specialist's slot
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn reject(&mut self, request_id: RequestId) -> Result<(), BoardError> {
        self.transition(request_id, RequestStatus::Rejected)
    }

    /// `ACCEPTED -> CONTACTED`
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn mark_contacted(&mut self, request_id: RequestId) -> Result<(), BoardError> {
        self.transition(request_id, RequestStatus::Contacted)
    }

    /// `CONTACTED -> SCHEDULED`
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn schedule(&mut self, request_id: RequestId) -> Result<(), BoardError> {
        self.transition(request_id, RequestStatus::Scheduled)
    }

    /// `SCHEDULED -> COLLECTED`, releasing the specialist's slot
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn collect(&mut self, request_id: RequestId) -> Result<(), BoardError> {
        self.transition(request_id, RequestStatus::Collected)
    }

    /// Admin override: set any status regardless of the lifecycle table
    ///
    /// Counters change only when `to` is `REJECTED` or `COLLECTED` and the
    /// request still holds a slot; repeating a terminal status is a no-op
    /// for the ledger.
    ///
    /// # Errors
    /// - `BoardError::RequestNotFound` for an unknown request
    /// - `LifecycleError::MissingSpecialist` when forcing `ASSIGNED` onto a
    ///   request that never had a specialist
    pub fn force_status(
        &mut self,
        request_id: RequestId,
        to: RequestStatus,
    ) -> Result<(), BoardError> {
        let request = self
            .requests
            .get(&request_id)
            .ok_or(BoardError::RequestNotFound(request_id))?;
        if to == RequestStatus::Assigned && request.specialist_id.is_none() {
            return Err(LifecycleError::MissingSpecialist(to).into());
        }
        let from = request.status;
        tracing::warn!(request = %request_id, %from, %to, "status forced");
        self.apply_status(request_id, from, to);
        Ok(())
    }

    fn apply_status(&mut self, request_id: RequestId, from: RequestStatus, to: RequestStatus) {
        if to.is_terminal() {
            if let Some(holder) = self.slots.remove(&request_id) {
                self.ledger.release(&holder);
            }
        }
        if let Some(request) = self.requests.get_mut(&request_id) {
            request.status = to;
        }
        if to.is_terminal() {
            tracing::info!(request = %request_id, %from, %to, "request resolved");
        } else {
            tracing::debug!(request = %request_id, %from, %to, "request transitioned");
        }
        self.bump();
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Look up a request
    #[inline]
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&Request> {
        self.requests.get(&id)
    }

    /// Requests in submission order
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.requests.values()
    }

    /// Look up a specialist
    #[inline]
    #[must_use]
    pub fn specialist(&self, id: &SpecialistId) -> Option<&Specialist> {
        self.ledger.get(id)
    }

    /// Specialists in roster order
    pub fn specialists(&self) -> impl Iterator<Item = &Specialist> {
        self.ledger.specialists()
    }

    /// Specialist last attached to a request, for card display
    #[must_use]
    pub fn specialist_for(&self, request_id: RequestId) -> Option<&Specialist> {
        self.requests
            .get(&request_id)
            .and_then(|r| r.specialist_id.as_ref())
            .and_then(|id| self.ledger.get(id))
    }

    /// Specialist a request's open slot is counted against
    #[inline]
    #[must_use]
    pub fn slot_holder(&self, request_id: RequestId) -> Option<&SpecialistId> {
        self.slots.get(&request_id)
    }

    /// Whether a request currently holds a slot on any specialist
    #[inline]
    #[must_use]
    pub fn holds_slot(&self, request_id: RequestId) -> bool {
        self.slots.contains_key(&request_id)
    }

    /// Open slots counted against a specialist
    #[must_use]
    pub fn held_slots(&self, specialist_id: &SpecialistId) -> u32 {
        let held = self.slots.values().filter(|s| *s == specialist_id).count();
        u32::try_from(held).unwrap_or(u32::MAX)
    }

    /// Workload ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &WorkloadLedger {
        &self.ledger
    }

    /// Number of requests
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no request was submitted yet
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Mutation counter
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Clone the current state
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            revision: self.revision,
            requests: self.requests.values().cloned().collect(),
            specialists: self.ledger.specialists().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn new_request(name: &str) -> NewRequest {
        NewRequest {
            customer_name: name.to_string(),
            phone: "0550000000".to_string(),
            address: "Riyadh".to_string(),
            sample_type: "CBC".to_string(),
            priority: Priority::Medium,
        }
    }

    fn board() -> Board {
        Board::new(vec![
            Specialist::new("s1", "Sara", "0501", "Lab"),
            Specialist::new("s2", "Mohammed", "0502", "Nursing"),
        ])
    }

    fn tasks(board: &Board, id: &str) -> u32 {
        board.ledger().active_tasks(&SpecialistId::new(id)).unwrap()
    }

    #[test]
    fn submit_creates_pending_request() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        let req = board.request(id).unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.customer_name, "Fahad");
        assert_eq!(board.len(), 1);
        assert_eq!(board.revision(), 1);
    }

    #[test]
    fn assign_sets_specialist_and_counts() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();

        let req = board.request(id).unwrap();
        assert_eq!(req.status, RequestStatus::Assigned);
        assert_eq!(req.specialist_id, Some(SpecialistId::new("s1")));
        assert_eq!(tasks(&board, "s1"), 1);
        assert_eq!(tasks(&board, "s2"), 0);
        assert_eq!(board.slot_holder(id), Some(&SpecialistId::new("s1")));
        assert_eq!(board.specialist_for(id).unwrap().name, "Sara");
    }

    #[test]
    fn assign_unknown_request_fails_without_mutation() {
        let mut board = board();
        let before = board.revision();
        let err = board.assign(RequestId::new(), &"s1".into()).unwrap_err();
        assert!(matches!(err, BoardError::RequestNotFound(_)));
        assert_eq!(board.revision(), before);
        assert_eq!(tasks(&board, "s1"), 0);
    }

    #[test]
    fn assign_unknown_specialist_fails_without_mutation() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        let err = board.assign(id, &"ghost".into()).unwrap_err();
        assert!(matches!(err, BoardError::SpecialistNotFound(_)));
        assert_eq!(board.request(id).unwrap().status, RequestStatus::Pending);
        assert_eq!(board.slot_holder(id), None);
    }

    #[test]
    fn assign_twice_is_illegal() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        let err = board.assign(id, &"s2".into()).unwrap_err();
        assert!(err.is_illegal_transition());
        assert_eq!(tasks(&board, "s1"), 1);
        assert_eq!(tasks(&board, "s2"), 0);
    }

    #[test]
    fn no_admission_control() {
        let mut board = board();
        for i in 0..25 {
            let id = board.submit(new_request(&format!("c{i}")));
            board.assign(id, &"s1".into()).unwrap();
        }
        assert_eq!(tasks(&board, "s1"), 25);
    }

    #[test]
    fn accept_then_reject_is_illegal_strictly() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        board.accept(id).unwrap();
        assert!(board.reject(id).unwrap_err().is_illegal_transition());
        assert_eq!(tasks(&board, "s1"), 1);
    }

    #[test]
    fn reject_releases_and_keeps_specialist_reference() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        board.reject(id).unwrap();

        let req = board.request(id).unwrap();
        assert_eq!(req.status, RequestStatus::Rejected);
        assert_eq!(req.specialist_id, Some(SpecialistId::new("s1")));
        assert_eq!(tasks(&board, "s1"), 0);
        assert_eq!(board.slot_holder(id), None);
    }

    #[test]
    fn strict_terminal_twice_is_rejected() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        board.reject(id).unwrap();
        assert!(board.reject(id).is_err());
        assert_eq!(tasks(&board, "s1"), 0);
    }

    #[test]
    fn force_collected_twice_decrements_once() {
        let mut board = Board::new(vec![
            Specialist::new("s1", "Sara", "0501", "Lab").with_active_tasks(3),
        ]);
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        assert_eq!(tasks(&board, "s1"), 4);

        board.force_status(id, RequestStatus::Collected).unwrap();
        board.force_status(id, RequestStatus::Collected).unwrap();
        assert_eq!(tasks(&board, "s1"), 3);
        assert_eq!(board.request(id).unwrap().status, RequestStatus::Collected);
    }

    #[test]
    fn force_skips_table_but_keeps_counters_for_non_terminal() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        board.force_status(id, RequestStatus::Scheduled).unwrap();
        assert_eq!(tasks(&board, "s1"), 1);
        board.force_status(id, RequestStatus::Rejected).unwrap();
        assert_eq!(tasks(&board, "s1"), 0);
    }

    #[test]
    fn force_on_unassigned_request_never_touches_ledger() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.force_status(id, RequestStatus::Collected).unwrap();
        assert_eq!(tasks(&board, "s1"), 0);
        assert_eq!(tasks(&board, "s2"), 0);
    }

    #[test]
    fn force_assigned_needs_specialist() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        let err = board.force_status(id, RequestStatus::Assigned).unwrap_err();
        assert_eq!(
            err,
            BoardError::Lifecycle(LifecycleError::MissingSpecialist(RequestStatus::Assigned))
        );
    }

    #[test]
    fn reassign_after_forced_pending_moves_the_slot() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        board.force_status(id, RequestStatus::Pending).unwrap();
        assert_eq!(tasks(&board, "s1"), 1);

        board.assign(id, &"s2".into()).unwrap();
        assert_eq!(tasks(&board, "s1"), 0);
        assert_eq!(tasks(&board, "s2"), 1);
        assert_eq!(board.held_slots(&"s2".into()), 1);
    }

    #[test]
    fn forced_assigned_after_reject_holds_no_slot() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s1".into()).unwrap();
        assert!(board.holds_slot(id));
        board.reject(id).unwrap();

        board.force_status(id, RequestStatus::Assigned).unwrap();
        assert_eq!(board.request(id).unwrap().status, RequestStatus::Assigned);
        assert!(!board.holds_slot(id));
        assert_eq!(board.slot_holder(id), None);
        assert_eq!(tasks(&board, "s1"), 0);

        // A later resolution must not release a slot that was never re-acquired.
        board.force_status(id, RequestStatus::Collected).unwrap();
        assert_eq!(tasks(&board, "s1"), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut board = board();
        let id = board.submit(new_request("Fahad"));
        board.assign(id, &"s2".into()).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap.revision, 2);
        assert_eq!(snap.requests.len(), 1);
        assert_eq!(snap.specialists[1].active_tasks, 1);
    }
}
