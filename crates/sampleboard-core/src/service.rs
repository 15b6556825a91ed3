//! Board service: the board plus advisory refresh after every mutation

use crate::advisory::{Advice, AdvisoryRefresher, AdvisoryService};
use crate::board::Board;
use crate::config::BoardConfig;
use crate::error::{BoardError, ConfigError, IntakeError};
use crate::intake::IntakeForm;
use crate::types::{NewRequest, RequestId, RequestStatus, SpecialistId};
use crate::views::{board_columns, BoardColumn, BoardReport};
use std::sync::Arc;
use tokio::sync::watch;

/// Coordinates board mutations with the advisory collaborator
///
/// Mutations are synchronous and never wait on the advisory call; a
/// failed mutation dispatches nothing.
#[derive(Debug)]
pub struct BoardService {
    board: Board,
    advisory: AdvisoryRefresher,
}

impl BoardService {
    /// Create service from configuration and an advisory collaborator
    ///
    /// # Errors
    /// - `ConfigError::DuplicateSpecialist` if a roster id repeats
    pub fn new(
        config: &BoardConfig,
        advisory: Arc<dyn AdvisoryService>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_board(
            Board::new(config.build_roster()),
            config,
            advisory,
        ))
    }

    /// Wrap an existing board
    pub fn with_board(
        board: Board,
        config: &BoardConfig,
        advisory: Arc<dyn AdvisoryService>,
    ) -> Self {
        Self {
            board,
            advisory: AdvisoryRefresher::new(
                advisory,
                config.initial_advice.clone(),
                config.fallback_advice.clone(),
            ),
        }
    }

    /// Validate an intake form and submit it
    ///
    /// # Errors
    /// - `IntakeError::MissingField` for a blank required field
    pub fn submit_form(&mut self, form: IntakeForm) -> Result<RequestId, IntakeError> {
        let new = form.validate()?;
        Ok(self.submit(new))
    }

    /// Submit a pre-validated request
    pub fn submit(&mut self, new: NewRequest) -> RequestId {
        let id = self.board.submit(new);
        self.refresh();
        id
    }

    /// See [`Board::assign`]
    ///
    /// # Errors
    /// See [`Board::assign`].
    pub fn assign(
        &mut self,
        request_id: RequestId,
        specialist_id: &SpecialistId,
    ) -> Result<(), BoardError> {
        self.board.assign(request_id, specialist_id)?;
        self.refresh();
        Ok(())
    }

    /// See [`Board::transition`]
    ///
    /// # Errors
    /// See [`Board::transition`].
    pub fn transition(
        &mut self,
        request_id: RequestId,
        to: RequestStatus,
    ) -> Result<(), BoardError> {
        self.board.transition(request_id, to)?;
        self.refresh();
        Ok(())
    }

    /// See [`Board::force_status`]
    ///
    /// # Errors
    /// See [`Board::force_status`].
    pub fn force_status(
        &mut self,
        request_id: RequestId,
        to: RequestStatus,
    ) -> Result<(), BoardError> {
        self.board.force_status(request_id, to)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&self) {
        self.advisory.refresh(self.board.snapshot());
    }

    /// Read-only board
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board columns
    #[must_use]
    pub fn columns(&self) -> Vec<BoardColumn> {
        board_columns(&self.board)
    }

    /// Report counters
    #[must_use]
    pub fn report(&self) -> BoardReport {
        BoardReport::from_board(&self.board)
    }

    /// Latest published advice
    #[must_use]
    pub fn advice(&self) -> Advice {
        self.advisory.current()
    }

    /// Watch advice updates
    #[must_use]
    pub fn subscribe_advice(&self) -> watch::Receiver<Advice> {
        self.advisory.subscribe()
    }

    /// Sequence of the latest advisory dispatch
    #[must_use]
    pub fn advice_sequence(&self) -> u64 {
        self.advisory.latest_sequence()
    }
}
