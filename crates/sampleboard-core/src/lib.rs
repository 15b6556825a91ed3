//! Sampleboard Core - request lifecycle and specialist workload accounting
//!
//! Tracks home sample-collection requests from submission to collection:
//! - Validates intake forms into pending requests
//! - Enforces the request state machine
//! - Keeps each specialist's active task count in lockstep with assignment and closure
//! - Refreshes best-effort workload advice after every mutation
//!
//! # Example
//!
//! ```rust
//! use sampleboard_core::{Board, IntakeForm, RequestStatus, Specialist, SpecialistId};
//!
//! let mut board = Board::new(vec![Specialist::new("s1", "Sara", "0501234567", "Lab")]);
//! let form = IntakeForm::new("Fahad", "0550001112", "Riyadh", "Blood panel");
//! let id = board.submit(form.validate().unwrap());
//!
//! let s1 = SpecialistId::new("s1");
//! board.assign(id, &s1).unwrap();
//! board.accept(id).unwrap();
//! assert_eq!(board.ledger().active_tasks(&s1), Some(1));
//!
//! board.reject(id).unwrap_err();
//! assert_eq!(board.request(id).unwrap().status, RequestStatus::Accepted);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod advisory;
pub mod board;
pub mod config;
pub mod error;
pub mod intake;
pub mod ledger;
pub mod lifecycle;
pub mod service;
pub mod types;
pub mod views;

// Re-exports for convenience
pub use advisory::{Advice, AdvisoryRefresher, AdvisoryService, DigestAdvisor, WorkloadDigest};
pub use board::{Board, BoardSnapshot};
pub use config::{BoardConfig, SpecialistConfig};
pub use error::{AdvisoryError, BoardError, ConfigError, IntakeError, LifecycleError};
pub use intake::IntakeForm;
pub use ledger::WorkloadLedger;
pub use service::BoardService;
pub use types::{NewRequest, Priority, Request, RequestId, RequestStatus, Specialist, SpecialistId};
pub use views::{board_columns, BoardColumn, BoardReport, WorkloadEntry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the board
    pub use crate::{
        Board, BoardConfig, BoardError, BoardService, IntakeForm, Priority, RequestId,
        RequestStatus, Specialist, SpecialistId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
