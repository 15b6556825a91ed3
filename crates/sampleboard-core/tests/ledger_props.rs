//! Property tests over random operation sequences

use proptest::prelude::*;
use sampleboard_core::lifecycle::{allowed_transitions, validate_transition};
use sampleboard_core::prelude::*;
use sampleboard_test_utils::{board_with_pending, sid};

#[derive(Debug, Clone)]
enum Op {
    Assign(usize, usize),
    Transition(usize, RequestStatus),
    Force(usize, RequestStatus),
}

fn status() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::Pending),
        Just(RequestStatus::Assigned),
        Just(RequestStatus::Accepted),
        Just(RequestStatus::Rejected),
        Just(RequestStatus::Contacted),
        Just(RequestStatus::Scheduled),
        Just(RequestStatus::Collected),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6usize, 0..4usize).prop_map(|(r, s)| Op::Assign(r, s)),
        (0..6usize, status()).prop_map(|(r, s)| Op::Transition(r, s)),
        (0..6usize, status()).prop_map(|(r, s)| Op::Force(r, s)),
    ]
}

const SPECIALISTS: [&str; 4] = ["s1", "s2", "s3", "ghost"];

proptest! {
    #[test]
    fn prop_transition_matches_table(from in status(), to in status()) {
        let res = validate_transition(from, to);
        prop_assert_eq!(res.is_ok(), allowed_transitions(from).contains(&to));
    }

    #[test]
    fn prop_ledger_equals_open_slots(ops in prop::collection::vec(op(), 0..80)) {
        let (mut board, ids) = board_with_pending(6);

        for op in ops {
            let before = board.snapshot();
            let result = match op {
                Op::Assign(r, s) => board.assign(ids[r], &sid(SPECIALISTS[s])),
                Op::Transition(r, to) => board.transition(ids[r], to),
                Op::Force(r, to) => board.force_status(ids[r], to),
            };

            if result.is_err() {
                prop_assert_eq!(&board.snapshot(), &before);
            }

            for specialist in board.specialists() {
                prop_assert_eq!(specialist.active_tasks, board.held_slots(&specialist.id));
            }
        }
    }

    #[test]
    fn prop_non_terminal_transitions_keep_counters(
        steps in prop::collection::vec(status(), 1..10)
    ) {
        let (mut board, ids) = board_with_pending(1);
        board.assign(ids[0], &sid("s1")).unwrap();

        for to in steps {
            let before: Vec<u32> = board.specialists().map(|s| s.active_tasks).collect();
            let was_holding = board.slot_holder(ids[0]).is_some();
            if board.transition(ids[0], to).is_ok() {
                let after: Vec<u32> = board.specialists().map(|s| s.active_tasks).collect();
                if to.is_terminal() && was_holding {
                    prop_assert_eq!(after[0] + 1, before[0]);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}
