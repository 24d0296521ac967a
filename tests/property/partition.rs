//! Property-based tests for the snapshot partition invariant.
//!
//! Uses proptest to verify that for any snapshot S:
//! 1. `upcoming(S)` and `completed(S)` together cover S exactly once.
//! 2. No task appears in both views.
//! 3. Each view preserves the relative order of the snapshot.

use proptest::prelude::*;

use taskdeck::tasks::TaskList;
use taskdeck_proto::task::{Task, TaskId};

// --- Arbitrary implementations for snapshot contents ---

/// Strategy for generating arbitrary snapshots with sequential ids.
///
/// Ids are assigned in snapshot order, so id order doubles as a witness
/// for relative-order preservation in the derived views.
fn arb_snapshot() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-zA-Z0-9 ]{0,24}", any::<bool>()), 0..64).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, done))| {
                Task::new(TaskId::from_raw(u64::try_from(i).unwrap_or(u64::MAX)), name, done)
            })
            .collect()
    })
}

/// Extracts the raw id sequence from a view.
fn ids(view: &[&Task]) -> Vec<u64> {
    view.iter().map(|t| t.id.as_u64()).collect()
}

proptest! {
    #[test]
    fn views_partition_the_snapshot(tasks in arb_snapshot()) {
        let list = TaskList::from_tasks(tasks.clone());
        let upcoming = list.upcoming();
        let completed = list.completed();

        // Together the views cover the snapshot exactly once.
        prop_assert_eq!(upcoming.len() + completed.len(), tasks.len());

        // No task crosses over: membership follows the done flag.
        for task in &upcoming {
            prop_assert!(!task.done);
        }
        for task in &completed {
            prop_assert!(task.done);
        }
        prop_assert_eq!(upcoming.len(), tasks.iter().filter(|t| !t.done).count());
    }

    #[test]
    fn views_preserve_relative_order(tasks in arb_snapshot()) {
        let list = TaskList::from_tasks(tasks);

        // Ids were assigned in snapshot order, so each view's id sequence
        // must be strictly increasing.
        for view in [list.upcoming(), list.completed()] {
            let sequence = ids(&view);
            for pair in sequence.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn replace_is_wholesale(before in arb_snapshot(), after in arb_snapshot()) {
        let mut list = TaskList::from_tasks(before);
        list.replace(after.clone());
        prop_assert_eq!(list.all(), after.as_slice());
    }
}
