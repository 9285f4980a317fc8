pub mod layout_solver;
pub mod packer;
pub mod search;

/// Result of exploring a subtree of a backtracking search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Solved,
    DeadEnd,
    Halted,
}
