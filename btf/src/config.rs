use serde::{Deserialize, Serialize};

/// Configuration for the BTF solvers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct BTFConfig {
    /// Maximum number of search nodes a single run may expand before giving up.
    /// If undefined, the search runs until a solution is found or the search space is exhausted
    pub node_limit: Option<u64>,
    /// Whether to compute the geometric layout of every container after a successful packing run
    pub layout: bool,
}

impl Default for BTFConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            layout: true,
        }
    }
}
