use boxfit::io::ext_repr::{ExtInstance, ExtSolution};
use serde::{Deserialize, Serialize};

use crate::config::BTFConfig;
use crate::opt::layout_solver::SolvedLayout;

#[derive(Serialize, Deserialize, Clone)]
pub struct BTFOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    /// Laid out result records, one entry per container
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub layouts: Vec<SolvedLayout>,
    pub config: BTFConfig,
}
