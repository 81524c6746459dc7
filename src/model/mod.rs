pub use moran_core::{
    ApproximateMoranProcess, Generation, MoranError, MoranOptions, MoranProcess, MutationMethod,
    UpdateMode,
};
pub use moran_data::{Action, GenerationRecord, PopulationDistribution, RunSummary};
pub mod config {
    pub use moran_core::config::*;
}
pub mod graph {
    pub use moran_core::graph::*;
}
pub mod history {
    pub use moran_core::history::*;
}
pub mod interaction {
    pub use moran_core::interaction::*;
}
pub mod outcome {
    pub use moran_core::outcome::*;
}
pub mod player {
    pub use moran_core::player::*;
}
pub mod random {
    pub use moran_core::random::*;
}
pub mod selection {
    pub use moran_core::moran::selection::*;
}
pub mod persistence {
    pub use moran_io::persistence::*;
}
