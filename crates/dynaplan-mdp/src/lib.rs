mod builder;
mod compiled;
mod error;
mod io;
mod solver;
mod spec;

pub use builder::MdpBuilder;
pub use compiled::CompiledMdp;
pub use error::MdpError;
pub use io::compile_yaml;
pub use solver::MdpSolver;
pub use spec::{ActionSpec, MdpSpec, OutcomeSpec, StateSpec};
