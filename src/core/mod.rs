pub mod checker;

pub use crate::domain::model::{ProbeMode, ProcedureResponse, Readiness};
pub use crate::domain::ports::{Pinger, ReplicationSource};
pub use crate::utils::error::Result;
