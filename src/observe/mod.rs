//! Observers invoked by the drivers at fixed checkpoints.
//!
//! The drivers never depend on what an observer does, so a run behaves the
//! same whether it is logged, recorded or silent.

mod log;
mod record;
mod traits;

pub use log::LogObserver;
pub use record::{Event, RecordingObserver};
pub use traits::{GameObserver, NoopObserver, TrialObserver};
