pub mod errors;
pub mod events;
pub mod models;
pub mod sequencer;
pub mod state;

pub use errors::*;
pub use events::*;
pub use models::*;
pub use sequencer::FetchSequencer;
pub use state::*;

pub type TaskResult<T> = Result<T, TaskError>;
