//! Editor state: world snapshots, undo history, the editing session and
//! settings.

pub mod history;
pub mod session;
pub mod settings;
pub mod world;

pub use history::HistoryStack;
pub use session::{ConfirmReason, EditSession, PointerOutcome, SaveOutcome};
pub use settings::Settings;
pub use world::WorldState;
