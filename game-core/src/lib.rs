pub mod drawing;
pub mod game_events;
pub mod game_state;
pub mod scoring;
pub mod settings;
pub mod timer;
pub mod word_validation;

// Re-export main components
pub use drawing::*;
pub use game_events::*;
pub use game_state::*;
pub use scoring::*;
pub use settings::*;
pub use timer::*;
pub use word_validation::*;
