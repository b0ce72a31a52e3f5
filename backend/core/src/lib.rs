pub mod clock;
pub mod error;
pub mod event;
pub mod random;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::GardenError;
pub use event::{TurnEvent, TurnEventKind};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use types::{
    EmotionalState, JourneyEntry, MessageEntry, Session, StateMeta, TransitionInsight,
};
