pub mod narrator;
pub mod responder;

pub use narrator::{Narration, Narrator};
pub use responder::ResponseSelector;
