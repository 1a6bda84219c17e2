pub mod positions;
pub mod rounds;

pub use positions::{validate_positions, SlotAssignment};
pub use rounds::derive_round_labels;
