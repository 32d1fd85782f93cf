// Snake-draft domain: participants, picks, pick order and derived display state.

pub mod countdown;
pub mod exposure;
pub mod order;
pub mod pick;
pub mod room;
pub mod scroll;
pub mod timeline;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("pick {pick_number} already made ({existing})")]
    PickAlreadyMade { pick_number: u32, existing: String },
}
