//! Move representation, generation, and the apply/undo machinery that
//! operates on a [`crate::board::Position`].

pub mod execute;
pub mod magic;
pub mod movegen;
pub mod perft;
pub mod square_control;
pub mod tables;
pub mod types;

pub use movegen::Generator;
pub use types::Move;
