//! Доменная модель круглого стола: участники, стол, стопка выбывших, конфиг матча.

pub mod config;
pub mod participant;
pub mod positions;
pub mod resources;
pub mod roster;
pub mod stack;
pub mod table;

// Базовый идентификатор участника.
pub type ParticipantId = u64;

pub use config::*;
pub use participant::*;
pub use positions::Direction;
pub use resources::*;
pub use roster::*;
pub use stack::*;
pub use table::*;
