//! Фоновый исполнитель матча.
//!
//! Симуляция живёт в отдельной tokio-задаче и единолично владеет `GameEngine`.
//! Слой отображения получает только снимки, запросы хода и уведомления,
//! а действие возвращает через одноразовый слот.

pub mod cancel;
pub mod rendezvous;
pub mod timing;
pub mod turn_loop;

pub use cancel::CancelFlag;
pub use rendezvous::ActionSlot;
pub use timing::TurnLoopConfig;
pub use turn_loop::{
    EndReason, MatchResult, Notification, PresenterChannels, RuntimeError, TurnLoop,
    TurnLoopHandle, TurnRequest,
};
