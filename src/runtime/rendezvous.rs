use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::engine::Action;

/// Одноразовый слот для ответа на запрос хода.
///
/// Новый слот создаётся на каждый ход. Заполнить его можно один раз:
/// повторный `fulfill` ничего не делает и возвращает `false`.
#[derive(Clone, Debug)]
pub struct ActionSlot {
    sender: Arc<Mutex<Option<oneshot::Sender<Action>>>>,
}

impl ActionSlot {
    /// Слот и приёмник, на котором ждёт цикл ходов.
    pub fn channel() -> (Self, oneshot::Receiver<Action>) {
        let (tx, rx) = oneshot::channel();
        let slot = Self {
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (slot, rx)
    }

    /// Передать действие. `true` – действие доставлено этим вызовом.
    pub fn fulfill(&self, action: Action) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => tx.send(action).is_ok(),
            None => false,
        }
    }

    /// Слот уже заполнен (или цикл перестал ждать).
    pub fn is_resolved(&self) -> bool {
        match self.sender.lock() {
            Ok(guard) => guard.as_ref().map_or(true, |tx| tx.is_closed()),
            Err(poisoned) => poisoned.into_inner().as_ref().map_or(true, |tx| tx.is_closed()),
        }
    }
}
