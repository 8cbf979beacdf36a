use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Общий флаг кооперативной отмены.
///
/// Цикл ходов проверяет его в начале каждой итерации и после паузы;
/// уже начатое действие всегда доводится до конца.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag {
    inner: Arc<CancelState>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запросить отмену и разбудить всех, кто ждёт в `cancelled()`.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Дождаться отмены. Если она уже запрошена – вернуться сразу.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Регистрируемся до проверки флага, иначе `notify_waiters` можно пропустить.
            notified.as_mut().enable();

            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
