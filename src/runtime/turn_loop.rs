use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{build_snapshot, ErrorReport, MatchSnapshot};
use crate::domain::ParticipantId;
use crate::engine::{Action, EngineError, GameEngine, MatchEvent, MatchHistory};
use crate::runtime::cancel::CancelFlag;
use crate::runtime::rendezvous::ActionSlot;
use crate::runtime::timing::TurnLoopConfig;

/// Запрос хода для слоя отображения. Один на ход, без очереди.
#[derive(Debug)]
pub struct TurnRequest {
    pub turn_number: u32,
    pub actor: Option<ParticipantId>,
    pub legal_actions: Vec<Action>,
    pub snapshot: MatchSnapshot,
    pub slot: ActionSlot,
}

impl TurnRequest {
    /// Ответить на запрос. Повторный ответ ничего не делает.
    pub fn respond(&self, action: Action) -> bool {
        self.slot.fulfill(action)
    }
}

/// Уведомление для слоя отображения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Notification {
    /// Событие из истории матча (устранение, спасение, кража, победа и т.д.).
    Event(MatchEvent),
    /// Ошибка, о которой надо сказать пользователю.
    Error(ErrorReport),
}

/// Почему цикл остановился.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EndReason {
    Victory,
    Cancelled,
}

/// Итог работы цикла.
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub reason: EndReason,
    pub winner: Option<ParticipantId>,
    pub turns_played: u32,
    pub final_snapshot: MatchSnapshot,
    pub history: MatchHistory,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("turn loop task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Всё, что получает слой отображения.
#[derive(Debug)]
pub struct PresenterChannels {
    pub requests: mpsc::Receiver<TurnRequest>,
    pub snapshots: watch::Receiver<MatchSnapshot>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

/// Управление запущенным циклом.
#[derive(Debug)]
pub struct TurnLoopHandle {
    cancel: CancelFlag,
    task: JoinHandle<MatchResult>,
}

impl TurnLoopHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Дождаться конца матча.
    pub async fn join(self) -> Result<MatchResult, RuntimeError> {
        Ok(self.task.await?)
    }

    /// Отменить и дождаться остановки.
    pub async fn shutdown(self) -> Result<MatchResult, RuntimeError> {
        self.cancel.cancel();
        self.join().await
    }
}

/// Чем закончилось ожидание действия.
enum Choice {
    Chosen(Action),
    InputFailed(String),
    Cancelled,
}

/// Цикл ходов: спрашивает действие, применяет его, рассылает снимок и события.
pub struct TurnLoop {
    engine: GameEngine,
    config: TurnLoopConfig,
    cancel: CancelFlag,
    requests: mpsc::Sender<TurnRequest>,
    snapshots: watch::Sender<MatchSnapshot>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl TurnLoop {
    /// Запустить матч в отдельной задаче. Нужен работающий tokio runtime.
    pub fn spawn(engine: GameEngine, config: TurnLoopConfig) -> (TurnLoopHandle, PresenterChannels) {
        Self::spawn_with_cancel(engine, config, CancelFlag::new())
    }

    pub fn spawn_with_cancel(
        engine: GameEngine,
        config: TurnLoopConfig,
        cancel: CancelFlag,
    ) -> (TurnLoopHandle, PresenterChannels) {
        let (requests_tx, requests_rx) = mpsc::channel(1);
        let (snapshots_tx, snapshots_rx) = watch::channel(build_snapshot(&engine));
        let (notifications_tx, notifications_rx) = mpsc::unbounded_channel();

        let turn_loop = TurnLoop {
            engine,
            config,
            cancel: cancel.clone(),
            requests: requests_tx,
            snapshots: snapshots_tx,
            notifications: notifications_tx,
        };

        let task = tokio::spawn(turn_loop.run());

        let handle = TurnLoopHandle { cancel, task };
        let channels = PresenterChannels {
            requests: requests_rx,
            snapshots: snapshots_rx,
            notifications: notifications_rx,
        };
        (handle, channels)
    }

    async fn run(mut self) -> MatchResult {
        info!(
            pacing_ms = self.config.pacing_ms,
            action_timeout_ms = ?self.config.action_timeout_ms,
            "turn loop starting"
        );

        let reason = loop {
            if self.cancel.is_cancelled() {
                info!(turn = self.engine.turn_number(), "turn loop cancelled");
                break EndReason::Cancelled;
            }
            if self.engine.is_terminal() {
                break EndReason::Victory;
            }

            let action = match self.await_action().await {
                Choice::Chosen(action) => action,
                Choice::Cancelled => {
                    info!(turn = self.engine.turn_number(), "turn loop cancelled while waiting for input");
                    break EndReason::Cancelled;
                }
                Choice::InputFailed(reason) => {
                    if self.cancel.is_cancelled() {
                        info!(turn = self.engine.turn_number(), "turn loop cancelled while waiting for input");
                        break EndReason::Cancelled;
                    }
                    let fallback = self.fallback_action();
                    warn!(%reason, %fallback, "no action from presenter, using default");
                    self.engine.record_input_failure(reason.clone());
                    self.notify_error(&EngineError::InputChannelFailure(reason));
                    fallback
                }
            };

            match self.engine.apply_action(action) {
                Ok(outcome) => {
                    for event in outcome.events {
                        self.notify(Notification::Event(event));
                    }
                    self.publish_snapshot();
                }
                Err(err) => {
                    debug!(%action, error = %err, "action refused, asking again");
                    self.notify_error(&err);
                    self.publish_snapshot();
                    continue;
                }
            }

            if self.engine.is_terminal() {
                break EndReason::Victory;
            }

            if self.config.pacing_ms > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.pacing()) => {}
                    _ = self.cancel.cancelled() => {}
                }
            }
        };

        if let Some(winner) = self.engine.winner() {
            info!(winner, turns = self.engine.turn_number(), "turn loop finished");
        }

        MatchResult {
            reason,
            winner: self.engine.winner(),
            turns_played: self.engine.turn_number(),
            final_snapshot: build_snapshot(&self.engine),
            history: self.engine.history().clone(),
        }
    }

    /// Действие по умолчанию, если оно сейчас допустимо, иначе первое допустимое.
    fn fallback_action(&self) -> Action {
        let legal = self.engine.legal_actions();
        if legal.contains(&self.config.default_action) {
            self.config.default_action
        } else {
            legal.first().copied().unwrap_or(Action::DEFAULT)
        }
    }

    /// Опубликовать запрос и дождаться одного действия.
    async fn await_action(&self) -> Choice {
        let snapshot = build_snapshot(&self.engine);
        let (slot, reply) = ActionSlot::channel();
        let request = TurnRequest {
            turn_number: self.engine.turn_number(),
            actor: self.engine.table().current(),
            legal_actions: snapshot.legal_actions.clone(),
            snapshot,
            slot,
        };

        let exchange = async {
            if self.requests.send(request).await.is_err() {
                return Choice::InputFailed("presenter is gone".to_string());
            }
            self.wait_reply(reply).await
        };

        tokio::select! {
            _ = self.cancel.cancelled() => Choice::Cancelled,
            choice = exchange => choice,
        }
    }

    async fn wait_reply(&self, reply: oneshot::Receiver<Action>) -> Choice {
        let received = match self.config.action_timeout() {
            Some(limit) => match tokio::time::timeout(limit, reply).await {
                Ok(received) => received,
                Err(_) => {
                    return Choice::InputFailed(format!(
                        "no action within {} ms",
                        limit.as_millis()
                    ))
                }
            },
            None => reply.await,
        };

        match received {
            Ok(action) => Choice::Chosen(action),
            Err(_) => Choice::InputFailed("action slot dropped without an answer".to_string()),
        }
    }

    fn publish_snapshot(&self) {
        self.snapshots.send_replace(build_snapshot(&self.engine));
    }

    fn notify(&self, notification: Notification) {
        // Подписчик мог уйти – матч от этого не останавливается.
        let _ = self.notifications.send(notification);
    }

    fn notify_error(&self, err: &EngineError) {
        self.notify(Notification::Error(ErrorReport::from(err)));
    }
}
