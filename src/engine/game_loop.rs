use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    Amount, ConfigError, Direction, DispossessedStack, MatchConfig, Participant, ParticipantId,
    Roster, Table,
};
use crate::engine::actions::Action;
use crate::engine::errors::{EmptyCollectionKind, EngineError};
use crate::engine::history::{MatchEvent, MatchEventKind, MatchHistory};
use crate::engine::setup;
use crate::engine::validation;
use crate::engine::RandomSource;

/// Состояние автомата матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EngineState {
    AwaitingAction,
    Resolving,
    Terminal,
}

/// Статус матча для внешнего кода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    Ongoing,
    Finished { winner: ParticipantId },
}

/// Итог одного применённого действия.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub actor: ParticipantId,
    pub action: Action,
    pub status: MatchStatus,
    /// События, добавленные в историю этим действием.
    pub events: Vec<MatchEvent>,
}

/// Откуда берётся состав при `reset`.
#[derive(Clone, Debug)]
enum LineupSource {
    /// Генерируется заново из конфига.
    Generated(MatchConfig),
    /// Заданный заранее состав в заданном порядке.
    Fixed(Vec<Participant>),
}

/// Один матч за круглым столом.
///
/// Единственный владелец стола, стопки и арены участников;
/// наружу отдаёт только `&`-ссылки и копии.
#[derive(Clone, Debug)]
pub struct GameEngine {
    source: LineupSource,
    roster: Roster,
    table: Table,
    stack: DispossessedStack,
    state: EngineState,
    /// Номер хода, начиная с 1.
    turn: u32,
    winner: Option<ParticipantId>,
    history: MatchHistory,
}

impl GameEngine {
    /// Рассадить участников по конфигу.
    pub fn new<R: RandomSource>(config: MatchConfig, rng: &mut R) -> Result<Self, EngineError> {
        config.validate()?;
        let lineup = setup::build_lineup(&config, rng);
        let radius = config.elimination_radius;
        Ok(Self::assemble(LineupSource::Generated(config), lineup, radius))
    }

    /// Посадить готовый состав в указанном порядке.
    pub fn with_participants(
        participants: Vec<Participant>,
        elimination_radius: usize,
    ) -> Result<Self, EngineError> {
        let config = MatchConfig::new(participants.len(), elimination_radius);
        config.validate()?;

        let mut seen = HashSet::new();
        for p in &participants {
            if !seen.insert(p.id) {
                return Err(ConfigError::DuplicateParticipant(p.id).into());
            }
        }

        let lineup = participants.clone();
        Ok(Self::assemble(
            LineupSource::Fixed(participants),
            lineup,
            elimination_radius,
        ))
    }

    fn assemble(source: LineupSource, lineup: Vec<Participant>, elimination_radius: usize) -> Self {
        let count = lineup.len();
        let (roster, table, reorganized) = setup::seat_lineup(lineup, elimination_radius);

        let mut history = MatchHistory::new();
        if reorganized.swaps > 0 {
            history.push(MatchEventKind::TableReorganized {
                swaps: reorganized.swaps,
                resolved: reorganized.resolved,
            });
        }

        let mut engine = Self {
            source,
            roster,
            table,
            stack: DispossessedStack::new(),
            state: EngineState::AwaitingAction,
            turn: 1,
            winner: None,
            history,
        };

        if let Some(first) = engine.table.current() {
            engine.history.push(MatchEventKind::MatchStarted {
                participants: count,
                elimination_radius,
                first,
            });
            info!(
                participants = count,
                elimination_radius,
                first,
                "match started"
            );
        }

        engine
    }

    /// Начать матч заново с тем же числом участников и тем же N.
    ///
    /// Сгенерированный состав раздаётся заново, заданный – восстанавливается как был.
    /// Стопка выбывших и история начинаются с нуля.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) {
        let source = self.source.clone();
        let radius = self.table.elimination_radius();
        let lineup = match &source {
            LineupSource::Generated(config) => setup::build_lineup(config, rng),
            LineupSource::Fixed(participants) => participants.clone(),
        };

        *self = Self::assemble(source, lineup, radius);
        info!("match reset");
    }

    // ------------------------------------------------------------------
    // Чтение состояния
    // ------------------------------------------------------------------

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn stack(&self) -> &DispossessedStack {
        &self.stack
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    pub fn is_terminal(&self) -> bool {
        self.state == EngineState::Terminal
    }

    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    pub fn status(&self) -> MatchStatus {
        match self.winner {
            Some(winner) => MatchStatus::Finished { winner },
            None => MatchStatus::Ongoing,
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.get(id)
    }

    /// Участник, чей сейчас ход.
    pub fn current_participant(&self) -> Option<&Participant> {
        self.table.current().and_then(|id| self.roster.get(id))
    }

    pub fn can_steal(&self) -> bool {
        !self.is_terminal() && validation::can_steal(&self.table, &self.roster)
    }

    pub fn can_rescue(&self) -> bool {
        !self.is_terminal() && validation::can_rescue(&self.stack)
    }

    /// Действия, доступные прямо сейчас. После конца матча – пусто.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        validation::legal_actions(&self.table, &self.roster, &self.stack)
    }

    // ------------------------------------------------------------------
    // Применение действий
    // ------------------------------------------------------------------

    /// Применить действие текущего участника.
    ///
    /// При ошибке стол, стопка и ход не меняются; причина попадает в историю.
    pub fn apply_action(&mut self, action: Action) -> Result<ActionOutcome, EngineError> {
        if self.is_terminal() {
            return Err(EngineError::MatchFinished);
        }

        let actor = match self.table.current() {
            Some(id) => id,
            None => return Err(self.reject(None, action, EmptyCollectionKind::EmptyTable.into())),
        };

        if let Err(err) = validation::validate_action(&self.table, &self.roster, &self.stack, action) {
            return Err(self.reject(Some(actor), action, err));
        }

        self.state = EngineState::Resolving;
        let first_event = self.history.len();

        let resolved = match action {
            Action::EliminateLeft => self.eliminate(actor, Direction::Left),
            Action::EliminateRight => self.eliminate(actor, Direction::Right),
            Action::Rescue => self.rescue(actor),
            Action::Theft => self.theft(actor),
        };

        if let Err(err) = resolved {
            self.state = EngineState::AwaitingAction;
            return Err(self.reject(Some(actor), action, err));
        }

        let status = self.finish_turn();
        let events = self.history.events[first_event..].to_vec();

        Ok(ActionOutcome {
            actor,
            action,
            status,
            events,
        })
    }

    /// Записать отказ в историю и вернуть ошибку вызывающему.
    fn reject(&mut self, actor: Option<ParticipantId>, action: Action, err: EngineError) -> EngineError {
        debug!(?actor, %action, error = %err, "action rejected");
        self.history.push(MatchEventKind::ActionRejected {
            actor,
            action: Some(action),
            reason: err.to_string(),
        });
        err
    }

    /// Записать сбой слоя ввода (действие не пришло).
    pub fn record_input_failure(&mut self, reason: impl Into<String>) -> MatchEvent {
        let err = EngineError::InputChannelFailure(reason.into());
        self.history.push(MatchEventKind::ActionRejected {
            actor: self.table.current(),
            action: None,
            reason: err.to_string(),
        })
    }

    fn eliminate(&mut self, actor: ParticipantId, direction: Direction) -> Result<(), EngineError> {
        let candidates = self
            .table
            .neighbors(direction, self.table.elimination_radius());
        let victim = self
            .table
            .fewest_followers(&self.roster, &candidates)
            .ok_or(EngineError::EmptyCollection(EmptyCollectionKind::NoEligibleNeighbor))?;
        let victim_index = self
            .table
            .position_of(victim)
            .ok_or(EngineError::UnknownParticipant(victim))?;
        let (wealth, followers) = self
            .roster
            .get(victim)
            .map(|p| (p.wealth, p.followers))
            .ok_or(EngineError::UnknownParticipant(victim))?;

        let (wealth, followers) = self
            .roster
            .transfer(victim, actor, wealth, followers)
            .ok_or(EngineError::UnknownParticipant(actor))?;

        self.table.remove(victim_index, &mut self.roster);
        self.stack.push(victim, &mut self.roster);

        debug!(actor, victim, ?direction, %wealth, %followers, "elimination");
        self.history.push(MatchEventKind::Elimination {
            actor,
            victim,
            direction,
            wealth,
            followers,
        });

        self.reorganize_table();
        Ok(())
    }

    fn rescue(&mut self, actor: ParticipantId) -> Result<(), EngineError> {
        let (half_wealth, half_followers) = self
            .roster
            .get(actor)
            .map(|p| (p.wealth.half(), p.followers.half()))
            .ok_or(EngineError::UnknownParticipant(actor))?;

        let rescued = self.stack.pop(&mut self.roster)?;
        let (wealth, followers) = self
            .roster
            .transfer(actor, rescued, half_wealth, half_followers)
            .unwrap_or((Amount::ZERO, Amount::ZERO));
        self.table.seat(rescued, &mut self.roster);

        debug!(actor, rescued, %wealth, %followers, "rescue");
        self.history.push(MatchEventKind::Rescue {
            actor,
            rescued,
            wealth,
            followers,
        });
        Ok(())
    }

    fn theft(&mut self, actor: ParticipantId) -> Result<(), EngineError> {
        let victim = self
            .table
            .richest(&self.roster)
            .ok_or(EngineError::EmptyCollection(EmptyCollectionKind::EmptyTable))?;
        let (third_wealth, third_followers) = self
            .roster
            .get(victim)
            .map(|p| (p.wealth.third(), p.followers.third()))
            .ok_or(EngineError::UnknownParticipant(victim))?;

        let (wealth, followers) = self
            .roster
            .transfer(victim, actor, third_wealth, third_followers)
            .ok_or(EngineError::UnknownParticipant(actor))?;

        debug!(actor, victim, %wealth, %followers, "theft");
        self.history.push(MatchEventKind::Theft {
            actor,
            victim,
            wealth,
            followers,
        });
        Ok(())
    }

    /// Победа, если остался один; иначе передать ход и починить соседство.
    fn finish_turn(&mut self) -> MatchStatus {
        if self.table.has_one_remaining() {
            if let Some(winner) = self.table.id_at(0) {
                self.state = EngineState::Terminal;
                self.winner = Some(winner);
                self.history.push(MatchEventKind::Victory { winner });
                info!(winner, turn = self.turn, "match finished");
                return MatchStatus::Finished { winner };
            }
        }

        self.table.advance_turn();
        if !self.table.is_adjacency_valid(&self.roster) {
            self.reorganize_table();
        }

        self.turn += 1;
        self.state = EngineState::AwaitingAction;

        if let Some(current) = self.table.current() {
            self.history.push(MatchEventKind::TurnAdvanced {
                turn: self.turn,
                current,
            });
        }

        MatchStatus::Ongoing
    }

    fn reorganize_table(&mut self) {
        let outcome = self.table.reorganize(&self.roster);
        if outcome.swaps > 0 {
            debug!(swaps = outcome.swaps, resolved = outcome.resolved, "table reorganized");
            self.history.push(MatchEventKind::TableReorganized {
                swaps: outcome.swaps,
                resolved: outcome.resolved,
            });
        }
    }
}
