// src/bin/round_table_dev_cli.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use round_table_engine::api::{ErrorReport, MatchSnapshot};
use round_table_engine::domain::{MatchConfig, Roster};
use round_table_engine::engine::{Action, GameEngine, MatchEventKind, RandomSource};
use round_table_engine::infra::MatchRng;
use round_table_engine::runtime::{EndReason, Notification, TurnLoop, TurnLoopConfig};

/// Dev-CLI: матч за круглым столом с автоматическим игроком.
#[derive(Parser, Debug)]
#[command(name = "round_table_dev_cli")]
#[command(about = "Round-table elimination match with an automatic presenter")]
struct Cli {
    /// JSON-файл с MatchConfig (флаги ниже его перекрывают)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Сколько участников садится за стол
    #[arg(long)]
    participants: Option<usize>,

    /// Радиус устранения N
    #[arg(long)]
    radius: Option<usize>,

    /// Seed для воспроизводимого матча
    #[arg(long)]
    seed: Option<u64>,

    /// Одинаковые стартовые доблоны (вместе с --fixed-followers)
    #[arg(long, requires = "fixed_followers")]
    fixed_wealth: Option<u64>,

    /// Одинаковые стартовые последователи (вместе с --fixed-wealth)
    #[arg(long, requires = "fixed_wealth")]
    fixed_followers: Option<u64>,

    /// Пауза между ходами, мс
    #[arg(long, default_value = "300")]
    pace_ms: u64,

    /// Остановить матч после стольких ходов
    #[arg(long)]
    max_turns: Option<u32>,
}

impl Cli {
    fn match_config(&self) -> Result<MatchConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                MatchConfig::from_json(&raw)?
            }
            None => MatchConfig::default(),
        };

        if let Some(count) = self.participants {
            config.participant_count = count;
        }
        if let Some(radius) = self.radius {
            config.elimination_radius = radius;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let (Some(wealth), Some(followers)) = (self.fixed_wealth, self.fixed_followers) {
            config = config.with_fixed_resources(wealth, followers);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match cli.match_config() {
        Ok(config) => config,
        Err(err) => {
            println!("[CLI] bad configuration: {err}");
            return Err(err);
        }
    };

    println!(
        "[CLI] participants={} radius={} seed={:?}",
        config.participant_count, config.elimination_radius, config.seed
    );

    let mut setup_rng = MatchRng::from_seed(config.seed);
    let engine = match GameEngine::new(config.clone(), &mut setup_rng) {
        Ok(engine) => engine,
        Err(err) => {
            println!("[CLI] {}", ErrorReport::from(&err).message);
            return Err(err.into());
        }
    };
    let names = engine.roster().clone();

    let loop_config = TurnLoopConfig::default().with_pacing_ms(cli.pace_ms);
    let (handle, mut channels) = TurnLoop::spawn(engine, loop_config);

    print_table(&channels.snapshots.borrow());

    // Автоматический игрок берёт случайное допустимое действие.
    let mut presenter_rng = MatchRng::from_seed(config.seed.map(|s| s.wrapping_add(1)));
    let mut requests_open = true;
    let mut notifications_open = true;
    let mut unanswered = Vec::new();

    while requests_open || notifications_open {
        tokio::select! {
            request = channels.requests.recv(), if requests_open => {
                let Some(request) = request else {
                    requests_open = false;
                    continue;
                };

                if let Some(limit) = cli.max_turns {
                    if request.turn_number > limit {
                        println!("[CLI] turn limit {limit} reached, cancelling");
                        handle.cancel();
                        // Без ответа, но и не бросаем: иначе цикл увидит сбой ввода.
                        unanswered.push(request);
                        continue;
                    }
                }

                let mut options = request.legal_actions.clone();
                presenter_rng.shuffle(&mut options);
                let action = options.first().copied().unwrap_or(Action::DEFAULT);

                let actor = request
                    .actor
                    .and_then(|id| names.get(id))
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                println!("[CLI] turn {} – {} chooses {}", request.turn_number, actor, action);
                request.respond(action);
            }
            notification = channels.notifications.recv(), if notifications_open => {
                match notification {
                    Some(notification) => print_notification(&notification, &names),
                    None => notifications_open = false,
                }
            }
        }
    }

    let result = handle.join().await?;
    drop(unanswered);
    print_table(&result.final_snapshot);

    match (result.reason, result.winner.and_then(|id| names.get(id))) {
        (EndReason::Victory, Some(winner)) => {
            println!("[CLI] winner: {} after {} turns", winner.name, result.turns_played)
        }
        _ => println!("[CLI] match stopped after {} turns", result.turns_played),
    }
    println!("[CLI] history events: {}", result.history.len());

    Ok(())
}

fn name_of(roster: &Roster, id: u64) -> String {
    roster
        .get(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{id}"))
}

fn print_notification(notification: &Notification, roster: &Roster) {
    match notification {
        Notification::Event(event) => match &event.kind {
            MatchEventKind::Elimination {
                actor,
                victim,
                direction,
                wealth,
                followers,
            } => println!(
                "[CLI] {} eliminates {} ({:?}), takes {} wealth / {} followers",
                name_of(roster, *actor),
                name_of(roster, *victim),
                direction,
                wealth,
                followers
            ),
            MatchEventKind::Rescue {
                actor,
                rescued,
                wealth,
                followers,
            } => println!(
                "[CLI] {} rescues {}, gives {} wealth / {} followers",
                name_of(roster, *actor),
                name_of(roster, *rescued),
                wealth,
                followers
            ),
            MatchEventKind::Theft {
                actor,
                victim,
                wealth,
                followers,
            } => println!(
                "[CLI] {} steals {} wealth / {} followers from {}",
                name_of(roster, *actor),
                wealth,
                followers,
                name_of(roster, *victim)
            ),
            MatchEventKind::TableReorganized { swaps, resolved } => {
                println!("[CLI] table reorganized: swaps={swaps} resolved={resolved}")
            }
            MatchEventKind::Victory { winner } => {
                println!("[CLI] VICTORY: {}", name_of(roster, *winner))
            }
            _ => {}
        },
        Notification::Error(report) => println!("[CLI] error ({:?}): {}", report.kind, report.message),
    }
}

fn print_table(snapshot: &MatchSnapshot) {
    println!("================ TABLE (turn {}) ================", snapshot.turn_number);
    for p in &snapshot.seated {
        let marker = if p.is_current { ">" } else { " " };
        println!(
            "{marker} [{}] {:<18} {:<9} wealth={:<5} followers={}",
            p.seat_index.unwrap_or_default(),
            p.name,
            p.category,
            p.wealth,
            p.followers
        );
    }
    if !snapshot.dispossessed.is_empty() {
        let stack: Vec<&str> = snapshot.dispossessed.iter().rev().map(|p| p.name.as_str()).collect();
        println!("  stack (top first): {}", stack.join(", "));
    }
}
