//! Fore Engine - hot-seat demo.
//!
//! Runs one two-player game against in-memory storage, buying every
//! affordable hole a player lands on, and logs each recorded event.

use fore_domain::{GameId, GameStatus, PlayerId, TurnPhase};
use fore_engine::use_cases::{ActionOutcome, PlayerAction};
use fore_engine::{telemetry, App, EngineSettings};

/// Stop after this many turns if nobody has gone bankrupt.
const MAX_DEMO_TURNS: u32 = 200;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = EngineSettings::from_env();
    telemetry::init(&settings);

    tracing::info!("Starting Fore Engine demo");

    let app = App::in_memory(settings);
    let eviction = app.spawn_lock_eviction();

    let alice = PlayerId::new();
    let bob = PlayerId::new();
    let created = app
        .use_cases
        .game
        .create
        .execute(alice, "Alice", false, None)
        .await?;
    let game_id = created.game.id();
    log_events(&created);
    log_events(&app.use_cases.game.join.execute(game_id, bob, "Bob").await?);

    let mut game = app.use_cases.game.get.by_id(game_id).await?;
    while game.status() == GameStatus::InProgress && game.turn_number() <= MAX_DEMO_TURNS {
        let Some(current) = game.current_player_id() else {
            break;
        };
        play_turn(&app, game_id, current).await?;
        game = app.use_cases.game.get.by_id(game_id).await?;
    }

    match game.winner_id() {
        Some(winner) => {
            let winner = game.player(winner)?;
            tracing::info!(
                winner = %winner.display_name(),
                turns = game.turn_number(),
                "Game over"
            );
        }
        None => tracing::info!(turns = game.turn_number(), "Demo turn limit reached"),
    }
    for player in game.players() {
        let net_worth = player.net_worth(game.board())?;
        tracing::info!(
            player = %player.display_name(),
            balance = %player.balance(),
            net_worth = %net_worth,
            holes = player.property_count(),
            "Final standing"
        );
    }

    eviction.abort();
    Ok(())
}

async fn play_turn(app: &App, game_id: GameId, player_id: PlayerId) -> anyhow::Result<()> {
    let execute = &app.use_cases.game.execute;
    loop {
        let game = app.use_cases.game.get.by_id(game_id).await?;
        if game.status() != GameStatus::InProgress {
            return Ok(());
        }
        match game.turn_phase() {
            TurnPhase::Roll => {
                let outcome = execute
                    .execute(game_id, player_id, PlayerAction::RollDice)
                    .await?;
                log_events(&outcome);
                try_purchase(app, game_id, player_id, &outcome).await?;
            }
            TurnPhase::Action => {
                let outcome = execute
                    .execute(game_id, player_id, PlayerAction::EndTurn)
                    .await?;
                log_events(&outcome);
                return Ok(());
            }
            TurnPhase::Trade => return Ok(()),
        }
    }
}

/// Buy the hole just landed on when it is free and affordable.
async fn try_purchase(
    app: &App,
    game_id: GameId,
    player_id: PlayerId,
    rolled: &ActionOutcome,
) -> anyhow::Result<()> {
    let game = &rolled.game;
    if game.turn_phase() != TurnPhase::Action || !game.is_player_turn(player_id) {
        return Ok(());
    }
    let player = game.player(player_id)?;
    let Some(property) = game.board().property_at(player.position())? else {
        return Ok(());
    };
    if property.is_owned() || !player.can_afford(property.purchase_price()) {
        return Ok(());
    }

    let action = PlayerAction::PurchaseProperty {
        property_id: property.id(),
    };
    match app.use_cases.game.execute.execute(game_id, player_id, action).await {
        Ok(outcome) => log_events(&outcome),
        Err(e) if e.is_recoverable() => {
            tracing::debug!(error = %e, "Purchase declined");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn log_events(outcome: &ActionOutcome) {
    for stored in &outcome.events {
        tracing::info!(
            game_id = %stored.game_id,
            sequence = stored.sequence,
            event = stored.event_type(),
            "{}",
            serde_json::to_string(&stored.event).unwrap_or_default()
        );
    }
}
