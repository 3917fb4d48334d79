//! Plays one scripted hand through a [`TableManager`] and prints the table
//! as each seat sees it along the way.

mod scorer;

use std::sync::Arc;

use anyhow::{Error, bail};
use holdem_table::{
    Action, GameId, PlayerId, TableHandle, TableManager, constants::MIN_PLAYERS,
};
use log::info;
use pico_args::Arguments;
use serde::Serialize;

use scorer::HighCardScorer;

const HELP: &str = "\
Play one scripted hold'em hand and print every seat's view as JSON

USAGE:
  ht_sim [OPTIONS]

OPTIONS:
  --players    N           Players to seat                    [default: 3]
  --seed       N           Seed for a reproducible shuffle    [default: random]

FLAGS:
  --pretty                 Pretty-print JSON
  -h, --help               Print help information

ENVIRONMENT:
  TABLE_MAX_PLAYERS        Seats per table
  TABLE_MIN_BET            Opening minimum bet
  TABLE_STARTING_BANK      Chips each player starts with
  TABLE_INBOX_CAPACITY     Commands queued per table
  RUST_LOG                 Log filter, e.g. info or debug
";

struct Args {
    players: usize,
    seed: Option<u64>,
    pretty: bool,
}

fn print_json<T: Serialize>(label: &str, value: &T, pretty: bool) -> Result<(), Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("# {label}\n{json}");
    Ok(())
}

async fn print_views(
    table: &TableHandle,
    player_ids: &[PlayerId],
    label: &str,
    pretty: bool,
) -> Result<(), Error> {
    for player_id in player_ids {
        let response = table.view(Some(player_id.clone()), None).await?;
        if let Some(view) = response.view {
            print_json(
                &format!("{label} / {player_id} @ revision {}", response.revision),
                &view,
                pretty,
            )?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        players: pargs.opt_value_from_str("--players")?.unwrap_or(3),
        seed: pargs.opt_value_from_str("--seed")?,
        pretty: pargs.contains("--pretty"),
    };

    env_logger::builder().format_target(false).init();

    let manager = TableManager::from_env(Arc::new(HighCardScorer))?;
    let max_players = manager.config().max_players;
    if !(MIN_PLAYERS..=max_players).contains(&args.players) {
        bail!("--players must be between {MIN_PLAYERS} and {max_players}");
    }

    let game_id: GameId = manager.create_game().await;
    info!("Simulating {} players at table {}", args.players, game_id);

    let player_ids: Vec<PlayerId> = (1..=args.players)
        .map(|i| PlayerId::new(format!("p{i}")))
        .collect();
    for (i, player_id) in player_ids.iter().enumerate() {
        let player = manager.new_player(player_id.clone(), format!("Player {}", i + 1));
        manager.join_game(&game_id, player).await?;
    }

    let Some(table) = manager.get_game(&game_id).await else {
        bail!("table {game_id} disappeared");
    };

    // Buy in and deal.
    table.start_hand(args.seed).await?;
    for player_id in &player_ids {
        table.call(player_id.clone()).await?;
    }
    table.deal_hole_cards().await?;
    print_views(&table, &player_ids, "dealt", args.pretty).await?;

    // Check round: the first seat raises, the last folds, the rest check.
    table.advance_phase().await?;
    for _ in 0..3 {
        table.reveal_card().await?;
    }
    let min_bet = manager.config().min_bet;
    for (i, player_id) in player_ids.iter().enumerate() {
        if i == 0 {
            table.raise(player_id.clone(), min_bet * 2).await?;
        } else if i == player_ids.len() - 1 {
            table.act(player_id.clone(), Action::Fold).await?;
        } else {
            table.act(player_id.clone(), Action::Check).await?;
        }
        table.advance_turn().await?;
    }
    print_views(&table, &player_ids, "flop", args.pretty).await?;

    // Bet round: everyone still in matches the raise.
    table.advance_phase().await?;
    for _ in 0..2 {
        table.reveal_card().await?;
    }
    for player_id in &player_ids[1..player_ids.len() - 1] {
        table.act(player_id.clone(), Action::Call).await?;
    }

    table.advance_phase().await?;
    let payouts = table.settle().await?;
    print_json("payouts", &payouts, args.pretty)?;
    print_views(&table, &player_ids, "settled", args.pretty).await?;

    for player_id in player_ids {
        manager.leave_game(&game_id, player_id).await?;
    }
    info!(
        "Hand finished, {} table(s) still open",
        manager.active_game_count().await
    );

    Ok(())
}
