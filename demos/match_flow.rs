//! Scripted end-to-end match: queue, join, play to a win, inspect.
//!
//! Run with `cargo run --example match_flow`; set `RUST_LOG=debug` to
//! watch the registry and session events.

use tictactoe_lobby::{GameRegistry, GameStatus};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let registry = GameRegistry::new();

    let queue_id = registry.queue_game("alice");
    info!(queue_id, pending = ?registry.pending_games(), "Alice is waiting for an opponent");

    let game = registry.start_game(queue_id, "bob")?;
    info!(game_id = game.id(), first = game.next_mover_name(), "Bob joined");

    // The opening player walks the top row; the opponent answers on the
    // middle row and loses the race.
    let first = game.next_mover();
    let second = first.opponent();
    let script = [
        (first, 0, 0),
        (second, 1, 0),
        (first, 0, 1),
        (second, 1, 1),
        (first, 0, 2),
    ];
    for (player, row, col) in script {
        game.make_move(player, row, col)?;
        println!("{}\n", game.board().render());
    }

    match game.status() {
        GameStatus::Won(winner) => info!(winner = game.name_of(winner), "Match finished"),
        status => info!(?status, "Match finished"),
    }
    assert!(registry.active_game(game.id()).is_none());

    Ok(())
}
