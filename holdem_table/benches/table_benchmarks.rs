use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use holdem_table::{
    Game, Player, PlayerId, TableConfig, TableManager, TieScorer, constants::MAX_PLAYERS,
    game::card,
};
use rand::{SeedableRng, rngs::StdRng};
use std::{hint::black_box, sync::Arc};

/// Helper to create a dealt game with N players
fn setup_game_with_players(n_players: usize) -> Game {
    let mut game = Game::new("bench", 10);
    for i in 0..n_players {
        game.join(Player::new(format!("player{i}"), format!("Player {i}"), 1000))
            .unwrap();
    }
    game.start_hand_with(&mut StdRng::seed_from_u64(0));
    game.deal_hole_cards().unwrap();
    game
}

/// Benchmark shuffling a fresh deck
fn bench_shuffle(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("shuffle_deck", |b| {
        b.iter(|| {
            let mut deck = card::full_deck();
            card::shuffle(&mut deck, &mut rng);
            black_box(deck)
        });
    });
}

/// Benchmark per-seat views at different table sizes
fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view");
    for n_players in [2, 4, MAX_PLAYERS] {
        let game = setup_game_with_players(n_players);
        group.bench_with_input(BenchmarkId::from_parameter(n_players), &game, |b, game| {
            b.iter(|| black_box(game.view(1)));
        });
    }
    group.finish();
}

/// Benchmark serializing a view to JSON
fn bench_view_json(c: &mut Criterion) {
    let game = setup_game_with_players(MAX_PLAYERS);
    let view = game.view(0);
    c.bench_function("view_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&view)).unwrap());
    });
}

/// Benchmark a buy-in round through a table actor
fn bench_actor_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let manager = TableManager::new(TableConfig::default(), Arc::new(TieScorer)).unwrap();
    let table = runtime.block_on(async {
        let game_id = manager.create_game().await;
        for i in 0..MAX_PLAYERS {
            manager
                .join_game(&game_id, manager.new_player(format!("player{i}"), "bench"))
                .await
                .unwrap();
        }
        manager.get_game(&game_id).await.unwrap()
    });

    let table = &table;
    c.bench_function("actor_buy_in_round", |b| {
        b.to_async(&runtime).iter(|| async move {
            table.start_hand(Some(0)).await.unwrap();
            for i in 0..MAX_PLAYERS {
                table.call(PlayerId::new(format!("player{i}"))).await.unwrap();
            }
            black_box(table.view(None, None).await.unwrap())
        });
    });
}

criterion_group!(
    benches,
    bench_shuffle,
    bench_view,
    bench_view_json,
    bench_actor_round_trip
);
criterion_main!(benches);
