use std::env;
use std::fs;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

use colored::Colorize;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use schafkopf_rs::games::schafkopf::rules::choosable_colors;
use schafkopf_rs::games::schafkopf::{
    project, Action, Card, Color, GameSettings, GameType, PlayerPosition, RestrictedGame,
    SchafkopfGame, State, Table,
};

const HANDS_TO_PLAY: usize = 8;

fn main() {
    env_logger::init();
    let settings: GameSettings = match env::args().nth(1) {
        Some(path) => serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap(),
        None => GameSettings::default(),
    };
    let table = Arc::new(Table::new(SchafkopfGame::new(settings)));
    let watcher = table.subscribe(PlayerPosition::Bottom);
    for position in PlayerPosition::Bottom.ring() {
        let updates = table.subscribe(position);
        let table = Arc::clone(&table);
        thread::spawn(move || bot_loop(table, position, updates));
    }

    let mut finished = 0;
    for update in watcher {
        if update.state == State::Finished
            && update
                .players
                .iter()
                .all(|player| !player.accepting_next_game_start)
        {
            finished += 1;
            print_hand_result(finished, &update);
            if finished == HANDS_TO_PLAY {
                print_standings(&update);
                return;
            }
        }
    }
}

/// One autonomous seat: wake on every update, act at most once per update,
/// and only when the engine says it is waiting on this position.
fn bot_loop(table: Arc<Table>, position: PlayerPosition, updates: Receiver<RestrictedGame>) {
    act(&table, position, &project(&table.snapshot(), position));
    for update in updates {
        act(&table, position, &update);
    }
}

fn act(table: &Table, position: PlayerPosition, view: &RestrictedGame) {
    if !view.awaited.contains(&position) {
        return;
    }
    let mut rng = thread_rng();
    let action = match view.state {
        State::GetRaise => {
            let me = &view.players[position.idx()];
            if !me.raising && me.hand_size == 4 && rng.gen_bool(0.1) {
                Action::Raise { position }
            } else {
                Action::GetCards { position }
            }
        }
        State::Choose => choose_bid(view, position, &mut rng),
        State::Play => {
            let card = view
                .available_cards
                .choose(&mut rng)
                .expect("an awaited player always has a legal card");
            Action::PlayCard {
                position,
                card_id: card.id(),
            }
        }
        State::Strike => Action::Strike {
            position,
            response: rng.gen_bool(0.15),
        },
        State::StrikeBack => Action::StrikeBack {
            position,
            response: rng.gen_bool(0.3),
        },
        State::Finished => Action::StartNextGame { position },
    };
    table.submit(action);
}

fn choose_bid(view: &RestrictedGame, position: PlayerPosition, rng: &mut impl Rng) -> Action {
    let ambitious: Vec<GameType> = view
        .available_game_types
        .iter()
        .copied()
        .filter(|game_type| *game_type != GameType::Pass)
        .collect();
    if let Some(game_type) = ambitious.choose(rng).copied() {
        if rng.gen_bool(0.25) {
            if !game_type.needs_color() {
                return Action::Choose {
                    position,
                    game_type,
                    color: None,
                };
            }
            let hand = view.players[position.idx()]
                .current_hand
                .clone()
                .unwrap_or_default();
            let colors = choosable_colors(&hand, game_type);
            if let Some(color) = colors.choose(rng) {
                return Action::Choose {
                    position,
                    game_type,
                    color: Some(*color),
                };
            }
        }
    }
    Action::Choose {
        position,
        game_type: GameType::Pass,
        color: None,
    }
}

fn format_card(card: &Card) -> String {
    let id = card.id();
    match card.color {
        Color::Acorn => id.yellow(),
        Color::Leaf => id.green(),
        Color::Heart => id.red(),
        Color::Bell => id.blue(),
    }
    .to_string()
}

fn print_hand_result(count: usize, view: &RestrictedGame) {
    match view.winner_team {
        Some(winner) => {
            let declarer = view
                .lead
                .map(|position| view.players[position.idx()].name.clone())
                .unwrap_or_default();
            let last_trick = view
                .last_trick
                .iter()
                .map(|(_, card)| format_card(card))
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "hand {:>2}: {:?} by {} ends {:?} for {}, last trick {}",
                count, view.game_type, declarer, winner, view.charge.total_charge, last_trick
            );
        }
        None => println!(
            "hand {:>2}: all four passed, the stock grows to {}",
            count, view.stock
        ),
    }
}

fn print_standings(view: &RestrictedGame) {
    println!("---");
    for player in &view.players {
        let credit = if player.credit >= view.settings.start_credit {
            player.credit.to_string().green()
        } else {
            player.credit.to_string().red()
        };
        println!("{:<8} {}", player.name, credit);
    }
    println!("{:<8} {}", "stock", view.stock);
}
