use std::collections::HashSet;

use log::info;

use super::actions::Fault;
use super::card::Card;
use super::model::{PlayerPosition, SchafkopfGame, StockDisposition, Team, PLAYER_COUNT};
use super::rules::{ranked_deck, team_points, team_won_cards};

/// Everybody passed: each seat feeds the stock with the basic charge.
pub(crate) fn score_all_pass(game: &mut SchafkopfGame) {
    game.charge.stock_disposition = StockDisposition::PayIn;
    game.charge.stock_value = game.charge.basic_charge;
    apply_stock(game);
    info!("all four passed, stock is at {}", game.stock);
}

/// Settles a played-out hand: winner, stock disposition, bounty, schneider,
/// then the total charge and its distribution.
pub(crate) fn score_finished(game: &mut SchafkopfGame) -> Result<(), Fault> {
    if game.player_team.is_empty() || game.opponent_team.is_empty() {
        return Err(Fault("scoring a hand with incomplete teams"));
    }
    let player_points = team_points(game, &game.player_team);
    let opponent_points = team_points(game, &game.opponent_team);
    let winner = if game.game_type.is_exclusive() {
        // A single opposing point breaks the promise
        if opponent_points == 0 {
            Team::PlayerTeam
        } else {
            Team::OpponentTeam
        }
    } else if player_points > opponent_points {
        Team::PlayerTeam
    } else {
        // 60:60 falls to the opponents
        Team::OpponentTeam
    };
    game.winner_team = Some(winner);

    if game.game_type.is_partner_game() && game.stock > 0 {
        game.charge.stock_value = game.stock / 2;
        game.charge.stock_disposition = if winner == Team::PlayerTeam {
            StockDisposition::PayOut
        } else {
            StockDisposition::Double
        };
    }

    game.charge.bounty = bounty(game);
    game.charge.exclusive_multiplier = if game.game_type.is_exclusive() { 1 } else { 0 };
    if !game.game_type.is_exclusive() {
        game.charge.schneider = schneider(game, winner, player_points, opponent_points);
    }

    let charge = &mut game.charge;
    charge.total_charge = (charge.basic_charge
        + (charge.bounty + charge.schneider * (1 - charge.exclusive_multiplier))
            * charge.basic_charge)
        * charge.total_multiplier();

    apply_stock(game);
    distribute(game, winner);
    info!(
        "{:?} ended {}:{} for {:?}, charge {}",
        game.game_type, player_points, opponent_points, winner, game.charge.total_charge
    );
    Ok(())
}

/// Longest run of consecutive top cards of the ranked deck inside one team's
/// initial hands. Runs below the minimum pay nothing.
fn bounty(game: &SchafkopfGame) -> i32 {
    let ranked = ranked_deck(game.game_type, game.trump_color);
    let minimum = if game.game_type.is_wenz_family() { 2 } else { 3 };
    let best = run_length(game, &game.player_team, &ranked)
        .max(run_length(game, &game.opponent_team, &ranked));
    if best >= minimum {
        best
    } else {
        0
    }
}

fn run_length(game: &SchafkopfGame, team: &[PlayerPosition], ranked: &[Card]) -> i32 {
    let held: HashSet<Card> = team
        .iter()
        .flat_map(|position| game.player(*position).initial_hand.iter().cloned())
        .collect();
    ranked.iter().take_while(|card| held.contains(card)).count() as i32
}

fn schneider(
    game: &SchafkopfGame,
    winner: Team,
    player_points: i32,
    opponent_points: i32,
) -> i32 {
    let (losers, winner_points, threshold) = match winner {
        Team::PlayerTeam => (&game.opponent_team, player_points, 91),
        Team::OpponentTeam => (&game.player_team, opponent_points, 90),
    };
    if team_won_cards(game, losers).is_empty() {
        return 2;
    }
    if winner_points > threshold {
        1
    } else {
        0
    }
}

fn apply_stock(game: &mut SchafkopfGame) {
    let value = game.charge.stock_value;
    match game.charge.stock_disposition {
        StockDisposition::Ignore => {}
        StockDisposition::PayIn => {
            for player in game.players.iter_mut() {
                player.credit -= value;
            }
            game.stock += value * PLAYER_COUNT as i32;
        }
        StockDisposition::PayOut => {
            for position in game.player_team.clone() {
                game.player_mut(position).credit += value;
            }
            game.stock -= value * game.player_team.len() as i32;
        }
        StockDisposition::Double => {
            for position in game.player_team.clone() {
                game.player_mut(position).credit -= value;
            }
            game.stock += value * game.player_team.len() as i32;
        }
    }
}

fn distribute(game: &mut SchafkopfGame, winner: Team) {
    let total = game.charge.total_charge;
    let (player_sign, opponent_sign) = match winner {
        Team::PlayerTeam => (1, -1),
        Team::OpponentTeam => (-1, 1),
    };
    // A lone player wins or loses against three
    let player_factor = if game.game_type.is_partner_game() { 1 } else { 3 };
    for position in game.player_team.clone() {
        game.player_mut(position).credit += player_sign * total * player_factor;
    }
    for position in game.opponent_team.clone() {
        game.player_mut(position).credit += opponent_sign * total;
    }
}
