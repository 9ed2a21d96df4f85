use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::card::{Card, Color};
use super::model::{
    Charge, ChosenGame, GameSettings, GameType, PlayerPosition, SchafkopfGame, State, Team,
    PLAYER_COUNT,
};
use super::rules::{available_cards, available_game_types, awaited_positions, compare_cards};

/// What one seat is allowed to know about another: everything public, hand
/// and bid only for the seat itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedPlayer {
    pub name: String,
    pub credit: i32,
    pub hand_size: usize,
    pub current_hand: Option<Vec<Card>>,
    pub initial_hand: Option<Vec<Card>>,
    pub chosen_game: Option<ChosenGame>,
    pub played_card: Option<Card>,
    pub points: i32,
    pub won_cards: Vec<Card>,
    pub raising: bool,
    pub striking: bool,
    pub striking_back: bool,
    pub accepting_next_game_start: bool,
}

/// One subscriber's view of the table, rebuilt from scratch on every change.
/// The point-of-view legality queries ride along so a consumer never has to
/// compute rules on its own; `available_game_types` is meaningful while
/// bidding, `available_cards` while playing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedGame {
    pub point_of_view: PlayerPosition,
    pub players: [RestrictedPlayer; PLAYER_COUNT],
    pub stack_size: usize,
    pub state: State,
    pub lead: Option<PlayerPosition>,
    pub first_of_game: PlayerPosition,
    pub first_of_round: PlayerPosition,
    pub on_turn: Option<PlayerPosition>,
    pub round: i32,
    pub game_type: GameType,
    pub game_color: Option<Color>,
    pub trump_color: Option<Color>,
    pub last_action: Option<Action>,
    pub last_trick: Vec<(PlayerPosition, Card)>,
    pub last_trick_winner: Option<PlayerPosition>,
    pub player_team: Vec<PlayerPosition>,
    pub opponent_team: Vec<PlayerPosition>,
    pub winner_team: Option<Team>,
    pub stock: i32,
    pub charge: Charge,
    pub settings: GameSettings,
    pub resumed: bool,
    pub available_cards: Vec<Card>,
    pub available_game_types: Vec<GameType>,
    pub awaited: Vec<PlayerPosition>,
}

pub fn project(game: &SchafkopfGame, point_of_view: PlayerPosition) -> RestrictedGame {
    RestrictedGame {
        point_of_view,
        players: PlayerPosition::Bottom
            .ring()
            .map(|position| restrict_player(game, position, point_of_view)),
        stack_size: game.stack.len(),
        state: game.state,
        lead: game.lead,
        first_of_game: game.first_of_game,
        first_of_round: game.first_of_round,
        on_turn: game.on_turn,
        round: game.round,
        game_type: game.game_type,
        game_color: game.game_color,
        trump_color: game.trump_color,
        last_action: game.last_action.clone(),
        last_trick: game.last_trick.clone(),
        last_trick_winner: game.last_trick_winner,
        player_team: game.player_team.clone(),
        opponent_team: game.opponent_team.clone(),
        winner_team: game.winner_team,
        stock: game.stock,
        charge: game.charge.clone(),
        settings: game.settings.clone(),
        resumed: game.resumed,
        available_cards: available_cards(game, point_of_view),
        available_game_types: available_game_types(game, point_of_view),
        awaited: awaited_positions(game),
    }
}

fn restrict_player(
    game: &SchafkopfGame,
    position: PlayerPosition,
    point_of_view: PlayerPosition,
) -> RestrictedPlayer {
    let data = game.player(position);
    let own = position == point_of_view;
    RestrictedPlayer {
        name: data.name.clone(),
        credit: data.credit,
        hand_size: data.current_hand.len(),
        current_hand: if own {
            Some(sorted_hand(game, position))
        } else {
            None
        },
        initial_hand: if own {
            Some(data.initial_hand.clone())
        } else {
            None
        },
        chosen_game: if own { data.chosen_game } else { None },
        played_card: data.played_card,
        points: data.points,
        won_cards: data.won_cards.clone(),
        raising: data.raising,
        striking: data.striking,
        striking_back: data.striking_back,
        accepting_next_game_start: data.accepting_next_game_start,
    }
}

/// Own hand ordered strongest first under the running ranking.
fn sorted_hand(game: &SchafkopfGame, position: PlayerPosition) -> Vec<Card> {
    let mut hand = game.player(position).current_hand.clone();
    hand.sort_by(|a, b| compare_cards(Some(*b), Some(*a), game.game_type, game.trump_color));
    hand
}
