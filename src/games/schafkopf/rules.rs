use std::cmp::Ordering;

use enum_iterator::all;
use memoize::memoize;

use super::card::{Card, Color, Rank, DECK, HAND_SIZE};
use super::model::{GameType, PlayerPosition, SchafkopfGame, State};

const COLOR_SCALE: i32 = 16;
const TRUMP_TIER: i32 = 4;
const RUN_AWAY_THRESHOLD: usize = 4;

pub fn is_high_trump(card: Card, game_type: GameType) -> bool {
    match card.rank {
        Rank::Over => game_type.elevates_over(),
        Rank::Under => game_type.elevates_under(),
        _ => false,
    }
}

pub fn is_trump(card: Card, game_type: GameType, trump_color: Option<Color>) -> bool {
    is_high_trump(card, game_type) || Some(card.color) == trump_color
}

/// Trump color derived from the running game: fixed Heart for Sauspiel, the
/// chosen color for color games, otherwise none.
pub fn trump_color_for(game_type: GameType, game_color: Option<Color>) -> Option<Color> {
    match game_type {
        GameType::Sauspiel => Some(Color::Heart),
        _ if game_type.needs_color() => game_color,
        _ => None,
    }
}

fn rank_tier(card: Card, game_type: GameType) -> i32 {
    if is_high_trump(card, game_type) {
        // Elevated ranks sort above every plain tier, Overs above Unders,
        // ordered by color among themselves.
        match card.rank {
            Rank::Over => 12 + card.color.tier(),
            _ => 8 + card.color.tier(),
        }
    } else {
        card.rank.base_tier()
    }
}

pub fn card_weight(card: Card, game_type: GameType, trump_color: Option<Color>) -> i32 {
    let color_tier = if is_trump(card, game_type, trump_color) {
        TRUMP_TIER
    } else {
        card.color.tier()
    };
    color_tier * COLOR_SCALE + rank_tier(card, game_type)
}

/// Parametric card comparison. None compares lowest; equal cards compare
/// equal. The same physical cards order differently across game types.
pub fn compare_cards(
    a: Option<Card>,
    b: Option<Card>,
    game_type: GameType,
    trump_color: Option<Color>,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            card_weight(a, game_type, trump_color).cmp(&card_weight(b, game_type, trump_color))
        }
    }
}

/// True iff second beats first in a trick: it outranks first and is either
/// trump or follows first's color. Off-color non-trump never dominates.
pub fn dominates(
    first: Card,
    second: Card,
    game_type: GameType,
    trump_color: Option<Color>,
) -> bool {
    compare_cards(Some(second), Some(first), game_type, trump_color) == Ordering::Greater
        && (is_trump(second, game_type, trump_color) || second.color == first.color)
}

/// The full deck ordered highest first under the given game parameters.
/// Memoized, there are only 45 distinct parameter pairs.
#[memoize]
pub fn ranked_deck(game_type: GameType, trump_color: Option<Color>) -> Vec<Card> {
    let mut cards = DECK.clone();
    cards.sort_by(|a, b| compare_cards(Some(*b), Some(*a), game_type, trump_color));
    cards
}

/// The Ace a Sauspiel declarer is playing with, once the color is chosen.
pub fn partner_ace(game: &SchafkopfGame) -> Option<Card> {
    if !game.game_type.is_partner_game() {
        return None;
    }
    game.game_color.map(|color| Card {
        color,
        rank: Rank::Ace,
    })
}

/// Holder of the partner Ace. Engine-side knowledge; the other players only
/// learn it when the partnership resolves.
pub fn sauspiel_mate(game: &SchafkopfGame) -> Option<PlayerPosition> {
    let ace = partner_ace(game)?;
    all::<PlayerPosition>().find(|position| game.player(*position).initial_hand.contains(&ace))
}

/// Sauspiel only: both team lists are complete once the mate surfaced.
pub fn is_partner_identified(game: &SchafkopfGame) -> bool {
    game.player_team.len() == 2
}

/// True while the running trick hunts the partner Ace: the led card is a
/// plain card of the game color, is not the Ace itself, and the partnership
/// is still open.
pub fn is_mate_searched_this_trick(game: &SchafkopfGame) -> bool {
    if !game.game_type.is_partner_game() || is_partner_identified(game) {
        return false;
    }
    let (Some(led), Some(ace)) = (game.led_card(), partner_ace(game)) else {
        return false;
    };
    Some(led.color) == game.game_color
        && !is_trump(led, game.game_type, game.trump_color)
        && led != ace
}

pub fn team_points(game: &SchafkopfGame, positions: &[PlayerPosition]) -> i32 {
    positions
        .iter()
        .map(|position| game.player(*position).points)
        .sum()
}

pub fn team_won_cards(game: &SchafkopfGame, positions: &[PlayerPosition]) -> Vec<Card> {
    positions
        .iter()
        .flat_map(|position| game.player(*position).won_cards.iter().cloned())
        .collect()
}

/// Legal cards for a position, point-of-view dependent. Empty outside PLAY.
/// Any malformed state yields an empty list instead of propagating.
pub fn available_cards(game: &SchafkopfGame, position: PlayerPosition) -> Vec<Card> {
    available_cards_inner(game, position).unwrap_or_default()
}

fn available_cards_inner(game: &SchafkopfGame, position: PlayerPosition) -> Option<Vec<Card>> {
    if game.state != State::Play {
        return Some(vec![]);
    }
    let hand = &game.player(position).current_hand;
    match game.led_card() {
        None => lead_options(game, position, hand),
        Some(led) => follow_options(game, position, hand, led),
    }
}

fn lead_options(
    game: &SchafkopfGame,
    position: PlayerPosition,
    hand: &[Card],
) -> Option<Vec<Card>> {
    let undiscovered_mate = game.game_type.is_partner_game()
        && !is_partner_identified(game)
        && sauspiel_mate(game) == Some(position);
    if !undiscovered_mate {
        return Some(hand.to_vec());
    }
    let ace = partner_ace(game)?;
    let is_callable = |card: &Card| {
        card.color == ace.color && !is_trump(*card, game.game_type, game.trump_color)
    };
    let callable_count = hand.iter().filter(|card| is_callable(card)).count();
    if callable_count >= RUN_AWAY_THRESHOLD {
        // Enough cards to run away, the mate may lead the color freely
        return Some(hand.to_vec());
    }
    Some(
        hand.iter()
            .filter(|card| !is_callable(card) || **card == ace)
            .cloned()
            .collect(),
    )
}

fn follow_options(
    game: &SchafkopfGame,
    position: PlayerPosition,
    hand: &[Card],
    led: Card,
) -> Option<Vec<Card>> {
    let game_type = game.game_type;
    let trump_color = game.trump_color;
    if is_trump(led, game_type, trump_color) {
        let trumps: Vec<Card> = hand
            .iter()
            .filter(|card| is_trump(**card, game_type, trump_color))
            .cloned()
            .collect();
        if !trumps.is_empty() {
            return Some(trumps);
        }
        return Some(mate_ace_lock(game, position, hand.to_vec()));
    }
    if is_mate_searched_this_trick(game) && sauspiel_mate(game) == Some(position) {
        let ace = partner_ace(game)?;
        if !hand.contains(&ace) {
            return None;
        }
        return Some(vec![ace]);
    }
    let followers: Vec<Card> = hand
        .iter()
        .filter(|card| card.color == led.color && !is_high_trump(**card, game_type))
        .cloned()
        .collect();
    if !followers.is_empty() {
        return Some(followers);
    }
    Some(mate_ace_lock(game, position, hand.to_vec()))
}

// An undiscovered mate with alternatives must not throw the partner Ace away.
fn mate_ace_lock(game: &SchafkopfGame, position: PlayerPosition, options: Vec<Card>) -> Vec<Card> {
    if !game.game_type.is_partner_game()
        || is_partner_identified(game)
        || sauspiel_mate(game) != Some(position)
        || game.player(position).current_hand.len() <= 1
    {
        return options;
    }
    let Some(ace) = partner_ace(game) else {
        return options;
    };
    let filtered: Vec<Card> = options.iter().filter(|card| **card != ace).cloned().collect();
    if filtered.is_empty() {
        options
    } else {
        filtered
    }
}

/// Colors a position could choose for the given candidate type.
pub fn choosable_colors(hand: &[Card], candidate: GameType) -> Vec<Color> {
    match candidate {
        GameType::Sauspiel => all::<Color>()
            .filter(|color| {
                *color != Color::Heart
                    && hand.iter().any(|card| {
                        card.color == *color && !is_high_trump(*card, GameType::Sauspiel)
                    })
                    && !hand.contains(&Card {
                        color: *color,
                        rank: Rank::Ace,
                    })
            })
            .collect(),
        GameType::Farbwenz | GameType::FarbwenzTout => all::<Color>()
            .filter(|color| hand.iter().any(|card| card.color == *color))
            .collect(),
        GameType::Solo | GameType::SoloTout => all::<Color>().collect(),
        _ => vec![],
    }
}

/// Type-level choosability: PASS always; anything else must strictly dominate
/// the standing type and be supported by the hand.
pub fn is_type_choosable(
    game: &SchafkopfGame,
    position: PlayerPosition,
    candidate: GameType,
) -> bool {
    if candidate == GameType::Pass {
        return true;
    }
    if !candidate.dominates(game.game_type) {
        return false;
    }
    let hand = &game.player(position).current_hand;
    match candidate {
        GameType::Sauspiel => !choosable_colors(hand, candidate).is_empty(),
        GameType::Si => {
            !hand.is_empty()
                && hand
                    .iter()
                    .all(|card| matches!(card.rank, Rank::Over | Rank::Under))
        }
        _ => true,
    }
}

pub fn available_game_types(game: &SchafkopfGame, position: PlayerPosition) -> Vec<GameType> {
    all::<GameType>()
        .filter(|candidate| is_type_choosable(game, position, *candidate))
        .collect()
}

pub fn expected_strike_responses(game: &SchafkopfGame) -> usize {
    if game.game_type.is_partner_game() {
        2
    } else {
        3
    }
}

/// Positions entitled to a strike response: everyone except the declarer and,
/// in partner games, the (possibly still hidden) mate.
pub fn is_strike_opponent(game: &SchafkopfGame, position: PlayerPosition) -> bool {
    if Some(position) == game.lead {
        return false;
    }
    !(game.game_type.is_partner_game() && sauspiel_mate(game) == Some(position))
}

/// Whose input the engine is currently waiting on. Drives the "waiting for"
/// display and lets autonomous participants act without probing.
pub fn awaited_positions(game: &SchafkopfGame) -> Vec<PlayerPosition> {
    match game.state {
        State::GetRaise => all::<PlayerPosition>()
            .filter(|position| game.player(*position).current_hand.len() < HAND_SIZE)
            .collect(),
        State::Choose | State::Play => game.on_turn.into_iter().collect(),
        State::Strike => all::<PlayerPosition>()
            .filter(|position| {
                is_strike_opponent(game, *position)
                    && !game
                        .strike_buffer
                        .iter()
                        .any(|(responded, _)| responded == position)
            })
            .collect(),
        State::StrikeBack => game.lead.into_iter().collect(),
        State::Finished => all::<PlayerPosition>()
            .filter(|position| !game.player(*position).accepting_next_game_start)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::schafkopf::card::card_by_id;
    use crate::games::schafkopf::model::GameSettings;

    fn card(id: &str) -> Card {
        card_by_id(id).unwrap()
    }

    fn cards(ids: &[&str]) -> Vec<Card> {
        ids.iter().map(|id| card(id)).collect()
    }

    // A few representative rule contexts
    const CONTEXTS: [(GameType, Option<Color>); 5] = [
        (GameType::Solo, Some(Color::Acorn)),
        (GameType::Sauspiel, Some(Color::Heart)),
        (GameType::Wenz, None),
        (GameType::Farbwenz, Some(Color::Bell)),
        (GameType::Pass, None),
    ];

    #[test]
    fn test_compare_is_a_strict_total_order_per_context() {
        for (game_type, trump_color) in CONTEXTS {
            for a in DECK.iter() {
                assert_eq!(
                    compare_cards(Some(*a), Some(*a), game_type, trump_color),
                    Ordering::Equal
                );
                assert_eq!(
                    compare_cards(None, Some(*a), game_type, trump_color),
                    Ordering::Less,
                    "none must rank below {}",
                    a
                );
                for b in DECK.iter() {
                    if a == b {
                        continue;
                    }
                    let forward = compare_cards(Some(*a), Some(*b), game_type, trump_color);
                    let backward = compare_cards(Some(*b), Some(*a), game_type, trump_color);
                    assert_ne!(
                        forward,
                        Ordering::Equal,
                        "{} vs {} must not tie under {:?}",
                        a,
                        b,
                        game_type
                    );
                    assert_eq!(forward, backward.reverse(), "{} vs {} not antisymmetric", a, b);
                }
            }
        }
    }

    #[test]
    fn test_compare_is_transitive() {
        // Weight-based comparison is transitive iff weights are consistent;
        // checking the full triple product keeps the property pinned down.
        for (game_type, trump_color) in CONTEXTS {
            let weights: Vec<i32> = DECK
                .iter()
                .map(|card| card_weight(*card, game_type, trump_color))
                .collect();
            for (a, wa) in weights.iter().enumerate() {
                for (b, wb) in weights.iter().enumerate() {
                    for (c, wc) in weights.iter().enumerate() {
                        if wa > wb && wb > wc {
                            assert!(
                                wa > wc,
                                "transitivity broken for {} {} {}",
                                DECK[a],
                                DECK[b],
                                DECK[c]
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_solo_ranking_top_is_overs_unders_then_trump_color() {
        let ranked = ranked_deck(GameType::Solo, Some(Color::Acorn));
        let top: Vec<String> = ranked.iter().take(14).map(|card| card.id()).collect();
        assert_eq!(
            top,
            vec![
                "eo", "go", "ho", "so", "eu", "gu", "hu", "su", "es", "e1", "ek", "e9", "e8",
                "e7"
            ]
        );
    }

    #[test]
    fn test_wenz_ranking_only_unders_are_trump() {
        let ranked = ranked_deck(GameType::Wenz, None);
        let top: Vec<String> = ranked.iter().take(4).map(|card| card.id()).collect();
        assert_eq!(top, vec!["eu", "gu", "hu", "su"]);
        // Within a color the Over drops between King and Nine
        assert!(
            compare_cards(Some(card("ek")), Some(card("eo")), GameType::Wenz, None)
                == Ordering::Greater
        );
        assert!(
            compare_cards(Some(card("eo")), Some(card("e9")), GameType::Wenz, None)
                == Ordering::Greater
        );
    }

    #[test]
    fn test_pass_ranking_has_no_trump_at_all() {
        for c in DECK.iter() {
            assert!(!is_trump(*c, GameType::Pass, None));
        }
        let ranked = ranked_deck(GameType::Pass, None);
        assert_eq!(ranked[0], card("es"));
        assert_eq!(ranked[31], card("s7"));
    }

    #[test]
    fn test_sauspiel_trump_is_heart_plus_high_trump() {
        assert_eq!(
            trump_color_for(GameType::Sauspiel, Some(Color::Acorn)),
            Some(Color::Heart)
        );
        assert!(is_trump(card("h7"), GameType::Sauspiel, Some(Color::Heart)));
        assert!(is_trump(card("so"), GameType::Sauspiel, Some(Color::Heart)));
        assert!(is_trump(card("eu"), GameType::Sauspiel, Some(Color::Heart)));
        assert!(!is_trump(card("e7"), GameType::Sauspiel, Some(Color::Heart)));
        assert_eq!(trump_color_for(GameType::Wenz, None), None);
        assert_eq!(
            trump_color_for(GameType::Solo, Some(Color::Bell)),
            Some(Color::Bell)
        );
    }

    #[test]
    fn test_dominates_is_irreflexive_and_color_bound() {
        for (game_type, trump_color) in CONTEXTS {
            for c in DECK.iter() {
                assert!(!dominates(*c, *c, game_type, trump_color));
            }
        }
        // Bell ace does not dominate a leaf lead in a solo on acorn
        assert!(!dominates(
            card("g7"),
            card("ss"),
            GameType::Solo,
            Some(Color::Acorn)
        ));
        // ...but trump does
        assert!(dominates(
            card("g7"),
            card("e7"),
            GameType::Solo,
            Some(Color::Acorn)
        ));
        // Led color, plain rank order decides
        assert!(dominates(
            card("g7"),
            card("gs"),
            GameType::Solo,
            Some(Color::Acorn)
        ));
        assert!(!dominates(
            card("gs"),
            card("g7"),
            GameType::Solo,
            Some(Color::Acorn)
        ));
    }

    fn sauspiel_game() -> SchafkopfGame {
        let mut game = SchafkopfGame::new(GameSettings::default());
        game.state = State::Play;
        game.round = 0;
        game.game_type = GameType::Sauspiel;
        game.game_color = Some(Color::Acorn);
        game.trump_color = Some(Color::Heart);
        game.lead = Some(PlayerPosition::Bottom);
        game.player_team = vec![PlayerPosition::Bottom];
        game.first_of_round = PlayerPosition::Bottom;
        game.on_turn = Some(PlayerPosition::Bottom);
        game.stack.clear();
        game
    }

    fn give(game: &mut SchafkopfGame, position: PlayerPosition, ids: &[&str]) {
        let hand = cards(ids);
        game.player_mut(position).initial_hand = hand.clone();
        game.player_mut(position).current_hand = hand;
    }

    #[test]
    fn test_follow_trump_lead_restricts_to_trump() {
        let mut game = sauspiel_game();
        give(&mut game, PlayerPosition::Bottom, &["h9"]);
        give(&mut game, PlayerPosition::Left, &["hk", "eu", "g7", "e9"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("h9"));
        game.on_turn = Some(PlayerPosition::Left);
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["hk", "eu"]));
    }

    #[test]
    fn test_follow_color_excludes_high_trump() {
        let mut game = sauspiel_game();
        // Leaf led; leaf over is trump and must not count as leaf
        game.game_color = Some(Color::Bell);
        give(&mut game, PlayerPosition::Bottom, &["g7"]);
        give(&mut game, PlayerPosition::Left, &["go", "gk", "g8", "e9"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("g7"));
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["gk", "g8"]));
    }

    #[test]
    fn test_cannot_follow_frees_whole_hand() {
        let mut game = sauspiel_game();
        game.game_color = Some(Color::Bell);
        give(&mut game, PlayerPosition::Bottom, &["g7"]);
        give(&mut game, PlayerPosition::Left, &["e9", "ek", "h7"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("g7"));
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["e9", "ek", "h7"]));
    }

    #[test]
    fn test_mate_must_play_ace_on_search_trick() {
        let mut game = sauspiel_game();
        give(&mut game, PlayerPosition::Bottom, &["e7"]);
        give(&mut game, PlayerPosition::Left, &["es", "e8", "g7", "h9"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("e7"));
        assert!(is_mate_searched_this_trick(&game));
        assert_eq!(sauspiel_mate(&game), Some(PlayerPosition::Left));
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["es"]), "mate must surrender the ace");
    }

    #[test]
    fn test_mate_keeps_ace_when_partner_known() {
        let mut game = sauspiel_game();
        give(&mut game, PlayerPosition::Bottom, &["e7"]);
        give(&mut game, PlayerPosition::Left, &["es", "e8", "g7", "h9"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("e7"));
        game.player_team = vec![PlayerPosition::Bottom, PlayerPosition::Left];
        game.opponent_team = vec![PlayerPosition::Top, PlayerPosition::Right];
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["es", "e8"]));
    }

    #[test]
    fn test_undiscovered_mate_may_not_lead_game_color_without_run_away() {
        let mut game = sauspiel_game();
        game.on_turn = Some(PlayerPosition::Left);
        game.first_of_round = PlayerPosition::Left;
        give(&mut game, PlayerPosition::Left, &["es", "e8", "e9", "g7", "h9"]);
        let options = available_cards(&game, PlayerPosition::Left);
        // Plain acorns besides the ace are withheld, the ace itself is free
        assert_eq!(options, cards(&["es", "g7", "h9"]));
    }

    #[test]
    fn test_mate_with_four_game_color_cards_runs_away() {
        let mut game = sauspiel_game();
        game.on_turn = Some(PlayerPosition::Left);
        game.first_of_round = PlayerPosition::Left;
        give(&mut game, PlayerPosition::Left, &["es", "e8", "e9", "e7", "h9"]);
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["es", "e8", "e9", "e7", "h9"]));
    }

    #[test]
    fn test_mate_ace_lock_blocks_discard() {
        let mut game = sauspiel_game();
        // Bell led, mate holds no bell: free choice but the ace stays locked
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("s7"));
        give(&mut game, PlayerPosition::Left, &["es", "g7", "h9"]);
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["g7", "h9"]));
    }

    #[test]
    fn test_mate_ace_lock_released_on_last_card() {
        let mut game = sauspiel_game();
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("s7"));
        give(&mut game, PlayerPosition::Left, &["es"]);
        let options = available_cards(&game, PlayerPosition::Left);
        assert_eq!(options, cards(&["es"]));
    }

    #[test]
    fn test_no_cards_outside_play_state() {
        let mut game = sauspiel_game();
        game.state = State::Choose;
        give(&mut game, PlayerPosition::Bottom, &["e7", "e8"]);
        assert!(available_cards(&game, PlayerPosition::Bottom).is_empty());
    }

    #[test]
    fn test_malformed_sauspiel_yields_no_cards() {
        let mut game = sauspiel_game();
        give(&mut game, PlayerPosition::Bottom, &["e7"]);
        give(&mut game, PlayerPosition::Left, &["es", "e8"]);
        game.player_mut(PlayerPosition::Bottom).played_card = Some(card("e7"));
        // Ace vanished from the mate's hand without the partnership resolving
        game.player_mut(PlayerPosition::Left).current_hand = cards(&["e8"]);
        game.player_mut(PlayerPosition::Left).initial_hand = cards(&["es", "e8"]);
        assert!(available_cards(&game, PlayerPosition::Left).is_empty());
    }

    #[test]
    fn test_choosable_colors_sauspiel() {
        // Holds acorn ace, no bell at all, a plain leaf: only leaf callable
        let hand = cards(&["es", "e7", "g8", "go", "h9", "hk", "eu", "su"]);
        assert_eq!(
            choosable_colors(&hand, GameType::Sauspiel),
            vec![Color::Leaf]
        );
        // Heart is never callable
        let hand = cards(&["h7", "h8", "h9", "hk"]);
        assert!(choosable_colors(&hand, GameType::Sauspiel).is_empty());
        // Overs and unders do not count as color support
        let hand = cards(&["go", "gu"]);
        assert!(choosable_colors(&hand, GameType::Sauspiel).is_empty());
    }

    #[test]
    fn test_choosable_colors_farbwenz_and_solo() {
        let hand = cards(&["s7", "s8"]);
        assert_eq!(
            choosable_colors(&hand, GameType::Farbwenz),
            vec![Color::Bell]
        );
        assert_eq!(choosable_colors(&hand, GameType::Solo).len(), 4);
        assert!(choosable_colors(&hand, GameType::Wenz).is_empty());
    }

    #[test]
    fn test_type_choosability_respects_dominance_and_hand() {
        let mut game = sauspiel_game();
        game.state = State::Choose;
        game.game_type = GameType::Wenz;
        give(&mut game, PlayerPosition::Top, &["e7", "e8", "g7", "g8", "h7", "h8", "s7", "s8"]);
        // Sauspiel no longer dominates a standing wenz
        assert!(!is_type_choosable(&game, PlayerPosition::Top, GameType::Sauspiel));
        assert!(is_type_choosable(&game, PlayerPosition::Top, GameType::Solo));
        assert!(is_type_choosable(&game, PlayerPosition::Top, GameType::Pass));
        assert!(!is_type_choosable(&game, PlayerPosition::Top, GameType::Si));

        give(
            &mut game,
            PlayerPosition::Right,
            &["eo", "go", "ho", "so", "eu", "gu", "hu", "su"],
        );
        assert!(is_type_choosable(&game, PlayerPosition::Right, GameType::Si));
        let types = available_game_types(&game, PlayerPosition::Right);
        assert!(types.contains(&GameType::Pass));
        assert!(types.contains(&GameType::Si));
        assert!(!types.contains(&GameType::Sauspiel));
    }

    #[test]
    fn test_awaited_positions_per_state() {
        let game = SchafkopfGame::new(GameSettings::default());
        assert_eq!(awaited_positions(&game).len(), 4, "all four must draw");

        let mut game = sauspiel_game();
        game.on_turn = Some(PlayerPosition::Top);
        assert_eq!(awaited_positions(&game), vec![PlayerPosition::Top]);

        give(&mut game, PlayerPosition::Left, &["es"]);
        game.state = State::Strike;
        // Lead and mate are out; left is the hidden mate here
        let awaited = awaited_positions(&game);
        assert_eq!(awaited, vec![PlayerPosition::Top, PlayerPosition::Right]);
        game.strike_buffer.push((PlayerPosition::Top, false));
        assert_eq!(awaited_positions(&game), vec![PlayerPosition::Right]);

        game.state = State::StrikeBack;
        assert_eq!(awaited_positions(&game), vec![PlayerPosition::Bottom]);

        game.state = State::Finished;
        game.player_mut(PlayerPosition::Bottom).accepting_next_game_start = true;
        assert_eq!(awaited_positions(&game).len(), 3);
    }

    #[test]
    fn test_expected_strike_responses() {
        let mut game = sauspiel_game();
        assert_eq!(expected_strike_responses(&game), 2);
        game.game_type = GameType::Solo;
        assert_eq!(expected_strike_responses(&game), 3);
    }
}
