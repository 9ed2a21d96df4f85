use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use super::actions::Action;
use super::card::{shuffled_stack, Card, Color};

pub const PLAYER_COUNT: usize = 4;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Sequence,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum PlayerPosition {
    #[default]
    Bottom = 0,
    Left = 1,
    Top = 2,
    Right = 3,
}

impl PlayerPosition {
    pub fn next(&self) -> PlayerPosition {
        match self {
            PlayerPosition::Bottom => PlayerPosition::Left,
            PlayerPosition::Left => PlayerPosition::Top,
            PlayerPosition::Top => PlayerPosition::Right,
            PlayerPosition::Right => PlayerPosition::Bottom,
        }
    }

    pub fn previous(&self) -> PlayerPosition {
        match self {
            PlayerPosition::Bottom => PlayerPosition::Right,
            PlayerPosition::Left => PlayerPosition::Bottom,
            PlayerPosition::Top => PlayerPosition::Left,
            PlayerPosition::Right => PlayerPosition::Top,
        }
    }

    pub fn idx(&self) -> usize {
        *self as usize
    }

    /// All four positions in seating order starting at self.
    pub fn ring(&self) -> [PlayerPosition; PLAYER_COUNT] {
        let mut positions = [*self; PLAYER_COUNT];
        for idx in 1..PLAYER_COUNT {
            positions[idx] = positions[idx - 1].next();
        }
        positions
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Sequence,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum GameType {
    #[default]
    Pass = 0,
    Sauspiel = 1,
    Farbwenz = 2,
    Wenz = 3,
    Solo = 4,
    FarbwenzTout = 5,
    WenzTout = 6,
    SoloTout = 7,
    Si = 8,
}

impl GameType {
    pub fn weight(&self) -> i32 {
        *self as i32
    }

    pub fn dominates(&self, other: GameType) -> bool {
        self.weight() > other.weight()
    }

    pub fn is_partner_game(&self) -> bool {
        matches!(self, GameType::Sauspiel)
    }

    // "Tout": the bidder promises to take every trick
    pub fn is_exclusive(&self) -> bool {
        matches!(
            self,
            GameType::FarbwenzTout | GameType::WenzTout | GameType::SoloTout | GameType::Si
        )
    }

    pub fn needs_color(&self) -> bool {
        matches!(
            self,
            GameType::Sauspiel
                | GameType::Farbwenz
                | GameType::Solo
                | GameType::FarbwenzTout
                | GameType::SoloTout
        )
    }

    pub fn is_wenz_family(&self) -> bool {
        matches!(
            self,
            GameType::Wenz | GameType::Farbwenz | GameType::WenzTout | GameType::FarbwenzTout
        )
    }

    /// Overs are permanent high trump in the Solo/Sauspiel family.
    pub fn elevates_over(&self) -> bool {
        matches!(self, GameType::Sauspiel | GameType::Solo | GameType::SoloTout)
    }

    /// Unders are permanent high trump everywhere except Pass and Si.
    pub fn elevates_under(&self) -> bool {
        self.elevates_over() || self.is_wenz_family()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum State {
    #[default]
    GetRaise, // players draw their packets and may raise
    Choose,
    Play,
    Strike,
    StrikeBack,
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    PlayerTeam,
    OpponentTeam,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StockDisposition {
    #[default]
    Ignore,
    PayIn,
    PayOut,
    Double,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub basic_charge: i32,
    pub bounty: i32,
    pub exclusive_multiplier: i32,
    pub initial_multiplier: i32,
    pub strike_multiplier: i32,
    pub schneider: i32,
    pub stock_disposition: StockDisposition,
    pub stock_value: i32,
    pub total_charge: i32,
}

impl Charge {
    pub fn total_multiplier(&self) -> i32 {
        1 << (self.exclusive_multiplier + self.initial_multiplier + self.strike_multiplier)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub basic_charge: i32,
    pub start_credit: i32,
    pub player_names: [String; PLAYER_COUNT],
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            basic_charge: 10,
            start_credit: 1000,
            player_names: [
                "Bottom".to_string(),
                "Left".to_string(),
                "Top".to_string(),
                "Right".to_string(),
            ],
        }
    }
}

/// A player's recorded bid: what they chose when it was their turn to bid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ChosenGame {
    pub game_type: GameType,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub name: String,
    pub credit: i32,
    pub current_hand: Vec<Card>,
    pub initial_hand: Vec<Card>,
    pub chosen_game: Option<ChosenGame>,
    pub played_card: Option<Card>,
    pub points: i32,
    pub won_cards: Vec<Card>,
    pub raising: bool,
    pub striking: bool,
    pub striking_back: bool,
    pub accepting_next_game_start: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SchafkopfGame {
    pub settings: GameSettings,
    pub players: [PlayerData; PLAYER_COUNT],
    pub stack: Vec<Card>,
    pub state: State,
    // Strike responses keyed by position, engine-private until resolved
    pub strike_buffer: Vec<(PlayerPosition, bool)>,
    pub lead: Option<PlayerPosition>,
    pub first_of_game: PlayerPosition,
    pub first_of_round: PlayerPosition,
    pub on_turn: Option<PlayerPosition>,
    pub round: i32, // -1 before play, 0..7 during tricks, 8 once scored
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
    pub resumed: bool,
    pub strike_resolved: bool,
    pub next_stack: Option<Vec<Card>>,
}

impl SchafkopfGame {
    pub fn new(settings: GameSettings) -> Self {
        Self::new_with_stack(settings, shuffled_stack())
    }

    pub fn new_with_stack(settings: GameSettings, stack: Vec<Card>) -> Self {
        let mut game = SchafkopfGame {
            stack,
            round: -1,
            charge: Charge {
                basic_charge: settings.basic_charge,
                ..Default::default()
            },
            settings,
            ..Default::default()
        };
        for idx in 0..PLAYER_COUNT {
            game.players[idx].name = game.settings.player_names[idx].clone();
            game.players[idx].credit = game.settings.start_credit;
        }
        game
    }

    /// Rebuilds a game from a persisted snapshot and marks it resumed.
    pub fn resume(snapshot: &str) -> serde_json::Result<Self> {
        let mut game: SchafkopfGame = serde_json::from_str(snapshot)?;
        game.resumed = true;
        Ok(game)
    }

    pub fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Predefined stack for the next hand, consumed by the StartNextGame
    /// re-initialization instead of shuffling.
    pub fn queue_next_stack(&mut self, stack: Vec<Card>) {
        self.next_stack = Some(stack);
    }

    pub fn player(&self, position: PlayerPosition) -> &PlayerData {
        &self.players[position.idx()]
    }

    pub fn player_mut(&mut self, position: PlayerPosition) -> &mut PlayerData {
        &mut self.players[position.idx()]
    }

    /// Cards of the running trick in play order, starting at first-of-round.
    pub fn current_trick(&self) -> Vec<(PlayerPosition, Card)> {
        self.first_of_round
            .ring()
            .iter()
            .filter_map(|position| {
                self.player(*position)
                    .played_card
                    .map(|card| (*position, card))
            })
            .collect()
    }

    pub fn led_card(&self) -> Option<Card> {
        self.current_trick().first().map(|(_, card)| *card)
    }

    /// Every card the game currently tracks: stack, hands, table, won piles.
    /// The last-trick echo is not counted, its cards sit in a won pile.
    pub fn card_census(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.stack.clone();
        for player in &self.players {
            cards.extend(player.current_hand.iter().cloned());
            cards.extend(player.played_card.iter().cloned());
            cards.extend(player.won_cards.iter().cloned());
        }
        cards
    }

    /// Wholesale re-initialization for the next hand. Names, credits and the
    /// stock persist; the first player advances one seat.
    pub fn reset_for_next_hand(&mut self) {
        self.stack = self
            .next_stack
            .take()
            .unwrap_or_else(shuffled_stack);
        for player in self.players.iter_mut() {
            player.current_hand.clear();
            player.initial_hand.clear();
            player.chosen_game = None;
            player.played_card = None;
            player.points = 0;
            player.won_cards.clear();
            player.raising = false;
            player.striking = false;
            player.striking_back = false;
            player.accepting_next_game_start = false;
        }
        self.state = State::GetRaise;
        self.strike_buffer.clear();
        self.lead = None;
        self.first_of_game = self.first_of_game.next();
        self.first_of_round = self.first_of_game;
        self.on_turn = None;
        self.round = -1;
        self.game_type = GameType::Pass;
        self.game_color = None;
        self.trump_color = None;
        self.last_trick.clear();
        self.last_trick_winner = None;
        self.player_team.clear();
        self.opponent_team.clear();
        self.winner_team = None;
        self.charge = Charge {
            basic_charge: self.settings.basic_charge,
            ..Default::default()
        };
        self.resumed = false;
        self.strike_resolved = false;
    }
}
