/*
Game: Schafkopf
The classic Bavarian four-player trick-taking game
BoardGameGeek: https://boardgamegeek.com/boardgame/7571/schafkopf
*/

pub mod actions;
pub mod card;
pub mod model;
pub mod rules;
mod scoring;
pub mod table;
pub mod view;

// Re-export the main types
pub use actions::{Action, ValidationCode};
pub use card::{Card, Color, Rank, DECK};
pub use model::{GameSettings, GameType, PlayerPosition, SchafkopfGame, State, Team};
pub use table::Table;
pub use view::{project, RestrictedGame, RestrictedPlayer};
