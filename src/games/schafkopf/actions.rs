use enum_iterator::all;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::{card_by_id, Color, DEAL_PACKET, HAND_SIZE};
use super::model::{ChosenGame, GameType, PlayerPosition, SchafkopfGame, State, PLAYER_COUNT};
use super::rules::{
    available_cards, choosable_colors, dominates, expected_strike_responses,
    is_mate_searched_this_trick, is_partner_identified, is_strike_opponent, is_type_choosable,
    partner_ace, sauspiel_mate, trump_color_for,
};
use super::scoring;

/// Outcome of submitting an action. VALIDATION_SUCCESS never leaves the
/// engine, every other variant is part of the wire contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    ValidationSuccess,
    ExecutedChanges,
    ExecutedNochanges,
    TurnNotonturn,
    IdInvalid,
    StateWrong,
    CardNotallowed,
    ChooseColornotallowed,
    ChooseTypenotallowed,
    GetHandfull,
    RaiseAlreadyraised,
    RaiseToomuchcards,
    StrikeAlreadystruck,
    StrikeNotopponent,
    StrikebackAlreadystruckback,
    StrikebackNotplayer,
    StartnextAlreadyaccepting,
    RequiredDataCorrupt,
}

/// One submittable action. The payload names the acting position; dispatch is
/// a single exhaustive match in validate/execute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Choose {
        position: PlayerPosition,
        game_type: GameType,
        color: Option<Color>,
    },
    GetCards {
        position: PlayerPosition,
    },
    PlayCard {
        position: PlayerPosition,
        card_id: String,
    },
    Raise {
        position: PlayerPosition,
    },
    Strike {
        position: PlayerPosition,
        response: bool,
    },
    StrikeBack {
        position: PlayerPosition,
        response: bool,
    },
    StartNextGame {
        position: PlayerPosition,
    },
}

impl Action {
    pub fn position(&self) -> PlayerPosition {
        match self {
            Action::Choose { position, .. }
            | Action::GetCards { position }
            | Action::PlayCard { position, .. }
            | Action::Raise { position }
            | Action::Strike { position, .. }
            | Action::StrikeBack { position, .. }
            | Action::StartNextGame { position } => *position,
        }
    }
}

// A missing required relation during execute. Caught at the submit boundary
// and downgraded to REQUIRED_DATA_CORRUPT; partial mutation is not rolled
// back.
#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct Fault(pub(crate) &'static str);

impl SchafkopfGame {
    /// The single mutation entry point: validate, then execute. Rejections
    /// return their code without touching any state.
    pub fn submit(&mut self, action: Action) -> ValidationCode {
        let code = self.validate(&action);
        if code != ValidationCode::ValidationSuccess {
            debug!("rejected {:?}: {:?}", action, code);
            return code;
        }
        match self.execute(&action) {
            Ok(code) => {
                self.last_action = Some(action);
                code
            }
            Err(fault) => {
                warn!("corrupt data while executing {:?}: {}", action, fault);
                ValidationCode::RequiredDataCorrupt
            }
        }
    }

    fn validate(&self, action: &Action) -> ValidationCode {
        match action {
            Action::Choose {
                position,
                game_type,
                color,
            } => self.validate_choose(*position, *game_type, *color),
            Action::GetCards { position } => self.validate_get_cards(*position),
            Action::PlayCard { position, card_id } => self.validate_play_card(*position, card_id),
            Action::Raise { position } => self.validate_raise(*position),
            Action::Strike { position, .. } => self.validate_strike(*position),
            Action::StrikeBack { position, .. } => self.validate_strike_back(*position),
            Action::StartNextGame { position } => self.validate_start_next_game(*position),
        }
    }

    fn execute(&mut self, action: &Action) -> Result<ValidationCode, Fault> {
        match action {
            Action::Choose {
                position,
                game_type,
                color,
            } => self.execute_choose(*position, *game_type, *color),
            Action::GetCards { position } => self.execute_get_cards(*position),
            Action::PlayCard { position, card_id } => self.execute_play_card(*position, card_id),
            Action::Raise { position } => self.execute_raise(*position),
            Action::Strike { position, response } => self.execute_strike(*position, *response),
            Action::StrikeBack { position, response } => {
                self.execute_strike_back(*position, *response)
            }
            Action::StartNextGame { position } => self.execute_start_next_game(*position),
        }
    }

    fn validate_get_cards(&self, position: PlayerPosition) -> ValidationCode {
        if self.state != State::GetRaise {
            return ValidationCode::StateWrong;
        }
        if self.player(position).current_hand.len() + DEAL_PACKET > HAND_SIZE {
            return ValidationCode::GetHandfull;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_get_cards(&mut self, position: PlayerPosition) -> Result<ValidationCode, Fault> {
        if self.stack.len() < DEAL_PACKET {
            return Err(Fault("dealing from an exhausted stack"));
        }
        let packet: Vec<_> = self.stack.drain(..DEAL_PACKET).collect();
        let player = self.player_mut(position);
        player.current_hand.extend(packet.iter().cloned());
        player.initial_hand.extend(packet);
        if self.stack.is_empty() {
            self.state = State::Choose;
            self.on_turn = Some(self.first_of_game);
        }
        Ok(ValidationCode::ExecutedChanges)
    }

    fn validate_raise(&self, position: PlayerPosition) -> ValidationCode {
        if self.state != State::GetRaise {
            return ValidationCode::StateWrong;
        }
        if self.player(position).raising {
            return ValidationCode::RaiseAlreadyraised;
        }
        if self.player(position).current_hand.len() > DEAL_PACKET {
            return ValidationCode::RaiseToomuchcards;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_raise(&mut self, position: PlayerPosition) -> Result<ValidationCode, Fault> {
        self.player_mut(position).raising = true;
        self.charge.initial_multiplier += 1;
        Ok(ValidationCode::ExecutedChanges)
    }

    fn validate_choose(
        &self,
        position: PlayerPosition,
        game_type: GameType,
        color: Option<Color>,
    ) -> ValidationCode {
        if self.state != State::Choose {
            return ValidationCode::StateWrong;
        }
        if self.on_turn != Some(position) {
            return ValidationCode::TurnNotonturn;
        }
        if !is_type_choosable(self, position, game_type) {
            return ValidationCode::ChooseTypenotallowed;
        }
        if game_type.needs_color() {
            let allowed = choosable_colors(&self.player(position).current_hand, game_type);
            match color {
                Some(color) if allowed.contains(&color) => {}
                _ => return ValidationCode::ChooseColornotallowed,
            }
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_choose(
        &mut self,
        position: PlayerPosition,
        game_type: GameType,
        color: Option<Color>,
    ) -> Result<ValidationCode, Fault> {
        let color = if game_type.needs_color() { color } else { None };
        self.player_mut(position).chosen_game = Some(ChosenGame { game_type, color });
        if game_type.dominates(self.game_type) {
            self.game_type = game_type;
            self.game_color = color;
            self.lead = Some(position);
        }
        if self
            .players
            .iter()
            .all(|player| player.chosen_game.is_some())
        {
            self.finish_choosing()?;
        } else {
            self.on_turn = Some(position.next());
        }
        Ok(ValidationCode::ExecutedChanges)
    }

    /// Start-of-game manipulations once all four bids are in.
    fn finish_choosing(&mut self) -> Result<(), Fault> {
        if self.game_type == GameType::Pass {
            scoring::score_all_pass(self);
            self.state = State::Finished;
            self.on_turn = None;
            return Ok(());
        }
        let lead = self.lead.ok_or(Fault("running game without a declarer"))?;
        self.trump_color = trump_color_for(self.game_type, self.game_color);
        self.player_team = vec![lead];
        if !self.game_type.is_partner_game() {
            self.opponent_team = all::<PlayerPosition>()
                .filter(|other| *other != lead)
                .collect();
        }
        self.round = 0;
        self.first_of_round = self.first_of_game;
        self.on_turn = Some(self.first_of_round);
        self.state = State::Play;
        Ok(())
    }

    fn validate_play_card(&self, position: PlayerPosition, card_id: &str) -> ValidationCode {
        if self.state != State::Play {
            return ValidationCode::StateWrong;
        }
        if self.on_turn != Some(position) {
            return ValidationCode::TurnNotonturn;
        }
        let Some(card) = card_by_id(card_id) else {
            return ValidationCode::IdInvalid;
        };
        if !available_cards(self, position).contains(&card) {
            return ValidationCode::CardNotallowed;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_play_card(
        &mut self,
        position: PlayerPosition,
        card_id: &str,
    ) -> Result<ValidationCode, Fault> {
        let card = card_by_id(card_id).ok_or(Fault("unresolvable card id"))?;
        let hand = &mut self.player_mut(position).current_hand;
        let held = hand
            .iter()
            .position(|held| *held == card)
            .ok_or(Fault("played card missing from hand"))?;
        hand.remove(held);
        self.player_mut(position).played_card = Some(card);
        if self.game_type.is_partner_game()
            && !is_partner_identified(self)
            && partner_ace(self) == Some(card)
        {
            self.resolve_partner(position)?;
        }
        if self.round == 0 && !self.strike_resolved {
            // The first card of the game opens the strike window
            self.state = State::Strike;
            self.on_turn = None;
            return Ok(ValidationCode::ExecutedChanges);
        }
        if self.current_trick().len() == PLAYER_COUNT {
            self.resolve_trick()?;
        } else {
            self.on_turn = Some(position.next());
        }
        Ok(ValidationCode::ExecutedChanges)
    }

    fn resolve_partner(&mut self, mate: PlayerPosition) -> Result<(), Fault> {
        let lead = self.lead.ok_or(Fault("partner game without a declarer"))?;
        if mate == lead {
            return Err(Fault("declarer cannot be their own mate"));
        }
        self.player_team = vec![lead, mate];
        self.opponent_team = all::<PlayerPosition>()
            .filter(|other| *other != lead && *other != mate)
            .collect();
        Ok(())
    }

    fn resolve_trick(&mut self) -> Result<(), Fault> {
        let trick = self.current_trick();
        if trick.len() != PLAYER_COUNT {
            return Err(Fault("resolving an incomplete trick"));
        }
        let (mut winner, mut winning_card) = trick[0];
        for (position, card) in &trick[1..] {
            if dominates(winning_card, *card, self.game_type, self.trump_color) {
                winner = *position;
                winning_card = *card;
            }
        }
        let points: i32 = trick.iter().map(|(_, card)| card.points()).sum();
        // Evaluated before the table clears: a completed search trick without
        // the Ace means the mate led it and ran away.
        let ran_away = is_mate_searched_this_trick(self);
        {
            let player = self.player_mut(winner);
            player.points += points;
            player.won_cards.extend(trick.iter().map(|(_, card)| *card));
        }
        self.last_trick = trick;
        self.last_trick_winner = Some(winner);
        for player in self.players.iter_mut() {
            player.played_card = None;
        }
        if ran_away {
            let mate = sauspiel_mate(self).ok_or(Fault("search trick without an ace holder"))?;
            self.resolve_partner(mate)?;
        }
        self.round += 1;
        self.first_of_round = winner;
        self.on_turn = Some(winner);
        if self.round >= HAND_SIZE as i32 {
            scoring::score_finished(self)?;
            self.state = State::Finished;
            self.on_turn = None;
        }
        Ok(())
    }

    fn validate_strike(&self, position: PlayerPosition) -> ValidationCode {
        if self.state != State::Strike {
            return ValidationCode::StateWrong;
        }
        if !is_strike_opponent(self, position) {
            return ValidationCode::StrikeNotopponent;
        }
        if self
            .strike_buffer
            .iter()
            .any(|(responded, _)| *responded == position)
        {
            return ValidationCode::StrikeAlreadystruck;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_strike(
        &mut self,
        position: PlayerPosition,
        response: bool,
    ) -> Result<ValidationCode, Fault> {
        self.strike_buffer.push((position, response));
        if self.strike_buffer.len() < expected_strike_responses(self) {
            // Buffered, nothing observable yet
            return Ok(ValidationCode::ExecutedNochanges);
        }
        let lead = self.lead.ok_or(Fault("strike window without a declarer"))?;
        let striker = lead
            .next()
            .ring()
            .iter()
            .find(|candidate| {
                self.strike_buffer
                    .iter()
                    .any(|(responded, response)| responded == *candidate && *response)
            })
            .cloned();
        self.strike_buffer.clear();
        self.strike_resolved = true;
        match striker {
            Some(striker) => {
                self.player_mut(striker).striking = true;
                self.charge.strike_multiplier += 1;
                self.state = State::StrikeBack;
                self.on_turn = Some(lead);
            }
            None => self.return_to_play(),
        }
        Ok(ValidationCode::ExecutedChanges)
    }

    fn validate_strike_back(&self, position: PlayerPosition) -> ValidationCode {
        if self.state != State::StrikeBack {
            return ValidationCode::StateWrong;
        }
        if self.lead != Some(position) {
            return ValidationCode::StrikebackNotplayer;
        }
        if self.player(position).striking_back {
            return ValidationCode::StrikebackAlreadystruckback;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_strike_back(
        &mut self,
        position: PlayerPosition,
        response: bool,
    ) -> Result<ValidationCode, Fault> {
        if response {
            self.player_mut(position).striking_back = true;
            self.charge.strike_multiplier += 1;
        }
        self.return_to_play();
        Ok(ValidationCode::ExecutedChanges)
    }

    /// Back to the interrupted trick: on-turn is first-of-round advanced past
    /// the cards already on the table.
    fn return_to_play(&mut self) {
        let played = self.current_trick().len();
        let mut position = self.first_of_round;
        for _ in 0..played {
            position = position.next();
        }
        self.state = State::Play;
        self.on_turn = Some(position);
    }

    fn validate_start_next_game(&self, position: PlayerPosition) -> ValidationCode {
        if self.state != State::Finished {
            return ValidationCode::StateWrong;
        }
        if self.player(position).accepting_next_game_start {
            return ValidationCode::StartnextAlreadyaccepting;
        }
        ValidationCode::ValidationSuccess
    }

    fn execute_start_next_game(
        &mut self,
        position: PlayerPosition,
    ) -> Result<ValidationCode, Fault> {
        self.player_mut(position).accepting_next_game_start = true;
        if self
            .players
            .iter()
            .all(|player| player.accepting_next_game_start)
        {
            self.reset_for_next_hand();
        }
        Ok(ValidationCode::ExecutedChanges)
    }
}
