use std::sync::mpsc::{channel, Receiver, Sender};

use parking_lot::Mutex;

use super::actions::{Action, ValidationCode};
use super::model::{PlayerPosition, SchafkopfGame};
use super::view::{project, RestrictedGame};

/// Serializes all mutation of one game behind a single lock and fans every
/// observable change out to the subscribed seats.
pub struct Table {
    game: Mutex<SchafkopfGame>,
    subscribers: Mutex<Vec<(PlayerPosition, Sender<RestrictedGame>)>>,
}

impl Table {
    pub fn new(game: SchafkopfGame) -> Table {
        Table {
            game: Mutex::new(game),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a seat. Every EXECUTED_CHANGES from now on delivers a fresh
    /// projection built with this seat as point of view; dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&self, position: PlayerPosition) -> Receiver<RestrictedGame> {
        let (sender, receiver) = channel();
        self.subscribers.lock().push((position, sender));
        receiver
    }

    /// Submits one action under the game lock. Rejected and buffered actions
    /// change nothing observable and stay silent; projections are built and
    /// sent after the game lock is released.
    pub fn submit(&self, action: Action) -> ValidationCode {
        let (code, snapshot) = {
            let mut game = self.game.lock();
            let code = game.submit(action);
            let snapshot = if code == ValidationCode::ExecutedChanges {
                Some(game.clone())
            } else {
                None
            };
            (code, snapshot)
        };
        if let Some(snapshot) = snapshot {
            self.broadcast(&snapshot);
        }
        code
    }

    pub fn snapshot(&self) -> SchafkopfGame {
        self.game.lock().clone()
    }

    fn broadcast(&self, game: &SchafkopfGame) {
        self.subscribers
            .lock()
            .retain(|(position, sender)| sender.send(project(game, *position)).is_ok());
    }
}
