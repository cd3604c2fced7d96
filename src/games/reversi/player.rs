//! Player identity records.

use super::types::{Color, Slot};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A participant: fixed slot, optional display name, current color.
///
/// The name is `None` until someone joins the slot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Fixed identity within the match.
    slot: Slot,
    /// Display name.
    name: Option<String>,
    /// Color currently played. Exchanged on rematch.
    color: Color,
}

impl Player {
    /// Creates a player record.
    #[instrument]
    pub fn create(slot: Slot, color: Color, name: Option<String>) -> Self {
        Self { slot, name, color }
    }

    /// Sets the display name.
    #[instrument(skip(self), fields(slot = %self.slot))]
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Swaps to the other color.
    #[instrument(skip(self), fields(slot = %self.slot))]
    pub fn flip_color(&mut self) {
        self.color = self.color.opposite();
        debug!(color = %self.color, "Player color flipped");
    }

    /// Returns true once a name is attached.
    pub fn is_joined(&self) -> bool {
        self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_color_and_name() {
        let mut player = Player::create(Slot::B, Color::White, None);
        assert!(!player.is_joined());
        player.set_name("Ada".to_string());
        player.flip_color();
        assert_eq!(player.name().as_deref(), Some("Ada"));
        assert_eq!(*player.color(), Color::Black);
        assert_eq!(*player.slot(), Slot::B);
    }
}
