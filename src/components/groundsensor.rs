//! Ground contact counter.
//!
//! A [`GroundSensor`] sits on a small trigger volume under the player's feet.
//! Every solid collider entering the volume increments the counter and every
//! one leaving decrements it. The player is grounded while at least one
//! contact remains.

use bevy_ecs::prelude::Component;
use log::warn;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GroundSensor {
    contacts: i32,
}

impl GroundSensor {
    pub fn new() -> Self {
        Self { contacts: 0 }
    }

    pub fn on_enter(&mut self) {
        self.contacts += 1;
    }

    /// Counter saturates at zero on an unmatched exit.
    pub fn on_exit(&mut self) {
        if self.contacts == 0 {
            warn!("Ground sensor exit without matching enter; counter kept at zero");
            return;
        }
        self.contacts -= 1;
    }

    pub fn contacts(&self) -> i32 {
        self.contacts
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_sequence_returns_to_zero() {
        let mut s = GroundSensor::new();
        s.on_enter();
        s.on_enter();
        assert!(s.is_grounded());
        s.on_exit();
        assert!(s.is_grounded());
        s.on_exit();
        assert_eq!(s.contacts(), 0);
        assert!(!s.is_grounded());
    }

    #[test]
    fn unbalanced_exit_saturates() {
        let mut s = GroundSensor::new();
        s.on_exit();
        assert_eq!(s.contacts(), 0);
        s.on_enter();
        assert!(s.is_grounded());
    }
}
