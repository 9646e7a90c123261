//! Deferred, cancellable scene transition.
//!
//! Armed by a [`LevelCompleteEvent`](crate::events::levelcomplete::LevelCompleteEvent)
//! and counted down by
//! [`scene_transition_timer`](crate::systems::scene::scene_transition_timer).

use bevy_ecs::prelude::Resource;
use log::{debug, info};

use super::scene::SceneStates;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Armed {
    target: SceneStates,
    remaining: f32,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingTransition {
    armed: Option<Armed>,
}

impl PendingTransition {
    /// Schedule `target` after `delay` seconds. Returns false if a transition
    /// is already pending, in which case the existing one is kept.
    pub fn arm(&mut self, target: SceneStates, delay: f32) -> bool {
        if self.armed.is_some() {
            debug!("Transition already pending, ignoring request for {:?}", target);
            return false;
        }
        info!("Scene transition to {:?} in {:.1}s", target, delay);
        self.armed = Some(Armed {
            target,
            remaining: delay.max(0.0),
        });
        true
    }

    pub fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            info!("Cancelled scene transition to {:?}", armed.target);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn remaining(&self) -> Option<f32> {
        self.armed.map(|a| a.remaining)
    }

    /// Advance by `dt`. Returns the target once the delay has elapsed and
    /// disarms.
    pub fn tick(&mut self, dt: f32) -> Option<SceneStates> {
        let armed = self.armed.as_mut()?;
        armed.remaining -= dt;
        if armed.remaining <= 0.0 {
            let target = armed.target;
            self.armed = None;
            Some(target)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut t = PendingTransition::default();
        assert!(t.arm(SceneStates::Menu, 1.0));
        assert_eq!(t.tick(0.6), None);
        assert_eq!(t.tick(0.6), Some(SceneStates::Menu));
        assert!(!t.is_armed());
        assert_eq!(t.tick(1.0), None);
    }

    #[test]
    fn second_arm_is_ignored() {
        let mut t = PendingTransition::default();
        t.arm(SceneStates::Menu, 1.0);
        assert!(!t.arm(SceneStates::Quitting, 0.1));
        assert_eq!(t.tick(0.5), None);
        assert_eq!(t.tick(0.5), Some(SceneStates::Menu));
    }

    #[test]
    fn cancel_disarms() {
        let mut t = PendingTransition::default();
        t.arm(SceneStates::Menu, 0.5);
        t.cancel();
        assert_eq!(t.tick(1.0), None);
        assert_eq!(t.remaining(), None);
    }
}
