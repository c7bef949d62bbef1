use crate::error::{non_negative, positive, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A two-phase traffic light guarding a stop line on a single segment.
#[derive(Clone, Debug)]
pub struct TrafficLight {
    /// The offset of the light along its segment in m.
    position: f64,
    /// The current state.
    state: LightState,
    /// The duration of each phase in s.
    cycle_time: f64,
    /// The time since the current phase began in s.
    time_elapsed: f64,
}

/// The state of a traffic light.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightState {
    Red,
    Green,
}

impl TrafficLight {
    /// Creates a new traffic light, which starts red.
    ///
    /// # Parameters
    /// * `position` - The offset along the owning segment in m.
    /// * `cycle_time` - The duration of both the red and green phase in s.
    pub fn new(position: f64, cycle_time: f64) -> Result<Self> {
        Ok(Self {
            position: non_negative("position", position)?,
            state: LightState::Red,
            cycle_time: positive("cycle_time", cycle_time)?,
            time_elapsed: 0.0,
        })
    }

    /// Advances the light's timer by `dt` seconds, switching phase
    /// once the current phase has lasted `cycle_time`.
    /// Time in excess of the phase boundary is discarded.
    pub fn update(&mut self, dt: f64) {
        self.time_elapsed += dt;
        if self.time_elapsed >= self.cycle_time {
            self.time_elapsed = 0.0;
            self.state = match self.state {
                LightState::Red => LightState::Green,
                LightState::Green => LightState::Red,
            };
        }
    }

    /// Whether the light is currently red.
    pub fn is_red(&self) -> bool {
        self.state == LightState::Red
    }

    /// The current state of the light.
    pub fn state(&self) -> LightState {
        self.state
    }

    /// The offset of the light along its segment in m.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// The duration of each phase in s.
    pub fn cycle_time(&self) -> f64 {
        self.cycle_time
    }

    /// The time spent in the current phase in s.
    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SimError;

    #[test]
    fn starts_red() {
        let light = TrafficLight::new(100.0, 10.0).unwrap();
        assert!(light.is_red());
        assert_eq!(light.time_elapsed(), 0.0);
    }

    #[test]
    fn toggles_each_cycle() {
        let mut light = TrafficLight::new(0.0, 1.0).unwrap();
        for _ in 0..3 {
            light.update(0.25);
        }
        assert_eq!(light.state(), LightState::Red);
        light.update(0.25);
        assert_eq!(light.state(), LightState::Green);
        for _ in 0..4 {
            light.update(0.25);
        }
        assert_eq!(light.state(), LightState::Red);
    }

    #[test]
    fn overshoot_is_discarded() {
        let mut light = TrafficLight::new(0.0, 10.0).unwrap();
        light.update(9.0);
        light.update(2.5);
        assert_eq!(light.state(), LightState::Green);
        assert_eq!(light.time_elapsed(), 0.0);

        // The new phase lasts a full cycle, not `cycle_time - 1.5`.
        light.update(9.0);
        assert_eq!(light.state(), LightState::Green);
        light.update(1.0);
        assert_eq!(light.state(), LightState::Red);
    }

    #[test]
    fn invalid_cycle_time() {
        assert_eq!(
            TrafficLight::new(5.0, 0.0).unwrap_err(),
            SimError::InvalidParameter {
                name: "cycle_time",
                value: 0.0
            }
        );
        assert!(TrafficLight::new(5.0, -1.0).is_err());
        assert!(TrafficLight::new(-5.0, 1.0).is_err());
    }
}
