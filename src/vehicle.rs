use self::acceleration::{AccelerationModel, ModelParams};
use crate::error::{non_negative, positive, Result, SimError};
use crate::{TrafficLight, VehicleId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod acceleration;

/// A simulated vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's ID
    id: VehicleId,
    /// The vehicle's length in m.
    length: f64,
    /// The acceleration model
    model: AccelerationModel,
    /// The indices of the segments the vehicle will traverse.
    path: Vec<usize>,
    /// The index into `path` of the segment the vehicle is on.
    current_road_index: usize,
    /// The longitudinal position of the front of the vehicle along its segment, in m.
    pos: f64,
    /// The velocity in m/s.
    vel: f64,
    /// The acceleration in m/s<sup>2</sup>, applied during the next update.
    acc: f64,
    /// Whether the vehicle was held at a standstill during the last update.
    stopped: bool,
    /// Whether the vehicle is being held by the caller.
    frozen: bool,
}

/// The configuration of a new vehicle.
///
/// Any field left at its default takes the value of [VehicleConfig::default].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleConfig {
    /// The vehicle length in m.
    pub length: f64,
    /// The minimum gap to the vehicle ahead in m.
    pub min_gap: f64,
    /// The desired time headway to the vehicle ahead in s.
    pub time_headway: f64,
    /// The desired velocity in m/s.
    pub max_vel: f64,
    /// The maximum acceleration of the vehicle, in m/s^2.
    pub max_acc: f64,
    /// The comfortable deceleration of the vehicle, a positive number in m/s^2.
    pub comf_dec: f64,
    /// The indices of the segments to traverse, in order.
    pub path: Vec<usize>,
    /// The initial position along the first segment, in m.
    pub pos: f64,
    /// The initial velocity in m/s.
    pub vel: f64,
    /// The initial acceleration in m/s^2.
    pub acc: f64,
}

/// The state of a vehicle as seen by the vehicle following it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leader {
    /// The position of the leader's front bumper in m.
    pub pos: f64,
    /// The leader's velocity in m/s.
    pub vel: f64,
    /// The leader's length in m.
    pub length: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            length: 4.0,
            min_gap: 4.0,
            time_headway: 1.0,
            max_vel: 16.6,
            max_acc: 1.44,
            comf_dec: 4.61,
            path: vec![],
            pos: 0.0,
            vel: 0.0,
            acc: 0.0,
        }
    }
}

impl VehicleConfig {
    /// Checks that the physical parameters describe a drivable vehicle.
    /// This does not check the path against a network.
    pub fn validate(&self) -> Result<()> {
        positive("length", self.length)?;
        non_negative("min_gap", self.min_gap)?;
        non_negative("time_headway", self.time_headway)?;
        positive("max_vel", self.max_vel)?;
        positive("max_acc", self.max_acc)?;
        positive("comf_dec", self.comf_dec)?;
        non_negative("pos", self.pos)?;
        non_negative("vel", self.vel)?;
        if !self.acc.is_finite() {
            return Err(SimError::InvalidParameter {
                name: "acc",
                value: self.acc,
            });
        }
        if self.path.is_empty() {
            return Err(SimError::EmptyPath);
        }
        Ok(())
    }
}

impl Vehicle {
    /// Creates a new vehicle from a validated configuration.
    pub(crate) fn new(id: VehicleId, config: &VehicleConfig) -> Self {
        Self {
            id,
            length: config.length,
            model: AccelerationModel::new(&ModelParams {
                min_gap: config.min_gap,
                time_headway: config.time_headway,
                max_velocity: config.max_vel,
                max_acceleration: config.max_acc,
                comf_deceleration: config.comf_dec,
            }),
            path: config.path.clone(),
            current_road_index: 0,
            pos: config.pos,
            vel: config.vel,
            acc: config.acc,
            stopped: false,
            frozen: false,
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The vehicle's length in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The minimum gap the vehicle keeps to the vehicle ahead in m.
    pub fn min_gap(&self) -> f64 {
        self.model.min_gap()
    }

    /// The vehicle's desired velocity in m/s.
    pub fn max_vel(&self) -> f64 {
        self.model.max_vel()
    }

    /// The longitudinal position of the front of the vehicle along its segment in m.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// The vehicle's velocity in m/s.
    pub fn vel(&self) -> f64 {
        self.vel
    }

    /// The vehicle's acceleration in m/s^2.
    pub fn acc(&self) -> f64 {
        self.acc
    }

    /// Whether the vehicle was held at a standstill by a red light,
    /// a stationary vehicle immediately ahead, or by being frozen.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether the vehicle is frozen. [Read more](crate::Simulation::set_vehicle_frozen).
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The segments the vehicle will traverse.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The index into [Self::path] of the segment the vehicle is on.
    pub fn current_road_index(&self) -> usize {
        self.current_road_index
    }

    /// The index of the segment the vehicle is on.
    pub fn segment(&self) -> usize {
        self.path[self.current_road_index]
    }

    /// The vehicle's state as seen from behind.
    pub fn as_leader(&self) -> Leader {
        Leader {
            pos: self.pos,
            vel: self.vel,
            length: self.length,
        }
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Advances the vehicle by one time step.
    ///
    /// # Parameters
    /// * `lead` - The vehicle immediately ahead on the same segment, if any
    /// * `dt` - The time step in seconds
    /// * `light` - The traffic light on the vehicle's segment, if any
    pub fn update(&mut self, lead: Option<Leader>, dt: f64, light: Option<&TrafficLight>) {
        self.stopped = self.frozen || self.stops_for_light(light) || self.blocked_by(lead);
        if self.stopped {
            self.vel = 0.0;
            self.acc = 0.0;
            return;
        }

        self.integrate(dt, lead);

        let lead = lead.map(|lead| (lead.pos - self.pos - lead.length, lead.vel));
        self.acc = self.model.acc(self.vel, lead);
    }

    /// Whether a red light lies ahead within the vehicle's minimum gap.
    fn stops_for_light(&self, light: Option<&TrafficLight>) -> bool {
        light.map_or(false, |light| {
            light.is_red()
                && self.pos <= light.position()
                && self.pos + self.min_gap() >= light.position()
        })
    }

    /// Whether a stationary vehicle ahead is closer than the minimum gap.
    fn blocked_by(&self, lead: Option<Leader>) -> bool {
        lead.map_or(false, |lead| {
            lead.vel == 0.0 && lead.pos - self.pos < self.min_gap()
        })
    }

    /// Integrates the vehicle's velocity and position.
    /// The vehicle never moves past the front of its leader.
    fn integrate(&mut self, dt: f64, lead: Option<Leader>) {
        if self.vel + self.acc * dt < 0.0 {
            // Come to rest within the step instead of reversing
            self.pos -= 0.5 * self.vel * self.vel / self.acc;
            self.vel = 0.0;
        } else {
            self.vel += self.acc * dt;
            self.pos += f64::max(self.vel * dt + 0.5 * self.acc * dt * dt, 0.0);
        }
        if let Some(lead) = lead {
            self.pos = self.pos.min(lead.pos);
        }
    }

    /// Moves the vehicle to the start of the next segment on its path.
    /// Returns the index of that segment, or `None` if the path is complete.
    pub(crate) fn advance(&mut self) -> Option<usize> {
        self.pos = 0.0;
        if self.current_road_index + 1 < self.path.len() {
            self.current_road_index += 1;
            Some(self.path[self.current_road_index])
        } else {
            None
        }
    }
}
