pub use cgmath;
pub use error::{Result, SimError};
pub use generator::{GeneratorConfig, VehicleGenerator, WeightedGenerator};
pub use light::{LightState, TrafficLight};
pub use segment::Segment;
pub use simulation::{Simulation, DEFAULT_DT};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use vehicle::{Leader, Vehicle, VehicleConfig};

mod error;
mod generator;
mod light;
pub mod math;
mod segment;
mod simulation;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a [Vehicle].
    pub struct VehicleId;
    /// Unique ID of a [TrafficLight].
    pub struct TrafficLightId;
}

type VehicleSet = SlotMap<VehicleId, Vehicle>;
type LightSet = SlotMap<TrafficLightId, TrafficLight>;
