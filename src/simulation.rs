use crate::error::{positive, Result, SimError};
use crate::generator::{GeneratorConfig, VehicleGenerator, WeightedGenerator};
use crate::light::TrafficLight;
use crate::math::{CubicBezier2d, ParametricCurve2d, Point2d, Polyline, QuadraticBezier2d};
use crate::segment::Segment;
use crate::vehicle::{Vehicle, VehicleConfig};
use crate::{LightSet, TrafficLightId, VehicleId, VehicleSet};
use log::{debug, trace};

/// The default time step, in s.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// A traffic simulation.
pub struct Simulation {
    /// The segments in the network, addressed by index.
    segments: Vec<Segment>,
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// The traffic lights.
    lights: LightSet,
    /// The vehicle generators, run once per step.
    generators: Vec<Box<dyn VehicleGenerator>>,
    /// The simulated time in s.
    t: f64,
    /// The number of steps simulated.
    frame_count: usize,
    /// The time step in s.
    dt: f64,
    /// The number of vehicles which have completed their path.
    exited: usize,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            segments: vec![],
            vehicles: VehicleSet::with_key(),
            lights: LightSet::with_key(),
            generators: vec![],
            t: 0.0,
            frame_count: 0,
            dt: DEFAULT_DT,
            exited: 0,
        }
    }
}

impl Simulation {
    /// Creates a new simulation with a time step of [DEFAULT_DT].
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new simulation with the given time step in s.
    ///
    /// For a realistic simulation, do not use a time step greater than around 0.2.
    pub fn with_dt(dt: f64) -> Result<Self> {
        Ok(Self {
            dt: positive("dt", dt)?,
            ..Default::default()
        })
    }

    /// Adds a straight or piecewise straight segment through the given points.
    /// Returns the index of the new segment.
    pub fn add_segment(&mut self, points: &[Point2d]) -> Result<usize> {
        Ok(self.push_segment(Polyline::new(points)?))
    }

    /// Adds a segment following the given curve.
    pub fn add_segment_from_curve(&mut self, curve: &impl ParametricCurve2d) -> Result<usize> {
        Ok(self.push_segment(Polyline::from_curve(curve)?))
    }

    /// Adds a segment following a quadratic bezier curve.
    pub fn add_quadratic_bezier(
        &mut self,
        start: Point2d,
        control: Point2d,
        end: Point2d,
    ) -> Result<usize> {
        self.add_segment_from_curve(&QuadraticBezier2d::new(&[start, control, end]))
    }

    /// Adds a segment following a cubic bezier curve.
    pub fn add_cubic_bezier(
        &mut self,
        start: Point2d,
        control_1: Point2d,
        control_2: Point2d,
        end: Point2d,
    ) -> Result<usize> {
        self.add_segment_from_curve(&CubicBezier2d::new(&[start, control_1, control_2, end]))
    }

    fn push_segment(&mut self, geometry: Polyline) -> usize {
        let index = self.segments.len();
        debug!("segment {index} added, length {:.2} m", geometry.length());
        self.segments.push(Segment::new(geometry));
        index
    }

    /// Adds a traffic light to a segment.
    ///
    /// # Parameters
    /// * `segment` - The index of the segment; it must not already have a light.
    /// * `position` - The offset of the light along the segment in m.
    /// * `cycle_time` - The duration of each phase in s.
    pub fn add_traffic_light(
        &mut self,
        segment: usize,
        position: f64,
        cycle_time: f64,
    ) -> Result<TrafficLightId> {
        let count = self.segments.len();
        let seg = self
            .segments
            .get_mut(segment)
            .ok_or(SimError::UnknownSegment {
                index: segment,
                count,
            })?;
        if seg.light().is_some() {
            return Err(SimError::SegmentHasLight(segment));
        }
        if position > seg.length() {
            return Err(SimError::LightOutOfRange {
                position,
                length: seg.length(),
            });
        }

        let light_id = self.lights.insert(TrafficLight::new(position, cycle_time)?);
        seg.set_light(light_id);
        debug!("traffic light added to segment {segment} at {position:.2} m");
        Ok(light_id)
    }

    /// Adds a vehicle to the back of the first segment on its path.
    ///
    /// Vehicles placed on the same segment at explicit positions
    /// must be added front-most first.
    pub fn add_vehicle(&mut self, config: &VehicleConfig) -> Result<VehicleId> {
        config.validate()?;
        let count = self.segments.len();
        if let Some(&index) = config.path.iter().find(|idx| **idx >= count) {
            return Err(SimError::UnknownSegment { index, count });
        }

        let vehicle_id = self
            .vehicles
            .insert_with_key(|id| Vehicle::new(id, config));
        self.segments[config.path[0]].add_vehicle(vehicle_id);
        debug!("vehicle {vehicle_id:?} added on path {:?}", config.path);
        Ok(vehicle_id)
    }

    /// Removes a vehicle from the simulation.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<Vehicle> {
        let vehicle = self.vehicles.remove(id)?;
        self.segments[vehicle.segment()].remove_vehicle(id);
        Some(vehicle)
    }

    /// Adds a vehicle generator, which is run at the end of every step.
    pub fn add_generator(&mut self, generator: impl VehicleGenerator + 'static) {
        self.generators.push(Box::new(generator));
    }

    /// Adds a [WeightedGenerator] built from the given configuration.
    pub fn add_weighted_generator(&mut self, config: &GeneratorConfig) -> Result<()> {
        let generator = WeightedGenerator::new(config)?;
        debug!(
            "generator added, {} vehicles/min from {} templates",
            config.vehicle_rate,
            config.vehicles.len()
        );
        self.add_generator(generator);
        Ok(())
    }

    /// Sets the `frozen` attribute of a vehicle. A frozen vehicle
    /// stops immediately and stays stopped until it is no longer frozen.
    pub fn set_vehicle_frozen(&mut self, vehicle_id: VehicleId, frozen: bool) {
        if let Some(vehicle) = self.vehicles.get_mut(vehicle_id) {
            vehicle.set_frozen(frozen);
        }
    }

    /// Gets the `frozen` attribute of a vehicle. [Read more](Self::set_vehicle_frozen).
    pub fn vehicle_frozen(&self, vehicle_id: VehicleId) -> bool {
        self.vehicles
            .get(vehicle_id)
            .map_or(false, Vehicle::is_frozen)
    }

    /// Advances the simulation by one time step.
    pub fn step(&mut self) {
        self.update_vehicles();
        self.update_lights();
        self.advance_vehicles();
        self.update_generators();
        self.t += self.dt;
        self.frame_count += 1;
    }

    /// Advances the simulation by `steps` time steps.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// The simulated time in s.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// The number of steps simulated so far.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The time step in s.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The number of vehicles that have reached the end of their path
    /// and left the simulation.
    pub fn exited_count(&self) -> usize {
        self.exited
    }

    /// The number of vehicles in the simulation.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Gets the segment with the given index.
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// The segments in the network, in the order they were added.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Gets a reference to the vehicle with the given ID.
    pub fn vehicle(&self, vehicle_id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    /// Returns an iterator over all the vehicles in the simulation.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Gets a reference to the traffic light with the given ID.
    pub fn traffic_light(&self, light_id: TrafficLightId) -> Option<&TrafficLight> {
        self.lights.get(light_id)
    }

    /// Returns an iterator over all the traffic lights in the simulation.
    pub fn iter_lights(&self) -> impl Iterator<Item = (TrafficLightId, &TrafficLight)> {
        self.lights.iter()
    }

    /// The world coordinates of the front of a vehicle.
    pub fn vehicle_position(&self, vehicle_id: VehicleId) -> Option<Point2d> {
        let vehicle = self.vehicles.get(vehicle_id)?;
        Some(self.segments[vehicle.segment()].point_at(vehicle.pos()))
    }

    /// Applies the car following model to every vehicle, front to back
    /// along each segment, so that each vehicle sees its leader's new state.
    fn update_vehicles(&mut self) {
        for segment in &self.segments {
            let light = segment.light().map(|id| &self.lights[id]);
            let mut lead = None;
            for vehicle_id in segment.vehicles() {
                let vehicle = &mut self.vehicles[vehicle_id];
                vehicle.update(lead, self.dt, light);
                lead = Some(vehicle.as_leader());
            }
        }
    }

    /// Updates the traffic lights.
    fn update_lights(&mut self) {
        for (_, light) in &mut self.lights {
            light.update(self.dt);
        }
    }

    /// Moves the front vehicle of each segment onto its next segment once it
    /// reaches the end, or removes it from the simulation if its path is complete.
    fn advance_vehicles(&mut self) {
        for idx in 0..self.segments.len() {
            let Some(vehicle_id) = self.segments[idx].front() else {
                continue;
            };
            let vehicle = &mut self.vehicles[vehicle_id];
            if vehicle.pos() < self.segments[idx].length() {
                continue;
            }

            self.segments[idx].pop_front();
            match vehicle.advance() {
                Some(next) => {
                    trace!("vehicle {vehicle_id:?} moved from segment {idx} to {next}");
                    self.segments[next].add_vehicle(vehicle_id);
                }
                None => {
                    debug!("vehicle {vehicle_id:?} completed its path on segment {idx}");
                    self.vehicles.remove(vehicle_id);
                    self.exited += 1;
                }
            }
        }
    }

    /// Runs the vehicle generators.
    fn update_generators(&mut self) {
        let mut generators = std::mem::take(&mut self.generators);
        for generator in &mut generators {
            generator.update(self);
        }
        // Keep any generators added while the others were running
        generators.append(&mut self.generators);
        self.generators = generators;
    }
}
