use crate::math::{Point2d, Polyline};
use crate::{TrafficLightId, VehicleId};
use std::collections::VecDeque;

/// A single lane of road along which vehicles queue in order.
#[derive(Clone, Debug)]
pub struct Segment {
    /// The geometry of the segment.
    geometry: Polyline,
    /// The vehicles on the segment, front-most (closest to the exit) first.
    vehicles: VecDeque<VehicleId>,
    /// The traffic light on the segment, if there is one.
    light: Option<TrafficLightId>,
}

impl Segment {
    /// Creates a new, empty segment.
    pub(crate) fn new(geometry: Polyline) -> Self {
        Self {
            geometry,
            vehicles: VecDeque::new(),
            light: None,
        }
    }

    /// Gets the length of the segment in m.
    pub fn length(&self) -> f64 {
        self.geometry.length()
    }

    /// The world coordinates of the point `pos` metres along the segment.
    pub fn point_at(&self, pos: f64) -> Point2d {
        self.geometry.point_at(pos)
    }

    /// The vehicles on the segment, front-most first.
    pub fn vehicles(&self) -> impl ExactSizeIterator<Item = VehicleId> + '_ {
        self.vehicles.iter().copied()
    }

    /// The vehicle closest to the end of the segment.
    pub fn front(&self) -> Option<VehicleId> {
        self.vehicles.front().copied()
    }

    /// The vehicle closest to the start of the segment.
    pub fn back(&self) -> Option<VehicleId> {
        self.vehicles.back().copied()
    }

    /// Whether there are no vehicles on the segment.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// The traffic light on the segment.
    pub fn light(&self) -> Option<TrafficLightId> {
        self.light
    }

    pub(crate) fn set_light(&mut self, light: TrafficLightId) {
        self.light = Some(light);
    }

    /// Appends a vehicle to the back of the queue.
    pub(crate) fn add_vehicle(&mut self, id: VehicleId) {
        self.vehicles.push_back(id);
    }

    /// Removes the vehicle at the front of the queue.
    pub(crate) fn pop_front(&mut self) -> Option<VehicleId> {
        self.vehicles.pop_front()
    }

    /// Removes the vehicle with the given ID from the segment.
    pub(crate) fn remove_vehicle(&mut self, id: VehicleId) {
        if let Some(idx) = self.vehicles.iter().position(|v| *v == id) {
            self.vehicles.remove(idx);
        }
    }
}
