use crate::error::{positive, Result, SimError};
use crate::{Simulation, VehicleConfig};
use log::{trace, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source of new vehicles, run once at the end of every simulation step.
pub trait VehicleGenerator {
    /// Gives the generator the chance to add vehicles to the simulation.
    fn update(&mut self, sim: &mut Simulation);
}

/// The configuration of a [WeightedGenerator].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// The number of vehicles to generate per minute.
    pub vehicle_rate: f64,
    /// The vehicles to choose from, each with a relative weight.
    pub vehicles: Vec<(u32, VehicleConfig)>,
    /// The random seed. If `None`, the generator is seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vehicle_rate: 20.0,
            vehicles: vec![],
            seed: None,
        }
    }
}

/// Generates vehicles at a fixed rate, choosing each one at random
/// from a weighted set of templates.
///
/// A vehicle is only added when there is room for it at the start of
/// the first segment on its path; otherwise the slot is skipped.
pub struct WeightedGenerator {
    /// The time between vehicles in s.
    interval: f64,
    templates: Vec<VehicleConfig>,
    weights: WeightedIndex<u32>,
    rng: StdRng,
    /// The simulation time at which a vehicle was last added.
    last_added: f64,
    /// The index of the template to add next.
    upcoming: usize,
}

impl WeightedGenerator {
    /// Creates a new generator.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let rate = positive("vehicle_rate", config.vehicle_rate)?;
        if config.vehicles.is_empty() {
            return Err(SimError::NoVehicleTemplates);
        }
        for (_, template) in &config.vehicles {
            template.validate()?;
        }
        let weights = WeightedIndex::new(config.vehicles.iter().map(|(weight, _)| *weight))
            .map_err(|_| SimError::InvalidWeights)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let upcoming = weights.sample(&mut rng);

        Ok(Self {
            interval: 60.0 / rate,
            templates: config.vehicles.iter().map(|(_, v)| v.clone()).collect(),
            weights,
            rng,
            last_added: 0.0,
            upcoming,
        })
    }

    /// The vehicle that will be added next.
    pub fn upcoming(&self) -> &VehicleConfig {
        &self.templates[self.upcoming]
    }

    /// Whether the upcoming vehicle would start at least its minimum gap
    /// behind the rear of the last vehicle on its first segment.
    fn has_room(&self, sim: &Simulation) -> bool {
        let template = self.upcoming();
        let Some(segment) = sim.segment(template.path[0]) else {
            // Let `add_vehicle` report the bad path
            return true;
        };
        segment
            .back()
            .and_then(|id| sim.vehicle(id))
            .map_or(true, |last| {
                last.pos() - last.length() - template.pos > template.min_gap
            })
    }
}

impl VehicleGenerator for WeightedGenerator {
    fn update(&mut self, sim: &mut Simulation) {
        if sim.t() - self.last_added < self.interval {
            return;
        }

        if self.has_room(sim) {
            match sim.add_vehicle(self.upcoming()) {
                Ok(vehicle_id) => {
                    trace!("generated vehicle {vehicle_id:?} at t = {:.2} s", sim.t());
                    self.last_added = sim.t();
                }
                Err(err) => warn!("generator failed to add vehicle: {err}"),
            }
        }
        self.upcoming = self.weights.sample(&mut self.rng);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point2d;

    fn network() -> Simulation {
        let mut sim = Simulation::new();
        sim.add_segment(&[Point2d::new(0.0, 0.0), Point2d::new(500.0, 0.0)])
            .unwrap();
        sim.add_segment(&[Point2d::new(0.0, 10.0), Point2d::new(500.0, 10.0)])
            .unwrap();
        sim
    }

    fn template(segment: usize) -> VehicleConfig {
        VehicleConfig {
            path: vec![segment],
            ..Default::default()
        }
    }

    #[test]
    fn invalid_configs() {
        let config = GeneratorConfig {
            vehicles: vec![(1, template(0))],
            ..Default::default()
        };
        assert!(WeightedGenerator::new(&config).is_ok());

        let no_rate = GeneratorConfig {
            vehicle_rate: 0.0,
            ..config.clone()
        };
        assert!(matches!(
            WeightedGenerator::new(&no_rate),
            Err(SimError::InvalidParameter { .. })
        ));

        let empty = GeneratorConfig {
            vehicles: vec![],
            ..config.clone()
        };
        assert_eq!(
            WeightedGenerator::new(&empty).err(),
            Some(SimError::NoVehicleTemplates)
        );

        let zero_weights = GeneratorConfig {
            vehicles: vec![(0, template(0)), (0, template(1))],
            ..config.clone()
        };
        assert_eq!(
            WeightedGenerator::new(&zero_weights).err(),
            Some(SimError::InvalidWeights)
        );

        let no_path = GeneratorConfig {
            vehicles: vec![(1, VehicleConfig::default())],
            ..config
        };
        assert_eq!(
            WeightedGenerator::new(&no_path).err(),
            Some(SimError::EmptyPath)
        );
    }

    #[test]
    fn generates_at_rate() {
        let mut sim = network();
        // One vehicle every 3 s
        sim.add_weighted_generator(&GeneratorConfig {
            vehicle_rate: 20.0,
            vehicles: vec![(1, template(0))],
            seed: Some(7),
        })
        .unwrap();

        sim.run(170);
        assert_eq!(sim.vehicle_count(), 0);
        sim.run(20);
        assert_eq!(sim.vehicle_count(), 1);
        // The next vehicle waits until the first has cleared the entrance
        sim.run(180);
        assert_eq!(sim.vehicle_count(), 1);
        sim.run(40);
        assert_eq!(sim.vehicle_count(), 2);
    }

    #[test]
    fn waits_for_room() {
        let mut sim = network();
        let blocker = sim.add_vehicle(&template(0)).unwrap();
        sim.set_vehicle_frozen(blocker, true);

        let mut generator = WeightedGenerator::new(&GeneratorConfig {
            vehicle_rate: 60.0,
            vehicles: vec![(1, template(0))],
            seed: Some(1),
        })
        .unwrap();

        sim.run(120);
        generator.update(&mut sim);
        assert_eq!(sim.vehicle_count(), 1);

        sim.remove_vehicle(blocker);
        generator.update(&mut sim);
        assert_eq!(sim.vehicle_count(), 1);
        assert_eq!(sim.segment(0).unwrap().vehicles().len(), 1);
    }

    #[test]
    fn room_is_measured_to_rear_bumper() {
        let mut sim = network();
        let truck = sim
            .add_vehicle(&VehicleConfig {
                length: 10.0,
                pos: 9.0,
                ..template(0)
            })
            .unwrap();
        sim.set_vehicle_frozen(truck, true);

        let mut generator = WeightedGenerator::new(&GeneratorConfig {
            vehicle_rate: 60.0,
            vehicles: vec![(1, template(0))],
            seed: Some(3),
        })
        .unwrap();

        // The truck's rear is at -1 m, so a car at the entrance would overlap it
        sim.run(120);
        generator.update(&mut sim);
        assert_eq!(sim.vehicle_count(), 1);

        sim.remove_vehicle(truck);
        let truck = sim
            .add_vehicle(&VehicleConfig {
                length: 10.0,
                pos: 15.0,
                ..template(0)
            })
            .unwrap();
        sim.set_vehicle_frozen(truck, true);
        generator.update(&mut sim);
        assert_eq!(sim.vehicle_count(), 2);

        let segment = sim.segment(0).unwrap();
        let queue = segment
            .vehicles()
            .map(|id| sim.vehicle(id).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(queue[0].id(), truck);
        assert!(queue[0].pos() - queue[0].length() - queue[1].pos() >= queue[1].min_gap());
    }

    #[test]
    fn respects_weights() {
        let mut generator = WeightedGenerator::new(&GeneratorConfig {
            vehicles: vec![(0, template(0)), (1, template(1))],
            seed: Some(42),
            ..Default::default()
        })
        .unwrap();

        let mut sim = network();
        for _ in 0..5 {
            sim.run(200);
            generator.update(&mut sim);
        }
        assert!(sim.segment(0).unwrap().is_empty());
        assert!(sim.iter_vehicles().all(|veh| veh.segment() == 1));
        assert!(sim.vehicle_count() > 0);
        assert_eq!(generator.upcoming().path, vec![1]);
    }
}
