/// The smallest bumper-to-bumper gap the car following law will divide by, in m.
const MIN_NET_DIST: f64 = 0.01; // m

/// The acceleration model of a vehicle, an Intelligent Driver Model.
#[derive(Clone, Debug)]
pub struct AccelerationModel {
    min_gap: f64,
    headway: f64,
    max_vel: f64,
    max_acc: f64,
    /// `2 * sqrt(max_acc * comf_dec)`, cached.
    sqrt_ab: f64,
}

/// The parameters of the acceleration model.
pub struct ModelParams {
    /// The minimum bumper-to-bumper gap to keep to the vehicle ahead in m.
    pub min_gap: f64,
    /// The desired gap between this and the vehicle ahead in seconds.
    pub time_headway: f64,
    /// The desired velocity in m/s.
    pub max_velocity: f64,
    /// The vehicle's maximum acceleration in m/s<sup>2</sup>.
    pub max_acceleration: f64,
    /// The comfortable deceleration in m/s<sup>2</sup>, a positive number.
    pub comf_deceleration: f64,
}

impl AccelerationModel {
    /// Creates a new acceleration model.
    pub fn new(params: &ModelParams) -> Self {
        AccelerationModel {
            min_gap: params.min_gap,
            headway: params.time_headway,
            max_vel: params.max_velocity,
            max_acc: params.max_acceleration,
            sqrt_ab: 2.0 * (params.max_acceleration * params.comf_deceleration).sqrt(),
        }
    }

    /// The minimum gap to the vehicle ahead in m.
    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    /// The desired velocity in m/s.
    pub fn max_vel(&self) -> f64 {
        self.max_vel
    }

    /// Computes the vehicle's acceleration.
    ///
    /// # Arguments
    /// * `my_vel` - The velocity of the simulated vehicle (m/s).
    /// * `lead` - The gap to the rear of the vehicle ahead (m) and its velocity (m/s),
    ///   or `None` on a free road.
    pub fn acc(&self, my_vel: f64, lead: Option<(f64, f64)>) -> f64 {
        let alpha = match lead {
            Some((net_dist, their_vel)) => self.interaction(net_dist, my_vel, their_vel),
            None => 0.0,
        };
        self.max_acc * (1.0 - (my_vel / self.max_vel).powi(4) - alpha * alpha)
    }

    /// The ratio of the desired gap to the actual gap.
    fn interaction(&self, net_dist: f64, my_vel: f64, their_vel: f64) -> f64 {
        let appr = my_vel - their_vel;
        let ss = self.min_gap + f64::max(0.0, self.headway * my_vel + appr * my_vel / self.sqrt_ab);
        if net_dist < MIN_NET_DIST {
            log::warn!("car following gap {net_dist:.3} m clamped to {MIN_NET_DIST} m");
            ss / MIN_NET_DIST
        } else {
            ss / net_dist
        }
    }
}
