//! Vertical flyer kinematics

use super::state::Flyer;
use crate::tuning::Tuning;

/// Result of integrating one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    /// New position committed
    Airborne,
    /// New position would leave the playfield; flyer left untouched
    Crashed,
}

/// Advance the flyer by one tick: `y += v`, then `v += g`.
///
/// An out-of-bounds result is not committed, so the flyer stays frozen at
/// its last valid position. A flyer already resting on a bound crashes
/// regardless of its velocity.
pub fn integrate(flyer: &mut Flyer, tuning: &Tuning) -> Flight {
    let floor = tuning.playfield_height - flyer.height;
    let out_of_bounds = |y: f32| y <= 0.0 || y >= floor;

    let new_y = flyer.y + flyer.velocity;
    if out_of_bounds(flyer.y) || out_of_bounds(new_y) {
        return Flight::Crashed;
    }

    flyer.y = new_y;
    flyer.velocity += tuning.gravity;
    Flight::Airborne
}
