//! Reference and twin pose sequences.

use std::f64::consts::PI;

use twinstudio_spec::{Joint, PosePrediction};

use crate::numeric::round3;
use crate::rng::Xorshift32;

/// Joints per frame.
pub const JOINT_COUNT: usize = 53;

/// Reference position of joint `j` at `phase` in `[0, 1)`.
///
/// Joints sit on a slowly rotating ring whose radius steps with `j % 5`.
pub fn reference_joint(j: usize, phase: f64) -> Joint {
    let angle = (j as f64 / JOINT_COUNT as f64) * PI * 2.0 + phase * 0.6;
    let radius = 0.6 + (j % 5) as f64 * 0.05;
    [
        angle.cos() * radius,
        angle.sin() * radius,
        (phase * 2.0 + j as f64 * 0.1).sin() * 0.2,
    ]
}

/// Draws the pose prediction.
///
/// Per frame: one draw scales the frame noise into `[0.8, 1.4]` of `noise`,
/// then each joint takes three draws for its x, y, z perturbation.
pub fn predict(rng: &mut Xorshift32, frames: usize, noise: f64) -> PosePrediction {
    let mut reference_pose = Vec::with_capacity(frames);
    let mut twin_pose = Vec::with_capacity(frames);
    let mut confidence_radius = Vec::with_capacity(frames);

    for t in 0..frames {
        let phase = t as f64 / frames as f64;
        let frame_noise = noise * (0.8 + rng.next_unit() * 0.6);
        confidence_radius.push(round3(0.12 + frame_noise * 0.06));

        let mut reference = Vec::with_capacity(JOINT_COUNT);
        let mut twin = Vec::with_capacity(JOINT_COUNT);
        for j in 0..JOINT_COUNT {
            let [x, y, z] = reference_joint(j, phase);
            let perturbed = [
                x + rng.centered(frame_noise) * 0.12,
                y + rng.centered(frame_noise) * 0.12,
                z + rng.centered(frame_noise) * 0.08,
            ];
            reference.push([round3(x), round3(y), round3(z)]);
            twin.push(perturbed.map(round3));
        }
        reference_pose.push(reference);
        twin_pose.push(twin);
    }

    PosePrediction {
        reference_pose,
        twin_pose,
        confidence_radius,
    }
}
