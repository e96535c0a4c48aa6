//! Forward kinematics for the humanoid: builds the world matrix of every
//! rigid part from the root transform, the joint offsets and the current
//! swing angles, and hands each one to a [`PartRenderer`].
//!
//! Every part hangs directly off the root matrix; there is no deeper
//! hierarchy. Composition is object-space first:
//!
//! ```text
//! root  = T(position) * Ry(yaw) * S(scale)
//! torso = root * S(torso)
//! head  = root * T(head_offset) * S(head)
//! limb  = root * T(offset) * T(0, +lift, 0) * Rx(swing) * T(0, -lift, 0) * S(limb)
//! ```
//!
//! The lift pair moves the rotation centre from the limb's middle to its top
//! edge, so arms hinge at the shoulder and legs at the hip.

use crate::engine::components::animator::SwingAnimator;
use crate::engine::components::character::Character;
use crate::engine::components::skeleton::{ BodyPart, JointOffsets, PartMesh, LIMB_PIVOT_LIFT };
use crate::engine::components::transform::Transform;
use crate::engine::utils::math::{
    mat4x4_identity, mat4x4_rotate_x_by, mat4x4_rotate_y_by, mat4x4_scale_by,
    mat4x4_translate_by, Mat4x4,
};

/// Draws one part. Implemented by the GL renderer and by test recorders.
pub trait PartRenderer {
    fn draw_part(&mut self, transform: &Mat4x4, color: [f32; 3], mesh: PartMesh);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPose {
    pub part: BodyPart,
    pub mesh: PartMesh,
    pub transform: Mat4x4,
    pub color: [f32; 3],
}

/// World matrices for all six parts, in [`BodyPart::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPose {
    pub parts: [PartPose; 6],
}

impl ComposedPose {
    pub fn get(&self, part: BodyPart) -> &PartPose {
        // `parts` is built from BodyPart::ALL, so the enum order is the index.
        &self.parts[part as usize]
    }

    pub fn torso(&self) -> &Mat4x4 {
        &self.get(BodyPart::Torso).transform
    }

    pub fn head(&self) -> &Mat4x4 {
        &self.get(BodyPart::Head).transform
    }

    pub fn left_arm(&self) -> &Mat4x4 {
        &self.get(BodyPart::LeftArm).transform
    }

    pub fn right_arm(&self) -> &Mat4x4 {
        &self.get(BodyPart::RightArm).transform
    }

    pub fn left_leg(&self) -> &Mat4x4 {
        &self.get(BodyPart::LeftLeg).transform
    }

    pub fn right_leg(&self) -> &Mat4x4 {
        &self.get(BodyPart::RightLeg).transform
    }
}

pub fn root_matrix(transform: &Transform) -> Mat4x4 {
    let mut root = mat4x4_identity();
    root = mat4x4_translate_by(root, transform.position);
    root = mat4x4_rotate_y_by(root, transform.yaw());
    mat4x4_scale_by(root, transform.scale)
}

/// Signed swing in degrees for a part; zero for torso and head.
pub fn swing_degrees(part: BodyPart, swing: &SwingAnimator) -> f32 {
    let angle = match part {
        BodyPart::Torso | BodyPart::Head => 0.0,
        BodyPart::LeftArm | BodyPart::RightArm => swing.arm_swing(),
        BodyPart::LeftLeg | BodyPart::RightLeg => swing.leg_swing(),
    };
    if part.is_right_side() { -angle } else { angle }
}

fn part_matrix(root: Mat4x4, part: BodyPart, joints: &JointOffsets, swing: &SwingAnimator) -> Mat4x4 {
    let mut m = root;
    if part != BodyPart::Torso {
        m = mat4x4_translate_by(m, joints.offset(part));
    }
    if part.is_limb() {
        m = mat4x4_translate_by(m, [0.0, LIMB_PIVOT_LIFT, 0.0]);
        m = mat4x4_rotate_x_by(m, swing_degrees(part, swing).to_radians());
        m = mat4x4_translate_by(m, [0.0, -LIMB_PIVOT_LIFT, 0.0]);
    }
    mat4x4_scale_by(m, part.proportions())
}

pub fn compose_pose(transform: &Transform, swing: &SwingAnimator, joints: &JointOffsets) -> ComposedPose {
    let root = root_matrix(transform);
    let parts = BodyPart::ALL.map(|part| PartPose {
        part,
        mesh: part.mesh(),
        transform: part_matrix(root, part, joints, swing),
        color: part.color(),
    });
    ComposedPose { parts }
}

/// Compose the character's current pose and draw each part once, torso
/// first, then head, arms and legs.
pub fn draw_character<R: PartRenderer + ?Sized>(character: &Character, renderer: &mut R) {
    let pose = compose_pose(character.transform(), character.animator(), character.joints());
    for part in &pose.parts {
        renderer.draw_part(&part.transform, part.color, part.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use crate::engine::components::skeleton::HUMANOID_JOINTS;
    use crate::engine::utils::math::{
        mat4x4_extract_translation, mat4x4_scale, mat4x4_transform_point, vec3_add, Vec3,
    };
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Mat4x4, [f32; 3], PartMesh)>,
    }

    impl PartRenderer for Recorder {
        fn draw_part(&mut self, transform: &Mat4x4, color: [f32; 3], mesh: PartMesh) {
            self.calls.push((*transform, color, mesh));
        }
    }

    fn assert_mat_near(actual: &Mat4x4, expected: &Mat4x4) {
        for i in 0..16 {
            assert!(
                (actual[i] - expected[i]).abs() < 1e-5,
                "element {i}: {actual:?} != {expected:?}"
            );
        }
    }

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        for i in 0..3 {
            assert!(
                (actual[i] - expected[i]).abs() < 1e-4,
                "component {i}: {actual:?} != {expected:?}"
            );
        }
    }

    fn walking_animator(t: f64) -> SwingAnimator {
        let mut swing = SwingAnimator::new();
        swing.update_swing(0.016, true, &FixedClock::new(t));
        swing
    }

    #[test]
    fn identity_root_gives_pure_scale_torso() {
        let pose = compose_pose(&Transform::identity(), &SwingAnimator::new(), &HUMANOID_JOINTS);
        assert_mat_near(pose.torso(), &mat4x4_scale(0.8, 1.5, 0.5));
    }

    #[test]
    fn head_sits_one_unit_above_root() {
        let transform = Transform::new(0.0, 1.0, 0.0);
        let pose = compose_pose(&transform, &SwingAnimator::new(), &HUMANOID_JOINTS);
        assert_vec3_near(mat4x4_extract_translation(pose.head()), [0.0, 2.0, 0.0]);
        assert_vec3_near(
            mat4x4_transform_point(pose.head(), [0.5, 0.5, 0.5]),
            [0.15, 2.2, 0.15],
        );
    }

    #[test]
    fn right_limbs_use_negated_angle() {
        let swing = walking_animator(0.3);
        assert_eq!(swing_degrees(BodyPart::RightArm, &swing), -swing_degrees(BodyPart::LeftArm, &swing));
        assert_eq!(swing_degrees(BodyPart::RightLeg, &swing), -swing_degrees(BodyPart::LeftLeg, &swing));
        assert_eq!(swing_degrees(BodyPart::Torso, &swing), 0.0);
        assert_eq!(swing_degrees(BodyPart::Head, &swing), 0.0);
    }

    #[test]
    fn opposite_limbs_mirror_through_the_body_plane() {
        let pose = compose_pose(&Transform::identity(), &walking_animator(0.3), &HUMANOID_JOINTS);
        // Hands end up mirrored in z.
        let left = mat4x4_transform_point(pose.left_arm(), [0.0, -0.5, 0.0]);
        let right = mat4x4_transform_point(pose.right_arm(), [0.0, -0.5, 0.0]);
        assert!((left[2] + right[2]).abs() < 1e-5);
        assert!((left[1] - right[1]).abs() < 1e-5);
        assert!(left[2].abs() > 0.1);
    }

    #[test_case(BodyPart::LeftArm ; "left arm")]
    #[test_case(BodyPart::RightArm ; "right arm")]
    #[test_case(BodyPart::LeftLeg ; "left leg")]
    #[test_case(BodyPart::RightLeg ; "right leg")]
    fn limb_pivot_does_not_move_with_swing(part: BodyPart) {
        let mut transform = Transform::new(2.0, 1.0, -3.0);
        transform.set_rotation([0.0, 0.7, 0.0]);
        transform.set_scale([1.5; 3]);
        let root = root_matrix(&transform);
        let pivot_local = vec3_add(HUMANOID_JOINTS.offset(part), [0.0, LIMB_PIVOT_LIFT, 0.0]);
        let pivot_world = mat4x4_transform_point(&root, pivot_local);

        // The top face centre of the unit cube, scaled by 1.5 in y, is the pivot.
        for t in [0.0, 0.1, 0.25, 0.6, 1.3] {
            let pose = compose_pose(&transform, &walking_animator(t), &HUMANOID_JOINTS);
            let top = mat4x4_transform_point(&pose.get(part).transform, [0.0, 0.5, 0.0]);
            assert_vec3_near(top, pivot_world);
        }
    }

    #[test]
    fn yaw_turns_the_whole_figure() {
        let mut transform = Transform::identity();
        transform.set_rotation([0.0, std::f32::consts::FRAC_PI_2, 0.0]);
        let pose = compose_pose(&transform, &SwingAnimator::new(), &HUMANOID_JOINTS);
        // Left arm offset (-0.6, 0, 0) rotated a quarter turn about Y.
        assert_vec3_near(mat4x4_extract_translation(pose.left_arm()), [0.0, 0.0, 0.6]);
    }

    #[test]
    fn only_yaw_is_used_from_rotation() {
        let mut tilted = Transform::identity();
        tilted.set_rotation([1.0, 0.0, 2.0]);
        let a = compose_pose(&tilted, &SwingAnimator::new(), &HUMANOID_JOINTS);
        let b = compose_pose(&Transform::identity(), &SwingAnimator::new(), &HUMANOID_JOINTS);
        assert_eq!(a, b);
    }

    #[test]
    fn draws_each_part_once_in_fixed_order() {
        let character = Character::new();
        let mut recorder = Recorder::default();
        draw_character(&character, &mut recorder);

        let meshes: Vec<_> = recorder.calls.iter().map(|(_, _, mesh)| *mesh).collect();
        assert_eq!(
            meshes,
            vec![PartMesh::Torso, PartMesh::Head, PartMesh::Arm, PartMesh::Arm, PartMesh::Leg, PartMesh::Leg]
        );
        let colors: Vec<_> = recorder.calls.iter().map(|(_, color, _)| *color).collect();
        assert_eq!(
            colors,
            vec![
                [0.0, 0.0, 1.0],
                [1.0, 0.8, 0.6],
                [1.0, 0.8, 0.6],
                [1.0, 0.8, 0.6],
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
            ]
        );
    }

    #[test]
    fn recorded_transforms_match_composed_pose() {
        let mut character = Character::new();
        character.set_position([0.0, 1.0, 0.0]);
        character.update_swing(0.016, true, &FixedClock::new(0.42));

        let mut recorder = Recorder::default();
        draw_character(&character, &mut recorder);
        let pose = compose_pose(character.transform(), character.animator(), character.joints());

        for (call, part) in recorder.calls.iter().zip(pose.parts.iter()) {
            assert_eq!(call.0, part.transform);
        }
    }
}
