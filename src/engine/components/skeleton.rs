use crate::engine::utils::math::Vec3;

/// Height of the limb pivot above the limb's centre, before part scaling.
pub const LIMB_PIVOT_LIFT: f32 = 0.75;

pub const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
pub const SKIN: [f32; 3] = [1.0, 0.8, 0.6];
pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

/// Mesh a part is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartMesh {
    Torso,
    Head,
    Arm,
    Leg,
}

impl PartMesh {
    pub const ALL: [PartMesh; 4] = [PartMesh::Torso, PartMesh::Head, PartMesh::Arm, PartMesh::Leg];
}

/// Rigid parts of the humanoid, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Torso,
        BodyPart::Head,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    pub fn mesh(self) -> PartMesh {
        match self {
            BodyPart::Torso => PartMesh::Torso,
            BodyPart::Head => PartMesh::Head,
            BodyPart::LeftArm | BodyPart::RightArm => PartMesh::Arm,
            BodyPart::LeftLeg | BodyPart::RightLeg => PartMesh::Leg,
        }
    }

    pub fn color(self) -> [f32; 3] {
        match self {
            BodyPart::Torso => BLUE,
            BodyPart::Head | BodyPart::LeftArm | BodyPart::RightArm => SKIN,
            BodyPart::LeftLeg | BodyPart::RightLeg => BLACK,
        }
    }

    /// Scale applied to the unit cube for this part.
    pub fn proportions(self) -> Vec3 {
        match self {
            BodyPart::Torso => [0.8, 1.5, 0.5],
            BodyPart::Head => [0.3, 0.4, 0.3],
            BodyPart::LeftArm | BodyPart::RightArm => [0.2, 1.5, 0.2],
            BodyPart::LeftLeg | BodyPart::RightLeg => [0.3, 1.5, 0.3],
        }
    }

    pub fn is_limb(self) -> bool {
        !matches!(self, BodyPart::Torso | BodyPart::Head)
    }

    /// Right-side limbs swing in opposite phase to the left.
    pub fn is_right_side(self) -> bool {
        matches!(self, BodyPart::RightArm | BodyPart::RightLeg)
    }
}

/// Attachment points of each part relative to the root, before scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointOffsets {
    pub head: Vec3,
    pub left_arm: Vec3,
    pub right_arm: Vec3,
    pub left_leg: Vec3,
    pub right_leg: Vec3,
}

/// The one joint layout every figure shares.
pub const HUMANOID_JOINTS: JointOffsets = JointOffsets {
    head: [0.0, 1.0, 0.0],
    left_arm: [-0.6, 0.0, 0.0],
    right_arm: [0.6, 0.0, 0.0],
    left_leg: [-0.3, -1.0, 0.0],
    right_leg: [0.3, -1.0, 0.0],
};

impl JointOffsets {
    /// The torso sits on the root, so its offset is zero.
    pub fn offset(&self, part: BodyPart) -> Vec3 {
        match part {
            BodyPart::Torso => [0.0, 0.0, 0.0],
            BodyPart::Head => self.head,
            BodyPart::LeftArm => self.left_arm,
            BodyPart::RightArm => self.right_arm,
            BodyPart::LeftLeg => self.left_leg,
            BodyPart::RightLeg => self.right_leg,
        }
    }
}
