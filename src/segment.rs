use macroquad::prelude::*;

/// The three segment-local rotation axes: u about local X, v about local Y,
/// w about local Z.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    U,
    V,
    W,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::U, Axis::V, Axis::W];

    fn index(self) -> usize {
        match self {
            Axis::U => 0,
            Axis::V => 1,
            Axis::W => 2,
        }
    }
}

/// Primitive shape drawn for a segment. Construction of the actual geometry
/// lives entirely in the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    Box { half: Vec3 },
}

/// Stable handle to a segment within one skeleton.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SegmentId(pub usize);

/// One rigid piece of a creature's skeleton.
///
/// The rotational pivot sits at the end of the segment nearest the parent:
/// geometry extends along local +Z for `length`, so rotating the segment
/// sweeps its whole subtree like a limb joint rather than spinning the
/// segment about its own centroid.
#[derive(Clone, Debug)]
pub struct Segment {
    pub offset: Vec3,
    pub length: f32,
    pub shape: ShapeKind,
    pub color: Color,
    pub visible: bool,
    angles: [f32; 3],         // animated joint angles, degrees
    default_angles: [f32; 3], // rest-pose offsets, degrees, not bounded
    extents: [Option<(f32, f32)>; 3],
    world: Mat4,
    dirty: bool,
}

impl Segment {
    pub fn new(offset: Vec3, length: f32, shape: ShapeKind, color: Color) -> Self {
        Self {
            offset,
            length,
            shape,
            color,
            visible: true,
            angles: [0.0; 3],
            default_angles: [0.0; 3],
            extents: [None; 3],
            world: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.angles[axis.index()]
    }

    pub fn extent(&self, axis: Axis) -> Option<(f32, f32)> {
        self.extents[axis.index()]
    }

    /// True when the angle sits exactly on either bound of its extent.
    /// Clamping assigns the bound value itself, so float equality is exact.
    pub fn at_extent(&self, axis: Axis) -> bool {
        match self.extents[axis.index()] {
            Some((min, max)) => {
                let a = self.angles[axis.index()];
                a == min || a == max
            }
            None => false,
        }
    }

    /// Translation to the joint, then u, v, w rotations in that fixed order.
    fn local_transform(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
            * Mat4::from_rotation_x((self.default_angles[0] + self.angles[0]).to_radians())
            * Mat4::from_rotation_y((self.default_angles[1] + self.angles[1]).to_radians())
            * Mat4::from_rotation_z((self.default_angles[2] + self.angles[2]).to_radians())
    }
}

struct Node {
    seg: Segment,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-owned tree of rigid segments.
///
/// The arena exclusively owns every node; child links and the parent
/// back-reference are plain indices, and the back-reference is used only for
/// transform composition, never for lifetime.
pub struct Skeleton {
    nodes: Vec<Node>,
    roots: Vec<usize>,
    last_anchor: Mat4,
}

impl Skeleton {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            last_anchor: Mat4::IDENTITY,
        }
    }

    pub fn add_root(&mut self, seg: Segment) -> SegmentId {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            seg,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(idx);
        SegmentId(idx)
    }

    pub fn add_child(&mut self, parent: SegmentId, seg: Segment) -> SegmentId {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            seg,
            parent: Some(parent.0),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(idx);
        SegmentId(idx)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.nodes[id.0].seg
    }

    /// Record the inclusive legal range for one local axis. The current
    /// angle is clamped into the new range immediately.
    pub fn set_rotate_extent(
        &mut self,
        id: SegmentId,
        axis: Axis,
        min: f32,
        max: f32,
    ) -> Result<(), String> {
        if min > max {
            return Err(format!(
                "rotation extent min {min} exceeds max {max} on axis {axis:?}"
            ));
        }
        let seg = &mut self.nodes[id.0].seg;
        seg.extents[axis.index()] = Some((min, max));
        let clamped = seg.angles[axis.index()].clamp(min, max);
        if clamped != seg.angles[axis.index()] {
            seg.angles[axis.index()] = clamped;
            seg.dirty = true;
        }
        Ok(())
    }

    /// Rest-pose offset composed into the local transform but never bounded
    /// by the extent (used to mirror limbs).
    pub fn set_default_angle(&mut self, id: SegmentId, axis: Axis, angle: f32) {
        let seg = &mut self.nodes[id.0].seg;
        seg.default_angles[axis.index()] = angle;
        seg.dirty = true;
    }

    /// Add `delta` to the joint angle, clamping to the extent if one was
    /// configured (an axis without an extent rotates freely). Returns the new
    /// angle. Invalidates this segment's cached world transform; descendants
    /// pick up the change on the next top-down pass.
    pub fn rotate(&mut self, id: SegmentId, delta: f32, axis: Axis) -> f32 {
        let seg = &mut self.nodes[id.0].seg;
        let mut angle = seg.angles[axis.index()] + delta;
        if let Some((min, max)) = seg.extents[axis.index()] {
            angle = angle.clamp(min, max);
        }
        if angle != seg.angles[axis.index()] {
            seg.angles[axis.index()] = angle;
            seg.dirty = true;
        }
        angle
    }

    /// Recompute cached world transforms top-down from `anchor`. A node is
    /// recomputed only when it is dirty or an ancestor (or the anchor)
    /// changed, so repeated calls with unchanged state are exact no-ops.
    pub fn update_world_transforms(&mut self, anchor: Mat4) {
        let anchor_changed = self.last_anchor != anchor;
        self.last_anchor = anchor;

        let mut stack: Vec<(usize, Mat4, bool)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, anchor, anchor_changed))
            .collect();

        while let Some((idx, parent_world, parent_changed)) = stack.pop() {
            let recompute = parent_changed || self.nodes[idx].seg.dirty;
            if recompute {
                let local = self.nodes[idx].seg.local_transform();
                self.nodes[idx].seg.world = parent_world * local;
                self.nodes[idx].seg.dirty = false;
            }
            let world = self.nodes[idx].seg.world;
            for &child in self.nodes[idx].children.iter().rev() {
                stack.push((child, world, recompute));
            }
        }
    }

    /// Current cached world transform of one segment.
    pub fn world_transform(&self, id: SegmentId) -> Mat4 {
        self.nodes[id.0].seg.world
    }

    pub fn parent(&self, id: SegmentId) -> Option<SegmentId> {
        self.nodes[id.0].parent.map(SegmentId)
    }

    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (SegmentId(i), &n.seg))
    }
}
