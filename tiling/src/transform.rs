//! Rotated and flipped tile derivatives.
//!
//! Derivatives are augmented copies of a tile written next to the base tile.
//! Pixel work is delegated to [`image::DynamicImage`]; this module only
//! decides which copies exist and how they are named.
//!
//! Rotation angles are counter-clockwise: `rot_90` turns the tile a quarter
//! turn to the left, `rot_270` a quarter turn to the right.

use std::fmt;

use image::DynamicImage;

/// Counter-clockwise rotation angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 3] = [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        // image's rotate90/rotate270 turn clockwise
        match self {
            Rotation::Deg90 => image.rotate270(),
            Rotation::Deg180 => image.rotate180(),
            Rotation::Deg270 => image.rotate90(),
        }
    }
}

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipMode {
    /// Top-bottom mirror.
    Vertical,
    /// Left-right mirror.
    Horizontal,
}

impl FlipMode {
    pub fn name(&self) -> &'static str {
        match self {
            FlipMode::Vertical => "vert",
            FlipMode::Horizontal => "hor",
        }
    }

    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            FlipMode::Vertical => image.flipv(),
            FlipMode::Horizontal => image.fliph(),
        }
    }
}

/// A derived copy of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derivative {
    Rotated(Rotation),
    Flipped(FlipMode),
    /// Rotation applied to an already flipped copy.
    FlippedRotated(FlipMode, Rotation),
}

impl Derivative {
    /// Name suffix appended to the base tile identifier, without the leading
    /// underscore (e.g. `rot_90`, `flip_hor_rot_270`).
    pub fn suffix(&self) -> String {
        match self {
            Derivative::Rotated(r) => format!("rot_{}", r.degrees()),
            Derivative::Flipped(f) => format!("flip_{}", f.name()),
            Derivative::FlippedRotated(f, r) => format!("flip_{}_rot_{}", f.name(), r.degrees()),
        }
    }

    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Derivative::Rotated(r) => r.apply(image),
            Derivative::Flipped(f) => f.apply(image),
            Derivative::FlippedRotated(f, r) => r.apply(&f.apply(image)),
        }
    }
}

impl fmt::Display for Derivative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix())
    }
}

/// The derivatives written for a tile, in write order.
///
/// With both options set, only the horizontal flip gets the extra 90° and
/// 270° rotations.
pub fn derivative_plan(rotate: bool, flip: bool) -> Vec<Derivative> {
    let mut plan = Vec::with_capacity(7);
    if rotate {
        plan.extend(Rotation::ALL.iter().copied().map(Derivative::Rotated));
    }
    if flip {
        plan.push(Derivative::Flipped(FlipMode::Vertical));
        plan.push(Derivative::Flipped(FlipMode::Horizontal));
        if rotate {
            plan.push(Derivative::FlippedRotated(FlipMode::Horizontal, Rotation::Deg90));
            plan.push(Derivative::FlippedRotated(FlipMode::Horizontal, Rotation::Deg270));
        }
    }
    plan
}
