//! Emotion → facial geometry table.
//!
//! Every emotion resolves to exactly one mouth and one pair of brows. The
//! table is a total `match` over [`Emotion`], so adding a variant without
//! geometry fails to compile, and unknown names resolve to
//! [`Emotion::Neutral`] before they ever reach the table.

use crate::{ArcProps, Mutation, Shape, ShapeId, Transform};

// ── Layout ──────────────────────────────────────────────────────

/// Mouth anchor, relative to the face origin.
const MOUTH_X: f64 = 0.0;
const MOUTH_Y: f64 = 35.0;

/// Endpoints of the flat mouth. Arcs carry the same pair as stubs.
const MOUTH_LEFT: (f64, f64) = (-25.0, 0.0);
const MOUTH_RIGHT: (f64, f64) = (25.0, 0.0);

/// Horizontal extent of each brow.
const LEFT_BROW_X: (f64, f64) = (-40.0, -15.0);
const RIGHT_BROW_X: (f64, f64) = (15.0, 40.0);

// ── Brow heights and tilt ───────────────────────────────────────

const BROW_Y_NEUTRAL: f64 = -35.0;
const BROW_Y_RAISED: f64 = -44.0;
const BROW_Y_LOWERED: f64 = -38.0;

/// Brow rotations in degrees, `(left, right)`.
const BROWS_LEVEL: (f64, f64) = (0.0, 0.0);
const BROWS_WORRIED: (f64, f64) = (-15.0, 15.0);
const BROWS_SCOWL: (f64, f64) = (15.0, -15.0);

/// A named expressive state offered in the operator menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Emotion {
    Neutral,
    Calm,
    Happy,
    Amused,
    Nervous,
    Sad,
    Angry,
}

impl Emotion {
    /// All emotions in menu order; menu index `n` selects `ALL[n - 1]`.
    pub const ALL: [Self; 7] = [
        Self::Neutral,
        Self::Calm,
        Self::Happy,
        Self::Amused,
        Self::Nervous,
        Self::Sad,
        Self::Angry,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Calm => "calm",
            Self::Happy => "happy",
            Self::Amused => "amused",
            Self::Nervous => "nervous",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }

    /// Glyph shown next to the name in the menu.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Neutral => "😐",
            Self::Calm => "😌",
            Self::Happy => "😊",
            Self::Amused => "😄",
            Self::Nervous => "😰",
            Self::Sad => "😢",
            Self::Angry => "😠",
        }
    }

    /// Parse a name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|emotion| emotion.name().eq_ignore_ascii_case(name))
    }

    /// Like [`Emotion::from_name`], but unknown names become `Neutral`.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Neutral)
    }

    /// Map a 1-based menu index to an emotion.
    #[must_use]
    pub fn from_menu_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mouth shape for an emotion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouthGeometry {
    /// Flat segment between the default endpoints.
    Line,
    /// Arc of the given box size. Positive sweep smiles, negative frowns.
    Arc { width: f64, height: f64, sweep: f64 },
}

/// Geometry parameters for one emotion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expression {
    pub mouth: MouthGeometry,
    /// Vertical position shared by both brows.
    pub brow_y: f64,
    /// Brow rotations in degrees, `(left, right)`.
    pub brow_tilt: (f64, f64),
}

/// Geometry table.
#[must_use]
pub fn expression(emotion: Emotion) -> Expression {
    let smile = |width, height| MouthGeometry::Arc {
        width,
        height,
        sweep: 180.0,
    };
    let frown = |width, height| MouthGeometry::Arc {
        width,
        height,
        sweep: -180.0,
    };

    match emotion {
        Emotion::Neutral => Expression {
            mouth: MouthGeometry::Line,
            brow_y: BROW_Y_NEUTRAL,
            brow_tilt: BROWS_LEVEL,
        },
        Emotion::Calm => Expression {
            mouth: smile(40.0, 10.0),
            brow_y: BROW_Y_RAISED,
            brow_tilt: BROWS_LEVEL,
        },
        Emotion::Happy => Expression {
            mouth: smile(60.0, 40.0),
            brow_y: BROW_Y_RAISED,
            brow_tilt: BROWS_LEVEL,
        },
        Emotion::Amused => Expression {
            mouth: smile(70.0, 50.0),
            brow_y: BROW_Y_RAISED,
            brow_tilt: BROWS_LEVEL,
        },
        Emotion::Nervous => Expression {
            mouth: frown(40.0, 15.0),
            brow_y: BROW_Y_LOWERED,
            brow_tilt: BROWS_WORRIED,
        },
        Emotion::Sad => Expression {
            mouth: frown(45.0, 25.0),
            brow_y: BROW_Y_LOWERED,
            brow_tilt: BROWS_WORRIED,
        },
        Emotion::Angry => Expression {
            mouth: frown(55.0, 35.0),
            brow_y: BROW_Y_LOWERED,
            brow_tilt: BROWS_SCOWL,
        },
    }
}

/// Update mutations for an emotion, ordered mouth, left brow, right brow.
#[must_use]
pub fn mutations(emotion: Emotion) -> [Mutation; 3] {
    let expr = expression(emotion);
    let (left_tilt, right_tilt) = expr.brow_tilt;
    [
        Mutation::update(mouth_shape(expr.mouth)),
        Mutation::update(brow_shape(ShapeId::LeftBrow, LEFT_BROW_X, expr.brow_y, left_tilt)),
        Mutation::update(brow_shape(ShapeId::RightBrow, RIGHT_BROW_X, expr.brow_y, right_tilt)),
    ]
}

/// Mutations for an emotion given by name. Unknown names get the neutral face.
#[must_use]
pub fn mutations_for_name(name: &str) -> [Mutation; 3] {
    mutations(Emotion::resolve(name))
}

fn mouth_shape(mouth: MouthGeometry) -> Shape {
    let transform = Transform {
        x: MOUTH_X,
        y: MOUTH_Y,
        rotation: 0.0,
    };
    match mouth {
        MouthGeometry::Line => Shape::line(ShapeId::Mouth, transform, MOUTH_LEFT, MOUTH_RIGHT),
        MouthGeometry::Arc {
            width,
            height,
            sweep,
        } => Shape::arc(
            ShapeId::Mouth,
            transform,
            ArcProps {
                width,
                height,
                start_angle: 0.0,
                sweep_angle: sweep,
            },
            MOUTH_LEFT,
            MOUTH_RIGHT,
        ),
    }
}

fn brow_shape(id: ShapeId, (x1, x2): (f64, f64), y: f64, rotation: f64) -> Shape {
    let transform = Transform {
        x: 0.0,
        y: 0.0,
        rotation,
    };
    Shape::line(id, transform, (x1, y), (x2, y))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
