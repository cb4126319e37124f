//! Shared wire model for the `ai-face.v1` display protocol.
//!
//! This crate owns the JSON representation pushed to the face display
//! service: shapes, the mutations that replace them, and the envelope that
//! carries a batch of mutations. The [`catalog`] module maps each [`Emotion`]
//! to the geometry sent for it. Nothing here performs I/O.

pub mod catalog;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub use catalog::{Emotion, Expression, MouthGeometry, expression, mutations, mutations_for_name};

/// Schema tag carried by every envelope.
pub const SCHEMA: &str = "ai-face.v1";

/// Message type tag for a batch of shape mutations.
pub const APPLY_MUTATIONS: &str = "apply_mutations";

/// Error returned by [`decode_envelope`] and the encode helpers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text was not valid JSON for an envelope.
    #[error("invalid envelope JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The `schema` field named a protocol version we do not speak.
    #[error("unsupported schema: {0}")]
    Schema(String),
    /// The `type` field named a message we do not build.
    #[error("unsupported message type: {0}")]
    MessageType(String),
}

/// Facial feature targeted by a shape or mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeId {
    /// `"mouth"`.
    Mouth,
    /// `"left_brow"`, on the viewer's left.
    LeftBrow,
    /// `"right_brow"`, on the viewer's right.
    RightBrow,
}

/// Geometric primitive used to draw a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Arc,
}

/// Offset and rotation applied to a shape, in display units and degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Stroke styling for a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: "#000000".to_owned(),
            stroke_width: 4.0,
            opacity: 1.0,
        }
    }
}

/// Arc-only properties. Angles are in degrees; a negative sweep draws a frown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcProps {
    pub width: f64,
    pub height: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

/// Type-specific shape properties.
///
/// Line endpoints are always present, arcs included, so every shape has the
/// same base field set on the wire. Arc fields appear only on arcs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeProps {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(flatten)]
    pub arc: Option<ArcProps>,
}

/// Full description of one facial feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub transform: Transform,
    pub style: Style,
    pub props: ShapeProps,
}

impl Shape {
    /// Straight segment from `(x1, y1)` to `(x2, y2)`.
    #[must_use]
    pub fn line(
        id: ShapeId,
        transform: Transform,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
    ) -> Self {
        Self {
            id,
            kind: ShapeKind::Line,
            transform,
            style: Style::default(),
            props: ShapeProps {
                x1,
                y1,
                x2,
                y2,
                arc: None,
            },
        }
    }

    /// Arc carrying stub line endpoints alongside its arc properties.
    #[must_use]
    pub fn arc(
        id: ShapeId,
        transform: Transform,
        arc: ArcProps,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
    ) -> Self {
        Self {
            id,
            kind: ShapeKind::Arc,
            transform,
            style: Style::default(),
            props: ShapeProps {
                x1,
                y1,
                x2,
                y2,
                arc: Some(arc),
            },
        }
    }
}

/// Operation applied by a mutation. The display also knows `add` and
/// `remove`, but this client only ever replaces existing features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationOp {
    Update,
}

/// Instruction to replace the shape named by `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// What to do with the target shape.
    pub op: MutationOp,
    /// Target shape; always equal to `shape.id`.
    pub id: ShapeId,
    /// Replacement shape.
    pub shape: Shape,
}

impl Mutation {
    /// Replace the shape whose id matches `shape.id`.
    #[must_use]
    pub fn update(shape: Shape) -> Self {
        Self {
            op: MutationOp::Update,
            id: shape.id,
            shape,
        }
    }
}

/// Body of an `apply_mutations` envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Applied by the display in order.
    pub mutations: Vec<Mutation>,
}

/// Top-level message sent to the display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Always [`SCHEMA`].
    pub schema: String,
    /// Always [`APPLY_MUTATIONS`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Milliseconds since the Unix epoch when the envelope was built.
    pub ts: i64,
    pub payload: Payload,
}

impl Envelope {
    /// Build the `apply_mutations` envelope for an emotion, stamped now.
    #[must_use]
    pub fn apply_mutations(emotion: Emotion) -> Self {
        Self::apply_mutations_at(emotion, now_ms())
    }

    /// Same as [`Envelope::apply_mutations`] with an explicit timestamp.
    #[must_use]
    pub fn apply_mutations_at(emotion: Emotion, ts: i64) -> Self {
        Self {
            schema: SCHEMA.to_owned(),
            kind: APPLY_MUTATIONS.to_owned(),
            ts,
            payload: Payload {
                mutations: mutations(emotion).into(),
            },
        }
    }
}

/// Serialize an envelope to compact JSON text, as sent on the wire.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_envelope(envelope: &Envelope) -> Result<String, CodecError> {
    Ok(serde_json::to_string(envelope)?)
}

/// Serialize an envelope to indented JSON text for operator display.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_envelope_pretty(envelope: &Envelope) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// Parse envelope JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text, [`CodecError::Schema`]
/// for a foreign schema tag and [`CodecError::MessageType`] for any type
/// other than `apply_mutations`.
pub fn decode_envelope(text: &str) -> Result<Envelope, CodecError> {
    let envelope = serde_json::from_str::<Envelope>(text)?;
    if envelope.schema != SCHEMA {
        return Err(CodecError::Schema(envelope.schema));
    }
    if envelope.kind != APPLY_MUTATIONS {
        return Err(CodecError::MessageType(envelope.kind));
    }
    Ok(envelope)
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
