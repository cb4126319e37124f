use super::*;
use crate::ShapeKind;

fn arc_of(mutation: &Mutation) -> ArcProps {
    mutation.shape.props.arc.expect("mouth should be an arc")
}

#[test]
fn every_emotion_yields_mouth_then_brows() {
    for emotion in Emotion::ALL {
        let ids = mutations(emotion).map(|m| m.id);
        assert_eq!(
            ids,
            [ShapeId::Mouth, ShapeId::LeftBrow, ShapeId::RightBrow],
            "{emotion}"
        );
    }
}

#[test]
fn mutation_id_matches_shape_id() {
    for emotion in Emotion::ALL {
        for mutation in mutations(emotion) {
            assert_eq!(mutation.id, mutation.shape.id);
            assert_eq!(mutation.op, crate::MutationOp::Update);
        }
    }
}

#[test]
fn mutations_are_deterministic() {
    for emotion in Emotion::ALL {
        assert_eq!(mutations(emotion), mutations(emotion));
    }
}

#[test]
fn unknown_name_falls_back_to_neutral() {
    let neutral = mutations(Emotion::Neutral);
    assert_eq!(mutations_for_name("bewildered"), neutral);
    assert_eq!(mutations_for_name(""), neutral);
    assert_eq!(mutations_for_name("neutral"), neutral);
}

#[test]
fn known_names_resolve_case_insensitively() {
    assert_eq!(Emotion::from_name("  Happy "), Some(Emotion::Happy));
    assert_eq!(Emotion::from_name("ANGRY"), Some(Emotion::Angry));
    assert_eq!(Emotion::from_name("grumpy"), None);
    assert_eq!(Emotion::resolve("grumpy"), Emotion::Neutral);
    assert_eq!(mutations_for_name("sad"), mutations(Emotion::Sad));
}

#[test]
fn menu_indices_are_one_based() {
    assert_eq!(Emotion::from_menu_index(0), None);
    assert_eq!(Emotion::from_menu_index(1), Some(Emotion::Neutral));
    assert_eq!(Emotion::from_menu_index(3), Some(Emotion::Happy));
    assert_eq!(Emotion::from_menu_index(7), Some(Emotion::Angry));
    assert_eq!(Emotion::from_menu_index(8), None);
}

#[test]
fn neutral_mouth_is_plain_line() {
    let [mouth, ..] = mutations(Emotion::Neutral);
    assert_eq!(mouth.shape.kind, ShapeKind::Line);
    assert!(mouth.shape.props.arc.is_none());
    assert_eq!((mouth.shape.props.x1, mouth.shape.props.y1), (-25.0, 0.0));
    assert_eq!((mouth.shape.props.x2, mouth.shape.props.y2), (25.0, 0.0));
    assert_eq!(mouth.shape.transform.rotation, 0.0);
}

#[test]
fn arc_mouths_sweep_by_valence() {
    for emotion in [Emotion::Calm, Emotion::Happy, Emotion::Amused] {
        let [mouth, ..] = mutations(emotion);
        assert_eq!(mouth.shape.kind, ShapeKind::Arc, "{emotion}");
        assert_eq!(arc_of(&mouth).sweep_angle, 180.0, "{emotion}");
    }
    for emotion in [Emotion::Nervous, Emotion::Sad, Emotion::Angry] {
        let [mouth, ..] = mutations(emotion);
        assert_eq!(mouth.shape.kind, ShapeKind::Arc, "{emotion}");
        assert_eq!(arc_of(&mouth).sweep_angle, -180.0, "{emotion}");
    }
}

#[test]
fn arc_mouths_keep_stub_endpoints_and_anchor() {
    let [mouth, ..] = mutations(Emotion::Sad);
    assert_eq!(mouth.shape.transform.x, 0.0);
    assert_eq!(mouth.shape.transform.y, 35.0);
    assert_eq!(mouth.shape.props.x1, -25.0);
    assert_eq!(mouth.shape.props.x2, 25.0);
    assert_eq!(arc_of(&mouth).start_angle, 0.0);
}

#[test]
fn arc_size_grows_with_intensity() {
    let size = |emotion| {
        let [mouth, ..] = mutations(emotion);
        let arc = arc_of(&mouth);
        (arc.width, arc.height)
    };
    assert_eq!(size(Emotion::Calm), (40.0, 10.0));
    assert_eq!(size(Emotion::Happy), (60.0, 40.0));
    assert_eq!(size(Emotion::Amused), (70.0, 50.0));
    assert_eq!(size(Emotion::Nervous), (40.0, 15.0));
    assert_eq!(size(Emotion::Sad), (45.0, 25.0));
    assert_eq!(size(Emotion::Angry), (55.0, 35.0));
}

#[test]
fn brow_rotation_signs() {
    let tilt = |emotion| {
        let [_, left, right] = mutations(emotion);
        (left.shape.transform.rotation, right.shape.transform.rotation)
    };
    assert_eq!(tilt(Emotion::Nervous), (-15.0, 15.0));
    assert_eq!(tilt(Emotion::Sad), (-15.0, 15.0));
    assert_eq!(tilt(Emotion::Angry), (15.0, -15.0));
    for emotion in [Emotion::Neutral, Emotion::Calm, Emotion::Happy, Emotion::Amused] {
        assert_eq!(tilt(emotion), (0.0, 0.0), "{emotion}");
    }
}

#[test]
fn brow_heights_by_group() {
    let height = |emotion| {
        let [_, left, right] = mutations(emotion);
        assert_eq!(left.shape.props.y1, left.shape.props.y2);
        assert_eq!(left.shape.props.y1, right.shape.props.y1);
        left.shape.props.y1
    };
    assert_eq!(height(Emotion::Neutral), -35.0);
    assert_eq!(height(Emotion::Happy), -44.0);
    assert_eq!(height(Emotion::Angry), -38.0);
}

#[test]
fn brows_are_symmetric_lines() {
    for emotion in Emotion::ALL {
        let [_, left, right] = mutations(emotion);
        assert_eq!(left.shape.kind, ShapeKind::Line);
        assert_eq!(right.shape.kind, ShapeKind::Line);
        assert_eq!(left.shape.props.x1, -right.shape.props.x2);
        assert_eq!(left.shape.props.x2, -right.shape.props.x1);
    }
}

#[test]
fn every_emotion_has_a_glyph() {
    for emotion in Emotion::ALL {
        assert!(!emotion.glyph().is_empty());
        assert_eq!(emotion.to_string(), emotion.name());
    }
}
