use super::*;

fn vary(name: &str, f0: i64, f1: i64, v0: f64, v1: f64) -> Command {
    Command::Vary {
        knob: name.to_string(),
        start_frame: f0,
        end_frame: f1,
        start_value: v0,
        end_value: v1,
    }
}

#[test]
fn static_scene_defaults() {
    let s = build_schedule(&[Command::Push, Command::Pop]).unwrap();
    assert_eq!(s.num_frames, 1);
    assert!(!s.is_animated());
    assert!(s.knobs.is_empty());
    assert_eq!(s.basename, DEFAULT_BASENAME);
}

#[test]
fn last_frames_and_basename_win() {
    let s = build_schedule(&[
        Command::Frames { count: 4 },
        Command::Basename {
            name: "first".into(),
        },
        Command::Frames { count: 12 },
        Command::Basename {
            name: "second".into(),
        },
    ])
    .unwrap();
    assert_eq!(s.num_frames, 12);
    assert_eq!(s.basename, "second");
    assert!(!s.basename_defaulted);
}

#[test]
fn vary_without_frames_is_fatal() {
    let err = build_schedule(&[vary("k", 0, 9, 0.0, 1.0)]).unwrap_err();
    assert!(matches!(err, KeysceneError::Config(_)));

    let err = build_schedule(&[Command::Frames { count: 1 }, vary("k", 0, 0, 0.0, 1.0)])
        .unwrap_err();
    assert!(matches!(err, KeysceneError::Config(_)));
}

#[test]
fn zero_frames_is_fatal() {
    let err = build_schedule(&[Command::Frames { count: 0 }]).unwrap_err();
    assert!(matches!(err, KeysceneError::Config(_)));
}

#[test]
fn missing_basename_is_defaulted_for_animations() {
    let s = build_schedule(&[Command::Frames { count: 5 }]).unwrap();
    assert!(s.is_animated());
    assert!(s.basename_defaulted);
    assert_eq!(s.basename, DEFAULT_BASENAME);
}

#[test]
fn same_name_knobs_are_kept_separately_in_order() {
    let s = build_schedule(&[
        Command::Frames { count: 10 },
        vary("k", 0, 4, 0.0, 1.0),
        vary("j", 0, 9, 1.0, 2.0),
        vary("k", 5, 9, 1.0, 0.0),
    ])
    .unwrap();
    let names: Vec<&str> = s.knobs.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["k", "j", "k"]);
    assert_eq!(s.knobs[2].start_frame, 5);
}

#[test]
fn knob_range_is_inclusive_and_reversed_ranges_cover_nothing() {
    let k = Knob {
        name: "k".into(),
        start_frame: 2,
        end_frame: 5,
        start_value: 0.0,
        end_value: 3.0,
    };
    assert!(!k.covers(FrameIndex(1)));
    assert!(k.covers(FrameIndex(2)));
    assert!(k.covers(FrameIndex(5)));
    assert!(!k.covers(FrameIndex(6)));
    assert_eq!(k.value_at(FrameIndex(3)), Some(1.0));

    let reversed = Knob {
        start_frame: 5,
        end_frame: 2,
        ..k
    };
    for f in 0..10 {
        assert_eq!(reversed.value_at(FrameIndex(f)), None);
    }
}

#[test]
fn extreme_declared_frames_interpolate_without_overflow() {
    let k = Knob {
        name: "k".into(),
        start_frame: i64::MIN,
        end_frame: 5,
        start_value: 0.0,
        end_value: 1.0,
    };
    let v = k.value_at(FrameIndex(1)).unwrap();
    assert!(v.is_finite());
    assert!((v - 1.0).abs() < 1e-9);
    assert_eq!(k.value_at(FrameIndex(5)), Some(1.0));
    assert_eq!(k.value_at(FrameIndex(6)), None);

    let wide = Knob {
        start_frame: i64::MIN,
        end_frame: i64::MAX,
        ..k
    };
    let mid = wide.value_at(FrameIndex(0)).unwrap();
    assert!((mid - 0.5).abs() < 1e-9);
}

#[test]
fn extreme_vary_is_accepted_by_the_schedule() {
    let s = build_schedule(&[
        Command::Frames { count: 3 },
        vary("k", i64::MIN, i64::MAX, 0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(s.knobs[0].start_frame, i64::MIN);
    assert!(s.knobs[0].value_at(FrameIndex(2)).is_some());
}
