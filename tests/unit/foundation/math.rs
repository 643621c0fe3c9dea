use super::*;

fn close(a: DVec3, b: DVec3) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn translation_then_scale_applies_right_operand_first() {
    let m = translation(10.0, 0.0, 0.0) * scaling(2.0, 2.0, 2.0);
    let p = m.transform_point3(DVec3::new(1.0, 1.0, 1.0));
    assert!(close(p, DVec3::new(12.0, 2.0, 2.0)));
}

#[test]
fn rotation_z_quarter_turn_maps_x_to_y() {
    let m = rotation(Axis::Z, std::f64::consts::FRAC_PI_2);
    let p = m.transform_point3(DVec3::X);
    assert!(close(p, DVec3::Y));
}

#[test]
fn rotation_x_and_y_follow_right_hand_rule() {
    let rx = rotation(Axis::X, std::f64::consts::FRAC_PI_2);
    assert!(close(rx.transform_point3(DVec3::Y), DVec3::Z));

    let ry = rotation(Axis::Y, std::f64::consts::FRAC_PI_2);
    assert!(close(ry.transform_point3(DVec3::Z), DVec3::X));
}

#[test]
fn axis_parse_accepts_either_case() {
    assert_eq!(Axis::parse("x"), Some(Axis::X));
    assert_eq!(Axis::parse("Y"), Some(Axis::Y));
    assert_eq!(Axis::parse("w"), None);
    assert_eq!(identity(), DMat4::IDENTITY);
}
