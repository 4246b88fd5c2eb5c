use super::*;
use float_cmp::{ApproxEq, F64Margin};
use std::f64::consts::PI;

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-9,
        ulps: 4,
    }
}

// Quantities

#[test]
fn when_converting_inches_should_round_trip_through_meters() {
    let length = Length::inches(30.0);
    assert!(length.in_meters().approx_eq(0.762, margin()));
    assert!(length.in_inches().approx_eq(30.0, margin()));

    let velocity = Velocity::inches_per_second(0.1);
    assert!(velocity.in_meters_per_second().approx_eq(0.00254, margin()));
}

#[test]
fn when_dividing_quantities_of_the_same_unit_should_give_a_ratio() {
    let a = Length::meters(3.0);
    let b = Length::meters(1.5);
    assert_eq!(a.ratio(b), 2.0);
}

#[test]
fn when_comparing_quantities_should_order_by_value() {
    assert!(Length::inches(40.0) > Length::inches(30.0));
    assert!(Velocity::meters_per_second(-1.0) < Velocity::zero());
    assert_eq!(Angle::radians(-2.0).abs(), Angle::radians(2.0));
}

#[test]
fn when_taking_the_difference_between_angles_should_take_the_short_way_round() {
    let difference = Angle::degrees(170.0).difference(Angle::degrees(-170.0));
    assert!(difference.in_degrees().approx_eq(-20.0, margin()));

    let difference = Angle::degrees(-170.0).difference(Angle::degrees(170.0));
    assert!(difference.in_degrees().approx_eq(20.0, margin()));

    let difference = Angle::radians(4.5 * PI).difference(Angle::zero());
    assert!(difference.in_radians().approx_eq(0.5 * PI, margin()));
}

#[test]
fn when_angles_are_half_a_turn_apart_difference_should_be_positive_pi() {
    let difference = Angle::PI.difference(Angle::zero());
    assert_eq!(difference, Angle::PI);

    let difference = Angle::zero().difference(Angle::PI);
    assert_eq!(difference, Angle::PI);
}

// Vector2U

#[test]
fn when_creating_a_vector_from_polar_should_match_components() {
    let vector = Vector2U::from_polar(Length::meters(2.0), Angle::degrees(90.0));
    assert!(vector.x().in_meters().approx_eq(0.0, margin()));
    assert!(vector.y().in_meters().approx_eq(2.0, margin()));
    assert!(vector.magnitude().in_meters().approx_eq(2.0, margin()));
    assert!(vector.angle().in_degrees().approx_eq(90.0, margin()));
}

#[test]
fn when_rotating_a_vector_should_rotate_counter_clockwise() {
    let vector = Vector2U::new(Length::meters(1.0), Length::meters(0.0));
    let rotated = vector.rotate(Angle::degrees(-90.0));
    assert!(rotated.x().in_meters().approx_eq(0.0, margin()));
    assert!(rotated.y().in_meters().approx_eq(-1.0, margin()));
}

#[test]
fn when_doing_arithmetic_on_vectors_should_work_per_component() {
    let a = Vector2U::new(Length::meters(1.0), Length::meters(2.0));
    let b = Vector2U::new(Length::meters(3.0), Length::meters(-1.0));

    assert_eq!(a + b, Vector2U::new(Length::meters(4.0), Length::meters(1.0)));
    assert_eq!(a - b, Vector2U::new(Length::meters(-2.0), Length::meters(3.0)));
    assert_eq!(-a, Vector2U::new(Length::meters(-1.0), Length::meters(-2.0)));
    assert_eq!(a * 2.0, Vector2U::new(Length::meters(2.0), Length::meters(4.0)));
    assert_eq!(b / 2.0, Vector2U::new(Length::meters(1.5), Length::meters(-0.5)));
}

#[test]
fn when_taking_a_ratio_of_a_vector_should_be_unitless() {
    let vector = Vector2U::new(Length::inches(10.0), Length::inches(-5.0));
    let ratio = vector.ratio(Length::inches(10.0));
    assert!(ratio.x.approx_eq(1.0, margin()));
    assert!(ratio.y.approx_eq(-0.5, margin()));

    let back = Vector2U::from_ratio(ratio, Length::inches(10.0));
    assert!(back.x().in_inches().approx_eq(10.0, margin()));
}

#[test]
fn when_a_component_is_nan_the_vector_should_be_nan() {
    let vector = Vector2U::new(Length::meters(f64::NAN), Length::zero());
    assert!(vector.is_nan());
    assert!(!Vector2U::<Length>::zero().is_nan());
}
