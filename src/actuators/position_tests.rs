use super::*;
use crate::{
    hardware::channel_motor::{ChannelMotor, MotorChannels, MotorCommand, MotorFeedback},
    units::Angle,
};
use float_cmp::{ApproxEq, F64Margin};

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-9,
        ulps: 4,
    }
}

/// One sensor unit is a hundredth of a radian and the mechanism can travel a full turn
/// either way.
fn create_actuator() -> (PositionMotor<Angle, ChannelMotor>, MotorChannels) {
    let (hardware, channels) = ChannelMotor::create();
    let range = ActuatorRange::new(Angle::degrees(-360.0), Angle::degrees(360.0)).unwrap();
    let actuator = PositionMotor::new(
        Motor::new(hardware),
        Angle::radians(0.01),
        Angle::zero(),
        range,
    );

    (actuator, channels)
}

fn publish_position(channels: &MotorChannels, position_su: f64) {
    channels
        .feedback
        .send(MotorFeedback {
            position_su,
            velocity_sups: 0.0,
        })
        .unwrap();
}

fn sent_position_su(channels: &MotorChannels) -> f64 {
    match channels.commands.try_recv().unwrap() {
        MotorCommand::Position { position_su, .. } => position_su,
        c => panic!("Expected a position command, got {:?}", c),
    }
}

#[test]
fn when_no_goal_was_committed_goal_and_error_should_be_none() {
    let (actuator, _channels) = create_actuator();

    assert_eq!(actuator.goal_position(), None);
    assert_eq!(actuator.position_error(), None);
}

#[test]
fn when_setting_a_position_goal_should_convert_to_sensor_units() {
    let (mut actuator, channels) = create_actuator();

    assert!(actuator.set_position_closed_loop(Angle::radians(1.5)));

    assert!(sent_position_su(&channels).approx_eq(150.0, margin()));
    assert_eq!(actuator.goal_position(), Some(Angle::radians(1.5)));
}

#[test]
fn when_setting_a_position_goal_with_feedforward_should_forward_it() {
    let (mut actuator, channels) = create_actuator();

    assert!(actuator.set_position_closed_loop_with_feedforward(Angle::radians(0.5), 0.07));

    match channels.commands.try_recv().unwrap() {
        MotorCommand::Position {
            position_su,
            feedforward,
        } => {
            assert!(position_su.approx_eq(50.0, margin()));
            assert_eq!(feedforward, Some(0.07));
        }
        c => panic!("Expected a position command, got {:?}", c),
    }
}

#[test]
fn when_setting_a_position_goal_out_of_range_should_clamp() {
    let (mut actuator, channels) = create_actuator();

    actuator.set_position_closed_loop(Angle::degrees(720.0));

    assert_eq!(actuator.goal_position(), Some(Angle::degrees(360.0)));
    assert!(sent_position_su(&channels).approx_eq(200.0 * std::f64::consts::PI, margin()));
}

#[test]
fn when_disabled_setting_a_position_goal_should_stop_and_fail() {
    let (mut actuator, channels) = create_actuator();
    actuator.disable();
    let _ = channels.commands.try_recv();

    assert!(!actuator.set_position_closed_loop(Angle::radians(1.0)));
    assert!(!actuator.set_position_closed_loop_with_feedforward(Angle::radians(1.0), 0.1));

    assert_eq!(actuator.goal_position(), None);
    let commands: Vec<MotorCommand> = channels.commands.try_iter().collect();
    assert_eq!(commands, vec![MotorCommand::Stop, MotorCommand::Stop]);
}

#[test]
fn when_setting_a_nan_goal_should_stop_and_keep_the_old_goal() {
    let (mut actuator, channels) = create_actuator();
    actuator.set_position_closed_loop(Angle::radians(0.25));
    let _ = channels.commands.try_recv();

    assert!(!actuator.set_position_closed_loop(Angle::radians(f64::NAN)));

    assert_eq!(actuator.goal_position(), Some(Angle::radians(0.25)));
    assert_eq!(channels.commands.try_recv().unwrap(), MotorCommand::Stop);
}

#[test]
fn when_reading_the_position_should_scale_and_offset_the_sensor() {
    let (hardware, channels) = ChannelMotor::create();
    let actuator = PositionMotor::new(
        Motor::new(hardware),
        Angle::radians(0.01),
        Angle::radians(0.5),
        ActuatorRange::unbounded(),
    );

    publish_position(&channels, 100.0);

    assert!(actuator.raw_position().in_radians().approx_eq(1.0, margin()));
    assert!(actuator.position().in_radians().approx_eq(1.5, margin()));
}

#[test]
fn when_calibrating_the_offset_the_current_position_should_map_to_the_given_value() {
    let (mut actuator, channels) = create_actuator();
    publish_position(&channels, 42.0);

    actuator.calibrate_offset(Angle::zero());

    assert!(actuator.position().in_radians().approx_eq(0.0, margin()));
    assert!(actuator
        .positional_offset()
        .in_radians()
        .approx_eq(-0.42, margin()));

    // Goals are now relative to the calibrated zero
    actuator.set_position_closed_loop(Angle::radians(1.0));
    assert!(sent_position_su(&channels).approx_eq(142.0, margin()));
}

#[test]
fn when_calculating_the_position_error_should_be_goal_minus_position() {
    let (mut actuator, channels) = create_actuator();

    actuator.set_position_closed_loop(Angle::radians(1.0));
    publish_position(&channels, 25.0);

    let error = actuator.position_error().unwrap();
    assert!(error.in_radians().approx_eq(0.75, margin()));
}

#[test]
fn when_using_open_loop_should_follow_the_motor_contract() {
    let (mut actuator, channels) = create_actuator();
    actuator.set_neutral_deadband(0.1);

    actuator.set_open_loop(0.05);
    actuator.set_open_loop(2.0);

    let commands: Vec<MotorCommand> = channels.commands.try_iter().collect();
    assert_eq!(
        commands,
        vec![MotorCommand::Stop, MotorCommand::OpenLoop { power: 1.0 }]
    );
    assert_eq!(actuator.current_power(), 1.0);
}
