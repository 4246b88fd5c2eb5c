use super::*;
use crate::{
    actuators::motor::Motor,
    hardware::channel_motor::{ChannelMotor, MotorChannels, MotorCommand, MotorFeedback},
    units::{Length, Velocity},
};
use float_cmp::{ApproxEq, F64Margin};

fn margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-9,
        ulps: 4,
    }
}

/// A drive wheel where one encoder tick is a millimeter of travel and the velocity is
/// reported in ticks per 100 ms.
fn create_actuator() -> (VelocityMotor<Length, Velocity, ChannelMotor>, MotorChannels) {
    let (hardware, channels) = ChannelMotor::create();
    let position = PositionMotor::new(
        Motor::new(hardware),
        Length::meters(0.001),
        Length::zero(),
        ActuatorRange::unbounded(),
    );
    let range = ActuatorRange::new(
        Velocity::meters_per_second(-4.0),
        Velocity::meters_per_second(4.0),
    )
    .unwrap();

    (
        VelocityMotor::new(position, Velocity::meters_per_second(0.01), range),
        channels,
    )
}

fn sent_commands(channels: &MotorChannels) -> Vec<MotorCommand> {
    channels.commands.try_iter().collect()
}

#[test]
fn when_no_goal_was_committed_goal_and_error_should_be_none() {
    let (actuator, _channels) = create_actuator();

    assert_eq!(actuator.goal_velocity(), None);
    assert_eq!(actuator.velocity_error(), None);
}

#[test]
fn when_setting_a_velocity_goal_should_convert_to_sensor_units() {
    let (mut actuator, channels) = create_actuator();

    assert!(actuator.set_velocity_closed_loop(Velocity::meters_per_second(1.5)));

    match sent_commands(&channels).as_slice() {
        [MotorCommand::Velocity {
            velocity_sups,
            feedforward: None,
        }] => assert!((*velocity_sups).approx_eq(150.0, margin())),
        c => panic!("Unexpected commands {:?}", c),
    }
    assert_eq!(
        actuator.goal_velocity(),
        Some(Velocity::meters_per_second(1.5))
    );
}

#[test]
fn when_setting_a_velocity_goal_with_feedforward_should_forward_it() {
    let (mut actuator, channels) = create_actuator();

    assert!(actuator.set_velocity_closed_loop_with_feedforward(
        Velocity::meters_per_second(-1.0),
        0.3
    ));

    match sent_commands(&channels).as_slice() {
        [MotorCommand::Velocity {
            velocity_sups,
            feedforward: Some(f),
        }] => {
            assert!((*velocity_sups).approx_eq(-100.0, margin()));
            assert_eq!(*f, 0.3);
        }
        c => panic!("Unexpected commands {:?}", c),
    }
}

#[test]
fn when_setting_a_velocity_goal_out_of_range_should_clamp() {
    let (mut actuator, _channels) = create_actuator();

    actuator.set_velocity_closed_loop(Velocity::meters_per_second(-10.0));

    assert_eq!(
        actuator.goal_velocity(),
        Some(Velocity::meters_per_second(-4.0))
    );
}

#[test]
fn when_disabled_setting_a_velocity_goal_should_stop_and_fail() {
    let (mut actuator, channels) = create_actuator();
    actuator.disable();
    let _ = sent_commands(&channels);

    assert!(!actuator.set_velocity_closed_loop(Velocity::meters_per_second(1.0)));
    assert!(!actuator.set_position_closed_loop(Length::meters(1.0)));
    actuator.set_open_loop(1.0);

    assert_eq!(actuator.goal_velocity(), None);
    assert_eq!(actuator.goal_position(), None);
    assert_eq!(
        sent_commands(&channels),
        vec![MotorCommand::Stop, MotorCommand::Stop, MotorCommand::Stop]
    );
}

#[test]
fn when_reading_the_velocity_should_scale_the_sensor() {
    let (mut actuator, channels) = create_actuator();
    actuator.set_velocity_closed_loop(Velocity::meters_per_second(2.0));

    channels
        .feedback
        .send(MotorFeedback {
            position_su: 500.0,
            velocity_sups: 150.0,
        })
        .unwrap();

    assert!(actuator
        .velocity()
        .in_meters_per_second()
        .approx_eq(1.5, margin()));
    assert!(actuator.position().in_meters().approx_eq(0.5, margin()));
    assert!(actuator
        .velocity_error()
        .unwrap()
        .in_meters_per_second()
        .approx_eq(0.5, margin()));
}

#[test]
fn when_setting_the_same_acceleration_twice_should_only_send_it_once() {
    let (mut actuator, channels) = create_actuator();

    actuator.set_acceleration(Velocity::meters_per_second(2.0));
    actuator.set_acceleration(Velocity::meters_per_second(2.0));
    actuator.set_acceleration(Velocity::meters_per_second(3.0));

    let commands = sent_commands(&channels);
    assert_eq!(commands.len(), 2);
    match commands[1] {
        MotorCommand::Acceleration { acceleration_sups } => {
            assert!(acceleration_sups.approx_eq(300.0, margin()))
        }
        c => panic!("Unexpected command {:?}", c),
    }
}

#[test]
fn when_setting_the_same_max_velocity_twice_should_only_send_it_once() {
    let (mut actuator, channels) = create_actuator();

    actuator.set_max_velocity(Velocity::meters_per_second(3.5));
    actuator.set_max_velocity(Velocity::meters_per_second(3.5));

    assert_eq!(sent_commands(&channels).len(), 1);

    actuator.set_max_velocity(Velocity::meters_per_second(1.0));
    actuator.set_max_velocity(Velocity::meters_per_second(3.5));

    assert_eq!(sent_commands(&channels).len(), 2);
}

#[test]
fn when_calibrating_should_delegate_to_the_position_actuator() {
    let (mut actuator, channels) = create_actuator();
    channels
        .feedback
        .send(MotorFeedback {
            position_su: 2000.0,
            velocity_sups: 0.0,
        })
        .unwrap();

    actuator.calibrate_offset(Length::zero());

    assert!(actuator.position().in_meters().approx_eq(0.0, margin()));
}
