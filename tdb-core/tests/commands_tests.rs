mod common;

use core::cell::RefCell;

use common::{close, MockEncoder, MockGyro, MockSonar, RecordingMotor};
use tdb_core::utils::{
    controllers::{DriveCommand, DriveTrain, Telemetry, DRIVE_CHANNEL},
    Calibration,
};

#[test]
fn test_command_json_decoding() {
    let tank: DriveCommand = serde_json::from_str(r#"{"dc":"t","l":0.5,"r":-0.25}"#).unwrap();
    assert_eq!(tank, DriveCommand::T { l: 0.5, r: -0.25 });

    let arcade: DriveCommand = serde_json::from_str(r#"{"dc":"a","s":1.0,"r":0.0}"#).unwrap();
    assert_eq!(arcade, DriveCommand::A { s: 1.0, r: 0.0 });

    let reset: DriveCommand = serde_json::from_str(r#"{"dc":"reset_encoders"}"#).unwrap();
    assert_eq!(reset, DriveCommand::ResetEncoders);

    assert!(serde_json::from_str::<DriveCommand>(r#"{"dc":"fly"}"#).is_err());
}

#[test]
fn test_execute_drive_commands() {
    let left = RefCell::new(RecordingMotor::default());
    let right = RefCell::new(RecordingMotor::default());
    let dt = DriveTrain::builder()
        .left_motor(&left)
        .right_motor(&right)
        .build();

    assert_eq!(dt.execute(DriveCommand::T { l: 1.0, r: -1.0 }), None);
    assert_eq!(left.borrow().last(), Some(1.0));
    assert_eq!(right.borrow().last(), Some(-1.0));

    assert_eq!(dt.execute(DriveCommand::Stop), None);
    assert_eq!(left.borrow().last(), Some(0.0));

    dt.execute(DriveCommand::A { s: 0.0, r: -1.0 });
    assert_eq!(left.borrow().last(), Some(-1.0));
    assert_eq!(right.borrow().last(), Some(1.0));
}

#[test]
fn test_execute_resets() {
    let enc = RefCell::new(MockEncoder::at(99));
    let gyro = RefCell::new(MockGyro::at(180.0));
    let dt = DriveTrain::builder()
        .right_encoder(&enc)
        .heading(&gyro)
        .build();

    dt.execute(DriveCommand::ResetEncoders);
    dt.execute(DriveCommand::ResetCompass);
    assert_eq!(enc.borrow().count, 0);
    assert_eq!(gyro.borrow().angle, 0.0);
}

#[test]
fn test_read_reports_sentinels_for_missing_devices() {
    let enc = RefCell::new(MockEncoder::at(360));
    let sonar = RefCell::new(MockSonar(33.0));
    let dt = DriveTrain::builder()
        .left_encoder(&enc)
        .range(&sonar)
        .build();

    let telemetry: Telemetry = dt.execute(DriveCommand::Read).unwrap();
    assert_eq!(telemetry.rotation, -1.0);
    assert_eq!(telemetry.left_encoder, 360.0);
    assert_eq!(telemetry.right_encoder, -1.0);
    assert!(close(telemetry.left_inches, core::f32::consts::PI * 6.0));
    assert!(telemetry.right_inches < 0.0);
    assert_eq!(telemetry.sonic_distance, 20.0);

    let json = serde_json::to_string(&telemetry).unwrap();
    assert!(json.contains("\"rotation\":-1.0"));
}

#[test]
fn test_drive_channel_round_trip() {
    DRIVE_CHANNEL.try_send(DriveCommand::Stop).unwrap();
    assert_eq!(DRIVE_CHANNEL.try_receive().unwrap(), DriveCommand::Stop);
}

#[test]
fn test_calibration_loads_through_validation() {
    let cal: Calibration = serde_json::from_str(
        r#"{"wheel_diameter":4.0,"pulses_per_revolution":2048,"range_offset":1.5}"#,
    )
    .unwrap();
    assert_eq!(cal.pulses_per_revolution(), 2048);

    let zero = serde_json::from_str::<Calibration>(
        r#"{"wheel_diameter":4.0,"pulses_per_revolution":0,"range_offset":1.5}"#,
    );
    assert!(zero.is_err());
}

#[test]
fn test_availability_serializes_per_device() {
    let enc = RefCell::new(MockEncoder::at(0));
    let gyro = RefCell::new(MockGyro::at(0.0));
    let dt = DriveTrain::builder()
        .right_encoder(&enc)
        .heading(&gyro)
        .build();

    let json = serde_json::to_string(&dt.availability()).unwrap();
    assert_eq!(
        json,
        r#"{"actuation":false,"left_encoder":false,"right_encoder":true,"heading":true,"range":false}"#
    );
}
