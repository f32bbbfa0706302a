mod common;

use core::{
    cell::RefCell,
    f32::consts::PI,
    future::Future,
    pin::pin,
    task::{Context, RawWaker, RawWakerVTable, Waker},
};
use std::sync::Mutex;

use common::{close, MockEncoder, MockGyro, MockSonar, RecordingMotor};
use tdb_core::{
    utils::{
        controllers::{DriveCommand, DRIVE_CHANNEL, TELEMETRY_CHANNEL},
        DriveController, DriveTrain,
    },
    UNAVAILABLE,
};

/// The dispatch channels are process-wide statics.
static CHANNELS: Mutex<()> = Mutex::new(());

fn noop_raw_waker() -> RawWaker {
    fn clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }
    fn noop(_: *const ()) {}
    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
    RawWaker::new(core::ptr::null(), &VTABLE)
}

fn noop_waker() -> Waker {
    // SAFETY: every vtable entry ignores the data pointer.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn drain_channels() {
    while DRIVE_CHANNEL.try_receive().is_ok() {}
    while TELEMETRY_CHANNEL.try_receive().is_ok() {}
}

/// Run the controller loop until it waits for the next command.
fn run_until_idle(ctrl: &mut DriveController<'_>) {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut fut = pin!(ctrl.drive_ch());
    for _ in 0..100 {
        assert!(fut.as_mut().poll(&mut cx).is_pending());
    }
}

#[test]
fn test_drive_ch_executes_commands_and_forwards_telemetry() {
    let _guard = CHANNELS.lock().unwrap_or_else(|e| e.into_inner());
    drain_channels();

    let left = RefCell::new(RecordingMotor::default());
    let right = RefCell::new(RecordingMotor::default());
    let enc = RefCell::new(MockEncoder::at(360));
    let gyro = RefCell::new(MockGyro::at(45.0));
    let sonar = RefCell::new(MockSonar(20.0));
    let dt = DriveTrain::builder()
        .left_motor(&left)
        .right_motor(&right)
        .left_encoder(&enc)
        .heading(&gyro)
        .range(&sonar)
        .build();
    let mut ctrl = DriveController::new(dt);

    DRIVE_CHANNEL
        .try_send(DriveCommand::T { l: 1.0, r: -1.0 })
        .unwrap();
    DRIVE_CHANNEL.try_send(DriveCommand::Read).unwrap();
    run_until_idle(&mut ctrl);

    assert_eq!(left.borrow().last(), Some(1.0));
    assert_eq!(right.borrow().last(), Some(-1.0));

    let telemetry = TELEMETRY_CHANNEL.try_receive().unwrap();
    assert_eq!(telemetry.rotation, 45.0);
    assert_eq!(telemetry.left_encoder, 360.0);
    assert_eq!(telemetry.right_encoder, UNAVAILABLE);
    assert!(close(telemetry.left_inches, PI * 6.0));
    assert_eq!(telemetry.sonic_distance, 7.0);
    assert!(TELEMETRY_CHANNEL.try_receive().is_err());
}

#[test]
fn test_unread_telemetry_does_not_strand_stop() {
    let _guard = CHANNELS.lock().unwrap_or_else(|e| e.into_inner());
    drain_channels();

    let left = RefCell::new(RecordingMotor::default());
    let right = RefCell::new(RecordingMotor::default());
    let dt = DriveTrain::builder()
        .left_motor(&left)
        .right_motor(&right)
        .build();
    let mut ctrl = DriveController::new(dt);

    // More reads than the telemetry channel holds, and nobody receiving.
    DRIVE_CHANNEL
        .try_send(DriveCommand::T { l: 1.0, r: 1.0 })
        .unwrap();
    for _ in 0..5 {
        DRIVE_CHANNEL.try_send(DriveCommand::Read).unwrap();
    }
    DRIVE_CHANNEL.try_send(DriveCommand::Stop).unwrap();
    run_until_idle(&mut ctrl);

    assert_eq!(left.borrow().powers, vec![1.0, 0.0]);
    assert_eq!(right.borrow().last(), Some(0.0));

    let mut queued = 0;
    while TELEMETRY_CHANNEL.try_receive().is_ok() {
        queued += 1;
    }
    assert_eq!(queued, 4);
}
