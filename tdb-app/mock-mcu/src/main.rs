use clap::Parser;
use core::cell::RefCell;
use critical_section as _;
use embassy_executor::{Executor, Spawner};
use static_cell::StaticCell;
use tdb_core::mk_static;
use tdb_core::utils::controllers::{
    DRIVE_CHANNEL, DeviceError, DriveCommand, HeadingSensor, PositionSensor, PowerChannel,
    RangeSensor, TELEMETRY_CHANNEL,
};
use tdb_core::utils::{DriveController, DriveTrain};
use tracing::{error, info};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// leave out the left drive motor (disables actuation)
    #[clap(long)]
    no_left_motor: bool,
    /// leave out the right drive motor (disables actuation)
    #[clap(long)]
    no_right_motor: bool,
    #[clap(long)]
    no_left_encoder: bool,
    #[clap(long)]
    no_right_encoder: bool,
    #[clap(long)]
    no_heading: bool,
    #[clap(long)]
    no_range: bool,
    /// simulated heading (degrees)
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    heading: f32,
    /// simulated raw range reading (inches)
    #[clap(long, default_value_t = 48.0, allow_negative_numbers = true)]
    range: f32,
    #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
    left_count: i32,
    #[clap(long, default_value_t = 0, allow_negative_numbers = true)]
    right_count: i32,
    /// JSON drive commands, e.g. '{"dc":"t","l":0.5,"r":0.5}'
    commands: Vec<String>,
}

/// Motor channel that logs the power it is given.
struct SimMotor {
    side: &'static str,
}

impl PowerChannel for SimMotor {
    fn set(
        &mut self,
        power: f32,
    ) -> Result<(), DeviceError> {
        info!(side = self.side, power, "motor power");
        Ok(())
    }
}

struct SimEncoder {
    count: i32,
}

impl PositionSensor for SimEncoder {
    fn count(&mut self) -> i32 {
        self.count
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

struct SimGyro {
    angle: f32,
}

impl HeadingSensor for SimGyro {
    fn angle(&mut self) -> f32 {
        self.angle
    }

    fn reset(&mut self) {
        self.angle = 0.0;
    }
}

struct SimSonar {
    range: f32,
}

impl RangeSensor for SimSonar {
    fn range(&mut self) -> f32 {
        self.range
    }
}

#[embassy_executor::task]
async fn drive_task(mut ctrl: DriveController<'static>) -> ! {
    ctrl.drive_ch().await
}

fn build_drivetrain(opts: &Opts) -> DriveTrain<'static> {
    let mut builder = DriveTrain::builder();
    if !opts.no_left_motor {
        builder = builder.left_motor(mk_static!(
            RefCell<SimMotor>,
            RefCell::new(SimMotor { side: "left" })
        ));
    }
    if !opts.no_right_motor {
        builder = builder.right_motor(mk_static!(
            RefCell<SimMotor>,
            RefCell::new(SimMotor { side: "right" })
        ));
    }
    if !opts.no_left_encoder {
        builder = builder.left_encoder(mk_static!(
            RefCell<SimEncoder>,
            RefCell::new(SimEncoder {
                count: opts.left_count
            })
        ));
    }
    if !opts.no_right_encoder {
        builder = builder.right_encoder(mk_static!(
            RefCell<SimEncoder>,
            RefCell::new(SimEncoder {
                count: opts.right_count
            })
        ));
    }
    if !opts.no_heading {
        builder = builder.heading(mk_static!(
            RefCell<SimGyro>,
            RefCell::new(SimGyro {
                angle: opts.heading
            })
        ));
    }
    if !opts.no_range {
        builder = builder.range(mk_static!(
            RefCell<SimSonar>,
            RefCell::new(SimSonar { range: opts.range })
        ));
    }
    builder.build()
}

fn parse_commands(raw: &[String]) -> Vec<DriveCommand> {
    let mut commands: Vec<DriveCommand> = raw
        .iter()
        .filter_map(|text| match serde_json::from_str::<DriveCommand>(text) {
            Ok(command) => Some(command),
            Err(e) => {
                error!(command = %text, "error deserializing DriveCommand: {}", e);
                None
            }
        })
        .collect();
    if commands.is_empty() {
        commands.push(DriveCommand::Read);
    }
    commands
}

#[embassy_executor::task]
async fn main_task(
    spawner: Spawner,
    opts: Opts,
) {
    let drivetrain = build_drivetrain(&opts);
    match serde_json::to_string(&drivetrain.availability()) {
        Ok(line) => info!(devices = %line, "simulated devices attached"),
        Err(e) => error!("error serializing availability: {}", e),
    }
    spawner
        .spawn(drive_task(DriveController::new(drivetrain)))
        .unwrap();

    for command in parse_commands(&opts.commands) {
        DRIVE_CHANNEL.send(command).await;
        if command == DriveCommand::Read {
            let telemetry = TELEMETRY_CHANNEL.receive().await;
            match serde_json::to_string(&telemetry) {
                Ok(line) => println!("{line}"),
                Err(e) => error!("error serializing telemetry: {}", e),
            }
        }
    }

    info!("command script finished");
    std::process::exit(0);
}

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let opts: Opts = Opts::parse();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(main_task(spawner, opts)).unwrap();
    });
}
