use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use golf_flight_engine::swing::{is_time_ordered, parse_batch};
use golf_flight_engine::{
    run_dispersion, sample_by_distance, ClubTable, DispersionParams, DispersionResults,
    LaunchConditions, ResolvedClub, ShotMetrics, ShotResult, ShotSimulator, SimulatorConfig,
    SwingCharacteristics, SwingSample, TrajectoryPoint, TrajectorySample,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "golf-flight")]
#[command(version)]
#[command(about = "Golf shot simulator driven by swing sensor samples", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Simulator configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Club table file (JSON)
    #[arg(long, global = true)]
    club_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a shot from a file of swing samples
    Shot {
        /// Swing samples, JSON lines or a JSON array
        #[arg(short, long)]
        samples: PathBuf,

        /// Club to hit (defaults to the club on the last sample)
        #[arg(short, long)]
        club: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,

        /// Include every trajectory point
        #[arg(long)]
        full: bool,

        /// Resample the trajectory every N meters downrange
        #[arg(long)]
        sample_interval: Option<f64>,
    },

    /// Fly explicit launch conditions
    Launch {
        /// Ball speed (m/s)
        #[arg(long)]
        speed: f64,

        /// Launch angle (degrees)
        #[arg(long)]
        angle: f64,

        /// Spin (rpm, negative for topspin)
        #[arg(long, default_value = "0.0")]
        spin: f64,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,

        /// Include every trajectory point
        #[arg(long)]
        full: bool,

        /// Resample the trajectory every N meters downrange
        #[arg(long)]
        sample_interval: Option<f64>,
    },

    /// Hit the same swing with several clubs
    Compare {
        /// Swing samples, JSON lines or a JSON array
        #[arg(short, long)]
        samples: PathBuf,

        /// Clubs to compare, comma separated (defaults to the whole table)
        #[arg(short, long, value_delimiter = ',')]
        clubs: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Monte Carlo dispersion around nominal launch conditions
    Dispersion {
        /// Ball speed (m/s)
        #[arg(long)]
        speed: f64,

        /// Launch angle (degrees)
        #[arg(long)]
        angle: f64,

        /// Spin (rpm, negative for topspin)
        #[arg(long, default_value = "0.0")]
        spin: f64,

        /// Number of shots
        #[arg(short, long, default_value = "500")]
        num_shots: usize,

        /// Ball speed standard deviation (m/s)
        #[arg(long, default_value = "2.0")]
        speed_std: f64,

        /// Launch angle standard deviation (degrees)
        #[arg(long, default_value = "1.0")]
        angle_std: f64,

        /// Spin standard deviation (rpm)
        #[arg(long, default_value = "250.0")]
        spin_std: f64,

        /// Random seed for repeatable runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the club table
    Clubs {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// What gets printed for one flight
#[derive(Debug, Serialize)]
struct ShotReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    club: Option<&'a ResolvedClub>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swing: Option<&'a SwingCharacteristics>,
    launch: &'a LaunchConditions,
    metrics: &'a ShotMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<&'a [TrajectoryPoint]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    samples: Vec<TrajectorySample>,
}

impl<'a> ShotReport<'a> {
    fn from_shot(shot: &'a ShotResult, full: bool, sample_interval: Option<f64>) -> Self {
        Self {
            club: Some(&shot.club),
            swing: Some(&shot.swing),
            launch: &shot.launch,
            metrics: &shot.metrics,
            trajectory: full.then_some(shot.trajectory.as_slice()),
            samples: sample_interval
                .map(|step| sample_by_distance(&shot.trajectory, step))
                .unwrap_or_default(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let simulator = build_simulator(cli.config.as_deref(), cli.club_table.as_deref())?;

    match cli.command {
        Commands::Shot { samples, club, output, full, sample_interval } => {
            let samples = load_samples(&samples)?;
            let club = club
                .or_else(|| samples.last().map(|s| s.club.clone()))
                .unwrap_or_else(|| simulator.clubs().default_club().name.clone());

            let shot = simulator.simulate_shot(&samples, &club)?;
            display_shot(&ShotReport::from_shot(&shot, full, sample_interval), output)?;
        }

        Commands::Launch { speed, angle, spin, output, full, sample_interval } => {
            let flight = simulator.simulate_launch(&LaunchConditions::new(speed, angle, spin))?;
            let report = ShotReport {
                club: None,
                swing: None,
                launch: &flight.launch,
                metrics: &flight.metrics,
                trajectory: full.then_some(flight.trajectory.as_slice()),
                samples: sample_interval
                    .map(|step| sample_by_distance(&flight.trajectory, step))
                    .unwrap_or_default(),
            };
            display_shot(&report, output)?;
        }

        Commands::Compare { samples, clubs, output } => {
            let samples = load_samples(&samples)?;
            let names: Vec<String> = if clubs.is_empty() {
                simulator.clubs().iter().map(|c| c.name.clone()).collect()
            } else {
                clubs
            };
            let names: Vec<&str> = names.iter().map(String::as_str).collect();

            let shots = simulator.compare_clubs(&samples, &names)?;
            display_comparison(&shots, output)?;
        }

        Commands::Dispersion {
            speed, angle, spin, num_shots, speed_std, angle_std, spin_std, seed, output
        } => {
            let base = LaunchConditions::new(speed, angle, spin);
            let params = DispersionParams {
                num_shots,
                ball_speed_std_dev: speed_std,
                launch_angle_std_dev: angle_std,
                spin_rate_std_dev: spin_std,
                seed,
            };
            let results = run_dispersion(&simulator, &base, &params)?;
            display_dispersion(&results, output)?;
        }

        Commands::Clubs { output } => {
            display_clubs(simulator.clubs(), output)?;
        }

        Commands::Info => {
            let config = simulator.config();
            println!("╔════════════════════════════════════════╗");
            println!("║      GOLF FLIGHT ENGINE v{:<14}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Swing sensor to landing point shot     ║");
            println!("║ simulation.                            ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:                                 ║");
            println!("║ • Peak-based swing analysis            ║");
            println!("║ • Loft-scaled launch estimation        ║");
            println!("║ • Forward Euler flight integration     ║");
            println!("║ • Quadratic drag, linear Magnus lift   ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Time Step:         {:>8.3} s          ║", config.integration.time_step);
            println!(
                "║ Flight Ceiling:    {:>8.1} s          ║",
                config.integration.max_flight_time
            );
            println!("║ Ball Mass:         {:>8.4} kg         ║", config.ball.mass_kg);
            println!("║ Drag Coefficient:  {:>8.3}            ║", config.ball.drag_coefficient);
            println!("║ Lift Coefficient:  {:>8.1e}            ║", config.ball.lift_coefficient);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn build_simulator(config: Option<&Path>, club_table: Option<&Path>) -> Result<ShotSimulator> {
    let config = match config {
        Some(path) => SimulatorConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    let clubs = match club_table {
        Some(path) => ClubTable::from_json_file(path)
            .with_context(|| format!("loading club table from {}", path.display()))?,
        None => ClubTable::default(),
    };
    Ok(ShotSimulator::new(config, clubs)?)
}

fn load_samples(path: &Path) -> Result<Vec<SwingSample>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading swing samples from {}", path.display()))?;
    let samples = parse_batch(&contents)
        .with_context(|| format!("parsing swing samples from {}", path.display()))?;

    if !is_time_ordered(&samples) {
        tracing::warn!(path = %path.display(), "swing samples are not in time order");
    }
    tracing::debug!(count = samples.len(), "loaded swing samples");
    Ok(samples)
}

fn display_shot(report: &ShotReport<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }

        OutputFormat::Csv => {
            if !report.samples.is_empty() {
                println!("distance,height,speed,time,flags");
                for s in &report.samples {
                    let flags: Vec<String> = s.flags.iter().map(|f| f.to_string()).collect();
                    println!("{:.2},{:.2},{:.2},{:.3},{}",
                        s.distance_m, s.height_m, s.speed_mps, s.time_s, flags.join(";"));
                }
            } else if let Some(points) = report.trajectory {
                println!("time,x,y,vx,vy");
                for p in points {
                    println!("{:.3},{:.3},{:.3},{:.3},{:.3}", p.time, p.x, p.y, p.vx, p.vy);
                }
            } else {
                let m = report.metrics;
                println!("metric,value");
                println!("carry_distance,{:.2}", m.carry_distance);
                println!("apex_height,{:.2}", m.apex_height);
                println!("apex_time,{:.2}", m.apex_time);
                println!("flight_time,{:.2}", m.flight_time);
                println!("landing_speed,{:.2}", m.landing_speed);
                println!("landing_angle,{:.2}", m.landing_angle);
            }
        }

        OutputFormat::Table => {
            let m = report.metrics;
            let l = report.launch;
            println!("╔════════════════════════════════════════╗");
            println!("║             SHOT RESULTS               ║");
            println!("╠════════════════════════════════════════╣");
            if let Some(club) = report.club {
                println!("║ Club:              {:<20}║", club.used.name);
                if club.fell_back {
                    println!("║   (requested {:<25}║", format!("'{}')", club.requested));
                }
            }
            if let Some(swing) = report.swing {
                println!("║ Club Head Speed:   {:>8.2} m/s        ║", swing.club_head_speed);
            }
            println!("║ Ball Speed:        {:>8.2} m/s        ║", l.ball_speed);
            println!("║ Launch Angle:      {:>8.2} deg        ║", l.launch_angle);
            println!("║ Spin Rate:         {:>8.0} rpm        ║", l.spin_rate);
            println!("╠════════════════════════════════════════╣");
            println!("║ Carry:             {:>8.2} m          ║", m.carry_distance);
            println!("║ Apex Height:       {:>8.2} m          ║", m.apex_height);
            println!("║ Apex Time:         {:>8.2} s          ║", m.apex_time);
            println!("║ Flight Time:       {:>8.2} s          ║", m.flight_time);
            println!("║ Landing Speed:     {:>8.2} m/s        ║", m.landing_speed);
            println!("║ Landing Angle:     {:>8.2} deg        ║", m.landing_angle);
            println!("╚════════════════════════════════════════╝");

            if !report.samples.is_empty() {
                println!("\nDistance Samples:");
                println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
                println!("│ Dist (m) │  Y (m)   │ Vel(m/s) │ Time (s) │  Flags   │");
                println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
                for s in &report.samples {
                    let flags: Vec<String> = s.flags.iter().map(|f| f.to_string()).collect();
                    println!("│ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.3} │ {:<8} │",
                        s.distance_m, s.height_m, s.speed_mps, s.time_s, flags.join(","));
                }
                println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
            }

            if let Some(points) = report.trajectory {
                println!("\nFull Trajectory Points:");
                println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
                println!("│ Time (s) │  X (m)   │  Y (m)   │ Vx (m/s) │ Vy (m/s) │");
                println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
                for p in points {
                    println!("│ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                        p.time, p.x, p.y, p.vx, p.vy);
                }
                println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
            }
        }
    }

    Ok(())
}

fn display_comparison(shots: &[ShotResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<ShotReport> = shots
                .iter()
                .map(|shot| ShotReport::from_shot(shot, false, None))
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }

        OutputFormat::Csv => {
            println!("club,loft,ball_speed,launch_angle,spin_rate,carry,apex,flight_time");
            for shot in shots {
                println!("{},{:.1},{:.2},{:.2},{:.0},{:.2},{:.2},{:.2}",
                    shot.club.used.name, shot.club.used.loft_deg,
                    shot.launch.ball_speed, shot.launch.launch_angle, shot.launch.spin_rate,
                    shot.metrics.carry_distance, shot.metrics.apex_height,
                    shot.metrics.flight_time);
            }
        }

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│   Club   │ Loft(°)  │ Vel(m/s) │ Carry(m) │ Apex (m) │ Time (s) │");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┼──────────┤");
            for shot in shots {
                println!("│ {:<8} │ {:>8.1} │ {:>8.2} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                    shot.club.used.name, shot.club.used.loft_deg, shot.launch.ball_speed,
                    shot.metrics.carry_distance, shot.metrics.apex_height,
                    shot.metrics.flight_time);
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_dispersion(results: &DispersionResults, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║      SHOT DISPERSION                   ║");
            println!("║      {:>6} landed, {:>6} failed       ║",
                results.num_landed, results.num_failed);
            println!("╠════════════════════════════════════════╣");
            println!("║ CARRY                                  ║");
            println!("║ Mean:              {:>8.2} m          ║", results.carry.mean);
            println!("║ Std Dev:           {:>8.2} m          ║", results.carry.std_dev);
            println!("║ Min:               {:>8.2} m          ║", results.carry.min);
            println!("║ Max:               {:>8.2} m          ║", results.carry.max);
            println!("╠════════════════════════════════════════╣");
            println!("║ APEX HEIGHT                            ║");
            println!("║ Mean:              {:>8.2} m          ║", results.apex_height.mean);
            println!("║ Std Dev:           {:>8.2} m          ║", results.apex_height.std_dev);
            println!("╠════════════════════════════════════════╣");
            println!("║ FLIGHT TIME                            ║");
            println!("║ Mean:              {:>8.2} s          ║", results.flight_time.mean);
            println!("║ Std Dev:           {:>8.2} s          ║", results.flight_time.std_dev);
            println!("╚════════════════════════════════════════╝");
        }

        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }

        OutputFormat::Csv => {
            println!("metric,value");
            println!("num_landed,{}", results.num_landed);
            println!("num_failed,{}", results.num_failed);
            println!("mean_carry,{:.2}", results.carry.mean);
            println!("std_carry,{:.2}", results.carry.std_dev);
            println!("min_carry,{:.2}", results.carry.min);
            println!("max_carry,{:.2}", results.carry.max);
            println!("mean_apex_height,{:.2}", results.apex_height.mean);
            println!("std_apex_height,{:.2}", results.apex_height.std_dev);
            println!("mean_flight_time,{:.2}", results.flight_time.mean);
            println!("mean_landing_angle,{:.2}", results.landing_angle.mean);
        }
    }

    Ok(())
}

fn display_clubs(clubs: &ClubTable, format: OutputFormat) -> Result<()> {
    let default = &clubs.default_club().name;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(clubs)?);
        }

        OutputFormat::Csv => {
            println!("name,loft,max_distance,default");
            for club in clubs.iter() {
                println!("{},{:.1},{:.1},{}",
                    club.name, club.loft_deg, club.max_distance_m, &club.name == default);
            }
        }

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬──────────┬─────────┐");
            println!("│   Club   │ Loft(°)  │ Max (m)  │ Default │");
            println!("├──────────┼──────────┼──────────┼─────────┤");
            for club in clubs.iter() {
                let marker = if &club.name == default { "*" } else { "" };
                println!("│ {:<8} │ {:>8.1} │ {:>8.1} │ {:^7} │",
                    club.name, club.loft_deg, club.max_distance_m, marker);
            }
            println!("└──────────┴──────────┴──────────┴─────────┘");
        }
    }

    Ok(())
}
