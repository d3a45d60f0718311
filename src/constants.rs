/// Physical and model constants used by the flight simulator

/// Gravitational acceleration in m/s²
pub const GRAVITY_MPS2: f64 = 9.81;

/// Air density at sea level (kg/m³)
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225;

/// Mass of a regulation golf ball (kg)
pub const BALL_MASS_KG: f64 = 0.0459;

/// Radius of a regulation golf ball (m)
pub const BALL_RADIUS_M: f64 = 0.02135;

/// Drag coefficient of a dimpled golf ball
pub const BALL_DRAG_COEFFICIENT: f64 = 0.47;

/// Linear Magnus lift coefficient.
///
/// Lift acceleration is `lift_coefficient * spin_rpm * speed / 1000 / mass`.
/// With this value a 9000 rpm, 126 m/s launch produces roughly half of
/// gravity in lift, so every standard club lands well inside the flight
/// ceiling.
pub const BALL_LIFT_COEFFICIENT: f64 = 2.0e-4;

/// Integration step (s)
pub const TIME_STEP_S: f64 = 0.01;

/// Flight time after which integration gives up (s)
pub const MAX_FLIGHT_TIME_S: f64 = 60.0;

/// Club-head speed per unit of peak angular-rate magnitude
pub const CLUB_HEAD_SPEED_PER_RATE: f64 = 0.5;

/// Impact force per unit of peak acceleration magnitude
pub const IMPACT_FORCE_PER_ACCEL: f64 = 10.0;

/// Ratio of ball speed to club-head speed
pub const SMASH_FACTOR: f64 = 1.4;

/// Launch angle as a fraction of club loft
pub const LAUNCH_ANGLE_PER_LOFT: f64 = 0.7;

/// Backspin (rpm) per m/s of club-head speed
pub const SPIN_RPM_PER_SPEED: f64 = 100.0;

/// Minimum speed below which drag direction is undefined
pub const MIN_VELOCITY_THRESHOLD: f64 = 1e-9;

/// Club used when a requested club is not in the table
pub const DEFAULT_CLUB: &str = "7-Iron";
