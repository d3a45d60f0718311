use std::error::Error;
use std::fmt;

/// Errors raised by the flight simulator
#[derive(Debug)]
pub enum FlightError {
    /// The trajectory analyzer was handed no points
    EmptyTrajectory,
    /// The ball never came back down before the flight ceiling
    NoGroundContact { steps: usize, elapsed_s: f64 },
    /// A configuration value is out of range
    InvalidConfig(String),
    /// Launch conditions contain values the integrator cannot use
    InvalidLaunch(String),
    /// A sensor packet could not be decoded
    Packet(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for FlightError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightError::EmptyTrajectory => {
                write!(f, "cannot analyze an empty trajectory")
            }
            FlightError::NoGroundContact { steps, elapsed_s } => write!(
                f,
                "ball did not return to the ground after {} steps ({:.2} s of flight)",
                steps, elapsed_s
            ),
            FlightError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            FlightError::InvalidLaunch(msg) => write!(f, "invalid launch conditions: {}", msg),
            FlightError::Packet(msg) => write!(f, "malformed sensor packet: {}", msg),
            FlightError::Io(e) => write!(f, "I/O error: {}", e),
            FlightError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for FlightError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FlightError::Io(e) => Some(e),
            FlightError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlightError {
    fn from(e: std::io::Error) -> Self {
        FlightError::Io(e)
    }
}

impl From<serde_json::Error> for FlightError {
    fn from(e: serde_json::Error) -> Self {
        FlightError::Json(e)
    }
}
