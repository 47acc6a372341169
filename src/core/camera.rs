use crate::{core::geo::LatLng, traits::Lerp};
use serde::{Deserialize, Serialize};

/// Easing curves a host surface can use for camera animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            // Smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraAnimation {
    pub duration_ms: u64,
    pub easing: EasingType,
}

/// Where the camera should end up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraCommand {
    pub center: LatLng,
    /// Metres above ground
    pub altitude: f64,
    /// Degrees clockwise from north
    pub heading: f64,
    /// `None` jumps without animating
    pub animation: Option<CameraAnimation>,
}

impl CameraCommand {
    /// Camera centre and altitude `t` (0 to 1) of the way from a starting
    /// pose to this command. Unanimated commands land immediately.
    pub fn sample_from(&self, from_center: LatLng, from_altitude: f64, t: f64) -> (LatLng, f64) {
        let eased = self.animation.map_or(1.0, |a| a.easing.apply(t));
        (
            from_center.lerp(&self.center, eased),
            Lerp::lerp(&from_altitude, &self.altitude, eased),
        )
    }
}

/// Identifies one issued camera command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CameraTicket(pub u64);

/// Tracks the in-flight camera command. The most recent command wins; a
/// completion for anything older is ignored.
#[derive(Debug, Default)]
pub struct CameraTracker {
    next: u64,
    in_flight: Option<CameraTicket>,
    last_command: Option<CameraCommand>,
}

impl CameraTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new command; returns its ticket and the one it supersedes
    pub fn issue(&mut self, command: CameraCommand) -> (CameraTicket, Option<CameraTicket>) {
        self.next += 1;
        let ticket = CameraTicket(self.next);
        let superseded = self.in_flight.replace(ticket);
        self.last_command = Some(command);
        (ticket, superseded)
    }

    /// Returns true when `ticket` was the live command
    pub fn finish(&mut self, ticket: CameraTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> Option<CameraTicket> {
        self.in_flight
    }

    pub fn last_command(&self) -> Option<&CameraCommand> {
        self.last_command.as_ref()
    }
}
