//! Plain geolocation readings, watch options and failures.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// One position fix reported by the device.
pub struct GeolocationPosition {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Accuracy of `latitude`/`longitude` in meters.
    pub accuracy: f64,
    /// Height above the WGS84 ellipsoid in meters.
    pub altitude: Option<f64>,
    /// Accuracy of `altitude` in meters.
    pub altitude_accuracy: Option<f64>,
    /// Direction of travel in degrees clockwise from true north.
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    pub speed: Option<f64>,
    /// Milliseconds since the Unix epoch at which the fix was taken.
    pub timestamp: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Options forwarded to `watchPosition`.
pub struct GeolocationOptions {
    /// Ask for the most accurate fix the device can produce.
    pub enable_high_accuracy: bool,
    /// Accept a cached fix no older than this. `None` uses the browser default (no cache).
    pub maximum_age: Option<Duration>,
    /// Give up on a fix after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a position could not be obtained.
pub enum GeolocationErrorCode {
    /// The user or policy refused location access.
    PermissionDenied,
    /// The device could not determine a position.
    PositionUnavailable,
    /// No fix arrived within the configured timeout.
    Timeout,
    /// The environment exposes no geolocation facility.
    Unsupported,
}

impl GeolocationErrorCode {
    /// Maps a `GeolocationPositionError.code` value.
    ///
    /// Unknown codes count as [`GeolocationErrorCode::PositionUnavailable`].
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            3 => Self::Timeout,
            _ => Self::PositionUnavailable,
        }
    }
}

impl fmt::Display for GeolocationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PermissionDenied => "permission denied",
            Self::PositionUnavailable => "position unavailable",
            Self::Timeout => "timed out",
            Self::Unsupported => "unsupported",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("geolocation {code}: {message}")]
/// Failure reported by a geolocation watch.
pub struct GeolocationError {
    /// Failure class.
    pub code: GeolocationErrorCode,
    /// Browser-supplied detail.
    pub message: String,
}

impl GeolocationError {
    /// Builds an error of class `code`.
    pub fn new(code: GeolocationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds a [`GeolocationErrorCode::Unsupported`] error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(GeolocationErrorCode::Unsupported, message)
    }
}
