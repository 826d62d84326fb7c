use std::fmt;

use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f64> for Reps {
    type Error = RepsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RepsError::ParseError);
        }
        if !(0.0..1000.0).contains(&value) {
            return Err(RepsError::OutOfRange);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Reps::new(value as u32)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::ParseError);
        }

        if value < 0.0 {
            return Err(WeightError::Negative);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f64> for Weight {
    type Error = WeightError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        Weight::new(value as f32)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    Negative,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct RPE(u8);

impl RPE {
    pub const ZERO: RPE = RPE(0);
    pub const EIGHT: RPE = RPE(80);
    pub const TEN: RPE = RPE(100);

    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(0.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self((value * 10.0).round() as u8))
    }
}

impl TryFrom<f64> for RPE {
    type Error = RPEError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        RPE::new(value as f32)
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 0.0 to 10.0")]
    OutOfRange,
}

/// Rest after a set in seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RestTime(u32);

impl RestTime {
    pub fn new(value: u32) -> Result<Self, RestTimeError> {
        if value > 3600 {
            return Err(RestTimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<f64> for RestTime {
    type Error = RestTimeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=3600.0).contains(&value) {
            return Err(RestTimeError::OutOfRange);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        RestTime::new(value.round() as u32)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestTimeError {
    #[error("Rest time must be in the range 0 to 3600 s")]
    OutOfRange,
}
