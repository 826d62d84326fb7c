#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::slice::Iter;

mod analytics;
mod blueprint;
mod consistency;
mod error;
mod exercise;
mod generation;
mod movement;
mod muscle;
mod plan;
mod schedule;
mod selection;
mod template;
mod training;
mod user;
mod workout_session;

pub use analytics::*;
pub use blueprint::*;
pub use consistency::*;
pub use error::*;
pub use exercise::*;
pub use generation::*;
pub use movement::*;
pub use muscle::*;
pub use plan::*;
pub use schedule::*;
pub use selection::*;
pub use template::*;
pub use training::*;
pub use user::*;
pub use workout_session::*;

/// Closed enumerations with a fixed iteration order.
pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
}
