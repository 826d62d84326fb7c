#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod config;
pub mod memory;
pub mod rows;

pub use cache::{CachedSessions, SessionCache};
pub use config::{ConfigError, GenerationConfig};
pub use memory::{InMemoryStore, PlanDay};
pub use rows::{MappingError, map_session_row, map_session_rows, parse_time_zone, today_in};
