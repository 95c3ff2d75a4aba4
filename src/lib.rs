//! Builds a printable rotating-day school timetable from per-period class
//! data: normalize, resolve conflicts, lay out the day rotation, swap in a
//! free-period name on X-Day and render an SVG page.

pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod import;
pub mod parser;
pub mod render;
pub mod schedule;
pub mod web;

pub use config::AppConfig;
pub use error::{GenerateError, NormalizationWarning, ParseError, RenderError, ValidationError};
pub use generator::{generate_schedule, GenerateOptions, GeneratedSchedule};
pub use parser::{load_schedule, parse_schedule_csv, parse_schedule_json, RawSchedule};
pub use render::{render_svg, RenderOptions, SvgDocument};
pub use schedule::{Day, Period, ScheduleGrid};
