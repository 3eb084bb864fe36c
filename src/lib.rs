// Simple Calendar Library
// Month grid computation and event row packing

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{CalendarError, CalendarResult};
pub use models::event::{EventRecord, NormalizedEvent};
pub use models::layout::{CalendarLayout, CellLayout, Segment, SegmentStyle};
pub use models::settings::{CalendarConfig, GridMode, OverflowPolicy};
pub use services::engine::{CalendarEngine, Clock, FixedClock, PoolReport, SystemClock};
