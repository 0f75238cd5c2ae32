pub mod alert;
pub mod filter;
pub mod fleet;
pub mod map_point;
pub mod message;
pub mod position;

pub use alert::{Alert, AlertStatus, AlertType, Coordinates};
pub use filter::{DateRange, FilterCriteria, FilterParams, StatusFilter, TypeFilter};
pub use fleet::{Driver, MaintenanceRecord, Vehicle, VehicleStatus};
pub use map_point::{MapBounds, MapPoint};
pub use position::Position;
