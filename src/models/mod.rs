// Roster data model and forecast result structures

pub mod athlete;
pub mod forecast;
pub mod graduation;
pub mod mark;
pub mod performance;
pub mod recruiting;
pub mod roster;
pub mod scholarship;
pub mod stats;

pub use athlete::*;
pub use forecast::*;
pub use graduation::*;
pub use mark::*;
pub use performance::*;
pub use recruiting::*;
pub use roster::*;
pub use scholarship::*;
pub use stats::*;
