// Roster analytics services

pub mod forecast_service;
pub mod graduation_forecast_service;
pub mod performance_projection_service;
pub mod recruiting_forecast_service;
pub mod roster_csv_service;
pub mod roster_stats_service;
pub mod scholarship_service;

pub use forecast_service::ForecastService;
pub use graduation_forecast_service::GraduationForecastService;
pub use performance_projection_service::{projected_mark_for, PerformanceProjectionService};
pub use recruiting_forecast_service::RecruitingForecastService;
pub use roster_csv_service::{ImportReport, RosterCsvService, RowError};
pub use roster_stats_service::RosterStatsService;
pub use scholarship_service::ScholarshipService;
