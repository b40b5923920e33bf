#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard_service;
pub mod error;
pub mod habit_service;
pub mod log_service;

pub use habit_core::Clock;

pub use app_services::AppServices;
pub use dashboard_service::{DashboardService, DashboardView, HabitView};
pub use error::{AppServicesError, DashboardError, HabitLogServiceError, HabitServiceError};
pub use habit_service::HabitService;
pub use log_service::HabitLogService;
