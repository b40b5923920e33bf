//! Dashboard page: HTML rendering over the embedded template.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use services::DashboardView;

use crate::AppState;

pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn dashboard(State(state): State<AppState>) -> Response {
    let view = match state.services.dashboard_service().dashboard().await {
        Ok(view) => view,
        Err(e) => {
            tracing::error!("dashboard fetch failed: {e}");
            return error_page();
        }
    };

    match render_dashboard(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("dashboard render failed: {e}");
            error_page()
        }
    }
}

fn error_page() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(include_str!("template/error.html")),
    )
        .into_response()
}

/// Substitutes the view model into the embedded page template. Scalar
/// stats become text placeholders; the habit list, log map, and daily
/// series are injected as JSON globals for the page script.
fn render_dashboard(view: &DashboardView) -> Result<String, serde_json::Error> {
    let page = include_str!("template/dashboard.html")
        .replace("{{completed_today}}", &view.completed_today.to_string())
        .replace("{{today_progress}}", &view.today_progress.to_string())
        .replace("{{monthly_progress}}", &view.monthly_progress.to_string())
        .replace("{{day}}", &view.day.to_string())
        .replace("{{month}}", &view.month.to_string())
        .replace("{{year}}", &view.year.to_string())
        .replace("{{days_in_month}}", &view.days_in_month.to_string())
        .replace("{{habits_json}}", &serde_json::to_string(&view.habits)?)
        .replace("{{log_map_json}}", &serde_json::to_string(&view.log_map)?)
        .replace(
            "{{daily_progress_json}}",
            &serde_json::to_string(&view.daily_progress)?,
        );
    Ok(page)
}
