use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::PermalinkConfig;
use crate::http::server::AppState;
use crate::permalink::reload::{apply_rules, ReloadError};
use crate::routing::{RegistryError, RoutePattern, TemplateHandler};
use crate::template::TemplateKind;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub initialized: bool,
    pub templates: usize,
}

/// Published handler, as reported by the admin API.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandlerSummary {
    pub template: String,
    pub pattern: String,
    pub generation: u64,
    pub routes: Vec<String>,
}

impl From<&TemplateHandler> for HandlerSummary {
    fn from(handler: &TemplateHandler) -> Self {
        Self {
            template: handler.template().to_string(),
            pattern: handler.pattern().to_string(),
            generation: handler.generation(),
            routes: handler.routes().iter().map(RoutePattern::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PatternUpdate {
    pub pattern: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let initialized = state.registry.is_initialized();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: if initialized { "ready" } else { "starting" },
        initialized,
        templates: state.registry.snapshot().len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<HandlerSummary>> {
    let table = state.registry.snapshot();
    Json(table.iter().map(|(_, handler)| HandlerSummary::from(handler.as_ref())).collect())
}

pub async fn get_permalinks(State(state): State<AppState>) -> Json<PermalinkConfig> {
    Json(PermalinkConfig::clone(&state.patterns.rules()))
}

/// Rebuild one template's routes from the current permalink rules.
pub async fn rebuild_template(
    State(state): State<AppState>,
    Path(template): Path<String>,
) -> Result<Json<HandlerSummary>, RegistryError> {
    let handler = state.registry.change_template_pattern(&template)?;
    Ok(Json(HandlerSummary::from(handler.as_ref())))
}

/// Change the permalink rule of one template and rebuild what it affects.
pub async fn set_permalink(
    State(state): State<AppState>,
    Path(template): Path<String>,
    Json(update): Json<PatternUpdate>,
) -> Result<Json<Vec<HandlerSummary>>, ReloadError> {
    let kind = TemplateKind::convert_from(&template)
        .ok_or_else(|| RegistryError::InvalidTemplateName(template.clone()))?;

    let mut rules = PermalinkConfig::clone(&state.patterns.rules());
    rules.set_rule(kind, update.pattern);

    let rebuilt = apply_rules(&state.patterns, &state.registry, rules)?;
    Ok(Json(rebuilt.iter().map(|h| HandlerSummary::from(h.as_ref())).collect()))
}
