use crate::AppState;
use crate::error::CmsError;
use crate::features::auth::AdminUser;
use crate::parser::fields::fields_for_template;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize)]
pub struct TemplateFields {
    pub template: String,
    pub fields: BTreeSet<String>,
}

pub fn templates_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates_handler))
        .route("/{name}/fields", get(template_fields_handler))
}

async fn list_templates_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, CmsError> {
    Ok(Json(state.templates.list().await?))
}

async fn template_fields_handler(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TemplateFields>, CmsError> {
    let fields = fields_for_template(state.templates.as_ref(), &name).await?;
    Ok(Json(TemplateFields {
        template: name,
        fields,
    }))
}
