use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use askama::Template;
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;

use crate::api::models::{GenerateRequest, GenerateResponse};
use crate::api::page::IndexPage;
use crate::api::response::{self, ApiResponse};
use crate::error::Result;
use crate::generator::{FormState, SeoGenerator, LOADING_LABEL};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/api/generate", post(generate_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let generator = SeoGenerator::new(state.client.clone());
    render_page(&generator)
}

async fn form_handler(
    State(state): State<AppState>,
    Form(form): Form<FormState>,
) -> Response {
    let mut generator = new_generator(&state, form);
    let outcome = generator.submit().await.map(|_| ());
    if let Err(err) = outcome {
        log::debug!("Form submission for {:?} ended with: {}", generator.form().url, err);
    }
    render_page(&generator)
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GenerateResponse>>)> {
    let mut generator = new_generator(&state, req);
    let start_time = std::time::Instant::now();

    let output = generator.submit().await?.clone();

    log::info!("Generated SEO content in {:?}", start_time.elapsed());
    Ok(response::success(GenerateResponse {
        url: generator.form().url.clone(),
        output,
        generated_at: Utc::now(),
    }))
}

fn new_generator(state: &AppState, form: FormState) -> SeoGenerator {
    log::info!("Processing submission for URL: {:?}", form.url);
    let mut generator = SeoGenerator::new(state.client.clone());
    generator.set_form(form);
    generator
}

fn render_page(generator: &SeoGenerator) -> Response {
    let page = IndexPage {
        form: generator.form(),
        view: generator.view(),
        loading_label: LOADING_LABEL,
    };
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            log::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}
