use axum::response::{Html, IntoResponse};
use tera::Context;

use crate::domain::fields::{CATEGORIES, FLOORS, LOCATIONS, OCCUPATIONS};

pub async fn index() -> impl IntoResponse {
    render_template("index.html", Context::new())
}

pub async fn lost_form() -> impl IntoResponse {
    render_template("lost.html", form_context())
}

pub async fn found_form() -> impl IntoResponse {
    render_template("found.html", form_context())
}

pub async fn admin_dashboard() -> impl IntoResponse {
    render_template("admin.html", Context::new())
}

fn form_context() -> Context {
    let mut ctx = Context::new();
    ctx.insert("categories", CATEGORIES);
    ctx.insert("occupations", OCCUPATIONS);
    ctx.insert("floors", FLOORS);
    ctx.insert("locations", LOCATIONS);
    ctx
}

fn render_template(name: &str, ctx: Context) -> Html<String> {
    let tera = crate::templates::get_tera();
    let rendered = tera
        .render(name, &ctx)
        .unwrap_or_else(|_| format!("Template error: {}", name));
    Html(rendered)
}
