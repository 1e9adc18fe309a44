//! Integration tests for Refoodify.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p refoodify-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pantry_file_storage` - pantry and saved tips persisted through a JSON file
//! - `recipe_api` - proxy client against a local stub server
//!
//! The stub in [`stub_proxy`] answers like the Refoodify proxy: every body is
//! a `{ success, data | error }` envelope, failures are 400 and unknown
//! endpoints 404.

use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

type Params = Query<HashMap<String, String>>;

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn(router: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Url::parse(&format!("http://{addr}")).expect("stub URL")
}

/// Router mimicking the proxy endpoints with canned data.
pub fn stub_proxy() -> Router {
    Router::new()
        .route("/api/recipes/findByIngredients", get(find_by_ingredients))
        .route("/api/recipes/search", get(search_recipes))
        .route("/api/recipes/getDetails", get(recipe_details))
        .route("/api/search/tips", get(search_tips))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                axum::Json(json!({ "success": false, "error": "API endpoint not found" })),
            )
        })
}

fn envelope(result: Result<Value, &str>) -> Response {
    match result {
        Ok(data) => axum::Json(json!({ "success": true, "data": data })).into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "success": false, "error": error })),
        )
            .into_response(),
    }
}

async fn find_by_ingredients(Query(params): Params) -> Response {
    let ingredients = params.get("ingredients").cloned().unwrap_or_default();
    let number: usize = params
        .get("number")
        .and_then(|n| n.parse().ok())
        .unwrap_or(6);

    let recipes: Vec<Value> = ingredients
        .split(',')
        .filter(|i| !i.is_empty())
        .enumerate()
        .map(|(i, ingredient)| {
            json!({
                "id": 1000 + i,
                "title": format!("Quick {ingredient} bake"),
                "image": format!("https://img.example/{i}.jpg"),
                "usedIngredientCount": 1,
                "missedIngredientCount": 2,
            })
        })
        .take(number)
        .collect();
    envelope(Ok(Value::Array(recipes)))
}

async fn search_recipes(Query(params): Params) -> Response {
    match params.get("q").filter(|q| !q.is_empty()) {
        Some(q) => envelope(Ok(json!({
            "results": [{ "id": 42, "title": format!("{q} soup"), "imageType": "jpg" }],
            "totalResults": 17,
        }))),
        None => envelope(Err("Search query required")),
    }
}

async fn recipe_details(Query(params): Params) -> Response {
    match params.get("recipeId").filter(|id| !id.is_empty()) {
        Some(id) if id == "402" => (
            StatusCode::OK,
            axum::Json(json!({
                "success": false,
                "error": "Spoonacular API error",
                "statusCode": 402,
            })),
        )
            .into_response(),
        Some(id) => envelope(Ok(json!({
            "id": id.parse::<u64>().unwrap_or_default(),
            "title": "Tomato Soup",
            "readyInMinutes": 30,
            "servings": 4,
            "sourceUrl": "https://recipes.example/tomato-soup",
            "summary": "A <b>simple</b> soup.",
        }))),
        None => envelope(Err("Recipe ID required")),
    }
}

async fn search_tips(Query(params): Params) -> Response {
    match params.get("q").filter(|q| !q.is_empty()) {
        Some(q) => envelope(Ok(json!({
            "items": [{
                "title": format!("How to Store {q} Properly"),
                "link": "https://tips.example/store",
                "snippet": format!("Learn the best practices for keeping {q} fresh."),
            }]
        }))),
        None => envelope(Err("Search query required")),
    }
}
