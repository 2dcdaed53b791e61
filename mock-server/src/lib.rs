use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(deserialize_with = "numeric_id")]
    pub recipe_id: i32,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Form clients send the identifier as text; stored records use integers.
fn numeric_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i32),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub type Db = Arc<RwLock<BTreeMap<i32, Recipe>>>;

type Rejection = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/recipeapi/", get(home))
        .route("/recipeapi/add", post(add_recipe))
        .route("/recipeapi/all", get(list_recipes))
        .route("/recipeapi/get/{id}", get(get_recipe))
        .route("/recipeapi/update", put(update_recipe))
        .route("/recipeapi/delete/{id}", delete(delete_recipe))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn home() -> &'static str {
    "Recipe Book API"
}

async fn list_recipes(State(db): State<Db>) -> Json<Vec<Recipe>> {
    let recipes = db.read().await;
    Json(recipes.values().cloned().collect())
}

/// Saving an existing identifier overwrites the stored record.
async fn add_recipe(
    State(db): State<Db>,
    Json(mut recipe): Json<Recipe>,
) -> (StatusCode, Json<Recipe>) {
    recipe.date = Some(today());
    info!(recipe_id = recipe.recipe_id, "recipe added");
    db.write().await.insert(recipe.recipe_id, recipe.clone());
    (StatusCode::CREATED, Json(recipe))
}

async fn get_recipe(
    State(db): State<Db>,
    Path(id): Path<i32>,
) -> Result<Json<Recipe>, Rejection> {
    let recipes = db.read().await;
    recipes.get(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Recipe with ID {id} not found."),
        )
    })
}

async fn update_recipe(
    State(db): State<Db>,
    Json(input): Json<Recipe>,
) -> Result<Json<Recipe>, Rejection> {
    let mut recipes = db.write().await;
    let id = input.recipe_id;
    let recipe = recipes.get_mut(&id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Cannot update. Recipe with ID {id} not found."),
        )
    })?;
    recipe.name = input.name;
    recipe.ingredients = input.ingredients;
    recipe.instructions = input.instructions;
    info!(recipe_id = id, "recipe updated");
    Ok(Json(recipe.clone()))
}

async fn delete_recipe(
    State(db): State<Db>,
    Path(id): Path<i32>,
) -> Result<String, Rejection> {
    let mut recipes = db.write().await;
    match recipes.remove(&id) {
        Some(_) => {
            info!(recipe_id = id, "recipe deleted");
            Ok(format!("Recipe with ID {id} deleted successfully."))
        }
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Cannot delete. Recipe with ID {id} not found."),
        )),
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
