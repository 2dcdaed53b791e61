use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Recipe};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const SOUP: &str = r#"{"recipeId":"1","name":"Soup","ingredients":"water,salt","instructions":"boil"}"#;

// --- home ---

#[tokio::test]
async fn home_names_the_api() {
    let resp = app().oneshot(empty_request("GET", "/recipeapi/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "Recipe Book API");
}

// --- list ---

#[tokio::test]
async fn list_recipes_empty() {
    let resp = app().oneshot(empty_request("GET", "/recipeapi/all")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let recipes: Vec<Recipe> = body_json(resp).await;
    assert!(recipes.is_empty());
}

// --- add ---

#[tokio::test]
async fn add_recipe_returns_201_with_date() {
    let resp = app()
        .oneshot(json_request("POST", "/recipeapi/add", SOUP))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let recipe: Recipe = body_json(resp).await;
    assert_eq!(recipe.recipe_id, 1);
    assert_eq!(recipe.name, "Soup");
    assert!(recipe.date.is_some());
}

#[tokio::test]
async fn add_recipe_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/recipeapi/add", r#"{"recipeId":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_recipe_not_found() {
    let resp = app().oneshot(empty_request("GET", "/recipeapi/get/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Recipe with ID 7 not found.");
}

#[tokio::test]
async fn get_recipe_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/recipeapi/get/soup"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_recipe_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/recipeapi/update", SOUP))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Cannot update. Recipe with ID 1 not found.");
}

// --- delete ---

#[tokio::test]
async fn delete_recipe_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/recipeapi/delete/3"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Cannot delete. Recipe with ID 3 not found.");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // add
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/recipeapi/add", SOUP))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Recipe = body_json(resp).await;
    let date = created.date.clone();

    // list contains the one recipe
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/recipeapi/all"))
        .await
        .unwrap();
    let recipes: Vec<Recipe> = body_json(resp).await;
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].recipe_id, 1);

    // update keeps the server-assigned date
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/recipeapi/update",
            r#"{"recipeId":1,"name":"Broth","ingredients":"bones","instructions":"simmer"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Recipe = body_json(resp).await;
    assert_eq!(updated.name, "Broth");
    assert_eq!(updated.instructions, "simmer");
    assert_eq!(updated.date, date);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/recipeapi/get/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Recipe = body_json(resp).await;
    assert_eq!(fetched.name, "Broth");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/recipeapi/delete/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "Recipe with ID 1 deleted successfully.");

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/recipeapi/get/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/recipeapi/all"))
        .await
        .unwrap();
    let recipes: Vec<Recipe> = body_json(resp).await;
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    use tower::Service;

    let mut app = app().into_service();
    for id in [3, 1, 2] {
        let body = format!(r#"{{"recipeId":{id},"name":"R{id}","ingredients":"i","instructions":"s"}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/recipeapi/add", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/recipeapi/all"))
        .await
        .unwrap();
    let recipes: Vec<Recipe> = body_json(resp).await;
    let ids: Vec<i32> = recipes.iter().map(|r| r.recipe_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
