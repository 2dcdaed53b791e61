//! Stateless HTTP request builder and response parser for the recipe API.
//!
//! # Design
//! `RecipeClient` holds only the endpoint root (`{base}/recipeapi`) and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.
//!
//! Mutating operations accept any 2xx status; the body they return is not
//! needed because every mutation is followed by a full list fetch.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Recipe, RecipeForm, RecipeId};

const API_PREFIX: &str = "recipeapi";

/// Synchronous, stateless client for the recipe API.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    root: Url,
}

impl RecipeClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut root = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        root.set_query(None);
        root.set_fragment(None);
        root.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .push(API_PREFIX);
        Ok(Self { root })
    }

    /// Endpoint root every request path starts with.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    pub fn build_list_recipes(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, &["all"])
    }

    pub fn build_get_recipe(&self, id: &RecipeId) -> HttpRequest {
        self.bare(HttpMethod::Get, &["get", id.as_str()])
    }

    pub fn build_create_recipe(&self, form: &RecipeForm) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "add", form)
    }

    pub fn build_update_recipe(&self, form: &RecipeForm) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, "update", form)
    }

    pub fn build_delete_recipe(&self, id: &RecipeId) -> HttpRequest {
        self.bare(HttpMethod::Delete, &["delete", id.as_str()])
    }

    pub fn parse_list_recipes(&self, response: HttpResponse) -> Result<Vec<Recipe>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let recipes: Option<Vec<Recipe>> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(recipes.unwrap_or_default())
    }

    pub fn parse_get_recipe(&self, response: HttpResponse) -> Result<Recipe, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_recipe(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_recipe(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_recipe(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.root.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url.into()
    }

    fn bare(&self, method: HttpMethod, segments: &[&str]) -> HttpRequest {
        HttpRequest {
            method,
            path: self.endpoint(segments),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json(&self, method: HttpMethod, segment: &str, form: &RecipeForm) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(form).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.endpoint(&[segment]),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RecipeClient {
        RecipeClient::new("http://localhost:8080").unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn soup_form() -> RecipeForm {
        RecipeForm {
            recipe_id: "1".to_string(),
            name: "Soup".to_string(),
            ingredients: "water,salt".to_string(),
            instructions: "boil".to_string(),
        }
    }

    #[test]
    fn build_list_recipes_produces_correct_request() {
        let req = client().build_list_recipes();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/recipeapi/all");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_recipe_produces_correct_request() {
        let req = client().build_get_recipe(&RecipeId::new("42"));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8080/recipeapi/get/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_recipe_sends_form_as_json() {
        let req = client().build_create_recipe(&soup_form()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8080/recipeapi/add");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "recipeId": "1",
                "name": "Soup",
                "ingredients": "water,salt",
                "instructions": "boil"
            })
        );
    }

    #[test]
    fn build_update_recipe_keeps_id_in_body() {
        let req = client().build_update_recipe(&soup_form()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8080/recipeapi/update");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["recipeId"], "1");
    }

    #[test]
    fn build_delete_recipe_produces_correct_request() {
        let req = client().build_delete_recipe(&RecipeId::new("5"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/recipeapi/delete/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn path_identifiers_are_percent_encoded() {
        let req = client().build_delete_recipe(&RecipeId::new("a b/c"));
        assert_eq!(req.path, "http://localhost:8080/recipeapi/delete/a%20b%2Fc");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RecipeClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.build_list_recipes().path, "http://localhost:8080/recipeapi/all");
    }

    #[test]
    fn base_path_is_preserved() {
        let client = RecipeClient::new("https://example.com/api/").unwrap();
        assert_eq!(client.root(), "https://example.com/api/recipeapi");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RecipeClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
        let err = RecipeClient::new("mailto:cook@example.com").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn parse_list_recipes_success() {
        let recipes = client()
            .parse_list_recipes(response(
                200,
                r#"[{"recipeId":1,"name":"Soup","ingredients":"water","instructions":"boil","date":"2024-05-01"}]"#,
            ))
            .unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].recipe_id.as_str(), "1");
        assert_eq!(recipes[0].date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn parse_list_recipes_treats_empty_or_null_as_empty() {
        assert!(client().parse_list_recipes(response(200, "")).unwrap().is_empty());
        assert!(client().parse_list_recipes(response(200, "null")).unwrap().is_empty());
        assert!(client().parse_list_recipes(response(200, "[]")).unwrap().is_empty());
    }

    #[test]
    fn parse_list_recipes_bad_json() {
        let err = client().parse_list_recipes(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_recipes_server_error() {
        let err = client()
            .parse_list_recipes(response(500, "Error fetching recipes: boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_recipe_not_found() {
        let err = client()
            .parse_get_recipe(response(404, "Recipe with ID 9 not found."))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_recipe_accepts_created() {
        let body = r#"{"recipeId":1,"name":"Soup","ingredients":"water","instructions":"boil"}"#;
        assert!(client().parse_create_recipe(response(201, body)).is_ok());
    }

    #[test]
    fn parse_update_recipe_not_found() {
        let err = client()
            .parse_update_recipe(response(404, "Cannot update. Recipe with ID 1 not found."))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_recipe_accepts_text_body() {
        let ok = response(200, "Recipe with ID 1 deleted successfully.");
        assert!(client().parse_delete_recipe(ok).is_ok());
    }
}
