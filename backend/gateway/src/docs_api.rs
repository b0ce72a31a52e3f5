//! `GET /api/docs` (OpenAPI description of the gateway) and `GET /api/docs/ui`
//! (Swagger UI page that renders it).

use axum::Json;
use axum::response::Html;
use garden_core::EmotionalState;
use serde_json::{Value, json};

use crate::links::{self, Link};

/// Swagger UI shell; the browser fetches the spec from `/api/docs`.
const DOCS_UI_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Mindful Garden API Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@4/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@4/swagger-ui-bundle.js"></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({
          url: '/api/docs',
          dom_id: '#swagger-ui',
          presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
          layout: "BaseLayout"
        });
      };
    </script>
  </body>
</html>
"#;

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
    })
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": format!("#/components/schemas/{schema}") } } }
    })
}

fn ok(description: &str) -> Value {
    json!({ "200": { "description": description } })
}

fn session_id_param() -> Value {
    json!([{ "name": "sessionId", "in": "path", "required": true, "schema": { "type": "string" } }])
}

/// Build the OpenAPI 3.0 document.
pub fn openapi() -> Value {
    let state_enum: Vec<&str> = EmotionalState::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Mindful Garden API",
            "description": "Emotional awareness and reflection through nature metaphors.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/states": {
                "get": { "summary": "List emotional states with metadata", "responses": ok("State metadata table") }
            },
            "/api/session/create": {
                "post": { "summary": "Create a new session", "responses": ok("New session id") }
            },
            "/api/session/{sessionId}": {
                "get": {
                    "summary": "Get the stored session record",
                    "parameters": session_id_param(),
                    "responses": {
                        "200": { "description": "Session record" },
                        "404": error_response("Session not found"),
                    }
                }
            },
            "/api/history/{sessionId}": {
                "get": {
                    "summary": "Get the emotional journey and message history",
                    "parameters": session_id_param(),
                    "responses": {
                        "200": { "description": "Journey with computed durations" },
                        "404": error_response("Session not found"),
                    }
                }
            },
            "/api/chat": {
                "post": {
                    "summary": "Send a message; creates a session if needed",
                    "requestBody": json_body("ChatRequest"),
                    "responses": {
                        "200": { "description": "Response, follow-up and transition insight" },
                        "400": error_response("Missing or unknown emotional state"),
                    }
                }
            },
            "/api/response": {
                "post": {
                    "summary": "Send a message to an existing session",
                    "requestBody": json_body("RespondRequest"),
                    "responses": {
                        "200": { "description": "Response, follow-up and transition insight" },
                        "400": error_response("Missing session id or unknown emotional state"),
                        "404": error_response("Session not found"),
                    }
                }
            },
            "/api/health": {
                "get": { "summary": "Service health", "responses": ok("Health report") }
            },
            "/api/docs": {
                "get": { "summary": "This OpenAPI document", "responses": ok("OpenAPI 3.0 document") }
            },
            "/api/docs/ui": {
                "get": { "summary": "Swagger UI for this document", "responses": ok("HTML page") }
            },
        },
        "components": {
            "schemas": {
                "ChatRequest": {
                    "type": "object",
                    "required": ["state"],
                    "properties": {
                        "message": { "type": "string" },
                        "state": { "type": "string", "enum": state_enum },
                        "sessionId": { "type": "string" },
                    }
                },
                "RespondRequest": {
                    "type": "object",
                    "required": ["sessionId", "emotionalState"],
                    "properties": {
                        "sessionId": { "type": "string" },
                        "emotionalState": { "type": "string", "enum": state_enum },
                        "message": { "type": "string" },
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string" },
                        "_links": { "type": "object" },
                    }
                }
            }
        }
    })
}

/// Handler for `GET /api/docs`.
pub async fn get_docs() -> Json<Value> {
    let mut doc = openapi();
    doc["_links"] = json!(links::links([
        ("self", Link::get(links::DOCS)),
        ("ui", Link::get(links::DOCS_UI)),
        ("states", links::states()),
    ]));
    Json(doc)
}

/// Handler for `GET /api/docs/ui`.
pub async fn get_docs_ui() -> Html<&'static str> {
    Html(DOCS_UI_PAGE)
}
