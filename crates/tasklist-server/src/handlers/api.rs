//! JSON task API

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tasklist_core::{MessageBody, Task, TaskRequest};

/// `complete` value given to tasks created through the API
const INITIAL_COMPLETE: i64 = 0;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks.list_newest_first().await?;
    Ok(Json(tasks))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    match state.tasks.get(&id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let content = req.content().ok_or_else(ApiError::content_required)?;

    let task = state
        .tasks
        .create(content, Some(INITIAL_COMPLETE))
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let content = req.content().ok_or_else(ApiError::content_required)?;

    match state.tasks.update_content(&id, content).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    state.tasks.delete(&id).await?;
    Ok(Json(MessageBody::new("Task deleted")))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{
        builder, read_json, request, send, send_json, test_app, test_app_with_store,
    };
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use tasklist_core::{Task, TaskStore};

    #[tokio::test]
    async fn test_task_lifecycle() {
        let app = test_app();

        // Create
        let response = send_json(&app, Method::POST, "/api/tasks", json!({"task": "buy milk"})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());
        assert_eq!(created["content"], "buy milk");
        assert_eq!(created["complete"], 0);
        assert!(created["created_at"].as_str().is_some_and(|s| !s.is_empty()));

        // Read back
        let path = format!("/api/tasks/{}", id);
        let response = send(&app, request(Method::GET, &path)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, created);

        // Update
        let response = send_json(&app, Method::PUT, &path, json!({"task": "buy oat milk"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = read_json(response).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["created_at"], created["created_at"]);
        assert_eq!(updated["content"], "buy oat milk");
        assert!(updated.get("complete").is_none());

        // Delete
        let response = send(&app, request(Method::DELETE, &path)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({"message": "Task deleted"}));

        let response = send(&app, request(Method::GET, &path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await, json!({"error": "Task not found"}));
    }

    #[tokio::test]
    async fn test_create_requires_content() {
        let (app, store) = test_app_with_store();

        for body in [json!({}), json!({"task": ""}), json!({"task": null})] {
            let response = send_json(&app, Method::POST, "/api/tasks", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                read_json(response).await,
                json!({"error": "Task content is required"})
            );
        }

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_body_is_bad_request() {
        let (app, store) = test_app_with_store();

        let response = send(
            &app,
            builder(Method::POST, "/api/tasks")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(response).await["error"].is_string());

        for body in [json!({"task": 5}), json!([1]), json!("buy milk")] {
            let response = send_json(&app, Method::POST, "/api/tasks", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                read_json(response).await,
                json!({"error": "Task content is required"})
            );
        }

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_validation_and_missing_task() {
        let (app, store) = test_app_with_store();

        let response =
            send_json(&app, Method::PUT, "/api/tasks/missing", json!({"task": "x"})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.is_empty());

        let task = Task::new("keep me");
        store.put(&task).await.unwrap();

        let path = format!("/api/tasks/{}", task.id);
        let response = send_json(&app, Method::PUT, &path, json!({"task": ""})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.get(&task.id).await.unwrap().unwrap().content, "keep me");
    }

    #[tokio::test]
    async fn test_update_drops_complete_flag() {
        let (app, store) = test_app_with_store();

        let response = send_json(&app, Method::POST, "/api/tasks", json!({"task": "a"})).await;
        let created = read_json(response).await;
        assert_eq!(created["complete"], 0);

        let id = created["id"].as_str().unwrap().to_string();
        let path = format!("/api/tasks/{}", id);
        let response = send_json(&app, Method::PUT, &path, json!({"task": "b"})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Value = read_json(response).await;
        assert!(updated.get("complete").is_none());

        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.content, "b");
        assert_eq!(stored.complete, None);
        assert_eq!(stored.created_at, created["created_at"]);
    }

    #[tokio::test]
    async fn test_delete_missing_task_succeeds() {
        let app = test_app();

        let response = send(&app, request(Method::DELETE, "/api/tasks/never-existed")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["message"], "Task deleted");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (app, store) = test_app_with_store();

        for (id, created_at) in [
            ("b", "2024-02-01T00:00:00.000000+00:00"),
            ("none", ""),
            ("c", "2024-03-01T00:00:00.000000+00:00"),
            ("a", "2024-01-01T00:00:00.000000+00:00"),
        ] {
            store
                .put(&Task {
                    id: id.to_string(),
                    content: format!("task {}", id),
                    created_at: created_at.to_string(),
                    complete: None,
                })
                .await
                .unwrap();
        }

        let response = send(&app, request(Method::GET, "/api/tasks")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;

        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["c", "b", "a", "none"]);

        let stamps: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["created_at"].as_str().unwrap())
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let app = test_app();

        let mut ids = Vec::new();
        for _ in 0..5 {
            let response =
                send_json(&app, Method::POST, "/api/tasks", json!({"task": "same"})).await;
            let body: Value = read_json(response).await;
            ids.push(body["id"].as_str().unwrap().to_string());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
