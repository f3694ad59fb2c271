//! Server-rendered HTML pages

use crate::error::PageError;
use crate::extractors::PageForm;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    task: String,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let tasks = state.tasks.list().await?;
    Ok(Html(state.templates.index(&tasks)?))
}

pub async fn create(
    State(state): State<AppState>,
    PageForm(form): PageForm<NewTaskForm>,
) -> Result<Redirect, PageError> {
    state.tasks.create(&form.content, None).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let task = state.tasks.get(&id).await?.ok_or(PageError::NotFound)?;
    Ok(Html(state.templates.edit(&task)?))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    PageForm(form): PageForm<EditTaskForm>,
) -> Result<Redirect, PageError> {
    state
        .tasks
        .update_content(&id, &form.task)
        .await?
        .ok_or(PageError::NotFound)?;
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, PageError> {
    state.tasks.delete(&id).await?;
    Ok(Redirect::to("/"))
}
