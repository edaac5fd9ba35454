/*
 * Responsibility
 * - /ideas/{idea_id}/comments handlers (list / create)
 * - listing answers 200 with [] for an idea that doesn't exist
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::{
    api::v1::{
        dto::comments::{CommentResponse, CreateCommentRequest},
        extractors::public_id::PublicIdeaId,
    },
    error::AppError,
    repos::CommentRow,
    state::AppState,
};

fn to_response(state: &AppState, row: CommentRow) -> Result<CommentResponse, AppError> {
    Ok(CommentResponse {
        id: state.id_codec.encode(row.id)?,
        idea_id: state.id_codec.encode(row.idea_id)?,
        author: row.author,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_comments(
    State(state): State<AppState>,
    idea_id: PublicIdeaId,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = state.comments.list_by_idea(idea_id.id).await?;

    let res = rows
        .into_iter()
        .map(|row| to_response(&state, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(res))
}

pub async fn create_comment(
    State(state): State<AppState>,
    idea_id: PublicIdeaId,
    req: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let Json(req) = req?;

    let row = state
        .comments
        .create(idea_id.id, req.author.as_deref(), &req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, row)?)))
}
