/*
 * Responsibility
 * - /ideas handlers (create / list / upvote)
 * - the {idea_id} path segment arrives already decoded via the PublicIdeaId extractor
 * - rows are converted to responses here, encoding ids on the way out
 */
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::ideas::{CreateIdeaRequest, IdeaResponse, ListIdeasQuery},
        extractors::public_id::PublicIdeaId,
    },
    error::AppError,
    services::ranking::RankedIdea,
    state::AppState,
};

fn to_response(state: &AppState, ranked: RankedIdea) -> Result<IdeaResponse, AppError> {
    let RankedIdea {
        idea,
        comments_count,
    } = ranked;

    Ok(IdeaResponse {
        id: state.id_codec.encode(idea.id)?,
        title: idea.title,
        description: idea.description,
        votes: idea.votes,
        created_at: idea.created_at,
        updated_at: idea.updated_at,
        comments_count,
    })
}

pub async fn create_idea(
    State(state): State<AppState>,
    req: Result<Json<CreateIdeaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdeaResponse>), AppError> {
    let Json(req) = req?;

    let created = state
        .ideas
        .create(&req.title, req.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, created)?)))
}

pub async fn list_ideas(
    State(state): State<AppState>,
    query: Result<Query<ListIdeasQuery>, QueryRejection>,
) -> Result<Json<Vec<IdeaResponse>>, AppError> {
    let Query(query) = query?;

    let ranked = state.ideas.list(query.range, query.sort).await?;

    let mut res = Vec::with_capacity(ranked.len());
    for item in ranked {
        res.push(to_response(&state, item)?);
    }

    Ok(Json(res))
}

pub async fn upvote_idea(
    State(state): State<AppState>,
    idea_id: PublicIdeaId,
) -> Result<Json<IdeaResponse>, AppError> {
    let voted = state.ideas.upvote(idea_id.id).await?;

    Ok(Json(to_response(&state, voted)?))
}
