use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ApiError;
use crate::error::Result as CatalogResult;
use crate::{CatalogService, CommentId, NewResource, ResourceId, UserId, Vote};

pub type AppState = Arc<CatalogService>;

type Payload<T> = Result<Json<T>, JsonRejection>;
type PathId = Result<Path<i64>, PathRejection>;
type Params<T> = Result<Query<T>, QueryRejection>;

/// Body returned by every successful delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    pub status: String,
    pub message: String,
}

impl Confirmation {
    fn success(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "success".to_string(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    comment_body: String,
    user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct VoteBody {
    user_id: UserId,
    like_or_dislike: Vote,
}

#[derive(Debug, Deserialize)]
pub struct TagBody {
    tag_name: String,
}

#[derive(Debug, Deserialize)]
pub struct StudyListBody {
    #[serde(deserialize_with = "resource_id_from_number_or_string")]
    resource_id: ResourceId,
}

/// Accepts `1` as well as `"1"`; browser forms post ids as strings.
fn resource_id_from_number_or_string<'de, D>(deserializer: D) -> Result<ResourceId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(ResourceId::new(id)),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map(ResourceId::new)
            .map_err(|_| serde::de::Error::custom(format!("invalid resource_id: {text:?}"))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteResourceParams {
    #[serde(default)]
    cascade: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteScope {
    user_id: Option<i64>,
}

/// Runs a store operation on the blocking pool.
async fn run<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&CatalogService) -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || op(&service)).await?;
    Ok(result?)
}

fn non_empty<T>(rows: Vec<T>) -> Result<Json<Vec<T>>, ApiError> {
    if rows.is_empty() {
        Err(ApiError::Empty)
    } else {
        Ok(Json(rows))
    }
}

// --- Resources ---

pub async fn create_resource(
    State(state): State<AppState>,
    payload: Payload<NewResource>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new) = payload?;
    let resource = run(&state, move |service| service.create_resource(&new)).await?;
    Ok((StatusCode::CREATED, Json(vec![resource])))
}

pub async fn list_resources(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let resources = run(&state, |service| service.list_resources()).await?;
    non_empty(resources)
}

pub async fn get_resource(
    State(state): State<AppState>,
    path: PathId,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let resource = run(&state, move |service| {
        service.get_resource(ResourceId::new(res_id))
    })
    .await?;
    Ok(Json(vec![resource]))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    path: PathId,
    params: Params<DeleteResourceParams>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let Query(params) = params?;
    let id = ResourceId::new(res_id);
    let cascade = params.cascade;
    let (_, counts) = run(&state, move |service| {
        service.delete_resource_counted(id, cascade)
    })
    .await?;

    let message = if cascade {
        format!(
            "Deleted resource {id} with {} comments, {} votes and {} study-list entries",
            counts.comments, counts.likes, counts.study_list
        )
    } else {
        format!("Deleted resource {id}")
    };
    Ok(Confirmation::success(message))
}

// --- Comments ---

pub async fn create_comment(
    State(state): State<AppState>,
    path: PathId,
    payload: Payload<CommentBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let Json(body) = payload?;
    let comment = run(&state, move |service| {
        service.create_comment(ResourceId::new(res_id), &body.comment_body, body.user_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(vec![comment])))
}

pub async fn list_comments(
    State(state): State<AppState>,
    path: PathId,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let comments = run(&state, move |service| {
        service.list_comments(ResourceId::new(res_id))
    })
    .await?;
    non_empty(comments)
}

pub async fn delete_comment(
    State(state): State<AppState>,
    path: PathId,
) -> Result<impl IntoResponse, ApiError> {
    let Path(comment_id) = path?;
    let id = CommentId::new(comment_id);
    run(&state, move |service| service.delete_comment(id)).await?;
    Ok(Confirmation::success(format!("Deleted comment {id}")))
}

// --- Votes ---

pub async fn set_vote(
    State(state): State<AppState>,
    path: PathId,
    payload: Payload<VoteBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let Json(body) = payload?;
    let like = run(&state, move |service| {
        service.set_vote(
            body.user_id,
            ResourceId::new(res_id),
            body.like_or_dislike.liked(),
        )
    })
    .await?;
    Ok(Json(like))
}

pub async fn vote_tally(
    State(state): State<AppState>,
    path: PathId,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let tally = run(&state, move |service| {
        service.vote_tally(ResourceId::new(res_id))
    })
    .await?;
    Ok(Json(tally))
}

/// Removes one user's vote when `?user_id=` is given, otherwise every vote
/// on the resource.
pub async fn delete_votes(
    State(state): State<AppState>,
    path: PathId,
    scope: Params<VoteScope>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(res_id) = path?;
    let Query(scope) = scope?;
    let resource_id = ResourceId::new(res_id);

    let message = match scope.user_id.map(UserId::new) {
        Some(user_id) => {
            run(&state, move |service| service.remove_vote(user_id, resource_id)).await?;
            format!("Deleted your like/dislike from {resource_id}")
        }
        None => {
            let removed = run(&state, move |service| service.clear_votes(resource_id)).await?;
            format!("Deleted {removed} likes/dislikes from {resource_id}")
        }
    };
    Ok(Confirmation::success(message))
}

// --- Tags ---

pub async fn create_tag(
    State(state): State<AppState>,
    payload: Payload<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let tag = run(&state, move |service| service.create_tag(&body.tag_name)).await?;
    Ok((StatusCode::CREATED, Json(vec![tag])))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = run(&state, |service| service.list_tags()).await?;
    non_empty(tags)
}

pub async fn delete_tag(
    State(state): State<AppState>,
    payload: Payload<TagBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let tag = run(&state, move |service| service.delete_tag(&body.tag_name)).await?;
    Ok(Confirmation::success(format!("Deleted the tag {}", tag.name())))
}

// --- Users and study lists ---

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = run(&state, |service| service.list_users()).await?;
    non_empty(users)
}

pub async fn add_to_study_list(
    State(state): State<AppState>,
    path: PathId,
    payload: Payload<StudyListBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = path?;
    let Json(body) = payload?;
    let entry = run(&state, move |service| {
        service.add_to_study_list(UserId::new(user_id), body.resource_id)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(vec![entry])))
}

pub async fn list_study_list(
    State(state): State<AppState>,
    path: PathId,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = path?;
    let entries = run(&state, move |service| {
        service.list_study_list(UserId::new(user_id))
    })
    .await?;
    non_empty(entries)
}

pub async fn remove_from_study_list(
    State(state): State<AppState>,
    path: PathId,
    payload: Payload<StudyListBody>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(user_id) = path?;
    let Json(body) = payload?;
    let entry = run(&state, move |service| {
        service.remove_from_study_list(UserId::new(user_id), body.resource_id)
    })
    .await?;
    Ok(Confirmation::success(format!(
        "Deleted resource {} from your study-list",
        entry.resource_id
    )))
}
