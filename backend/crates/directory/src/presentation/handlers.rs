//! HTTP Handlers
//!
//! Thin wrappers: deserialize, one authorization decision (delegated to
//! the use case), one storage unit, map errors through the shared table.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    GroupDirectoryUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    UpdateUserInput, UserDirectoryUseCase,
};
use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::domain::value_object::{group_id::GroupId, user_id::UserId};
use crate::error::DirectoryResult;
use crate::presentation::dto::{
    AttachMemberRequest, CreateGroupRequest, GroupResponse, SignInForm, SignUpRequest,
    TokenResponse, UpdateGroupRequest, UpdateUserRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for directory handlers
#[derive(Clone)]
pub struct DirectoryAppState<R>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> DirectoryAppState<R>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    fn users(&self) -> UserDirectoryUseCase<R> {
        UserDirectoryUseCase::new(self.repo.clone())
    }

    fn groups(&self) -> GroupDirectoryUseCase<R, R, R> {
        GroupDirectoryUseCase::new(self.repo.clone(), self.repo.clone(), self.repo.clone())
    }
}

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// POST /users
pub async fn sign_up<R>(
    State(state): State<DirectoryAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> DirectoryResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone());

    let user = use_case
        .execute(SignUpInput {
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /users/sign-in
pub async fn sign_in<R>(
    State(state): State<DirectoryAppState<R>>,
    axum::Form(form): axum::Form<SignInForm>,
) -> DirectoryResult<Json<TokenResponse>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: form.username,
            password: form.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: output.access_token,
        token_type: output.token_type.to_string(),
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
) -> DirectoryResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let users = state.users().list(&caller).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{user_id}
pub async fn get_user<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> DirectoryResult<Json<UserResponse>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let user = state
        .users()
        .get(&caller, UserId::from_uuid(user_id))
        .await?;

    Ok(Json(user.into()))
}

/// PUT /users/{user_id}
pub async fn update_user<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> DirectoryResult<Json<UserResponse>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let input = UpdateUserInput {
        first_name: req.first_name,
        last_name: req.last_name,
        user_name: req.username,
        email: req.email,
        password: req.password,
        is_superuser: req.is_superuser,
        is_staff: req.is_staff,
        is_active: req.is_active,
    };

    let user = state
        .users()
        .update(&caller, UserId::from_uuid(user_id), input)
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{user_id}
pub async fn delete_user<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> DirectoryResult<StatusCode>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    state
        .users()
        .delete(&caller, UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/{user_id}/groups
pub async fn user_groups<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> DirectoryResult<Json<Vec<GroupResponse>>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let groups = state
        .groups()
        .groups_of_user(&caller, UserId::from_uuid(user_id))
        .await?;

    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

// ============================================================================
// Groups
// ============================================================================

/// GET /groups
pub async fn list_groups<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
) -> DirectoryResult<Json<Vec<GroupResponse>>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let groups = state.groups().list(&caller).await?;

    Ok(Json(groups.into_iter().map(GroupResponse::from).collect()))
}

/// POST /groups
pub async fn create_group<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<CreateGroupRequest>,
) -> DirectoryResult<(StatusCode, Json<GroupResponse>)>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let group = state.groups().create(&caller, req.name).await?;

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// GET /groups/{group_id}
pub async fn get_group<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> DirectoryResult<Json<GroupResponse>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let group = state
        .groups()
        .get(&caller, GroupId::from_uuid(group_id))
        .await?;

    Ok(Json(group.into()))
}

/// PUT /groups/{group_id}
pub async fn update_group<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(group_id): Path<Uuid>,
    Json(req): Json<UpdateGroupRequest>,
) -> DirectoryResult<Json<GroupResponse>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let group = state
        .groups()
        .rename(&caller, GroupId::from_uuid(group_id), req.name)
        .await?;

    Ok(Json(group.into()))
}

/// DELETE /groups/{group_id}
pub async fn delete_group<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> DirectoryResult<StatusCode>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    state
        .groups()
        .delete(&caller, GroupId::from_uuid(group_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /groups/{group_id}/users
pub async fn group_users<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> DirectoryResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let users = state
        .groups()
        .users(&caller, GroupId::from_uuid(group_id))
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ============================================================================
// Memberships
// ============================================================================

/// PUT /groups/{group_id}/users/{user_id}
pub async fn attach_member<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
    body: Option<Json<AttachMemberRequest>>,
) -> DirectoryResult<StatusCode>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let extra_data = body.and_then(|Json(req)| req.extra_data);

    state
        .groups()
        .attach(
            &caller,
            GroupId::from_uuid(group_id),
            UserId::from_uuid(user_id),
            extra_data,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /groups/{group_id}/users/{user_id}
pub async fn detach_member<R>(
    State(state): State<DirectoryAppState<R>>,
    CurrentUser(caller): CurrentUser,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> DirectoryResult<StatusCode>
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    state
        .groups()
        .detach(
            &caller,
            GroupId::from_uuid(group_id),
            UserId::from_uuid(user_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
