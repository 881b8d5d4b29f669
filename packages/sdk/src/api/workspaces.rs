//! Workspace endpoints

use reqwest::StatusCode;

use crate::api::{ok_record, ok_records};
use crate::client::{parse_record, Client, Outcome, Request, Response};
use crate::codec::Record;
use crate::error::Result;
use crate::models::{
    InviteWorkspaceUserBody, PendingInvitationAccept, UpdateWorkspaceUserRoleBody, Workspace,
    WorkspaceUser,
};

pub async fn list_workspaces(client: &Client) -> Result<Response<Vec<Workspace>>> {
    client
        .execute(Request::get(["workspaces"]), ok_records::<Workspace>)
        .await
}

pub async fn get_workspace(client: &Client, workspace_name: &str) -> Result<Response<Workspace>> {
    let request = Request::get(["workspaces", workspace_name]);
    client.execute(request, ok_record::<Workspace>).await
}

/// Accept an invitation. `404` (no pending invitation) is documented and
/// leaves `parsed` empty.
pub async fn accept_workspace_invitation(
    client: &Client,
    workspace_name: &str,
) -> Result<Response<PendingInvitationAccept>> {
    let request = Request::post(["workspaces", workspace_name, "join"]);
    client
        .execute(request, |status, content| match status {
            StatusCode::OK => parse_record(content).map(Outcome::Parsed),
            StatusCode::NOT_FOUND => Ok(Outcome::Empty),
            _ => Ok(Outcome::Undocumented),
        })
        .await
}

pub async fn list_workspace_users(client: &Client) -> Result<Response<Vec<WorkspaceUser>>> {
    client
        .execute(Request::get(["users"]), ok_records::<WorkspaceUser>)
        .await
}

pub async fn invite_workspace_user(
    client: &Client,
    body: &InviteWorkspaceUserBody,
) -> Result<Response<WorkspaceUser>> {
    let request = Request::post(["users"]).json(body.encode());
    client.execute(request, ok_record::<WorkspaceUser>).await
}

/// Change the role of a member, addressed by subject or email
pub async fn update_workspace_user_role(
    client: &Client,
    sub_or_email: &str,
    body: &UpdateWorkspaceUserRoleBody,
) -> Result<Response<WorkspaceUser>> {
    let request = Request::put(["users", sub_or_email]).json(body.encode());
    client.execute(request, ok_record::<WorkspaceUser>).await
}
