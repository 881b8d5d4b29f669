//! Workspaces, members and invitations

use crate::record;

use super::common::Labels;

record! {
    /// Workspace
    pub struct Workspace {
        optional created_at: String = "created_at",
        optional created_by: String = "created_by",
        optional updated_at: String = "updated_at",
        optional updated_by: String = "updated_by",
        optional account_id: String = "account_id",
        optional display_name: String = "display_name",
        optional labels: Labels = "labels",
        optional name: String = "name",
        optional region: String = "region",
    }
}

record! {
    /// Member of a workspace
    pub struct WorkspaceUser {
        optional accepted: bool = "accepted",
        optional email: String = "email",
        optional email_verified: bool = "email_verified",
        optional family_name: String = "family_name",
        optional given_name: String = "given_name",
        optional role: String = "role",
        /// Identity provider subject
        optional sub: String = "sub",
    }
}

record! {
    /// Result of accepting a workspace invitation
    pub struct PendingInvitationAccept {
        optional email: String = "email",
        optional workspace: Workspace = "workspace",
    }
}

record! {
    pub struct InviteWorkspaceUserBody {
        optional email: String = "email",
    }
}

record! {
    pub struct UpdateWorkspaceUserRoleBody {
        /// The new role to assign to the user
        required role: String = "role",
    }
}

impl UpdateWorkspaceUserRoleBody {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Default::default()
        }
    }
}
