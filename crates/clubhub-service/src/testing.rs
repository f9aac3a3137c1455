//! Shared fixtures for service tests.

use std::sync::Arc;

use clubhub_auth::actor::{Actor, Identity};
use clubhub_auth::rbac::AuthorizationGate;
use clubhub_core::types::SessionId;
use clubhub_database::Stores;
use clubhub_entity::member::{CreateMember, CreateProfile, Member, MemberRole};

use crate::context::RequestContext;

pub(crate) fn gate() -> Arc<AuthorizationGate> {
    Arc::new(AuthorizationGate::new())
}

/// Insert a member and return a context acting as them.
pub(crate) async fn sign_up(stores: &Stores, email: &str, role: MemberRole) -> (Member, RequestContext) {
    let (member, _) = stores
        .members
        .create(
            &CreateMember {
                email: email.into(),
                password_hash: "unused".into(),
                role,
                invited_by: None,
            },
            &CreateProfile {
                first_name: "Test".into(),
                last_name: "Member".into(),
            },
        )
        .await
        .unwrap();

    let ctx = RequestContext::new(
        Actor::Member(Identity {
            member_id: member.id,
            session_id: SessionId::new(),
            role,
            email: member.email.clone(),
        }),
        None,
    );
    (member, ctx)
}
