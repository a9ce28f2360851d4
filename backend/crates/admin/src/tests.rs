//! Scenario tests for the admin crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use account::domain::entity::{AuthenticatedUser, Session, User, UserGroup};
    use account::domain::value_object::{
        PasswordHash, PublicId, RawPassword, UserGroupId, UserId, UserName,
    };
    use chrono::{Duration, Utc};

    use crate::domain::entities::{GroupSummary, ManagedUser};
    use crate::domain::policy::check_group_change;
    use crate::domain::repository::UserAdminRepository;
    use crate::error::{AdminError, AdminResult};

    #[derive(Default)]
    struct Tables {
        users: Vec<(ManagedUser, bool)>,
        groups: Vec<GroupSummary>,
        /// Users whose owned rows were soft-deleted with them
        cascaded: Vec<UserId>,
    }

    #[derive(Clone, Default)]
    pub struct MemoryAdminRepo {
        tables: Arc<Mutex<Tables>>,
    }

    pub fn summary(group: &UserGroup) -> GroupSummary {
        GroupSummary {
            id: group.user_group_id,
            name: group.name.clone(),
            display_name: group.display_name.clone(),
        }
    }

    impl MemoryAdminRepo {
        pub fn seeded() -> Self {
            let repo = Self::default();
            repo.tables.lock().unwrap().groups = UserGroup::defaults().iter().map(summary).collect();
            repo
        }

        /// Add a user to the given group and return it
        pub fn add(&self, name: &str, group: UserGroupId) -> ManagedUser {
            let mut tables = self.tables.lock().unwrap();
            let group = tables
                .groups
                .iter()
                .find(|g| g.id == group)
                .cloned()
                .unwrap();
            let user = ManagedUser {
                user_id: UserId::new(),
                public_id: PublicId::new(),
                user_name: name.to_string(),
                email: Some(format!("{}@example.com", name)),
                group,
                created_at: Utc::now(),
            };
            tables.users.push((user.clone(), false));
            user
        }

        pub fn cascaded(&self, user_id: &UserId) -> bool {
            self.tables.lock().unwrap().cascaded.contains(user_id)
        }
    }

    impl UserAdminRepository for MemoryAdminRepo {
        async fn list_users(&self) -> AdminResult<Vec<ManagedUser>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .users
                .iter()
                .filter(|(_, deleted)| !deleted)
                .map(|(u, _)| u.clone())
                .collect())
        }

        async fn list_groups(&self) -> AdminResult<Vec<GroupSummary>> {
            Ok(self.tables.lock().unwrap().groups.clone())
        }

        async fn find_user(&self, public_id: &PublicId) -> AdminResult<Option<ManagedUser>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .users
                .iter()
                .find(|(u, deleted)| !deleted && &u.public_id == public_id)
                .map(|(u, _)| u.clone()))
        }

        async fn find_user_by_name(&self, canonical: &str) -> AdminResult<Option<ManagedUser>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .users
                .iter()
                .find(|(u, deleted)| !deleted && u.user_name.to_ascii_lowercase() == canonical)
                .map(|(u, _)| u.clone()))
        }

        async fn find_group(&self, id: UserGroupId) -> AdminResult<Option<GroupSummary>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.groups.iter().find(|g| g.id == id).cloned())
        }

        async fn change_group(
            &self,
            target: &ManagedUser,
            group: &GroupSummary,
        ) -> AdminResult<()> {
            let mut tables = self.tables.lock().unwrap();
            let members = tables
                .users
                .iter()
                .filter(|(u, deleted)| !deleted && u.group.id == target.group.id)
                .count() as i64;
            check_group_change(target, group, members)?;

            let (user, _) = tables
                .users
                .iter_mut()
                .find(|(u, deleted)| !deleted && u.user_id == target.user_id)
                .ok_or(AdminError::UserNotFound)?;
            user.group = group.clone();
            Ok(())
        }

        async fn soft_delete_user(&self, user_id: &UserId) -> AdminResult<()> {
            let mut tables = self.tables.lock().unwrap();
            let row = tables
                .users
                .iter_mut()
                .find(|(u, deleted)| !deleted && &u.user_id == user_id)
                .ok_or(AdminError::UserNotFound)?;
            row.1 = true;
            tables.cascaded.push(*user_id);
            Ok(())
        }
    }

    /// Signed-in viewer in the given default group
    pub fn viewer(group: UserGroupId) -> AuthenticatedUser {
        let group = UserGroup::defaults()
            .into_iter()
            .find(|g| g.user_group_id == group)
            .unwrap();
        let password = RawPassword::new("secret1".to_string()).unwrap();
        let mut user = User::new(
            UserName::new("viewer").unwrap(),
            PasswordHash::from_raw(&password, None).unwrap(),
        );
        user.user_group_id = group.user_group_id;

        AuthenticatedUser {
            session: Session::new(user.user_id, false, Duration::days(1)),
            user,
            group,
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use account::domain::value_object::UserGroupId;

    use super::support::*;
    use crate::application::{
        AdminPanelUseCase, ChangeGroupInput, ChangeGroupUseCase, DeleteUserUseCase,
        PromoteAdministratorUseCase,
    };
    use crate::domain::repository::UserAdminRepository;
    use crate::error::AdminError;

    fn input(user_id: &str, group: &str) -> ChangeGroupInput {
        ChangeGroupInput {
            user_id: user_id.to_string(),
            user_group_id: group.to_string(),
        }
    }

    #[tokio::test]
    async fn test_panel_requires_administrator() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        repo.add("root", UserGroupId::ADMIN);
        repo.add("bob", UserGroupId::USER);
        let use_case = AdminPanelUseCase::new(repo);

        let panel = use_case.execute(&viewer(UserGroupId::ADMIN)).await.unwrap();
        assert_eq!(panel.users.len(), 2);
        assert_eq!(panel.groups.len(), 2);

        let err = use_case.execute(&viewer(UserGroupId::USER)).await.unwrap_err();
        assert!(matches!(err, AdminError::AccessDenied));
    }

    #[tokio::test]
    async fn test_change_group() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let bob = repo.add("bob", UserGroupId::USER);
        let use_case = ChangeGroupUseCase::new(repo.clone());

        let updated = use_case
            .execute(&viewer(UserGroupId::ADMIN), input(bob.public_id.as_str(), "1"))
            .await
            .unwrap();
        assert_eq!(updated.group.display_name, "Administrator");
        let admins = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.group.is_admin_group())
            .count();
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn test_change_group_rejections() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let bob = repo.add("bob", UserGroupId::USER);
        let use_case = ChangeGroupUseCase::new(repo);
        let admin = viewer(UserGroupId::ADMIN);

        let err = use_case
            .execute(&viewer(UserGroupId::USER), input(bob.public_id.as_str(), "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::AccessDenied));

        let err = use_case
            .execute(&admin, input("0123456789abcdefghi01", "1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found");

        let err = use_case
            .execute(&admin, input(bob.public_id.as_str(), "9"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User group not found");

        let err = use_case.execute(&admin, input("", "1")).await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_sole_administrator_stays() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let root = repo.add("root", UserGroupId::ADMIN);
        let use_case = ChangeGroupUseCase::new(repo.clone());
        let admin = viewer(UserGroupId::ADMIN);

        let err = use_case
            .execute(&admin, input(root.public_id.as_str(), "2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::SoleAdministrator));

        repo.add("second", UserGroupId::ADMIN);
        let demoted = use_case
            .execute(&admin, input(root.public_id.as_str(), "2"))
            .await
            .unwrap();
        assert_eq!(demoted.group.name, "user");
    }

    #[tokio::test]
    async fn test_concurrent_demotions_keep_one_administrator() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let root = repo.add("root", UserGroupId::ADMIN);
        let second = repo.add("second", UserGroupId::ADMIN);
        let users = repo.find_group(UserGroupId::USER).await.unwrap().unwrap();

        // Both requests looked the targets up while two admins existed
        let root = repo.find_user(&root.public_id).await.unwrap().unwrap();
        let second = repo.find_user(&second.public_id).await.unwrap().unwrap();

        repo.change_group(&root, &users).await.unwrap();
        let err = repo.change_group(&second, &users).await.unwrap_err();
        assert!(matches!(err, AdminError::SoleAdministrator));

        let remaining = repo.find_user(&second.public_id).await.unwrap().unwrap();
        assert!(remaining.group.is_admin_group());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let root = repo.add("root", UserGroupId::ADMIN);
        let bob = repo.add("bob", UserGroupId::USER);
        let use_case = DeleteUserUseCase::new(repo.clone());
        let admin = viewer(UserGroupId::ADMIN);

        let err = use_case
            .execute(&admin, root.public_id.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::ProtectedUser));

        let err = use_case
            .execute(&viewer(UserGroupId::USER), bob.public_id.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::AccessDenied));

        use_case.execute(&admin, bob.public_id.as_str()).await.unwrap();
        assert!(repo.cascaded(&bob.user_id));
        let users = repo.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name, "root");

        // Already gone
        let err = use_case
            .execute(&admin, bob.public_id.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::UserNotFound));
    }

    #[tokio::test]
    async fn test_promote_configured_user() {
        let repo = Arc::new(MemoryAdminRepo::seeded());
        let alice = repo.add("alice", UserGroupId::USER);
        let use_case = PromoteAdministratorUseCase::new(repo.clone());

        assert!(use_case.execute(" Alice ").await.unwrap());
        assert!(!use_case.execute("alice").await.unwrap());
        let promoted = repo.find_user(&alice.public_id).await.unwrap().unwrap();
        assert!(promoted.group.is_admin_group());

        assert!(matches!(
            use_case.execute("nobody").await,
            Err(AdminError::UserNotFound)
        ));
    }
}

#[cfg(test)]
mod handler_tests {
    use std::sync::Arc;

    use account::AccountConfig;
    use account::domain::value_object::UserGroupId;
    use axum::body::to_bytes;
    use axum::extract::{Extension, Form, Query, State};
    use axum::http::{StatusCode, header};
    use axum::response::Response;

    use super::support::*;
    use crate::presentation::dto::{AdminQuery, ChangeGroupForm, UserActionForm};
    use crate::presentation::handlers::{self, AdminAppState};

    fn state(repo: &MemoryAdminRepo) -> State<AdminAppState<MemoryAdminRepo>> {
        State(AdminAppState {
            repo: Arc::new(repo.clone()),
            config: Arc::new(AccountConfig {
                server_name: "id.example.com".to_string(),
                ..AccountConfig::development()
            }),
        })
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_panel_page() {
        let repo = MemoryAdminRepo::seeded();
        repo.add("bob", UserGroupId::USER);

        let response = handlers::admin_page(
            state(&repo),
            Extension(viewer(UserGroupId::ADMIN)),
            Query(AdminQuery {
                success: Some("User group updated successfully".to_string()),
                error: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("bob@example.com"));
        assert!(html.contains("User group updated successfully"));
    }

    #[tokio::test]
    async fn test_regular_user_sees_access_denied() {
        let repo = MemoryAdminRepo::seeded();
        let response = handlers::admin_page(
            state(&repo),
            Extension(viewer(UserGroupId::USER)),
            Query(AdminQuery::default()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let html = body_text(response).await;
        assert!(html.contains("Access Denied"));
        assert!(html.contains("<title>id.example.com - User Management</title>"));
    }

    #[tokio::test]
    async fn test_change_group_redirects() {
        let repo = MemoryAdminRepo::seeded();
        let bob = repo.add("bob", UserGroupId::USER);

        let response = handlers::change_group(
            state(&repo),
            Extension(viewer(UserGroupId::ADMIN)),
            Form(ChangeGroupForm {
                user_id: bob.public_id.to_string(),
                user_group_id: "1".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin?success=User+group+updated+successfully");
    }

    #[tokio::test]
    async fn test_delete_admin_redirects_with_error() {
        let repo = MemoryAdminRepo::seeded();
        let root = repo.add("root", UserGroupId::ADMIN);

        let response = handlers::user_action(
            state(&repo),
            Extension(viewer(UserGroupId::ADMIN)),
            Form(UserActionForm {
                method: Some("DELETE".to_string()),
                user_id: root.public_id.to_string(),
            }),
        )
        .await;
        assert_eq!(location(&response), "/admin?error=Administrators+cannot+be+deleted");
    }

    #[tokio::test]
    async fn test_user_action_checks_viewer_first() {
        let repo = MemoryAdminRepo::seeded();
        let bob = repo.add("bob", UserGroupId::USER);

        let response = handlers::user_action(
            state(&repo),
            Extension(viewer(UserGroupId::USER)),
            Form(UserActionForm {
                method: None,
                user_id: bob.public_id.to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = handlers::user_action(
            state(&repo),
            Extension(viewer(UserGroupId::ADMIN)),
            Form(UserActionForm {
                method: Some("PATCH".to_string()),
                user_id: bob.public_id.to_string(),
            }),
        )
        .await;
        assert_eq!(location(&response), "/admin?error=Unsupported+action");
    }
}
