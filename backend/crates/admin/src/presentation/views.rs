//! Admin pages

use maud::{Markup, html};
use platform::html::{Card, Page, flash, heading};

use crate::domain::entities::{GroupSummary, ManagedUser};

const TH: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
const TD: &str = "px-6 py-4 whitespace-nowrap text-sm";
const BACK_LINK: &str = "inline-flex items-center px-4 py-2 border border-gray-300 text-sm font-medium rounded-lg text-blue-600 hover:bg-gray-50 transition-colors";

pub const TITLE: &str = "User Management";

pub struct AdminPageView<'a> {
    pub server_name: &'a str,
    pub users: &'a [ManagedUser],
    pub groups: &'a [GroupSummary],
    pub success: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub fn admin_panel(view: AdminPageView<'_>) -> Page {
    let content = html! {
        (heading(TITLE, Some("Manage user accounts and permissions")))
        (flash(view.success, view.error))
        div class="overflow-x-auto" {
            table class="min-w-full divide-y divide-gray-200" {
                thead class="bg-gray-50" {
                    tr {
                        th class=(TH) { "Username" }
                        th class=(TH) { "Email" }
                        th class=(TH) { "Group" }
                        th class=(TH) { "Actions" }
                    }
                }
                tbody class="bg-white divide-y divide-gray-200" {
                    @if view.users.is_empty() {
                        tr {
                            td colspan="4" class="px-6 py-4 text-center text-sm text-gray-500" { "No users found" }
                        }
                    }
                    @for user in view.users {
                        (user_row(user, view.groups))
                    }
                }
            }
        }
        (back_to_settings())
    };

    Page::titled(view.server_name, TITLE, Card::new(content).with_max_width("max-w-4xl"))
}

fn user_row(user: &ManagedUser, groups: &[GroupSummary]) -> Markup {
    html! {
        tr {
            td class={(TD) " text-gray-900"} { (user.user_name) }
            td class={(TD) " text-gray-500"} { (user.email_or_dash()) }
            td class={(TD) " text-gray-500"} {
                form action="/admin/group" method="POST" class="inline-flex"
                    onsubmit={"return confirm('Change group for " (user.user_name) "?')"} {
                    input type="hidden" name="userId" value=(user.public_id.as_str());
                    select name="userGroupId" onchange="this.form.submit()"
                        class="block w-32 px-2 py-1 border border-gray-300 rounded-lg text-sm focus:ring-blue-500 focus:border-blue-500" {
                        @for group in groups {
                            option value=(group.id.value()) selected[group.id == user.group.id] {
                                (group.name)
                            }
                        }
                    }
                }
            }
            td class=(TD) {
                form action="/admin" method="POST" class="inline-flex"
                    onsubmit={"return confirm('Delete user " (user.user_name) "?')"} {
                    input type="hidden" name="_method" value="DELETE";
                    input type="hidden" name="userId" value=(user.public_id.as_str());
                    button type="submit" disabled[!user.is_deletable()]
                        class="text-red-600 hover:text-red-800 font-medium disabled:text-gray-400 disabled:cursor-not-allowed" {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn back_to_settings() -> Markup {
    html! {
        div class="mt-6 text-center" {
            a class=(BACK_LINK) href="/account/setting" { "Back to Settings" }
        }
    }
}

/// Shown with 403 to signed-in users outside the Administrator group
pub fn access_denied(server_name: &str) -> Page {
    let content = html! {
        (heading(TITLE, Some("Manage user accounts and permissions")))
        div class="bg-yellow-50 border border-yellow-200 rounded-lg p-4" {
            h4 class="text-sm font-medium text-yellow-800" { "Access Denied" }
            p class="text-sm text-yellow-700 mt-1" {
                "Only administrators can access this panel. Contact your system administrator for assistance."
            }
        }
        (back_to_settings())
    };

    Page::titled(server_name, TITLE, Card::new(content).with_max_width("max-w-4xl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use account::domain::value_object::{PublicId, UserGroupId, UserId};
    use chrono::Utc;
    use maud::Render;

    fn groups() -> Vec<GroupSummary> {
        vec![
            GroupSummary {
                id: UserGroupId::ADMIN,
                name: "admin".to_string(),
                display_name: "Administrator".to_string(),
            },
            GroupSummary {
                id: UserGroupId::USER,
                name: "user".to_string(),
                display_name: "Regular User".to_string(),
            },
        ]
    }

    fn user(name: &str, group: GroupSummary) -> ManagedUser {
        ManagedUser {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            user_name: name.to_string(),
            email: None,
            group,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_table() {
        let groups = groups();
        let users = vec![user("root", groups[0].clone()), user("bob", groups[1].clone())];
        let html = admin_panel(AdminPageView {
            server_name: "localhost",
            users: &users,
            groups: &groups,
            success: Some("User deleted successfully"),
            error: None,
        })
        .render()
        .into_string();

        assert!(html.contains("User deleted successfully"));
        assert!(html.contains(&format!("value=\"{}\"", users[1].public_id)));
        assert!(html.contains("<td class=\"px-6 py-4 whitespace-nowrap text-sm text-gray-500\">-</td>"));
        // Only the admin row has a disabled Delete button
        assert_eq!(html.matches("disabled").count() - html.matches("disabled:").count(), 1);
        assert!(html.contains("Back to Settings"));
    }

    #[test]
    fn test_empty_table() {
        let html = admin_panel(AdminPageView {
            server_name: "localhost",
            users: &[],
            groups: &groups(),
            success: None,
            error: None,
        })
        .render()
        .into_string();
        assert!(html.contains("No users found"));
    }

    #[test]
    fn test_access_denied() {
        let html = access_denied("id.example.com").render().into_string();
        assert!(html.contains("<title>id.example.com - User Management</title>"));
        assert!(html.contains("Access Denied"));
        assert!(!html.contains("<table"));
    }
}
