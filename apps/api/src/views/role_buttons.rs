//! Admin table action buttons for role rows.
//!
//! Markup follows the Bootstrap 3 + Font Awesome admin panel conventions.

use vault_domain::{Role, RoleId};

/// Resolves the named `access.roles.*` routes to URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRoutes {
    base_url: String,
}

impl RoleRoutes {
    /// Creates a resolver prefixing every route with `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of the `access.roles.edit` route.
    #[must_use]
    pub fn edit(&self, role_id: RoleId) -> String {
        format!("{}/access/roles/{role_id}/edit", self.base_url)
    }

    /// URL of the `access.roles.destroy` route.
    #[must_use]
    pub fn destroy(&self, role_id: RoleId) -> String {
        format!("{}/access/roles/{role_id}", self.base_url)
    }
}

/// Renders the edit and delete controls of one role row.
#[derive(Debug, Clone, Default)]
pub struct RoleActionButtons {
    routes: RoleRoutes,
}

impl RoleActionButtons {
    #[must_use]
    pub fn new(routes: RoleRoutes) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn edit_button(&self, role: &Role) -> String {
        format!(
            r#"<a href="{}" class="btn btn-xs btn-primary"><i class="fa fa-pencil" data-toggle="tooltip" data-placement="top" title="Edit"></i></a>"#,
            self.routes.edit(role.id())
        )
    }

    /// Empty for the master admin role, which cannot be deleted.
    #[must_use]
    pub fn delete_button(&self, role: &Role) -> String {
        if role.is_protected() {
            return String::new();
        }

        format!(
            r#"<a href="{}" class="btn btn-xs btn-danger" data-method="delete"><i class="fa fa-times" data-toggle="tooltip" data-placement="top" title="Delete"></i></a>"#,
            self.routes.destroy(role.id())
        )
    }

    #[must_use]
    pub fn action_buttons(&self, role: &Role) -> String {
        format!("{} {}", self.edit_button(role), self.delete_button(role))
    }
}
