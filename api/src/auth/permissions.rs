//! Permission policies for guarded resources.
//!
//! A policy looks at the request method and the caller and answers `Allow`,
//! `Deny` or `Abstain`. Policies are evaluated as a chain: the first `Deny`
//! wins, otherwise at least one policy must have answered `Allow`.

use axum::http::Method;
use db::models::user_permission::Permission;
use std::collections::HashSet;

/// Who is making the request, as far as permission checks are concerned.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: i64,
    pub is_superuser: bool,
    pub permissions: HashSet<Permission>,
}

impl Caller {
    /// Superusers implicitly hold every permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.is_superuser || self.permissions.contains(&permission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No usable identity was presented.
    Unauthenticated,
    /// The caller is known but not allowed.
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
    Abstain,
}

pub trait PermissionPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, method: &Method, caller: Option<&Caller>) -> Decision;
}

/// Superusers may do anything; everybody else is refused `DELETE`.
///
/// Non-`DELETE` requests from non-superusers are left to the next policy.
pub struct SuperuserOnlyDelete;

impl PermissionPolicy for SuperuserOnlyDelete {
    fn name(&self) -> &'static str {
        "superuser_only_delete"
    }

    fn check(&self, method: &Method, caller: Option<&Caller>) -> Decision {
        if caller.is_some_and(|c| c.is_superuser) {
            return Decision::Allow;
        }
        if method == Method::DELETE {
            return Decision::Deny(Denial::Forbidden);
        }
        Decision::Abstain
    }
}

/// Per-action model permissions: reads are open to any authenticated caller,
/// writes need the matching `add`/`change`/`delete` permission.
pub struct ModelPermissions {
    pub add: Permission,
    pub change: Permission,
    pub delete: Permission,
}

impl ModelPermissions {
    pub const fn course() -> Self {
        Self {
            add: Permission::AddCourse,
            change: Permission::ChangeCourse,
            delete: Permission::DeleteCourse,
        }
    }

    /// Permission required for `method`; `None` for safe methods. Unknown
    /// methods map to an unsatisfiable requirement.
    fn required(&self, method: &Method) -> Result<Option<Permission>, ()> {
        match *method {
            Method::GET | Method::HEAD | Method::OPTIONS => Ok(None),
            Method::POST => Ok(Some(self.add)),
            Method::PUT | Method::PATCH => Ok(Some(self.change)),
            Method::DELETE => Ok(Some(self.delete)),
            _ => Err(()),
        }
    }
}

impl PermissionPolicy for ModelPermissions {
    fn name(&self) -> &'static str {
        "model_permissions"
    }

    fn check(&self, method: &Method, caller: Option<&Caller>) -> Decision {
        let Some(caller) = caller else {
            return Decision::Deny(Denial::Unauthenticated);
        };

        match self.required(method) {
            Ok(None) => Decision::Allow,
            Ok(Some(permission)) if caller.has_permission(permission) => Decision::Allow,
            _ => Decision::Deny(Denial::Forbidden),
        }
    }
}

/// Runs `policies` in order.
pub fn evaluate(
    policies: &[&dyn PermissionPolicy],
    method: &Method,
    caller: Option<&Caller>,
) -> Result<(), Denial> {
    let mut allowed = false;

    for policy in policies {
        match policy.check(method, caller) {
            Decision::Deny(denial) => {
                tracing::debug!(policy = policy.name(), %method, ?denial, "Permission denied");
                return Err(denial);
            }
            Decision::Allow => allowed = true,
            Decision::Abstain => {}
        }
    }

    if allowed {
        Ok(())
    } else if caller.is_none() {
        Err(Denial::Unauthenticated)
    } else {
        Err(Denial::Forbidden)
    }
}

/// The chain guarding the course resource.
pub fn course_policies() -> [&'static dyn PermissionPolicy; 2] {
    static SUPERUSER: SuperuserOnlyDelete = SuperuserOnlyDelete;
    static MODEL: ModelPermissions = ModelPermissions::course();
    [&SUPERUSER as &dyn PermissionPolicy, &MODEL]
}
