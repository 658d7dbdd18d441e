//! Role-string route gating for the two dashboards and the admin screens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::session::Session;

/// Session files written by older clients spell roles in any case, so
/// deserialisation goes through [`Role::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Admin,
    Outlet,
}

impl Role {
    /// Parse the role string the API hands out; unknown roles get no access.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "outlet" | "user" | "outlet_user" => Some(Role::Outlet),
            _ => None,
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Role::parse(&s).ok_or_else(|| format!("unknown role {:?}", s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Outlet => write!(f, "outlet"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AdminDashboard,
    OutletDashboard,
    Outlets,
    Employees,
    Users,
    Reports,
    Profile,
}

impl Route {
    fn required_role(self) -> Option<Role> {
        match self {
            Route::Login | Route::Profile | Route::Reports => None,
            Route::AdminDashboard | Route::Outlets | Route::Employees | Route::Users => {
                Some(Role::Admin)
            }
            Route::OutletDashboard => Some(Role::Outlet),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allow,
    Redirect(Route),
}

pub fn home_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::Outlet => Route::OutletDashboard,
    }
}

pub fn gate(session: Option<&Session>, route: Route) -> Gate {
    let Some(session) = session else {
        return if route == Route::Login {
            Gate::Allow
        } else {
            Gate::Redirect(Route::Login)
        };
    };
    if route == Route::Login {
        return Gate::Redirect(home_for(session.role));
    }
    match route.required_role() {
        Some(required) if required != session.role => Gate::Redirect(home_for(session.role)),
        _ => Gate::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("user"), Some(Role::Outlet));
        assert_eq!(Role::parse("outlet"), Some(Role::Outlet));
        assert_eq!(Role::parse("guest"), None);
        assert_eq!(Role::Outlet.to_string(), "outlet");
    }

    #[test]
    fn test_role_serde_accepts_any_case() {
        let role: Role = serde_json::from_str(r#""Admin""#).unwrap();
        assert_eq!(role, Role::Admin);
        let role: Role = serde_json::from_str(r#""OUTLET_USER""#).unwrap();
        assert_eq!(role, Role::Outlet);
        assert!(serde_json::from_str::<Role>(r#""guest""#).is_err());
        assert_eq!(serde_json::to_string(&Role::Outlet).unwrap(), r#""outlet""#);
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(gate(None, Route::AdminDashboard), Gate::Redirect(Route::Login));
        assert_eq!(gate(None, Route::Reports), Gate::Redirect(Route::Login));
        assert_eq!(gate(None, Route::Login), Gate::Allow);
    }

    #[test]
    fn test_admin_routes() {
        let admin = Session::admin("root");
        assert_eq!(gate(Some(&admin), Route::AdminDashboard), Gate::Allow);
        assert_eq!(gate(Some(&admin), Route::Users), Gate::Allow);
        assert_eq!(gate(Some(&admin), Route::Reports), Gate::Allow);
        assert_eq!(
            gate(Some(&admin), Route::OutletDashboard),
            Gate::Redirect(Route::AdminDashboard)
        );
        assert_eq!(gate(Some(&admin), Route::Login), Gate::Redirect(Route::AdminDashboard));
    }

    #[test]
    fn test_outlet_user_routes() {
        let user = Session::outlet("kasir", "Plaza");
        assert_eq!(gate(Some(&user), Route::OutletDashboard), Gate::Allow);
        assert_eq!(gate(Some(&user), Route::Profile), Gate::Allow);
        assert_eq!(
            gate(Some(&user), Route::Employees),
            Gate::Redirect(Route::OutletDashboard)
        );
        assert_eq!(
            gate(Some(&user), Route::AdminDashboard),
            Gate::Redirect(Route::OutletDashboard)
        );
    }
}
