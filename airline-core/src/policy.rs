//! Route authorization as data.
//!
//! [`ROUTE_RULES`] maps `(method, path pattern)` to a [`Requirement`]; the first
//! matching rule wins and unmatched requests need an authenticated caller.
//! [`SUBJECT_RULES`] adds the per-record check on `/user/{username}`: the caller must
//! be that user, or hold one of the listed roles. The subject is the username captured
//! by the router, after percent-decoding, never the raw path text.
//!
//! Patterns are `/`-separated; `*` matches exactly one non-empty segment.

use std::fmt;
use std::str::FromStr;

use crate::user::Principal;

pub const ADMIN: &str = "admin";
pub const PERSONAL: &str = "personal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported method: {0}")]
pub struct UnknownMethod(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Only callers that did not authenticate.
    Anonymous,
    Authenticated,
    Role(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub method: Method,
    pub pattern: &'static str,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectRule {
    SelfOrAdmin,
    SelfOrAdminOrPersonal,
}

impl SubjectRule {
    pub fn permits(&self, principal: &Principal, subject: &str) -> bool {
        if principal.username == subject || principal.has_role(ADMIN) {
            return true;
        }
        match self {
            SubjectRule::SelfOrAdmin => false,
            SubjectRule::SelfOrAdminOrPersonal => principal.has_role(PERSONAL),
        }
    }
}

/// A subject rule applies to routes whose last captured segment names the subject user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectRoute {
    pub method: Method,
    pub pattern: &'static str,
    pub rule: SubjectRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Credentials are required and were not supplied.
    Unauthenticated,
    Forbidden,
}

const fn rule(method: Method, pattern: &'static str, requirement: Requirement) -> RouteRule {
    RouteRule { method, pattern, requirement }
}

pub const ROUTE_RULES: &[RouteRule] = &[
    // Flights
    rule(Method::Post, "/flights", Requirement::Role(ADMIN)),
    rule(Method::Delete, "/flights/*", Requirement::Role(ADMIN)),
    rule(Method::Put, "/flights/*", Requirement::Role(ADMIN)),
    rule(Method::Get, "/flights/*", Requirement::Authenticated),
    rule(Method::Get, "/flights", Requirement::Authenticated),
    // Passengers
    rule(Method::Post, "/flights/*/passengers", Requirement::Role(PERSONAL)),
    rule(Method::Put, "/flights/*/passengers/*", Requirement::Role(PERSONAL)),
    rule(Method::Delete, "/flights/*/passengers/*", Requirement::Role(PERSONAL)),
    rule(Method::Get, "/flights/*/passengers/*", Requirement::Role(PERSONAL)),
    rule(Method::Get, "/flights/*/passengers", Requirement::Role(PERSONAL)),
    // Users
    rule(Method::Post, "/user", Requirement::Anonymous),
];

pub const SUBJECT_RULES: &[SubjectRoute] = &[
    SubjectRoute { method: Method::Get, pattern: "/user/*", rule: SubjectRule::SelfOrAdminOrPersonal },
    SubjectRoute { method: Method::Put, pattern: "/user/*", rule: SubjectRule::SelfOrAdmin },
    SubjectRoute { method: Method::Delete, pattern: "/user/*", rule: SubjectRule::SelfOrAdmin },
];

pub const DEFAULT_REQUIREMENT: Requirement = Requirement::Authenticated;

pub fn path_matches(pattern: &str, path: &str) -> bool {
    let mut wanted = segments(pattern);
    let mut actual = segments(path);
    loop {
        match (wanted.next(), actual.next()) {
            (None, None) => return true,
            (Some("*"), Some(_)) => {}
            (Some(w), Some(a)) if w == a => {}
            _ => return false,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy)]
pub struct AuthorizationPolicy {
    rules: &'static [RouteRule],
    subject_rules: &'static [SubjectRoute],
    default: Requirement,
}

impl AuthorizationPolicy {
    pub fn standard() -> Self {
        Self {
            rules: ROUTE_RULES,
            subject_rules: SUBJECT_RULES,
            default: DEFAULT_REQUIREMENT,
        }
    }

    pub fn rules(&self) -> &'static [RouteRule] {
        self.rules
    }

    pub fn subject_rules(&self) -> &'static [SubjectRoute] {
        self.subject_rules
    }

    /// `method` is `None` for verbs the table never names; those fall to the default.
    pub fn requirement_for(&self, method: Option<Method>, path: &str) -> Requirement {
        method
            .and_then(|m| {
                self.rules
                    .iter()
                    .find(|r| r.method == m && path_matches(r.pattern, path))
            })
            .map_or(self.default, |r| r.requirement)
    }

    pub fn subject_rule_for(&self, method: Option<Method>, path: &str) -> Option<SubjectRule> {
        let m = method?;
        self.subject_rules
            .iter()
            .find(|r| r.method == m && path_matches(r.pattern, path))
            .map(|r| r.rule)
    }

    pub fn authorize(&self, requirement: Requirement, principal: Option<&Principal>) -> Access {
        match (requirement, principal) {
            (Requirement::Anonymous, None) => Access::Granted,
            (Requirement::Anonymous, Some(_)) => Access::Forbidden,
            (_, None) => Access::Unauthenticated,
            (Requirement::Authenticated, Some(_)) => Access::Granted,
            (Requirement::Role(role), Some(p)) if p.has_role(role) => Access::Granted,
            (Requirement::Role(_), Some(_)) => Access::Forbidden,
        }
    }

    /// Route requirement first, then the subject rule if the route has one.
    ///
    /// `subject` is the decoded username the handler will act on. A subject route
    /// without one is refused.
    pub fn check(
        &self,
        method: Option<Method>,
        path: &str,
        subject: Option<&str>,
        principal: Option<&Principal>,
    ) -> Access {
        let access = self.authorize(self.requirement_for(method, path), principal);
        if access != Access::Granted {
            return access;
        }
        match (self.subject_rule_for(method, path), principal, subject) {
            (None, _, _) => Access::Granted,
            (Some(_), None, _) => Access::Unauthenticated,
            (Some(rule), Some(p), Some(subject)) if rule.permits(p, subject) => Access::Granted,
            (Some(_), Some(_), _) => Access::Forbidden,
        }
    }
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USUARIO: &str = "usuario";

    fn principal(name: &str, roles: &[&str]) -> Principal {
        Principal::new(name, roles.iter().map(|r| format!("ROLE_{}", r)).collect())
    }

    /// Concrete path for a pattern, used to walk the whole table.
    fn sample_path(pattern: &str) -> String {
        pattern.replace('*', "X1")
    }

    #[test]
    fn test_table_is_exhaustive_and_first_match_is_itself() {
        let policy = AuthorizationPolicy::standard();
        assert_eq!(policy.rules().len(), 11);
        assert_eq!(policy.subject_rules().len(), 3);
        for rule in policy.rules() {
            let path = sample_path(rule.pattern);
            assert_eq!(
                policy.requirement_for(Some(rule.method), &path),
                rule.requirement,
                "{} {}",
                rule.method,
                rule.pattern
            );
        }
    }

    #[test]
    fn test_flight_and_passenger_requirements() {
        let policy = AuthorizationPolicy::standard();
        for rule in policy.rules().iter().filter(|r| r.pattern.starts_with("/flights")) {
            let expected = if rule.pattern.contains("passengers") {
                Requirement::Role(PERSONAL)
            } else if rule.method == Method::Get {
                Requirement::Authenticated
            } else {
                Requirement::Role(ADMIN)
            };
            assert_eq!(rule.requirement, expected, "{} {}", rule.method, rule.pattern);
        }
    }

    #[test]
    fn test_unlisted_routes_need_authentication() {
        let policy = AuthorizationPolicy::standard();
        assert_eq!(policy.requirement_for(Some(Method::Get), "/user/ana"), Requirement::Authenticated);
        assert_eq!(policy.requirement_for(Some(Method::Post), "/somewhere"), Requirement::Authenticated);
        assert_eq!(policy.requirement_for(None, "/user"), Requirement::Authenticated);
    }

    #[test]
    fn test_path_matching() {
        assert!(path_matches("/flights/*", "/flights/IB100"));
        assert!(path_matches("/flights/*", "/flights/IB100/"));
        assert!(!path_matches("/flights/*", "/flights"));
        assert!(!path_matches("/flights/*", "/flights/IB100/passengers"));
        assert!(path_matches("/flights/*/passengers/*", "/flights/IB100/passengers/12345678A"));
    }

    #[test]
    fn test_authorize_matrix() {
        let policy = AuthorizationPolicy::standard();
        let admin = principal("root", &[ADMIN]);
        let staff = principal("staff", &[PERSONAL]);
        let plain = principal("ana", &[USUARIO]);

        assert_eq!(policy.authorize(Requirement::Anonymous, None), Access::Granted);
        assert_eq!(policy.authorize(Requirement::Anonymous, Some(&plain)), Access::Forbidden);
        assert_eq!(policy.authorize(Requirement::Authenticated, None), Access::Unauthenticated);
        assert_eq!(policy.authorize(Requirement::Authenticated, Some(&plain)), Access::Granted);
        assert_eq!(policy.authorize(Requirement::Role(ADMIN), Some(&admin)), Access::Granted);
        assert_eq!(policy.authorize(Requirement::Role(ADMIN), Some(&staff)), Access::Forbidden);
        assert_eq!(policy.authorize(Requirement::Role(PERSONAL), None), Access::Unauthenticated);
    }

    #[test]
    fn test_subject_rules() {
        let policy = AuthorizationPolicy::standard();
        let admin = principal("root", &[ADMIN]);
        let staff = principal("staff", &[PERSONAL]);
        let ana = principal("ana", &[USUARIO]);
        let bob = principal("bob", &[USUARIO]);

        // read: self, admin or personal
        let read = |subject: &str, p: &Principal| policy.check(Some(Method::Get), "/user/X", Some(subject), Some(p));
        assert_eq!(read("ana", &ana), Access::Granted);
        assert_eq!(read("ana", &staff), Access::Granted);
        assert_eq!(read("ana", &admin), Access::Granted);
        assert_eq!(read("ana", &bob), Access::Forbidden);

        // update/delete: self or admin
        for method in [Method::Put, Method::Delete] {
            assert_eq!(policy.check(Some(method), "/user/ana", Some("ana"), Some(&ana)), Access::Granted);
            assert_eq!(policy.check(Some(method), "/user/ana", Some("ana"), Some(&admin)), Access::Granted);
            assert_eq!(policy.check(Some(method), "/user/ana", Some("ana"), Some(&staff)), Access::Forbidden);
            assert_eq!(policy.check(Some(method), "/user/ana", Some("ana"), None), Access::Unauthenticated);
        }
    }

    #[test]
    fn test_subject_comes_from_caller_not_raw_path() {
        let policy = AuthorizationPolicy::standard();
        let encoded = principal("b%6Fb", &[USUARIO]);
        let ana = principal("ana", &[USUARIO]);

        // The raw segment equals the caller's name but the decoded subject is bob
        assert_eq!(
            policy.check(Some(Method::Delete), "/user/b%6Fb", Some("bob"), Some(&encoded)),
            Access::Forbidden
        );
        assert_eq!(
            policy.check(Some(Method::Get), "/user/%61na", Some("ana"), Some(&ana)),
            Access::Granted
        );
        // A subject route with no captured subject is refused
        assert_eq!(policy.check(Some(Method::Put), "/user/ana", None, Some(&ana)), Access::Forbidden);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
    }
}
