//! Route declarations, validation and path matching.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on chained redirect records followed during resolution.
const MAX_REDIRECTS: usize = 8;

/// Authorization policy declared on a route.
///
/// Unknown or absent flags mean "no requirement".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRequirement {
    #[serde(alias = "requiresAuth")]
    pub requires_auth: bool,

    #[serde(alias = "requiresAdmin")]
    pub requires_admin: bool,
}

impl RouteRequirement {
    pub const PUBLIC: Self = Self {
        requires_auth: false,
        requires_admin: false,
    };

    pub const AUTHENTICATED: Self = Self {
        requires_auth: true,
        requires_admin: false,
    };

    pub const ADMIN: Self = Self {
        requires_auth: true,
        requires_admin: true,
    };

    /// `requires_admin` implies `requires_auth`.
    pub fn is_consistent(&self) -> bool {
        !self.requires_admin || self.requires_auth
    }
}

/// A navigable destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(default)]
    pub name: Option<String>,

    /// Path pattern; `:name` segments capture parameters.
    pub path: String,

    #[serde(default, alias = "meta")]
    pub requirement: RouteRequirement,

    /// Redirect records forward to another path instead of rendering a view.
    #[serde(default)]
    pub redirect: Option<String>,
}

impl RouteRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            requirement: RouteRequirement::PUBLIC,
            redirect: None,
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            name: None,
            path: path.into(),
            requirement: RouteRequirement::PUBLIC,
            redirect: Some(to.into()),
        }
    }

    pub fn with_requirement(mut self, requirement: RouteRequirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn requires_auth(self) -> Self {
        self.with_requirement(RouteRequirement::AUTHENTICATED)
    }

    pub fn requires_admin(self) -> Self {
        self.with_requirement(RouteRequirement::ADMIN)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route path must start with '/': '{0}'")]
    InvalidPath(String),

    #[error("empty parameter name in route '{0}'")]
    InvalidParam(String),

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("route '{0}' requires admin but not authentication")]
    AdminWithoutAuth(String),

    #[error("route '{from}' redirects to unknown path '{to}'")]
    UnknownRedirect { from: String, to: String },

    #[error("redirect loop starting at '{0}'")]
    RedirectLoop(String),

    #[error("redirect chain starting at '{0}' is too long")]
    TooManyRedirects(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    record: RouteRecord,
    segments: Vec<Segment>,
}

impl CompiledRoute {
    fn compile(record: RouteRecord) -> Result<Self, RouteError> {
        if !record.path.starts_with('/') {
            return Err(RouteError::InvalidPath(record.path));
        }

        let mut segments = Vec::new();
        for part in split_segments(&record.path) {
            match part.strip_prefix(':') {
                Some("") => return Err(RouteError::InvalidParam(record.path.clone())),
                Some(param) => segments.push(Segment::Param(param.to_string())),
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self { record, segments })
    }

    /// Path shape with parameter names erased and case folded (`/edit-course/:`).
    fn shape(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Static(s) => s.to_ascii_lowercase(),
                Segment::Param(_) => ":".to_string(),
            })
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Static segments compare case-insensitively; `parts` are already decoded.
    fn matches(&self, parts: &[Cow<'_, str>]) -> Option<BTreeMap<String, String>> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(s) if s.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

/// Result of resolving a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub record: &'a RouteRecord,
    pub params: BTreeMap<String, String>,
    /// Normalized concrete path, after redirects.
    pub path: String,
}

impl ResolvedRoute<'_> {
    pub fn requirement(&self) -> RouteRequirement {
        self.record.requirement
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }
}

/// Validated set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Validate and compile route declarations.
    ///
    /// Declarations that would let an admin route skip the authentication
    /// check are rejected here, not at navigation time.
    pub fn new(records: impl IntoIterator<Item = RouteRecord>) -> Result<Self, RouteError> {
        let mut routes = Vec::new();
        let mut names = HashSet::new();
        let mut shapes = HashSet::new();

        for record in records {
            if !record.requirement.is_consistent() {
                return Err(RouteError::AdminWithoutAuth(record.path));
            }
            if let Some(name) = &record.name {
                if !names.insert(name.clone()) {
                    return Err(RouteError::DuplicateName(name.clone()));
                }
            }

            let compiled = CompiledRoute::compile(record)?;
            if !shapes.insert(compiled.shape()) {
                return Err(RouteError::DuplicatePath(compiled.record.path));
            }
            routes.push(compiled);
        }

        let table = Self { routes };
        table.check_redirects()?;

        tracing::debug!(routes = table.routes.len(), "route table compiled");
        Ok(table)
    }

    fn check_redirects(&self) -> Result<(), RouteError> {
        for route in &self.routes {
            let Some(first) = &route.record.redirect else {
                continue;
            };

            let mut seen = HashSet::from([route.record.path.clone()]);
            let mut from = route.record.path.clone();
            let mut to = first.clone();
            let mut hops = 1;
            loop {
                let next = self.match_path(&to).ok_or_else(|| RouteError::UnknownRedirect {
                    from: from.clone(),
                    to: to.clone(),
                })?;
                let Some(further) = &next.0.record.redirect else {
                    break;
                };
                if !seen.insert(next.0.record.path.clone()) {
                    return Err(RouteError::RedirectLoop(route.record.path.clone()));
                }
                hops += 1;
                if hops > MAX_REDIRECTS {
                    return Err(RouteError::TooManyRedirects(route.record.path.clone()));
                }
                from = next.0.record.path.clone();
                to = further.clone();
            }
        }
        Ok(())
    }

    fn match_path(&self, path: &str) -> Option<(&CompiledRoute, BTreeMap<String, String>)> {
        let normalized = normalize(path);
        let parts: Vec<Cow<'_, str>> = split_segments(&normalized)
            .into_iter()
            .map(decode_segment)
            .collect();
        self.routes
            .iter()
            .find_map(|route| route.matches(&parts).map(|params| (route, params)))
    }

    /// Resolve a concrete path, following redirect records.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_>> {
        let mut current = normalize(path);
        for _ in 0..=MAX_REDIRECTS {
            let (route, params) = self.match_path(&current)?;
            match &route.record.redirect {
                Some(to) => current = normalize(to),
                None => {
                    return Some(ResolvedRoute {
                        record: &route.record,
                        params,
                        path: current,
                    });
                }
            }
        }

        tracing::warn!(path = %path, "too many redirects while resolving route");
        None
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.records().find(|r| r.name.as_deref() == Some(name))
    }

    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.iter().map(|r| &r.record)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strip query/fragment and trailing slashes; always absolute.
pub(crate) fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let parts = split_segments(path);
    format!("/{}", parts.join("/"))
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Percent-decode one segment; undecodable input is matched as written.
fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new([
            RouteRecord::redirect("/", "/login"),
            RouteRecord::new("login", "/login"),
            RouteRecord::new("dashboard", "/dashboard").requires_auth(),
            RouteRecord::new("edit-course", "/edit-course/:id").requires_admin(),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_static_and_param_routes() {
        let table = table();

        let dashboard = table.resolve("/dashboard/").unwrap();
        assert_eq!(dashboard.name(), Some("dashboard"));
        assert_eq!(dashboard.requirement(), RouteRequirement::AUTHENTICATED);
        assert_eq!(dashboard.path, "/dashboard");

        let edit = table.resolve("/edit-course/42?tab=info").unwrap();
        assert_eq!(edit.name(), Some("edit-course"));
        assert_eq!(edit.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(edit.path, "/edit-course/42");

        assert!(table.resolve("/edit-course").is_none());
        assert!(table.resolve("/nowhere").is_none());
    }

    #[test]
    fn follows_redirects() {
        let table = table();
        let resolved = table.resolve("/").unwrap();
        assert_eq!(resolved.name(), Some("login"));
        assert_eq!(resolved.path, "/login");
    }

    #[test]
    fn matching_ignores_case_and_percent_encoding() {
        let table = table();

        for path in ["/DASHBOARD", "/Dashboard", "/dash%62oard", "/Dash%42oard/"] {
            let resolved = table.resolve(path).unwrap();
            assert_eq!(resolved.name(), Some("dashboard"), "{path}");
        }

        let edit = table.resolve("/Edit-Course/caf%C3%A9").unwrap();
        assert_eq!(edit.name(), Some("edit-course"));
        assert_eq!(edit.params.get("id").map(String::as_str), Some("café"));

        // Invalid UTF-8 after decoding is matched literally.
        assert!(table.resolve("/dashboard%FF").is_none());
    }

    #[test]
    fn case_variants_are_duplicate_paths() {
        let err = RouteTable::new([
            RouteRecord::new("a", "/Courses"),
            RouteRecord::new("b", "/courses"),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicatePath("/courses".to_string()));
    }

    #[test]
    fn rejects_admin_without_auth() {
        let record = RouteRecord::new("admin", "/admin").with_requirement(RouteRequirement {
            requires_auth: false,
            requires_admin: true,
        });
        let err = RouteTable::new([record]).unwrap_err();
        assert_eq!(err, RouteError::AdminWithoutAuth("/admin".to_string()));
    }

    #[test]
    fn rejects_duplicates() {
        let err = RouteTable::new([
            RouteRecord::new("a", "/a"),
            RouteRecord::new("a", "/b"),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicateName("a".to_string()));

        let err = RouteTable::new([
            RouteRecord::new("x", "/item/:id"),
            RouteRecord::new("y", "/item/:slug"),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicatePath("/item/:slug".to_string()));
    }

    #[test]
    fn rejects_bad_paths() {
        assert_eq!(
            RouteTable::new([RouteRecord::new("rel", "login")]).unwrap_err(),
            RouteError::InvalidPath("login".to_string())
        );
        assert_eq!(
            RouteTable::new([RouteRecord::new("p", "/item/:")]).unwrap_err(),
            RouteError::InvalidParam("/item/:".to_string())
        );
    }

    #[test]
    fn rejects_broken_redirects() {
        let err = RouteTable::new([RouteRecord::redirect("/", "/missing")]).unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownRedirect {
                from: "/".to_string(),
                to: "/missing".to_string()
            }
        );

        let err = RouteTable::new([
            RouteRecord::redirect("/a", "/b"),
            RouteRecord::redirect("/b", "/a"),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::RedirectLoop("/a".to_string()));
    }

    fn redirect_chain(len: usize) -> Vec<RouteRecord> {
        let mut records: Vec<RouteRecord> = (0..len)
            .map(|i| {
                let to = if i + 1 == len { "/students".to_string() } else { format!("/r{}", i + 1) };
                RouteRecord::redirect(format!("/r{i}"), to)
            })
            .collect();
        records.push(RouteRecord::new("students", "/students").requires_admin());
        records
    }

    #[test]
    fn redirect_chains_longer_than_resolution_limit_are_rejected() {
        let err = RouteTable::new(redirect_chain(MAX_REDIRECTS + 1)).unwrap_err();
        assert_eq!(err, RouteError::TooManyRedirects("/r0".to_string()));

        let err = RouteTable::new(redirect_chain(11)).unwrap_err();
        assert_eq!(err, RouteError::TooManyRedirects("/r0".to_string()));
    }

    #[test]
    fn longest_accepted_chain_resolves() {
        let table = RouteTable::new(redirect_chain(MAX_REDIRECTS)).unwrap();
        let resolved = table.resolve("/r0").unwrap();
        assert_eq!(resolved.name(), Some("students"));
        assert_eq!(resolved.requirement(), RouteRequirement::ADMIN);
    }

    #[test]
    fn requirement_flags_default_and_accept_camel_case() {
        let record: RouteRecord = serde_json::from_str(
            r#"{ "name": "kanban", "path": "/kanban", "meta": { "requiresAuth": true, "title": "Board" } }"#,
        )
        .unwrap();
        assert_eq!(record.requirement, RouteRequirement::AUTHENTICATED);

        let record: RouteRecord = serde_json::from_str(r#"{ "path": "/signup" }"#).unwrap();
        assert_eq!(record.requirement, RouteRequirement::PUBLIC);
        assert_eq!(record.name, None);
    }
}
