//! Repository model and upstream payload reconciliation.
//!
//! Repositories are keyed by the numeric id GitHub assigns them. Re-fetching
//! a repository reconciles the incoming payload against the stored record,
//! so a repository seen through both the search API (sparse payload) and the
//! detail API (full payload) converges on one record instead of duplicating
//! or losing fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

/// License information as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

/// Owner sub-object of an upstream repository payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOwner {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A repository payload as GitHub sends it, before reconciliation.
///
/// Everything except `id` is optional: search results omit detail-only
/// fields, and the reconciler decides per field whether absence means
/// "use the default" or "keep what we already stored".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepository {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub ssh_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<i64>,
    #[serde(default)]
    pub forks_count: Option<i64>,
    #[serde(default)]
    pub watchers_count: Option<i64>,
    #[serde(default)]
    pub open_issues_count: Option<i64>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub owner: Option<RawOwner>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub fork: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub disabled: Option<bool>,
    #[serde(default)]
    pub size: Option<i64>,
    /// Double-Option: outer `None` means the key was absent from the
    /// payload, `Some(None)` means an explicit JSON `null`.
    #[serde(default, deserialize_with = "present_or_null")]
    pub license: Option<Option<License>>,
}

fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// A cached GitHub repository.
///
/// `github_id` is the immutable external key; every other field is
/// overwritten on re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Id assigned by GitHub. Never changes after creation.
    pub github_id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub language: Option<String>,
    pub stars_count: i64,
    pub forks_count: i64,
    pub watchers_count: i64,
    pub open_issues_count: i64,
    pub default_branch: String,
    pub topics: Vec<String>,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub is_private: bool,
    pub is_fork: bool,
    pub archived: bool,
    pub disabled: bool,
    /// Repository size in kilobytes.
    pub size: i64,
    pub license: Option<License>,
}

impl Repository {
    /// Reconcile an upstream payload against the previously stored record.
    ///
    /// Produces a complete new record value; callers persist it with a
    /// single whole-row write so concurrent upserts of the same id can only
    /// race whole records, never individual fields.
    ///
    /// Field rules:
    /// - descriptive strings and metrics are overwritten, with declared
    ///   defaults for anything the payload omits
    /// - timestamps keep their previous value when the payload omits them
    ///   or carries an unparseable string
    /// - `license` is only touched when the payload carries the key; search
    ///   results omit it, and that must not read as "license removed"
    pub fn reconcile(previous: Option<&Repository>, raw: &RawRepository) -> Repository {
        let owner = raw.owner.clone().unwrap_or_default();

        Repository {
            github_id: raw.id,
            name: raw.name.clone().unwrap_or_default(),
            full_name: raw.full_name.clone().unwrap_or_default(),
            description: raw.description.clone(),
            html_url: raw.html_url.clone().unwrap_or_default(),
            clone_url: raw.clone_url.clone().unwrap_or_default(),
            ssh_url: raw.ssh_url.clone().unwrap_or_default(),
            language: raw.language.clone(),
            stars_count: raw.stargazers_count.unwrap_or(0),
            forks_count: raw.forks_count.unwrap_or(0),
            watchers_count: raw.watchers_count.unwrap_or(0),
            open_issues_count: raw.open_issues_count.unwrap_or(0),
            default_branch: raw
                .default_branch
                .clone()
                .unwrap_or_else(|| "main".to_string()),
            topics: raw.topics.clone().unwrap_or_default(),
            owner_login: owner.login.unwrap_or_default(),
            owner_avatar_url: owner.avatar_url.unwrap_or_default(),
            created_at: parse_timestamp(raw.created_at.as_deref())
                .or_else(|| previous.and_then(|p| p.created_at)),
            updated_at: parse_timestamp(raw.updated_at.as_deref())
                .or_else(|| previous.and_then(|p| p.updated_at)),
            pushed_at: parse_timestamp(raw.pushed_at.as_deref())
                .or_else(|| previous.and_then(|p| p.pushed_at)),
            is_private: raw.private.unwrap_or(false),
            is_fork: raw.fork.unwrap_or(false),
            archived: raw.archived.unwrap_or(false),
            disabled: raw.disabled.unwrap_or(false),
            size: raw.size.unwrap_or(0),
            license: match &raw.license {
                Some(value) => value.clone(),
                None => previous.and_then(|p| p.license.clone()),
            },
        }
    }

    /// Client-facing JSON shape, using GitHub's own field names.
    pub fn to_payload(&self) -> serde_json::Value {
        json!({
            "id": self.github_id,
            "name": self.name,
            "full_name": self.full_name,
            "description": self.description,
            "html_url": self.html_url,
            "clone_url": self.clone_url,
            "ssh_url": self.ssh_url,
            "language": self.language,
            "stargazers_count": self.stars_count,
            "forks_count": self.forks_count,
            "watchers_count": self.watchers_count,
            "open_issues_count": self.open_issues_count,
            "default_branch": self.default_branch,
            "topics": self.topics,
            "owner": {
                "login": self.owner_login,
                "avatar_url": self.owner_avatar_url,
            },
            "created_at": self.created_at.map(|dt| dt.to_rfc3339()),
            "updated_at": self.updated_at.map(|dt| dt.to_rfc3339()),
            "pushed_at": self.pushed_at.map(|dt| dt.to_rfc3339()),
            "private": self.is_private,
            "fork": self.is_fork,
            "archived": self.archived,
            "disabled": self.disabled,
            "size": self.size,
            "license": self.license.as_ref().map(|l| json!({
                "name": l.name,
                "spdx_id": l.spdx_id,
            })),
        })
    }
}

/// Parse an upstream ISO-8601 timestamp. GitHub sends a trailing `Z` zone
/// marker; numeric offsets are accepted too. Unparseable input maps to None.
pub fn parse_timestamp(s: Option<&str>) -> Option<DateTime<Utc>> {
    s.and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> RawRepository {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reconcile_fills_defaults() {
        let repo = Repository::reconcile(None, &raw(json!({"id": 1, "name": "x"})));

        assert_eq!(repo.github_id, 1);
        assert_eq!(repo.name, "x");
        assert_eq!(repo.stars_count, 0);
        assert_eq!(repo.default_branch, "main");
        assert!(repo.topics.is_empty());
        assert!(!repo.is_private);
        assert!(!repo.is_fork);
        assert!(!repo.archived);
        assert!(!repo.disabled);
        assert!(repo.created_at.is_none());
        assert!(repo.license.is_none());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let payload = raw(json!({
            "id": 42,
            "name": "hello",
            "full_name": "octocat/hello",
            "stargazers_count": 7,
            "topics": ["a", "b"],
            "created_at": "2023-05-01T12:00:00Z",
            "updated_at": "2023-05-02T12:00:00Z",
        }));

        let first = Repository::reconcile(None, &payload);
        let second = Repository::reconcile(Some(&first), &payload);
        assert_eq!(first, second);
    }

    #[test]
    fn test_timestamp_zone_markers_are_equivalent() {
        let zulu = parse_timestamp(Some("2023-05-01T12:00:00Z")).unwrap();
        let offset = parse_timestamp(Some("2023-05-01T12:00:00+00:00")).unwrap();
        assert_eq!(zulu, offset);
    }

    #[test]
    fn test_unparseable_timestamp_is_none() {
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn test_missing_timestamps_keep_previous_value() {
        let detail = raw(json!({
            "id": 5,
            "name": "repo",
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2021-01-01T00:00:00Z",
        }));
        let stored = Repository::reconcile(None, &detail);

        let sparse = raw(json!({"id": 5, "name": "repo"}));
        let merged = Repository::reconcile(Some(&stored), &sparse);

        assert_eq!(merged.created_at, stored.created_at);
        assert_eq!(merged.updated_at, stored.updated_at);
    }

    #[test]
    fn test_license_preserved_when_key_absent() {
        let detail = raw(json!({
            "id": 9,
            "name": "repo",
            "license": {"name": "MIT License", "spdx_id": "MIT"},
        }));
        let stored = Repository::reconcile(None, &detail);
        assert!(stored.license.is_some());

        // Search payloads omit the license key entirely.
        let search_item = raw(json!({"id": 9, "name": "repo", "stargazers_count": 3}));
        let merged = Repository::reconcile(Some(&stored), &search_item);

        assert_eq!(merged.license, stored.license);
        assert_eq!(merged.stars_count, 3);
    }

    #[test]
    fn test_license_cleared_on_explicit_null() {
        let detail = raw(json!({
            "id": 9,
            "name": "repo",
            "license": {"name": "MIT License", "spdx_id": "MIT"},
        }));
        let stored = Repository::reconcile(None, &detail);

        let refetched = raw(json!({"id": 9, "name": "repo", "license": null}));
        let merged = Repository::reconcile(Some(&stored), &refetched);

        assert!(merged.license.is_none());
    }

    #[test]
    fn test_payload_shape() {
        let repo = Repository::reconcile(
            None,
            &raw(json!({
                "id": 1296269,
                "name": "Hello-World",
                "full_name": "octocat/Hello-World",
                "owner": {"login": "octocat", "avatar_url": "https://example.com/a.png"},
                "stargazers_count": 80,
                "license": {"name": "MIT License", "spdx_id": "MIT"},
                "pushed_at": "2011-01-26T19:06:43Z",
            })),
        );

        let payload = repo.to_payload();
        assert_eq!(payload["id"], 1296269);
        assert_eq!(payload["stargazers_count"], 80);
        assert_eq!(payload["owner"]["login"], "octocat");
        assert_eq!(payload["license"]["spdx_id"], "MIT");
        assert_eq!(payload["default_branch"], "main");
        assert!(payload["created_at"].is_null());
        assert_eq!(payload["pushed_at"], "2011-01-26T19:06:43+00:00");
    }
}
