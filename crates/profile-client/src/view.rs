//! Profile view model and the visibility wire encoding.
//!
//! The view model is the flattened, render-ready form of the upstream's
//! nested `currentUser` payload. It is rebuilt on every fetch and never
//! persisted. Each field falls back to a fixed default when its subtree is
//! absent, so a sparse upstream reply still renders.

use std::fmt;
use std::str::FromStr;

use crate::response::CurrentUser;

/// Display name shown when the upstream carries none.
const DEFAULT_NAME: &str = "Unknown";

/// Profile visibility setting.
///
/// The wire encoding is a closed lookup table, used identically for
/// decoding fetched profiles and encoding mutation variables. It is not a
/// case transform of the variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Profile hidden from everyone.
    #[default]
    Private,
    /// Profile visible to anyone.
    Public,
    /// Profile visible to the user's clients only.
    ClientsOnly,
}

impl Visibility {
    /// Upstream enum encoding for this variant.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::ClientsOnly => "clients_only",
        }
    }

    /// Decode the upstream enum encoding; `None` for unknown values.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "private" => Some(Self::Private),
            "public" => Some(Self::Public),
            "clients_only" => Some(Self::ClientsOnly),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Errors raised when parsing a visibility name from user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility '{value}'; expected private|public|clients_only")]
pub struct VisibilityParseError {
    /// The rejected input.
    value: String,
}

impl FromStr for Visibility {
    type Err = VisibilityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(&s.trim().to_ascii_lowercase().replace('-', "_")).ok_or_else(|| {
            VisibilityParseError {
                value: s.to_owned(),
            }
        })
    }
}

/// One job application, derived from a contract node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    /// Title of the applied-for job.
    pub title: String,
}

/// Flattened, render-ready profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Display name; `"Unknown"` when the upstream carries none.
    pub name: String,
    /// Avatar URL; empty when the upstream carries none.
    pub avatar_url: String,
    /// Skill names in upstream order.
    pub skills: Vec<String>,
    /// Job applications in upstream order.
    pub job_applications: Vec<JobApplication>,
    /// Visibility setting; private when the upstream carries none.
    pub visibility: Visibility,
}

impl Profile {
    /// Flatten a `currentUser` subtree, applying per-field defaults.
    ///
    /// Entries with an absent inner object (a skill association without a
    /// skill, a contract without a job) are skipped rather than defaulted.
    #[must_use]
    pub fn from_current_user(user: CurrentUser) -> Self {
        let visibility = user
            .profile
            .and_then(|settings| settings.visibility)
            .and_then(|value| Visibility::from_wire(&value))
            .unwrap_or_default();
        let skills = user
            .user_skills
            .unwrap_or_default()
            .into_iter()
            .filter_map(|association| association.skill.map(|skill| skill.name))
            .collect();
        let job_applications = user
            .contracts
            .and_then(|contracts| contracts.nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|node| node.job.map(|job| JobApplication { title: job.title }))
            .collect();

        Self {
            name: user.name.unwrap_or_else(|| DEFAULT_NAME.to_owned()),
            avatar_url: user.avatar_url.unwrap_or_default(),
            skills,
            job_applications,
            visibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{classify_response, ParsedResponse};
    use rstest::rstest;

    #[test]
    fn all_null_fields_flatten_to_the_documented_defaults() {
        let raw = r#"{"data":{"currentUser":{
            "name":null,"avatarUrl":null,"profile":null,"userSkills":null,"contracts":null
        }}}"#;
        let ParsedResponse::Success { current_user } = classify_response(raw) else {
            panic!("expected Success");
        };

        let profile = Profile::from_current_user(current_user);
        assert_eq!(
            profile,
            Profile {
                name: "Unknown".to_owned(),
                avatar_url: String::new(),
                skills: Vec::new(),
                job_applications: Vec::new(),
                visibility: Visibility::Private,
            }
        );
    }

    #[test]
    fn full_payload_flattens_in_upstream_order() {
        let raw = r#"{"data":{"currentUser":{
            "name":"Ada Lovelace",
            "avatarUrl":"https://img/ada.png",
            "profile":{"visibility":"clients_only"},
            "userSkills":[
                {"skill":{"name":"Rust"}},
                {"skill":null},
                {"skill":{"name":"GraphQL"}}
            ],
            "contracts":{"nodes":[
                {"job":{"title":"Systems engineer"}},
                {"job":null},
                {"job":{"title":"Platform engineer"}}
            ]}
        }}}"#;
        let ParsedResponse::Success { current_user } = classify_response(raw) else {
            panic!("expected Success");
        };

        let profile = Profile::from_current_user(current_user);
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.avatar_url, "https://img/ada.png");
        assert_eq!(profile.visibility, Visibility::ClientsOnly);
        assert_eq!(profile.skills, vec!["Rust".to_owned(), "GraphQL".to_owned()]);
        assert_eq!(
            profile.job_applications,
            vec![
                JobApplication {
                    title: "Systems engineer".to_owned()
                },
                JobApplication {
                    title: "Platform engineer".to_owned()
                },
            ]
        );
    }

    #[rstest]
    #[case::private(Visibility::Private, "private")]
    #[case::public(Visibility::Public, "public")]
    #[case::clients_only(Visibility::ClientsOnly, "clients_only")]
    fn wire_encoding_round_trips(#[case] visibility: Visibility, #[case] wire: &str) {
        assert_eq!(visibility.wire_value(), wire);
        assert_eq!(Visibility::from_wire(wire), Some(visibility));
    }

    #[test]
    fn unknown_wire_visibility_falls_back_to_private() {
        let raw = r#"{"data":{"currentUser":{"profile":{"visibility":"EVERYONE"}}}}"#;
        let ParsedResponse::Success { current_user } = classify_response(raw) else {
            panic!("expected Success");
        };
        assert_eq!(
            Profile::from_current_user(current_user).visibility,
            Visibility::Private
        );
    }

    #[rstest]
    #[case::canonical("clients_only")]
    #[case::dashed("clients-only")]
    #[case::mixed_case("Clients_Only")]
    fn parses_user_supplied_visibility_names(#[case] input: &str) {
        let parsed: Visibility = input.parse().expect("known visibility");
        assert_eq!(parsed, Visibility::ClientsOnly);
    }

    #[test]
    fn rejects_unknown_visibility_names() {
        assert!("everyone".parse::<Visibility>().is_err());
    }
}
