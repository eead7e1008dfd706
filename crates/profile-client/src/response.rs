//! Relay response classification.
//!
//! Every response body lands in exactly one variant of [`ParsedResponse`],
//! checked in a fixed order: malformed JSON first, then GraphQL-level
//! errors, then the missing `currentUser` subtree, and only then success.
//! Consumers pattern-match the variant instead of probing an untyped tree
//! for field presence.

use serde::Deserialize;

/// One entry from the response envelope's `errors` list.
///
/// Upstream error entries carry extra fields (locations, path); only the
/// message is interesting here and the rest is ignored on deserialisation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphqlError {
    /// Human-readable error message.
    pub message: String,
}

/// `currentUser` subtree as returned by the upstream.
///
/// Every field is optional; the view-model transform substitutes defaults
/// per field. Field names follow the upstream's camelCase wire form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Profile settings subtree.
    pub profile: Option<ProfileSettings>,
    /// Skill associations.
    pub user_skills: Option<Vec<UserSkill>>,
    /// Contract connection holding job applications.
    pub contracts: Option<Contracts>,
}

/// Profile settings subtree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettings {
    /// Visibility setting in the upstream's wire encoding.
    pub visibility: Option<String>,
}

/// One skill association.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSkill {
    /// The referenced skill.
    pub skill: Option<Skill>,
}

/// A named skill.
#[derive(Debug, Clone, Deserialize)]
pub struct Skill {
    /// Skill name.
    pub name: String,
}

/// Contract connection wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contracts {
    /// Connection nodes.
    pub nodes: Option<Vec<ContractNode>>,
}

/// One contract node.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractNode {
    /// The job this contract applies to.
    pub job: Option<Job>,
}

/// A job posting.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Job title.
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<EnvelopeData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeData {
    current_user: Option<CurrentUser>,
}

/// Classified relay response.
#[derive(Debug)]
pub enum ParsedResponse {
    /// Well-formed envelope with a `currentUser` subtree.
    Success {
        /// The decoded subtree.
        current_user: CurrentUser,
    },
    /// The envelope carried a GraphQL `errors` list.
    GraphqlErrors {
        /// The error list, in upstream order.
        errors: Vec<GraphqlError>,
    },
    /// Well-formed envelope without `data.currentUser`; treated as an
    /// invalid or expired credential.
    MissingCurrentUser,
    /// The body did not parse as a response envelope.
    Malformed {
        /// The raw body, kept for diagnosis.
        raw: String,
    },
}

/// Classify one response body.
///
/// The presence of an `errors` field wins over everything else in the
/// parsed envelope, even when a `currentUser` subtree is also present.
#[must_use]
pub fn classify_response(raw: &str) -> ParsedResponse {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(_) => {
            return ParsedResponse::Malformed {
                raw: raw.to_owned(),
            };
        }
    };
    if let Some(errors) = envelope.errors {
        return ParsedResponse::GraphqlErrors { errors };
    }
    match envelope.data.and_then(|data| data.current_user) {
        Some(current_user) => ParsedResponse::Success { current_user },
        None => ParsedResponse::MissingCurrentUser,
    }
}
