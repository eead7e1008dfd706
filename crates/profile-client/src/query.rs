//! Fixed GraphQL documents and envelope construction.
//!
//! The client speaks exactly two operations. Both documents are fixed
//! strings; only the mutation takes variables.

use serde_json::{json, Map, Value};

/// Profile query selecting the fields the view model flattens.
pub const PROFILE_QUERY: &str = "\
query {
  currentUser {
    name
    avatarUrl
    profile {
      visibility
    }
    userSkills {
      skill {
        name
      }
    }
    contracts {
      nodes {
        job {
          title
        }
      }
    }
  }
}";

/// Mutation updating the profile's visibility setting.
pub const UPDATE_VISIBILITY_MUTATION: &str = "\
mutation UpdateProfileVisibility($visibility: ProfileVisibility!) {
  updateProfile(input: { visibility: $visibility }) {
    profile {
      visibility
    }
  }
}";

/// Build the request envelope the relay forwards upstream.
///
/// `variables` is always present in the rendered envelope; pass an empty map
/// for operations without variables.
#[must_use]
pub fn request_envelope(query: &str, variables: Map<String, Value>) -> Value {
    json!({
        "query": query,
        "variables": Value::Object(variables),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_always_carries_a_variables_object() {
        let envelope = request_envelope(PROFILE_QUERY, Map::new());
        assert_eq!(envelope.get("variables"), Some(&json!({})));
        assert_eq!(
            envelope.get("query").and_then(Value::as_str),
            Some(PROFILE_QUERY)
        );
    }

    #[test]
    fn profile_query_selects_every_view_model_field() {
        for field in ["name", "avatarUrl", "visibility", "userSkills", "contracts"] {
            assert!(
                PROFILE_QUERY.contains(field),
                "profile query should select {field}"
            );
        }
    }

    #[test]
    fn mutation_targets_the_visibility_input() {
        assert!(UPDATE_VISIBILITY_MUTATION.contains("$visibility: ProfileVisibility!"));
        assert!(UPDATE_VISIBILITY_MUTATION.contains("updateProfile"));
    }
}
