//! Profile operations against the relay.
//!
//! [`ProfileService`] owns the HTTP client, the relay endpoint, the header
//! scheme, and the injected credential slot. Fetches run the full decision
//! ladder; the visibility mutation commits its optimistic update before the
//! request leaves and never rolls it back.

use std::sync::Arc;

use credential::CredentialScheme;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use crate::query::{request_envelope, PROFILE_QUERY, UPDATE_VISIBILITY_MUTATION};
use crate::response::{classify_response, GraphqlError, ParsedResponse};
use crate::store::{CredentialStore, CredentialStoreError};
use crate::view::{Profile, Visibility};

/// Errors raised by profile operations.
///
/// Each variant maps to one rung of the response decision ladder, so
/// callers can distinguish "no credential yet" from "credential rejected"
/// from "the relay is down".
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The credential slot is empty; no request was sent.
    #[error("no credential stored; log in first")]
    CredentialMissing,
    /// The credential slot itself failed.
    #[error(transparent)]
    Store(#[from] CredentialStoreError),
    /// The request never completed.
    #[error("request to the relay failed: {source}")]
    Transport {
        /// Underlying client error.
        #[from]
        source: reqwest::Error,
    },
    /// The relay answered with a non-success status.
    #[error("relay returned status {status}: {body}")]
    Http {
        /// HTTP status code received.
        status: u16,
        /// Response body, kept for diagnosis.
        body: String,
    },
    /// The response body did not parse as a response envelope.
    #[error("failed to parse relay response as JSON: {raw}")]
    Malformed {
        /// The raw body.
        raw: String,
    },
    /// The envelope carried GraphQL-level errors.
    #[error("upstream reported GraphQL errors: {}", format_messages(.errors))]
    Upstream {
        /// The error list, in upstream order.
        errors: Vec<GraphqlError>,
    },
    /// The envelope lacked `data.currentUser`.
    #[error("credential rejected by the upstream; log in with a fresh API key")]
    InvalidCredential,
}

fn format_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|entry| entry.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client for the relay's profile operations.
pub struct ProfileService {
    http: Client,
    endpoint: Url,
    scheme: CredentialScheme,
    store: Arc<dyn CredentialStore>,
}

impl ProfileService {
    /// Build a service posting to `endpoint` with `scheme` header encoding.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        scheme: CredentialScheme,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().build()?,
            endpoint,
            scheme,
            store,
        })
    }

    /// Fetch the profile and flatten it into the view model.
    ///
    /// # Errors
    ///
    /// Fails with the first matching rung of the decision ladder: missing
    /// credential, transport failure, non-success relay status, malformed
    /// body, GraphQL errors, or a missing `currentUser` subtree.
    pub async fn fetch_profile(&self) -> Result<Profile, ProfileError> {
        let body = self.dispatch(PROFILE_QUERY, Map::new()).await?;
        match classify_response(&body) {
            ParsedResponse::Success { current_user } => {
                let profile = Profile::from_current_user(current_user);
                info!(
                    skills = profile.skills.len(),
                    applications = profile.job_applications.len(),
                    "profile fetched"
                );
                Ok(profile)
            }
            ParsedResponse::GraphqlErrors { errors } => Err(ProfileError::Upstream { errors }),
            ParsedResponse::MissingCurrentUser => Err(ProfileError::InvalidCredential),
            ParsedResponse::Malformed { raw } => Err(ProfileError::Malformed { raw }),
        }
    }

    /// Dispatch the visibility mutation with an optimistic local commit.
    ///
    /// The view model flips to `visibility` before the request leaves and
    /// stays flipped whatever the outcome; a failure is reported to the
    /// caller but never rolled back.
    ///
    /// # Errors
    ///
    /// Same ladder as [`Self::fetch_profile`], minus the `currentUser`
    /// check: the mutation reply carries an `updateProfile` payload instead.
    pub async fn update_visibility(
        &self,
        profile: &mut Profile,
        visibility: Visibility,
    ) -> Result<(), ProfileError> {
        profile.visibility = visibility;

        let outcome = self.dispatch(UPDATE_VISIBILITY_MUTATION, visibility_variables(visibility));
        match outcome.await.and_then(|body| mutation_ack(&body)) {
            Ok(()) => Ok(()),
            Err(dispatch_error) => {
                warn!(
                    error = %dispatch_error,
                    visibility = %visibility,
                    "visibility mutation failed; optimistic update kept"
                );
                Err(dispatch_error)
            }
        }
    }

    async fn dispatch(
        &self,
        query: &str,
        variables: Map<String, Value>,
    ) -> Result<String, ProfileError> {
        let token = self
            .store
            .load()?
            .ok_or(ProfileError::CredentialMissing)?;
        let envelope = request_envelope(query, variables);
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(self.scheme.header_name(), self.scheme.encode(&token))
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProfileError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Variable payload for the visibility mutation, in wire encoding.
fn visibility_variables(visibility: Visibility) -> Map<String, Value> {
    let mut variables = Map::new();
    variables.insert(
        "visibility".to_owned(),
        Value::String(visibility.wire_value().to_owned()),
    );
    variables
}

/// Check a mutation reply for envelope-level failure.
fn mutation_ack(body: &str) -> Result<(), ProfileError> {
    let envelope: Value = serde_json::from_str(body).map_err(|_| ProfileError::Malformed {
        raw: body.to_owned(),
    })?;
    match envelope.get("errors") {
        Some(errors) => Err(ProfileError::Upstream {
            errors: serde_json::from_value(errors.clone()).unwrap_or_default(),
        }),
        None => Ok(()),
    }
}
