//! HTTP access to the tournament registration API.
//!
//! Every request asks for JSON. Transport failures and 5xx answers become
//! errors straight away; 4xx answers carry their body back to the caller as
//! [`ClientError::Api`] so forms can show the server's message.

pub mod director;
pub mod types;

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::domain::commerce::PurchaseDetails;
use crate::domain::entry::{EntryKind, RegistrationEntry};
use crate::domain::payload::{BowlerRequest, NewTeamRequest, PairRequest};
use crate::domain::team::Team;
use crate::domain::tournament::Tournament;
use crate::error::ClientError;
use crate::errors::DomainError;

pub use director::DirectorClient;
pub use types::{
    BowlerCommerce, BowlerRecord, FreeEntryCode, FreeEntryRequest, NewBowler, Purchase, Submitted,
};
use types::{PasswordChange, PasswordChangeRequest, PasswordResetRequest, PasswordResetUser};

pub(crate) const JSON: &str = "application/json";

pub(crate) fn build_http(config: &ApiConfig) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| ClientError::config(format!("failed to build HTTP client: {e}")))
}

/// Pass 2xx responses through; turn everything else into an error.
pub(crate) async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.is_server_error() {
        warn!(%status, url = %response.url(), "API server error");
        return Err(ClientError::Server { status });
    }
    let body = response.text().await.unwrap_or_default();
    debug!(%status, %body, "API rejected request");
    Err(ClientError::Api { status, body })
}

/// Decode a JSON body; an empty body reads as JSON `null`.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Public, unauthenticated endpoints used by registrants.
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    config: Arc<ApiConfig>,
    http: reqwest::Client,
}

impl RegistrationClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = build_http(&config)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.url(path))
            .header(ACCEPT, JSON)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self.request(Method::GET, path).send().await?;
        decode(check_status(response).await?).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!(path, "POST");
        let response = self.request(Method::POST, path).json(body).send().await?;
        decode(check_status(response).await?).await
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>, ClientError> {
        self.get("/tournaments").await
    }

    pub async fn tournament(&self, identifier: &str) -> Result<Tournament, ClientError> {
        self.get(&format!("/tournaments/{identifier}")).await
    }

    /// Teams of a tournament; `incomplete` limits the list to teams with open spots.
    pub async fn teams(
        &self,
        tournament: &str,
        incomplete: bool,
    ) -> Result<Vec<Team>, ClientError> {
        let path = if incomplete {
            format!("/tournaments/{tournament}/teams?incomplete=true")
        } else {
            format!("/tournaments/{tournament}/teams")
        };
        self.get(&path).await
    }

    pub async fn team(&self, identifier: &str) -> Result<Team, ClientError> {
        self.get(&format!("/teams/{identifier}")).await
    }

    pub async fn bowler(&self, identifier: &str) -> Result<BowlerCommerce, ClientError> {
        self.get(&format!("/bowlers/{identifier}")).await
    }

    pub async fn submit_new_team(
        &self,
        tournament: &str,
        request: &NewTeamRequest,
    ) -> Result<Team, ClientError> {
        let team: Team = self
            .post(&format!("/tournaments/{tournament}/teams"), request)
            .await?;
        info!(tournament, team = %team.identifier, "New team registered");
        Ok(team)
    }

    /// Add a bowler to an existing team; returns the new bowler's identifier.
    pub async fn join_team(
        &self,
        team: &str,
        request: &BowlerRequest,
    ) -> Result<NewBowler, ClientError> {
        let bowler: NewBowler = self.post(&format!("/teams/{team}/bowlers"), request).await?;
        info!(team, bowler = %bowler.identifier, "Bowler joined team");
        Ok(bowler)
    }

    pub async fn register_solo(
        &self,
        tournament: &str,
        request: &BowlerRequest,
    ) -> Result<NewBowler, ClientError> {
        let bowler: NewBowler = self
            .post(&format!("/tournaments/{tournament}/bowlers"), request)
            .await?;
        info!(tournament, bowler = %bowler.identifier, "Solo bowler registered");
        Ok(bowler)
    }

    pub async fn register_pair(
        &self,
        tournament: &str,
        request: &PairRequest,
    ) -> Result<Vec<NewBowler>, ClientError> {
        let bowlers: Vec<NewBowler> = self
            .post(&format!("/tournaments/{tournament}/bowlers"), request)
            .await?;
        info!(tournament, count = bowlers.len(), "Doubles pair registered");
        Ok(bowlers)
    }

    /// Send a completed entry to whichever endpoint its kind calls for.
    pub async fn submit(&self, entry: &RegistrationEntry) -> Result<Submitted, ClientError> {
        let tournament = entry
            .tournament()
            .map(|t| t.identifier.clone())
            .ok_or_else(|| DomainError::invalid_transition("tournament details not loaded"))?;

        match entry.kind() {
            EntryKind::NewTeam => {
                let request = entry.new_team_request()?;
                Ok(Submitted::Team(self.submit_new_team(&tournament, &request).await?))
            }
            EntryKind::JoinTeam => {
                let (team, request) = entry.join_team_request()?;
                Ok(Submitted::Bowler(self.join_team(&team, &request).await?))
            }
            EntryKind::Solo => {
                let request = entry.solo_request()?;
                Ok(Submitted::Bowler(self.register_solo(&tournament, &request).await?))
            }
            EntryKind::NewPair => {
                let request = entry.pair_request()?;
                Ok(Submitted::Pair(self.register_pair(&tournament, &request).await?))
            }
            EntryKind::None => {
                Err(DomainError::invalid_transition("no registration in progress").into())
            }
        }
    }

    pub async fn claim_free_entry(
        &self,
        tournament: &str,
        request: &FreeEntryRequest,
    ) -> Result<serde_json::Value, ClientError> {
        self.post(&format!("/tournaments/{tournament}/free_entries"), request)
            .await
    }

    pub async fn purchase_details(
        &self,
        bowler: &str,
        details: &PurchaseDetails,
    ) -> Result<serde_json::Value, ClientError> {
        self.post(&format!("/bowlers/{bowler}/purchase_details"), details)
            .await
    }

    /// Report a completed checkout for `bowler`.
    pub async fn purchases_completed(
        &self,
        bowler: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let result = self
            .post(&format!("/bowlers/{bowler}/purchases"), body)
            .await?;
        info!(bowler, "Purchases recorded");
        Ok(result)
    }

    /// Ask for a password reset email.
    ///
    /// The server answers 422 for unknown addresses; that is reported as
    /// success so the form doesn't reveal which accounts exist.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ClientError> {
        let body = PasswordResetRequest {
            user: PasswordResetUser {
                email: email.trim().to_string(),
            },
        };
        let response = self
            .request(Method::POST, "/password")
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }

    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let body = PasswordChangeRequest {
            user: PasswordChange {
                reset_password_token: token.to_string(),
                password: password.to_string(),
                password_confirmation: confirmation.to_string(),
            },
        };
        let response = self
            .request(Method::PATCH, "/password")
            .json(&body)
            .send()
            .await?;
        decode(check_status(response).await?).await
    }
}
