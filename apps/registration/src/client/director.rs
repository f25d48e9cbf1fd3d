//! Authenticated director API.
//!
//! The client owns the director session: it is restored from the store when
//! the client is built, written back after login and tournament selection,
//! and dropped on logout or on any 401.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::types::{Credentials, LoginRequest};
use super::{build_http, check_status, decode, JSON};
use crate::config::ApiConfig;
use crate::domain::bowler::BowlerDetails;
use crate::domain::commerce::PurchasableItem;
use crate::domain::payload::{
    director_team_request, NewPurchasableItem, NewPurchasableItemsRequest, TeamUpdateRequest,
};
use crate::domain::team::Team;
use crate::domain::tournament::{next_state, Tournament, TournamentAction, TournamentRef};
use crate::error::ClientError;
use crate::errors::DomainError;
use crate::session::{DirectorSession, DirectorUser, SessionStore};

pub struct DirectorClient {
    config: Arc<ApiConfig>,
    http: reqwest::Client,
    store: Arc<dyn SessionStore>,
    session: Mutex<Option<DirectorSession>>,
}

impl std::fmt::Debug for DirectorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectorClient")
            .field("base_url", &self.config.base_url())
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl DirectorClient {
    /// Build a client and restore any saved session.
    pub fn new(config: ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = build_http(&config)?;
        let session = store.load()?;
        if let Some(s) = &session {
            info!(user = %s.user.email, "Restored director session");
        }
        Ok(Self {
            config: Arc::new(config),
            http,
            store,
            session: Mutex::new(session),
        })
    }

    pub fn session(&self) -> Option<DirectorSession> {
        self.session.lock().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.lock().is_some()
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .lock()
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ClientError::NotLoggedIn)
    }

    fn forget_session(&self) -> Result<(), ClientError> {
        *self.session.lock() = None;
        self.store.clear()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<DirectorUser, ClientError> {
        let body = LoginRequest {
            user: Credentials {
                email: email.trim().to_string(),
                password: password.to_string(),
            },
        };
        let response = self
            .http
            .post(self.config.url("/login"))
            .header(ACCEPT, JSON)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let token = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ClientError::decode("login response had no authorization header"))?;
        let user: DirectorUser = decode(response).await?;

        let session = DirectorSession::new(token, user.clone());
        self.store.save(&session)?;
        *self.session.lock() = Some(session);
        info!(user = %user.email, "Director logged in");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let token = self.token()?;
        let response = self
            .http
            .delete(self.config.url("/logout"))
            .header(ACCEPT, JSON)
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        let outcome = check_status(response).await;
        self.forget_session()?;
        outcome?;
        info!("Director logged out");
        Ok(())
    }

    /// Remember which tournament the director is working on.
    pub fn select_tournament(
        &self,
        tournament: TournamentRef,
    ) -> Result<DirectorSession, ClientError> {
        let mut guard = self.session.lock();
        let current = guard.as_ref().ok_or(ClientError::NotLoggedIn)?;
        let next = current.with_tournament(tournament);
        self.store.save(&next)?;
        *guard = Some(next.clone());
        Ok(next)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<Response, ClientError> {
        let token = self.token()?;
        let mut request = self
            .http
            .request(method.clone(), self.config.url(uri))
            .header(ACCEPT, JSON)
            .header(AUTHORIZATION, token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%method, uri, "Director session rejected; logging out");
            self.forget_session()?;
            return Err(ClientError::Unauthorized);
        }
        check_status(response).await
    }

    /// Authenticated request returning the decoded JSON body (`null` when empty).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        decode(self.send(method, uri, body).await?).await
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
    ) -> Result<T, ClientError> {
        decode(self.send(method, uri, body).await?).await
    }

    /// Raw bytes of a file export, such as a CSV roster.
    pub async fn download(&self, uri: &str) -> Result<Bytes, ClientError> {
        let response = self.send(Method::GET, uri, None).await?;
        Ok(response.bytes().await?)
    }

    pub async fn tournament(&self, identifier: &str) -> Result<Tournament, ClientError> {
        self.request_as(Method::GET, &format!("/director/tournaments/{identifier}"), None)
            .await
    }

    pub async fn team_list(&self, tournament: &str) -> Result<Vec<Team>, ClientError> {
        self.request_as(Method::GET, &format!("/director/tournaments/{tournament}/teams"), None)
            .await
    }

    pub async fn bowler_list(&self, tournament: &str) -> Result<Vec<DirectorBowler>, ClientError> {
        self.request_as(Method::GET, &format!("/director/tournaments/{tournament}/bowlers"), None)
            .await
    }

    pub async fn update_team(
        &self,
        team: &str,
        update: &TeamUpdateRequest,
    ) -> Result<Team, ClientError> {
        let body = to_value(update)?;
        let updated: Team = self
            .request_as(Method::PATCH, &format!("/director/teams/{team}"), Some(&body))
            .await?;
        info!(team, "Team updated");
        Ok(updated)
    }

    /// Create an empty team by name.
    pub async fn create_team(&self, tournament: &str, name: &str) -> Result<Team, ClientError> {
        let body = to_value(&director_team_request(name)?)?;
        let created: Team = self
            .request_as(
                Method::POST,
                &format!("/director/tournaments/{tournament}/teams"),
                Some(&body),
            )
            .await?;
        info!(tournament, team = %created.identifier, "Team created");
        Ok(created)
    }

    /// Add a purchasable item; the server answers with the items it created.
    pub async fn create_purchasable_item(
        &self,
        tournament: &Tournament,
        item: NewPurchasableItem,
    ) -> Result<Vec<PurchasableItem>, ClientError> {
        tournament.check_new_item(&item)?;
        let body = to_value(&NewPurchasableItemsRequest {
            purchasable_items: vec![item],
        })?;
        let created: Vec<PurchasableItem> = self
            .request_as(
                Method::POST,
                &format!("/director/tournaments/{}/purchasable_items", tournament.identifier),
                Some(&body),
            )
            .await?;
        info!(
            tournament = %tournament.identifier,
            count = created.len(),
            "Purchasable items created"
        );
        Ok(created)
    }

    /// Move a tournament to its next state, checking the move locally first.
    pub async fn tournament_state_change(
        &self,
        tournament: &Tournament,
        action: TournamentAction,
    ) -> Result<Tournament, ClientError> {
        let target = next_state(tournament.state, action)?;
        let body = json!({ "state_action": action });
        let updated: Tournament = self
            .request_as(
                Method::POST,
                &format!("/director/tournaments/{}/state_change", tournament.identifier),
                Some(&body),
            )
            .await?;
        info!(
            tournament = %tournament.identifier,
            from = tournament.state.as_str(),
            to = target.as_str(),
            "Tournament state changed"
        );
        Ok(updated)
    }

    /// Attach an extended form field as an additional question.
    pub async fn add_additional_question(
        &self,
        tournament: &Tournament,
        extended_form_field_id: i64,
        required: bool,
    ) -> Result<Tournament, ClientError> {
        if !tournament.accepts_new_questions() {
            return Err(DomainError::invalid_transition(format!(
                "questions can't be added to a tournament in {} state",
                tournament.state.as_str()
            ))
            .into());
        }
        let body = json!({
            "tournament": {
                "additional_questions_attributes": [{
                    "extended_form_field_id": extended_form_field_id,
                    "validation_rules": { "required": required },
                    "order": tournament.additional_questions.len() + 1,
                }],
            },
        });
        self.request_as(
            Method::PATCH,
            &format!("/director/tournaments/{}", tournament.identifier),
            Some(&body),
        )
        .await
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, ClientError> {
    Ok(serde_json::to_value(value)?)
}

/// Row of the director's bowler listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DirectorBowler {
    pub identifier: String,
    #[serde(default)]
    pub team_identifier: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(flatten)]
    pub details: BowlerDetails,
}
