//! Company and user authentication endpoints

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use shared::normalize::{coerce_string, field};

use super::{ApiClient, ApiResponse};
use crate::error::ClientResult;
use crate::session::{CompanyCredentials, ProductionUnit, Session};

/// User login body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserLogin<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Validate company credentials; they travel as Basic auth with an empty body
    pub async fn authenticate_company(
        &self,
        session: &Session,
        credentials: &CompanyCredentials,
    ) -> ClientResult<ApiResponse> {
        tracing::info!(company_user = %credentials.username, "Authenticating company");
        self.api
            .request(
                session,
                Method::POST,
                "/api/scrap/auth/company",
                &[],
                Some(json!({})),
                Some(credentials.basic_auth()),
            )
            .await?
            .into_result()
    }

    /// Log a user in. Company credentials come from the session.
    pub async fn authenticate_user(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> ClientResult<ApiResponse> {
        tracing::info!(%username, "Authenticating user");
        let body = UserLogin { username, password };
        self.api
            .post(session, "/api/scrap/auth/user", Some(&body))
            .await?
            .into_result()
    }

    /// Authenticate the user and record the result in `session`
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> ClientResult<ApiResponse> {
        let response = self.authenticate_user(session, username, password).await?;
        session.apply_user_login(username, &response.data);
        Ok(response)
    }

    pub async fn validate_session(&self, session: &Session) -> ClientResult<ApiResponse> {
        self.api.get(session, "/api/scrap/auth/session").await
    }

    pub async fn logout(&self, session: &Session) -> ClientResult<ApiResponse> {
        self.api
            .post::<Value>(session, "/api/scrap/auth/logout", None)
            .await
    }

    /// Production units available to the logged-in user
    pub async fn production_units(&self, session: &Session) -> ClientResult<Vec<ProductionUnit>> {
        let data = self
            .api
            .get(session, "/api/scrap/auth/production-units")
            .await?
            .into_data()?;
        let units = data
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|unit| ProductionUnit {
                id: coerce_string(field(unit, &["productionUnitId", "ProductionUnitID", "id"])),
                name: coerce_string(field(
                    unit,
                    &["productionUnitName", "ProductionUnitName", "name"],
                )),
            })
            .filter(|unit| !unit.id.is_empty())
            .collect();
        Ok(units)
    }

    pub async fn set_production_unit(
        &self,
        session: &Session,
        production_unit_id: &str,
    ) -> ClientResult<ApiResponse> {
        self.api
            .post(
                session,
                "/api/scrap/auth/set-production-unit",
                Some(&json!({ "productionUnitId": production_unit_id })),
            )
            .await?
            .into_result()
    }
}
