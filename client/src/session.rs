//! Session context sent with every backend call
//!
//! The backend identifies company, user, production unit and financial year
//! from request headers. A [`Session`] holds that context explicitly and is
//! passed into each call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Local, NaiveDate};
use serde_json::Value;
use shared::normalize::{coerce_string, field};
use shared::FinancialYear;

use crate::config::Config;

/// Company (database) credentials, sent as HTTP Basic auth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCredentials {
    pub username: String,
    pub password: String,
}

impl CompanyCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value
    pub fn basic_auth(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

/// Production unit picked for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionUnit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub company_credentials: Option<CompanyCredentials>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub company_id: Option<String>,
    /// Unit assigned at login
    pub default_production_unit_id: Option<String>,
    /// Unit chosen for this session; wins over the login default
    pub production_unit: Option<ProductionUnit>,
    /// Explicit financial year; derived from the request date when absent
    pub financial_year: Option<FinancialYear>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        let company_credentials = match (&config.company.username, &config.company.password) {
            (Some(username), Some(password)) => {
                Some(CompanyCredentials::new(username.clone(), password.clone()))
            }
            _ => None,
        };
        Self {
            company_credentials,
            user_id: non_empty(config.session.user_id.clone()),
            user_name: non_empty(config.session.user_name.clone()),
            company_id: non_empty(config.session.company_id.clone()),
            default_production_unit_id: non_empty(config.session.production_unit_id.clone()),
            production_unit: None,
            financial_year: config
                .session
                .financial_year
                .as_deref()
                .and_then(FinancialYear::parse_label),
        }
    }

    pub fn with_company(mut self, credentials: CompanyCredentials) -> Self {
        self.company_credentials = Some(credentials);
        self
    }

    pub fn with_production_unit(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.production_unit = Some(ProductionUnit {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn clear_production_unit(&mut self) {
        self.production_unit = None;
    }

    pub fn has_production_unit(&self) -> bool {
        self.production_unit_id().is_some()
    }

    /// Selected unit, falling back to the one assigned at login
    pub fn production_unit_id(&self) -> Option<&str> {
        self.production_unit
            .as_ref()
            .map(|u| u.id.as_str())
            .or(self.default_production_unit_id.as_deref())
    }

    /// Record the user returned by a successful user login
    pub fn apply_user_login(&mut self, username: &str, user: &Value) {
        self.user_name = Some(username.to_string());
        self.user_id = non_empty(Some(coerce_string(field(user, &["userId", "UserID", "Id"]))));
        self.company_id = non_empty(Some(coerce_string(field(user, &["companyId", "CompanyID"]))));
        self.default_production_unit_id = non_empty(Some(coerce_string(field(
            user,
            &["productionUnitId", "ProductionUnitID"],
        ))));
    }

    /// Financial year label for a request made on `today`
    pub fn financial_year_label(&self, today: NaiveDate) -> String {
        self.financial_year
            .unwrap_or_else(|| FinancialYear::containing(today))
            .label()
    }

    /// Context headers for a request made on `today`.
    ///
    /// `UserID` and `CompanyID` are always present, `"0"` before login.
    pub fn headers_on(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(10);
        if let Some(credentials) = &self.company_credentials {
            headers.push(("Authorization", credentials.basic_auth()));
        }
        if let Some(user_name) = &self.user_name {
            headers.push(("X-User-Name", user_name.clone()));
        }

        let user_id = self.user_id.clone().unwrap_or_else(|| "0".to_string());
        let company_id = self.company_id.clone().unwrap_or_else(|| "0".to_string());
        headers.push(("X-User-Id", user_id.clone()));
        headers.push(("UserID", user_id));
        headers.push(("X-Company-Id", company_id.clone()));
        headers.push(("CompanyID", company_id));

        if let Some(unit) = self.production_unit_id() {
            headers.push(("X-Production-Unit-Id", unit.to_string()));
            headers.push(("ProductionUnitID", unit.to_string()));
        }
        headers.push(("DBType", "MSSQL".to_string()));
        headers.push(("FYear", self.financial_year_label(today)));
        headers
    }

    pub fn headers(&self) -> Vec<(&'static str, String)> {
        self.headers_on(Local::now().date_naive())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
