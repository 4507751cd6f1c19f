use serde::{Deserialize, Serialize};

use factura_core::{ClientId, Error, Result};

/// Client status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl core::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClientStatus::Active => f.write_str("active"),
            ClientStatus::Inactive => f.write_str("inactive"),
        }
    }
}

/// A billing counterparty.
///
/// Only `name` is mandatory; the remaining identity fields mirror what an
/// invoice header needs and are kept as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub billing_name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub status: ClientStatus,
}

impl Client {
    /// Apply an allow-listed update.
    ///
    /// Absent fields keep their stored value.
    pub fn apply(&mut self, patch: &ClientPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            self.name = validate_name(name)?;
        }
        if let Some(billing_name) = &patch.billing_name {
            self.billing_name = normalize_optional(billing_name);
        }
        if let Some(address) = &patch.address {
            self.address = normalize_optional(address);
        }
        if let Some(postal_code) = &patch.postal_code {
            self.postal_code = normalize_optional(postal_code);
        }
        if let Some(city) = &patch.city {
            self.city = normalize_optional(city);
        }
        if let Some(tax_id) = &patch.tax_id {
            self.tax_id = normalize_optional(tax_id);
        }
        if let Some(email) = &patch.email {
            self.email = Some(validate_email(email)?);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }
}

/// Payload for creating a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    #[serde(default)]
    pub billing_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
}

impl ClientDraft {
    /// Validate the draft and build the record under a fresh identity.
    pub fn into_client(self, id: ClientId) -> Result<Client> {
        let email = match self.email.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => Some(validate_email(raw)?),
        };

        Ok(Client {
            id,
            name: validate_name(&self.name)?,
            billing_name: self.billing_name.as_deref().and_then(normalize_optional),
            address: self.address.as_deref().and_then(normalize_optional),
            postal_code: self.postal_code.as_deref().and_then(normalize_optional),
            city: self.city.as_deref().and_then(normalize_optional),
            tax_id: self.tax_id.as_deref().and_then(normalize_optional),
            email,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Allow-listed update for a client.
///
/// Absent fields keep their stored value; the id is never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub billing_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
}

/// Per-status tallies over the full client list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusCounts {
    pub active: usize,
    pub inactive: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn tally<'a>(clients: impl IntoIterator<Item = &'a Client>) -> Self {
        let mut counts = StatusCounts::default();
        for client in clients {
            match client.status {
                ClientStatus::Active => counts.active += 1,
                ClientStatus::Inactive => counts.inactive += 1,
            }
            counts.total += 1;
        }
        counts
    }
}

fn validate_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument("client name cannot be empty"));
    }
    Ok(name.to_string())
}

fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::invalid_argument("invalid email format"));
    }
    Ok(email)
}

fn normalize_optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
