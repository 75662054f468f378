//! The fixed pair of partners splitting every sale and expense 50/50.
//!
//! Partner identity is only a tag carried by sales, expenses and transfers;
//! there is no partner record in the store. The pair is a configuration-time
//! constant so the engine never hard-codes partner labels.

use std::fmt;

use crate::{EngineError, ResultEngine};

/// Normalized partner tag (trimmed, lower-case).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartnerId(String);

impl PartnerId {
    pub fn new(tag: &str) -> ResultEngine<Self> {
        let normalized = tag.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EngineError::UnknownPartner(tag.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partner {
    pub id: PartnerId,
    /// Human label, display only.
    pub name: String,
}

impl Partner {
    pub fn new(tag: &str, name: &str) -> ResultEngine<Self> {
        let id = PartnerId::new(tag)?;
        let name = match name.trim() {
            "" => id.as_str().to_string(),
            trimmed => trimmed.to_string(),
        };
        Ok(Self { id, name })
    }
}

/// Exactly two distinct partners, in configured order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partners([Partner; 2]);

impl Partners {
    pub fn new(first: Partner, second: Partner) -> ResultEngine<Self> {
        if first.id == second.id {
            return Err(EngineError::InvalidPartners(format!(
                "partners must be distinct, got \"{}\" twice",
                first.id
            )));
        }
        Ok(Self([first, second]))
    }

    /// Builds the pair from `(tag, name)` entries, requiring exactly two.
    pub fn from_entries<I, S>(entries: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let partners = entries
            .into_iter()
            .map(|(tag, name)| Partner::new(tag.as_ref(), name.as_ref()))
            .collect::<ResultEngine<Vec<_>>>()?;
        let count = partners.len();
        let [first, second]: [Partner; 2] = partners.try_into().map_err(|_| {
            EngineError::InvalidPartners(format!("exactly two partners required, got {count}"))
        })?;
        Self::new(first, second)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Partner> {
        self.0.iter()
    }

    pub fn ids(&self) -> [&PartnerId; 2] {
        [&self.0[0].id, &self.0[1].id]
    }

    pub fn contains(&self, id: &PartnerId) -> bool {
        self.0.iter().any(|p| &p.id == id)
    }

    /// Resolves a raw tag to a configured partner id.
    pub fn resolve(&self, tag: &str) -> ResultEngine<PartnerId> {
        let id = PartnerId::new(tag)?;
        if !self.contains(&id) {
            return Err(EngineError::UnknownPartner(tag.trim().to_string()));
        }
        Ok(id)
    }

    /// Display label for `id`; unknown tags are shown as-is.
    pub fn display_name<'a>(&'a self, id: &'a PartnerId) -> &'a str {
        self.0
            .iter()
            .find(|p| &p.id == id)
            .map_or(id.as_str(), |p| p.name.as_str())
    }
}

impl Default for Partners {
    fn default() -> Self {
        Self([
            Partner {
                id: PartnerId("rodri".to_string()),
                name: "Rodri".to_string(),
            },
            Partner {
                id: PartnerId("juanchi".to_string()),
                name: "Juanchi".to_string(),
            },
        ])
    }
}
