//! Typed schema for the tagging backend's responses.
//!
//! The backend is loosely typed on the wire: a tagging response maps domain
//! names to objects whose values are relevance scores when scoring was
//! requested and unspecified otherwise, and the detail endpoint returns a
//! different shape per domain. All of that is validated and normalized here,
//! at the boundary, so the rest of the client works with fixed types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Tooltip text for a detail lookup that failed or matched nothing.
pub const NO_DETAIL: &str = "no detail available";

/// A relevance score.
///
/// The backend sends a number when scoring was requested and an unspecified
/// value otherwise; anything non-numeric normalizes to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score(pub f64);

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Score(value.as_f64().unwrap_or(1.0)))
    }
}

/// The per-domain mapping of matched tag label to relevance score.
///
/// Labels are unique within the set. The source does not guarantee any
/// ordering, so [`ResultSet::entries`] imposes one: score descending, ties
/// broken by label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<String, Score>);

impl ResultSet {
    /// Returns the number of matched tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no tags matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `(label, score)` pairs ordered by score descending, then
    /// label ascending.
    pub fn entries(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> =
            self.0.iter().map(|(label, s)| (label.as_str(), s.0)).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(label, score)| (label.to_string(), Score(*score)))
                .collect(),
        )
    }
}

/// A full tagging response: domain identifier to [`ResultSet`].
///
/// Domains absent from the response are simply not present in the map;
/// the renderer leaves their panels untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TaggingResponse(BTreeMap<String, ResultSet>);

impl TaggingResponse {
    /// Returns the result set for a domain, if present.
    pub fn get(&self, domain: &str) -> Option<&ResultSet> {
        self.0.get(domain)
    }

    /// Iterates over `(domain, result set)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultSet)> {
        self.0.iter().map(|(d, r)| (d.as_str(), r))
    }

    /// Returns the number of domains in the response.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the response contains no domains at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn from_sets(sets: Vec<(&str, ResultSet)>) -> Self {
        Self(sets.into_iter().map(|(d, r)| (d.to_string(), r)).collect())
    }
}

/// Formats a relevance score for display, always with exactly two decimals.
///
/// # Examples
///
/// ```
/// assert_eq!(percolate::response::format_score(0.5), "0.50");
/// assert_eq!(percolate::response::format_score(1.0), "1.00");
/// ```
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// The five-level taxonomic path returned by the detail lookup for the
/// `speciesplus` domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesTaxa {
    pub kingdom: String,
    pub phylum: String,
    pub order: String,
    pub family: String,
    pub genus: String,
}

impl SpeciesTaxa {
    /// Joins the levels, kingdom first, with a `>` separator.
    pub fn path(&self) -> String {
        [
            self.kingdom.as_str(),
            self.phylum.as_str(),
            self.order.as_str(),
            self.family.as_str(),
            self.genus.as_str(),
        ]
        .join(" > ")
    }
}

/// Composes the tooltip string for a detail-lookup response.
///
/// For `speciesplus` the response must carry the five taxonomic levels,
/// which are joined into a path; any other domain shows the raw serialized
/// record. A null, empty, or unusable record composes [`NO_DETAIL`] instead
/// of silently producing nothing.
pub fn compose_tooltip(domain: &str, detail: &serde_json::Value) -> String {
    if detail.is_null() || detail.as_object().is_some_and(|o| o.is_empty()) {
        return NO_DETAIL.to_string();
    }
    if domain == "speciesplus" {
        return match serde_json::from_value::<SpeciesTaxa>(detail.clone()) {
            Ok(taxa) => taxa.path(),
            Err(_) => NO_DETAIL.to_string(),
        };
    }
    serde_json::to_string(detail).unwrap_or_else(|_| NO_DETAIL.to_string())
}

/// A domain listing entry from `GET /domains`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainInfo {
    pub description: String,
    pub tags_count: u64,
}

/// The full `GET /domains` response: domain name to [`DomainInfo`].
pub type DomainListing = BTreeMap<String, DomainInfo>;
