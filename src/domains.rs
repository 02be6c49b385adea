//! Registry of known tag domains.
//!
//! A domain is a named taxonomy the backend tags against. The registry
//! records the display title for each known domain's panel and, where the
//! domain supports the secondary detail lookup, the query field that lookup
//! expects. Domains the backend reports that are not listed here still
//! render, as plain non-interactive entries.

/// A known tag domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSpec {
    /// Domain identifier as used on the wire (e.g. `speciesplus`).
    pub name: &'static str,
    /// Human-readable panel title.
    pub title: &'static str,
    /// Query field for the detail lookup endpoint, when the domain's tags
    /// are interactive. `None` renders the domain's entries as plain text.
    pub lookup_field: Option<&'static str>,
}

/// The known domains, in panel order.
pub const DOMAINS: &[DomainSpec] = &[
    DomainSpec {
        name: "speciesplus",
        title: "Species+",
        lookup_field: Some("scientific_name"),
    },
    DomainSpec {
        name: "countries",
        title: "Countries",
        lookup_field: None,
    },
];

/// Looks up a known domain by its wire name.
pub fn find(name: &str) -> Option<&'static DomainSpec> {
    DOMAINS.iter().find(|d| d.name == name)
}

/// Returns the detail-lookup field for a domain, if it has one.
///
/// # Examples
///
/// ```
/// assert_eq!(percolate::domains::lookup_field("speciesplus"), Some("scientific_name"));
/// assert_eq!(percolate::domains::lookup_field("countries"), None);
/// ```
pub fn lookup_field(name: &str) -> Option<&'static str> {
    find(name).and_then(|d| d.lookup_field)
}

/// Returns the display title for a domain, falling back to the wire name
/// for domains not in the registry.
pub fn title(name: &str) -> &str {
    match find(name) {
        Some(d) => d.title,
        None => name,
    }
}

/// Parses a comma-separated domain list.
///
/// Splits on commas, trims whitespace, and drops empty segments.
///
/// # Examples
///
/// ```
/// let domains = percolate::domains::parse_list("speciesplus, countries, ");
/// assert_eq!(domains, vec!["speciesplus", "countries"]);
/// ```
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speciesplus_is_interactive() {
        let domain = find("speciesplus").expect("speciesplus should be registered");
        assert_eq!(domain.lookup_field, Some("scientific_name"));
        assert_eq!(domain.title, "Species+");
    }

    #[test]
    fn countries_renders_plain() {
        assert_eq!(lookup_field("countries"), None);
    }

    #[test]
    fn unknown_domain_falls_back_to_wire_name() {
        assert!(find("habitats").is_none());
        assert_eq!(title("habitats"), "habitats");
        assert_eq!(lookup_field("habitats"), None);
    }

    #[test]
    fn parse_list_trims_and_drops_empties() {
        assert_eq!(
            parse_list(" speciesplus ,countries,,"),
            vec!["speciesplus", "countries"]
        );
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , , ").is_empty());
    }
}
