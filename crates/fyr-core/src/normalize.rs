//! Normalization of provider-specific legislator records into
//! [`DisplayRecord`]s.
//!
//! Each provider has its own field mapping. Records are read as opaque JSON:
//! any field that is missing, `null`, or maps to no known label becomes the
//! empty string instead of failing the record.

use serde_json::Value;

use crate::provider::ProviderId;
use crate::template::display_value;
use crate::types::DisplayRecord;
use crate::CoreError;

const BIOGUIDE_PHOTO_BASE: &str = "http://bioguide.congress.gov/bioguide/photo";
const OPENCONGRESS_PEOPLE_BASE: &str = "http://opencongress.org/people/show";
const OPENSTATES_BASE: &str = "http://openstates.org";

/// Normalize one raw record from `provider`.
#[must_use]
pub fn normalize(record: &Value, provider: ProviderId) -> DisplayRecord {
    match provider {
        ProviderId::Congress => normalize_congress(record),
        ProviderId::OpenStates => normalize_openstates(record),
    }
}

/// Normalize one raw record for a provider given by its string id.
///
/// # Errors
///
/// Returns [`CoreError::UnknownProvider`] if `provider_id` has no mapping.
pub fn normalize_for(record: &Value, provider_id: &str) -> Result<DisplayRecord, CoreError> {
    let provider = provider_id.parse::<ProviderId>()?;
    Ok(normalize(record, provider))
}

fn normalize_congress(rep: &Value) -> DisplayRecord {
    let chamber = field(rep, "chamber");
    let chamber_label = match chamber.as_str() {
        "senate" => field(rep, "state_name"),
        "house" => format!("{}-{}", field(rep, "state"), field(rep, "district")),
        _ => String::new(),
    };
    let bioguide_id = field(rep, "bioguide_id");
    let bioguide_initial: String = bioguide_id.chars().take(1).collect();

    DisplayRecord {
        name: format!(
            "{} {} {}",
            field(rep, "title"),
            field(rep, "first_name"),
            field(rep, "last_name")
        ),
        details: format!(
            "{}, {chamber_label}",
            congress_party_label(&field(rep, "party"))
        ),
        photo_url: format!("{BIOGUIDE_PHOTO_BASE}/{bioguide_initial}/{bioguide_id}.jpg"),
        result_url: format!(
            "{OPENCONGRESS_PEOPLE_BASE}/{}",
            field(rep, "govtrack_id")
        ),
        chamber,
    }
}

fn normalize_openstates(rep: &Value) -> DisplayRecord {
    let chamber = field(rep, "chamber");
    let chamber_label = match chamber.as_str() {
        "upper" => "Upper Chamber",
        "lower" => "Lower Chamber",
        _ => "",
    };
    let state = field(rep, "state");

    DisplayRecord {
        name: field(rep, "full_name"),
        details: format!(
            "{}, {}-{} ({chamber_label})",
            openstates_party_label(&field(rep, "party")),
            state.to_uppercase(),
            field(rep, "district")
        ),
        photo_url: field(rep, "photo_url"),
        result_url: format!(
            "{OPENSTATES_BASE}/{state}/legislators/{}",
            field(rep, "id")
        ),
        chamber,
    }
}

fn congress_party_label(code: &str) -> &'static str {
    match code {
        "D" => "Democrat",
        "R" => "Republican",
        "I" => "Independent",
        _ => "",
    }
}

fn openstates_party_label(party: &str) -> &'static str {
    match party {
        "Democratic" => "Democrat",
        "Republican" => "Republican",
        "Independent" => "Independent",
        _ => "",
    }
}

/// Lookup-or-default: the field's text form, or `""` when absent.
fn field(record: &Value, key: &str) -> String {
    record.get(key).map(display_value).unwrap_or_default()
}
