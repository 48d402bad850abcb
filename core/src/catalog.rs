//! Monthly skill catalog access.
//!
//! One singleton document (`config/monthly_skills`) holds the whole
//! catalog: a `months` map from `"1"`..`"6"` to an ordered list of
//! skills. Insertion order in the stored list is the canonical display
//! order, so reordering is an explicit ±1 move.
//!
//! Every mutation here is read-modify-write over the whole `months`
//! field with last-writer-wins: concurrent writers can lose an append.
//! Contention is single-admin in practice, so the race is tolerated;
//! the integration tests demonstrate it rather than hide it.

use std::collections::BTreeMap;
use std::sync::Arc;

use probation_store::{Document, DocumentStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::month::Month;
use crate::paths::{CONFIG_COLLECTION, MONTHLY_CATALOG_DOC};

/// One entry in the monthly catalog.
///
/// `id` is unique within its month; `details` defaults to empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
}

/// Field patch for [`CatalogClient::update_skill`]. `None` leaves the
/// field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillPatch {
    pub title: Option<String>,
    pub details: Option<String>,
}

impl SkillPatch {
    fn apply(&self, skill: &mut Skill) {
        if let Some(title) = &self.title {
            skill.title = title.clone();
        }
        if let Some(details) = &self.details {
            skill.details = details.clone();
        }
    }
}

/// Materialized view of the catalog: always carries all six months,
/// whatever the stored document looks like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyCatalog {
    months: BTreeMap<Month, Vec<Skill>>,
}

impl Default for MonthlyCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl MonthlyCatalog {
    /// All six months mapped to empty lists.
    pub fn empty() -> Self {
        Self {
            months: Month::ALL.iter().map(|m| (*m, Vec::new())).collect(),
        }
    }

    pub fn month(&self, month: Month) -> &[Skill] {
        self.months.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, &[Skill])> {
        self.months.iter().map(|(m, list)| (*m, list.as_slice()))
    }

    pub fn set_month(&mut self, month: Month, skills: Vec<Skill>) {
        self.months.insert(month, skills);
    }

    fn month_mut(&mut self, month: Month) -> &mut Vec<Skill> {
        self.months.entry(month).or_default()
    }

    /// Decode the stored `months` field. Missing keys, non-array month
    /// values, and non-object entries all degrade to empty rather than
    /// failing the load.
    fn from_months_value(value: Option<&Value>) -> Self {
        let mut catalog = Self::empty();
        let Some(Value::Object(map)) = value else {
            return catalog;
        };
        for month in Month::ALL {
            if let Some(Value::Array(items)) = map.get(month.as_key()) {
                let skills = items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect();
                catalog.months.insert(month, skills);
            }
        }
        catalog
    }

    /// Encode as the stored `months` map, keyed `"1"`..`"6"`.
    fn to_months_value(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .months
            .iter()
            .map(|(month, skills)| {
                (
                    month.as_key().to_string(),
                    serde_json::to_value(skills).unwrap_or_else(|_| Value::Array(Vec::new())),
                )
            })
            .collect();
        Value::Object(map)
    }
}

/// Derive a skill id from its title: lowercased, non-alphanumeric runs
/// collapsed to `-`, trimmed, capped at 40 characters.
pub fn slugify_title(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(40);
    slug
}

/// Access layer for the monthly skill catalog.
pub struct CatalogClient {
    store: Arc<dyn DocumentStore>,
}

impl CatalogClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load the catalog. An absent document is the all-empty catalog.
    pub async fn load(&self) -> Result<MonthlyCatalog> {
        let doc = self
            .store
            .get_doc(CONFIG_COLLECTION, MONTHLY_CATALOG_DOC)
            .await?;
        Ok(MonthlyCatalog::from_months_value(
            doc.as_ref().and_then(|d| d.get("months")),
        ))
    }

    /// Replace the stored `months` map wholesale. Other fields on the
    /// document are preserved by the merge write. No shape validation
    /// happens here — the catalog is stored as given.
    pub async fn save(&self, catalog: &MonthlyCatalog) -> Result<()> {
        let mut fields = Document::new();
        fields.insert("months".to_string(), catalog.to_months_value());
        self.store
            .set_doc_merge(CONFIG_COLLECTION, MONTHLY_CATALOG_DOC, fields)
            .await?;
        Ok(())
    }

    /// Append `skill` to the end of `month`'s list.
    pub async fn add_skill(&self, month: Month, skill: Skill) -> Result<()> {
        let mut catalog = self.load().await?;
        debug!(%month, skill = %skill.id, "catalog add");
        catalog.month_mut(month).push(skill);
        self.save(&catalog).await
    }

    /// Remove the skill with `skill_id` from `month`. A no-op when the
    /// catalog document does not exist.
    pub async fn remove_skill(&self, month: Month, skill_id: &str) -> Result<()> {
        let doc = self
            .store
            .get_doc(CONFIG_COLLECTION, MONTHLY_CATALOG_DOC)
            .await?;
        let Some(doc) = doc else {
            return Ok(());
        };
        let mut catalog = MonthlyCatalog::from_months_value(doc.get("months"));
        debug!(%month, skill = %skill_id, "catalog remove");
        catalog.month_mut(month).retain(|s| s.id != skill_id);
        self.save(&catalog).await
    }

    /// Patch fields on the skill with `skill_id`. A no-op when the id
    /// is not present in `month`.
    pub async fn update_skill(&self, month: Month, skill_id: &str, patch: SkillPatch) -> Result<()> {
        let mut catalog = self.load().await?;
        let Some(skill) = catalog
            .month_mut(month)
            .iter_mut()
            .find(|s| s.id == skill_id)
        else {
            return Ok(());
        };
        patch.apply(skill);
        debug!(%month, skill = %skill_id, "catalog update");
        self.save(&catalog).await
    }

    /// Move the skill with `skill_id` by `delta` positions (±1 in
    /// practice). A no-op when the id is not found or the target index
    /// would fall outside the list.
    pub async fn move_skill(&self, month: Month, skill_id: &str, delta: i32) -> Result<()> {
        let mut catalog = self.load().await?;
        let list = catalog.month_mut(month);
        let Some(index) = list.iter().position(|s| s.id == skill_id) else {
            return Ok(());
        };
        let Some(target) = index.checked_add_signed(delta as isize) else {
            return Ok(());
        };
        if target >= list.len() {
            return Ok(());
        }
        let skill = list.remove(index);
        list.insert(target, skill);
        debug!(%month, skill = %skill_id, delta, "catalog move");
        self.save(&catalog).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_matches_the_ui_convention() {
        assert_eq!(slugify_title("Ladder Raise"), "ladder-raise");
        assert_eq!(slugify_title("  SCBA (Don & Doff)!  "), "scba-don-doff");
        assert_eq!(slugify_title("---"), "");
        let long = "a".repeat(60);
        assert_eq!(slugify_title(&long).len(), 40);
    }

    #[test]
    fn decode_fills_missing_months() {
        let catalog = MonthlyCatalog::from_months_value(Some(&json!({
            "2": [{"id": "x", "title": "X"}],
            "5": "not-an-array",
        })));
        for month in Month::ALL {
            let expected = usize::from(month.number() == 2);
            assert_eq!(catalog.month(month).len(), expected);
        }
        assert_eq!(catalog.month(Month::new(2).unwrap())[0].details, "");
    }

    #[test]
    fn decode_skips_non_object_entries() {
        let catalog = MonthlyCatalog::from_months_value(Some(&json!({
            "1": [{"id": "keep", "title": "Keep"}, "stray", 7],
        })));
        let first = Month::new(1).unwrap();
        assert_eq!(catalog.month(first).len(), 1);
        assert_eq!(catalog.month(first)[0].id, "keep");
    }

    #[test]
    fn encode_emits_all_six_keys() {
        let value = MonthlyCatalog::empty().to_months_value();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 6);
        for month in Month::ALL {
            assert_eq!(map.get(month.as_key()), Some(&json!([])));
        }
    }
}
