//! Board API types.

use serde::Deserialize;

/// A list on a board.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardList {
    /// List identifier.
    pub id: String,

    /// Display name; compared exactly against the configured target list.
    #[serde(default)]
    pub name: String,

    /// Whether the list is archived.
    #[serde(default)]
    pub closed: bool,
}

/// A card within a list.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    /// Card identifier.
    pub id: String,

    /// Card title, used as the destination site name.
    #[serde(default)]
    pub name: String,
}

impl Card {
    /// Name for log lines; unnamed cards read as "No Name".
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "No Name"
        } else {
            &self.name
        }
    }
}

/// A board-level custom field definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldDefinition {
    /// Identifier referenced by `idCustomField` on card field items.
    pub id: String,

    /// Field name as shown on the board.
    #[serde(default)]
    pub name: String,

    /// Field kind (`text`, `number`, `date`, `checkbox`, `list`).
    #[serde(default, rename = "type")]
    pub field_type: String,
}

/// Pick the list whose name equals `target` exactly. The first match wins.
#[must_use]
pub fn find_list<'a>(lists: &'a [BoardList], target: &str) -> Option<&'a BoardList> {
    lists.iter().find(|list| list.name == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: &str, name: &str) -> BoardList {
        BoardList {
            id: id.to_string(),
            name: name.to_string(),
            closed: false,
        }
    }

    #[test]
    fn test_find_list_exact_match() {
        let lists = vec![
            list("1", "Applied"),
            list("2", "Approved - In progresss"),
            list("3", "Approved - In progresss"),
        ];
        assert_eq!(
            find_list(&lists, "Approved - In progresss").map(|l| l.id.as_str()),
            Some("2")
        );
        assert!(find_list(&lists, "approved - in progresss").is_none());
        assert!(find_list(&lists, "Approved").is_none());
    }

    #[test]
    fn test_card_display_name() {
        let card = Card {
            id: "c1".to_string(),
            name: String::new(),
        };
        assert_eq!(card.display_name(), "No Name");
    }
}
