//! Pack list entries served by the `pack` endpoint.

use serde::Deserialize;

/// One selectable pack: an opaque identifier plus a display title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pack {
    pub id: String,
    pub title: String,
}

impl Pack {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Pack {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Sort packs by title in descending alphabetical order, ties left in
/// arrival order.
pub fn sort_packs(packs: &mut [Pack]) {
    packs.sort_by(|a, b| b.title.cmp(&a.title));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_titles_descending() {
        let mut packs = vec![
            Pack::new("a", "Arcana"),
            Pack::new("z", "Zoology"),
            Pack::new("m", "Monsters"),
        ];
        sort_packs(&mut packs);
        let titles: Vec<&str> = packs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Zoology", "Monsters", "Arcana"]);
    }

    #[test]
    fn sort_is_stable_for_equal_titles() {
        let mut packs = vec![
            Pack::new("first", "Same"),
            Pack::new("second", "Same"),
        ];
        sort_packs(&mut packs);
        assert_eq!(packs[0].id, "first");
        assert_eq!(packs[1].id, "second");
    }

    #[test]
    fn decodes_from_json() {
        let packs: Vec<Pack> =
            serde_json::from_str(r#"[{"id":"core","title":"Core Tables"}]"#).unwrap();
        assert_eq!(packs, vec![Pack::new("core", "Core Tables")]);
    }
}
