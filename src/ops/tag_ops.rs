use crate::model::cabinet::Cabinet;
use crate::model::tag::{Tag, TagKind};

/// Register a new tag. Returns the new id, or None if the name is blank
/// or already registered under this kind (exact match).
pub fn add_tag(cabinet: &mut Cabinet, kind: TagKind, name: &str) -> Option<u32> {
    let name = name.trim();
    if name.is_empty() || cabinet.find_tag_by_name(kind, name).is_some() {
        return None;
    }
    let id = cabinet.next_tag_id(kind);
    cabinet.tags_mut(kind).push(Tag::new(id, name));
    Some(id)
}

/// Rename a tag and cascade the change into every medicine that carries
/// the old name. No-op (returns false) when the id is unknown, the new
/// name is blank, or another tag of this kind already owns it.
pub fn rename_tag(cabinet: &mut Cabinet, kind: TagKind, id: u32, new_name: &str) -> bool {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return false;
    }
    // Covers renaming a tag to its own current name too
    if cabinet.find_tag_by_name(kind, new_name).is_some() {
        return false;
    }
    let old_name = match cabinet.find_tag(kind, id) {
        Some(tag) => tag.name.clone(),
        None => return false,
    };

    if let Some(tag) = cabinet.tags_mut(kind).iter_mut().find(|t| t.id == id) {
        tag.name = new_name.to_string();
    }
    match kind {
        TagKind::Time => {
            for med in &mut cabinet.medicines {
                for t in &mut med.time_tags {
                    if *t == old_name {
                        *t = new_name.to_string();
                    }
                }
            }
        }
        TagKind::Purpose => {
            for med in &mut cabinet.medicines {
                if med.purpose_tag == old_name {
                    med.purpose_tag = new_name.to_string();
                }
            }
        }
    }
    true
}

/// Unregister a tag and scrub it from every medicine: time tags are
/// removed from the list, a deleted purpose tag leaves the medicine
/// unclassified. Returns the deleted name, or None for an unknown id.
pub fn delete_tag(cabinet: &mut Cabinet, kind: TagKind, id: u32) -> Option<String> {
    let name = cabinet.find_tag(kind, id)?.name.clone();
    cabinet.tags_mut(kind).retain(|t| t.id != id);
    match kind {
        TagKind::Time => {
            for med in &mut cabinet.medicines {
                med.time_tags.retain(|t| *t != name);
            }
        }
        TagKind::Purpose => {
            for med in &mut cabinet.medicines {
                if med.purpose_tag == name {
                    med.purpose_tag.clear();
                }
            }
        }
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Medicine;

    fn cabinet() -> Cabinet {
        let mut cab = Cabinet::default();
        cab.time_tags.push(Tag::new(1, "Before bed"));
        cab.time_tags.push(Tag::new(2, "With dinner"));
        cab.purpose_tags.push(Tag::new(1, "Allergy"));

        let mut lor = Medicine::new(1, "Loratadine".to_string());
        lor.time_tags = vec!["Before bed".to_string()];
        lor.purpose_tag = "Allergy".to_string();
        cab.medicines.push(lor);

        let mut asp = Medicine::new(2, "Aspirin".to_string());
        asp.time_tags = vec!["With dinner".to_string(), "Before bed".to_string()];
        asp.purpose_tag = "Pain relief".to_string();
        cab.medicines.push(asp);

        cab
    }

    #[test]
    fn add_rejects_duplicates_and_blank() {
        let mut cab = cabinet();
        assert_eq!(add_tag(&mut cab, TagKind::Time, "After lunch"), Some(3));
        assert_eq!(add_tag(&mut cab, TagKind::Time, "After lunch"), None);
        assert_eq!(add_tag(&mut cab, TagKind::Time, "  "), None);
        // Same name under the other kind is fine
        assert_eq!(add_tag(&mut cab, TagKind::Purpose, "After lunch"), Some(2));
    }

    #[test]
    fn rename_cascades_to_time_tags() {
        let mut cab = cabinet();
        assert!(rename_tag(&mut cab, TagKind::Time, 1, "At bedtime"));
        assert_eq!(cab.find_tag(TagKind::Time, 1).unwrap().name, "At bedtime");
        assert_eq!(cab.medicines[0].time_tags, vec!["At bedtime"]);
        assert_eq!(cab.medicines[1].time_tags, vec!["With dinner", "At bedtime"]);
    }

    #[test]
    fn rename_cascades_to_purpose() {
        let mut cab = cabinet();
        assert!(rename_tag(&mut cab, TagKind::Purpose, 1, "Antihistamine"));
        assert_eq!(cab.medicines[0].purpose_tag, "Antihistamine");
        // Unregistered purpose strings stay put
        assert_eq!(cab.medicines[1].purpose_tag, "Pain relief");
    }

    #[test]
    fn rename_noop_on_missing_blank_or_taken_name() {
        let mut cab = cabinet();
        assert!(!rename_tag(&mut cab, TagKind::Time, 99, "x"));
        assert!(!rename_tag(&mut cab, TagKind::Time, 1, ""));
        assert!(!rename_tag(&mut cab, TagKind::Time, 1, "With dinner"));
        assert!(!rename_tag(&mut cab, TagKind::Time, 1, "Before bed"));
        // Nothing changed
        assert_eq!(cab.find_tag(TagKind::Time, 1).unwrap().name, "Before bed");
        assert_eq!(cab.medicines[0].time_tags, vec!["Before bed"]);
    }

    #[test]
    fn delete_time_tag_scrubs_lists() {
        let mut cab = cabinet();
        assert_eq!(
            delete_tag(&mut cab, TagKind::Time, 1),
            Some("Before bed".to_string())
        );
        assert!(cab.find_tag(TagKind::Time, 1).is_none());
        assert!(cab.medicines[0].time_tags.is_empty());
        assert_eq!(cab.medicines[1].time_tags, vec!["With dinner"]);
    }

    #[test]
    fn delete_purpose_tag_leaves_medicine_unclassified() {
        let mut cab = cabinet();
        assert_eq!(
            delete_tag(&mut cab, TagKind::Purpose, 1),
            Some("Allergy".to_string())
        );
        assert_eq!(cab.medicines[0].purpose_tag, "");
        assert_eq!(cab.medicines[1].purpose_tag, "Pain relief");
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut cab = cabinet();
        assert_eq!(delete_tag(&mut cab, TagKind::Time, 99), None);
        assert_eq!(cab.time_tags.len(), 2);
    }
}
