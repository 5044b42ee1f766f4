use super::scholarship::{ScholarshipKey, ScholarshipRecord};

/// Resultado de `add`: duplicata não é erro, apenas um no-op registrado em log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// Resultado de `remove`: ausência não é erro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Lista de favoritos em memória de um usuário.
///
/// Insertion order is preserved and no two entries ever share an identity key.
#[derive(Debug, Clone, Default)]
pub struct FavoritesCollection {
    user_id: i64,
    favorites: Vec<ScholarshipRecord>,
}

impl FavoritesCollection {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            favorites: Vec::new(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn add(&mut self, record: ScholarshipRecord) -> AddOutcome {
        log::info!("⭐ Adding scholarship to favorites of user {}", self.user_id);

        if self.contains(&record.identity_key()) {
            log::error!(
                "Scholarship already exists in favorites list: {}",
                record.identity_key()
            );
            return AddOutcome::Duplicate;
        }

        self.favorites.push(record);
        log::info!("✅ Scholarship added successfully");
        AddOutcome::Added
    }

    pub fn remove(&mut self, record: &ScholarshipRecord) -> RemoveOutcome {
        self.remove_by_key(&record.identity_key())
    }

    pub fn remove_by_key(&mut self, key: &ScholarshipKey<'_>) -> RemoveOutcome {
        log::info!("🗑️  Removing scholarship from favorites of user {}", self.user_id);

        match self.position(key) {
            Some(index) => {
                // Vec::remove preserva a ordem dos demais
                self.favorites.remove(index);
                log::info!("✅ Scholarship removed successfully");
                RemoveOutcome::Removed
            }
            None => {
                log::error!("Scholarship not in favorites, cannot be removed: {}", key);
                RemoveOutcome::NotFound
            }
        }
    }

    pub fn contains(&self, key: &ScholarshipKey<'_>) -> bool {
        self.position(key).is_some()
    }

    pub fn list(&self) -> &[ScholarshipRecord] {
        log::debug!("Retrieving favorited scholarships for user {}", self.user_id);
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn clear(&mut self) {
        log::info!("🧹 Removing all favorited scholarships of user {}", self.user_id);
        self.favorites.clear();
    }

    fn position(&self, key: &ScholarshipKey<'_>) -> Option<usize> {
        self.favorites.iter().position(|s| s.identity_key() == *key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scholarship(university: &str, name: &str, deadline: &str) -> ScholarshipRecord {
        ScholarshipRecord {
            university: university.into(),
            scholarship_name: name.into(),
            scholarship_type: "Merit-based".into(),
            degree_level: "Undergraduate".into(),
            country: "USA".into(),
            deadline: deadline.into(),
            min_gpa: Some(3.5),
            major: vec!["Computer Science".into()],
        }
    }

    fn names(collection: &FavoritesCollection) -> Vec<&str> {
        collection
            .list()
            .iter()
            .map(|s| s.scholarship_name.as_str())
            .collect()
    }

    #[test]
    fn test_add_to_favorites_keeps_insertion_order() {
        let mut favorites = FavoritesCollection::new(1);
        assert!(favorites.is_empty());

        assert_eq!(
            favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15")),
            AddOutcome::Added
        );
        assert_eq!(
            favorites.add(scholarship("Stanford", "Need Scholarship", "2024-02-20")),
            AddOutcome::Added
        );

        assert_eq!(names(&favorites), vec!["Merit Scholarship", "Need Scholarship"]);
    }

    #[test]
    fn test_duplicate_by_identity_key_is_noop() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));
        favorites.add(scholarship("Stanford", "Need Scholarship", "2024-02-20"));

        let mut variant = scholarship("MIT", "Merit Scholarship", "2030-12-31");
        variant.country = "Canada".into();
        variant.min_gpa = None;

        assert_eq!(favorites.add(variant), AddOutcome::Duplicate);
        assert_eq!(favorites.len(), 2);
        assert_eq!(names(&favorites), vec!["Merit Scholarship", "Need Scholarship"]);
        // o registro original é preservado
        assert_eq!(favorites.list()[0].deadline, "2024-01-15");
    }

    #[test]
    fn test_same_title_at_other_university_is_distinct() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));
        assert_eq!(
            favorites.add(scholarship("Harvard", "Merit Scholarship", "2024-01-15")),
            AddOutcome::Added
        );
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_no_duplicate_invariant_over_many_adds() {
        let universities = ["MIT", "Stanford", "Yale"];
        let titles = ["Merit", "Need", "STEM", "Arts"];
        let mut favorites = FavoritesCollection::new(1);

        for round in 0..5 {
            for (i, u) in universities.iter().enumerate() {
                for (j, t) in titles.iter().enumerate() {
                    if (i + j + round) % 2 == 0 {
                        favorites.add(scholarship(u, t, &format!("2024-0{}-01", round + 1)));
                    }
                }
            }
        }

        let keys: HashSet<_> = favorites.list().iter().map(|s| s.identity_key()).collect();
        assert_eq!(keys.len(), favorites.len());
        assert_eq!(favorites.len(), universities.len() * titles.len());
    }

    #[test]
    fn test_remove_from_favorites_preserves_order() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));
        favorites.add(scholarship("Stanford", "Need Scholarship", "2024-02-20"));
        favorites.add(scholarship("Yale", "STEM Scholarship", "2024-03-10"));

        let outcome = favorites.remove(&scholarship("Stanford", "Need Scholarship", "1999-01-01"));
        assert_eq!(outcome, RemoveOutcome::Removed);
        assert_eq!(names(&favorites), vec!["Merit Scholarship", "STEM Scholarship"]);
    }

    #[test]
    fn test_remove_absent_key_leaves_collection_unchanged() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));

        let outcome = favorites.remove_by_key(&ScholarshipKey::new("MIT", "Unknown"));
        assert_eq!(outcome, RemoveOutcome::NotFound);
        assert_eq!(names(&favorites), vec!["Merit Scholarship"]);
    }

    #[test]
    fn test_clear_favorites_is_total_and_idempotent() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));
        favorites.add(scholarship("Stanford", "Need Scholarship", "2024-02-20"));

        favorites.clear();
        assert!(favorites.list().is_empty());
        favorites.clear();
        assert!(favorites.list().is_empty());
    }

    #[test]
    fn test_merit_scholarship_scenario() {
        let mut favorites = FavoritesCollection::new(1);
        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-01-15"));
        assert_eq!(favorites.len(), 1);

        favorites.add(scholarship("MIT", "Merit Scholarship", "2024-09-30"));
        assert_eq!(favorites.len(), 1);

        favorites.remove_by_key(&ScholarshipKey::new("MIT", "Merit Scholarship"));
        assert_eq!(favorites.len(), 0);
    }
}
