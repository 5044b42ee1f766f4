use super::{is_duplicate_key, MongoDB, SESSIONS_COLLECTION};
use crate::{
    models::{ScholarshipRecord, SessionDocument},
    store::SessionStore,
    utils::error::AppError,
};
use async_trait::async_trait;
use mongodb::{bson::doc, Collection};

/// Sessões persistidas no MongoDB (collection `sessions`)
#[derive(Clone)]
pub struct MongoSessionStore {
    collection: Collection<SessionDocument>,
}

impl MongoSessionStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<SessionDocument>(SESSIONS_COLLECTION),
        }
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn find(&self, user_id: i64) -> Result<Option<Vec<ScholarshipRecord>>, AppError> {
        let session = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(session.map(|s| s.favorites))
    }

    async fn insert(&self, user_id: i64, favorites: Vec<ScholarshipRecord>) -> Result<(), AppError> {
        self.collection
            .insert_one(SessionDocument::new(user_id, favorites))
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::DuplicateSession(user_id)
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(())
    }

    async fn update(&self, user_id: i64, favorites: &[ScholarshipRecord]) -> Result<u64, AppError> {
        let favorites = mongodb::bson::to_bson(favorites)?;

        // upsert desligado: sem sessão, matched_count = 0
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": {
                    "favorites": favorites,
                    "updated_at": chrono::Utc::now().timestamp(),
                } },
            )
            .upsert(false)
            .await?;

        Ok(result.matched_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongo_session_round_trip() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/scholarship_finder_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();
        let store = MongoSessionStore::new(&db);

        let user_id = chrono::Utc::now().timestamp_micros();
        assert!(store.find(user_id).await.unwrap().is_none());
        assert_eq!(store.update(user_id, &[]).await.unwrap(), 0);

        store.insert(user_id, vec![]).await.unwrap();
        assert!(matches!(
            store.insert(user_id, vec![]).await,
            Err(AppError::DuplicateSession(_))
        ));

        let record = ScholarshipRecord {
            university: "MIT".into(),
            scholarship_name: "Merit Scholarship".into(),
            scholarship_type: "Merit-based".into(),
            degree_level: "Undergraduate".into(),
            country: "USA".into(),
            deadline: "2024-01-15".into(),
            min_gpa: Some(3.5),
            major: vec!["Engineering".into()],
        };
        assert_eq!(store.update(user_id, &[record.clone()]).await.unwrap(), 1);
        assert_eq!(store.find(user_id).await.unwrap(), Some(vec![record]));
    }
}
