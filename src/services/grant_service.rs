use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use super::research_query::{check_page, Page, PageSize};
use crate::database::entities::grants;
use crate::errors::ResearchResult;

/// Read access to imported grant metadata
#[derive(Clone)]
pub struct GrantService {
    db: DatabaseConnection,
}

impl GrantService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, page: u64, page_size: PageSize) -> ResearchResult<Page<grants::Model>> {
        check_page(page, page_size)?;

        let paginator = grants::Entity::find()
            .order_by_asc(grants::Column::Id)
            .paginate(&self.db, page_size.get());
        let total_count = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok(Page::new(items, total_count, page, page_size.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::import_service::{GrantRecord, ImportService};

    fn record(i: usize) -> GrantRecord {
        GrantRecord {
            title: format!("Grant {}", i),
            release_date: "2024-01-10".to_string(),
            expired_date: "2025-01-10".to_string(),
            activity_code: "R01".to_string(),
            parent_organization: "NIH".to_string(),
            organization: "NCI".to_string(),
            participating_orgs: String::new(),
            document_number: format!("DOC-{}", i),
            document_type: "RFA".to_string(),
            clinical_trials: "Optional".to_string(),
            url: String::new(),
        }
    }

    #[tokio::test]
    async fn lists_grants_in_import_order() {
        let db = setup_test_db().await;
        ImportService::new(db.clone())
            .import_grants((0..12).map(record).collect())
            .await
            .unwrap();

        let service = GrantService::new(db);
        let page = service.list(2, PageSize::new(10).unwrap()).await.unwrap();
        assert_eq!(page.total_count, 12);
        assert_eq!(page.total_pages, 2);
        let titles: Vec<_> = page.items.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Grant 10", "Grant 11"]);
    }

    #[tokio::test]
    async fn unaddressable_pages_are_rejected() {
        let service = GrantService::new(setup_test_db().await);
        assert!(service.list(0, PageSize::default()).await.is_err());
        assert!(matches!(
            service.list(u64::MAX, PageSize::new(100).unwrap()).await,
            Err(crate::errors::ResearchError::InvalidPage(u64::MAX))
        ));
    }
}
