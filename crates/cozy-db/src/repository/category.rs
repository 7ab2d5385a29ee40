//! # Category Repository
//!
//! Read access to the catalog forest. Categories are created by the seed
//! and never modified afterwards.

use cozy_core::Category;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for catalog categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Direct children of `parent_id`, or the roots when `None`.
    ///
    /// Ordered by id, which is the order the catalog was built in.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let roots = db.categories().children(None).await?;
    /// let clothing = db.categories().children(Some(roots[0].id)).await?;
    /// ```
    pub async fn children(&self, parent_id: Option<i64>) -> DbResult<Vec<Category>> {
        debug!(parent_id = ?parent_id, "Listing categories");

        // `IS` matches NULL = NULL as well as equal ids
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id FROM categories WHERE parent_id IS ? ORDER BY id",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Every category, roots and children alike, ordered by id.
    ///
    /// Feeds the category picker of the "add product" form.
    pub async fn list_all(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, parent_id FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_roots_in_seed_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let roots = db.categories().children(None).await.unwrap();
        let names: Vec<_> = roots.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Clothing", "Games", "Books", "Household items"]);
        assert!(roots.iter().all(|c| c.is_root()));
    }

    #[tokio::test]
    async fn test_children_of_clothing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let categories = db.categories();

        let clothing = categories.children(None).await.unwrap().remove(0);
        let children = categories.children(Some(clothing.id)).await.unwrap();
        let names: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Men's", "Women's", "Children's"]);
        assert!(children.iter().all(|c| c.parent_id == Some(clothing.id)));
    }

    #[tokio::test]
    async fn test_leaf_and_unknown_parent_have_no_children() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let categories = db.categories();

        let household = categories
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Household items")
            .unwrap();
        assert!(categories.children(Some(household.id)).await.unwrap().is_empty());
        assert!(categories.children(Some(4242)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let categories = db.categories();

        let games = categories.children(None).await.unwrap().remove(1);
        assert_eq!(categories.get_by_id(games.id).await.unwrap(), Some(games));
        assert_eq!(categories.get_by_id(4242).await.unwrap(), None);
    }
}
