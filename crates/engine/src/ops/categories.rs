use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CategoryInput, CategoryKind, EngineError, ResultEngine, expense_categories,
    expenses, product_types, sales,
    util::{normalize_display_name, normalize_name_key, normalize_optional_text},
};

use super::Engine;

impl Engine {
    pub(super) async fn require_product_type(&self, id: Uuid) -> ResultEngine<()> {
        product_types::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(|_| ())
            .ok_or_else(|| EngineError::KeyNotFound(format!("product type {id}")))
    }

    pub(super) async fn require_expense_category(&self, id: Uuid) -> ResultEngine<()> {
        expense_categories::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(|_| ())
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense category {id}")))
    }

    async fn require_category(&self, kind: CategoryKind, id: Uuid) -> ResultEngine<()> {
        match kind {
            CategoryKind::ProductType => self.require_product_type(id).await,
            CategoryKind::ExpenseCategory => self.require_expense_category(id).await,
        }
    }

    /// Rejects a name whose normalized key is taken by another category of
    /// the same kind.
    async fn ensure_name_free(
        &self,
        kind: CategoryKind,
        name: &str,
        name_norm: &str,
        except: Option<Uuid>,
    ) -> ResultEngine<()> {
        let existing = match kind {
            CategoryKind::ProductType => product_types::Entity::find()
                .filter(product_types::Column::NameNorm.eq(name_norm))
                .one(&self.database)
                .await?
                .map(|m| m.id),
            CategoryKind::ExpenseCategory => expense_categories::Entity::find()
                .filter(expense_categories::Column::NameNorm.eq(name_norm))
                .one(&self.database)
                .await?
                .map(|m| m.id),
        };
        match existing {
            Some(id) if Some(id) != except => Err(EngineError::ExistingKey(format!(
                "{} {name}",
                kind.as_str()
            ))),
            _ => Ok(()),
        }
    }

    fn category_from_input(kind: CategoryKind, id: Uuid, input: CategoryInput) -> ResultEngine<(Category, String)> {
        let name = normalize_display_name(&input.name, kind.as_str())?;
        let name_norm = normalize_name_key(&name);
        if name_norm.is_empty() {
            return Err(EngineError::InvalidName(format!(
                "{} name must contain letters or digits",
                kind.as_str()
            )));
        }
        let category = Category {
            id,
            name,
            description: normalize_optional_text(input.description.as_deref()),
        };
        Ok((category, name_norm))
    }

    /// Categories of `kind`, by name.
    pub async fn list_categories(&self, kind: CategoryKind) -> ResultEngine<Vec<Category>> {
        let categories = match kind {
            CategoryKind::ProductType => product_types::Entity::find()
                .order_by_asc(product_types::Column::Name)
                .all(&self.database)
                .await?
                .into_iter()
                .map(Category::from)
                .collect(),
            CategoryKind::ExpenseCategory => expense_categories::Entity::find()
                .order_by_asc(expense_categories::Column::Name)
                .all(&self.database)
                .await?
                .into_iter()
                .map(Category::from)
                .collect(),
        };
        Ok(categories)
    }

    pub async fn create_category(
        &self,
        kind: CategoryKind,
        input: CategoryInput,
    ) -> ResultEngine<Category> {
        let (category, name_norm) = Self::category_from_input(kind, Uuid::new_v4(), input)?;
        self.ensure_name_free(kind, &category.name, &name_norm, None)
            .await?;
        self.save_category(kind, &category, name_norm, true).await?;
        tracing::info!(kind = kind.as_str(), id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        kind: CategoryKind,
        id: Uuid,
        input: CategoryInput,
    ) -> ResultEngine<Category> {
        self.require_category(kind, id).await?;
        let (category, name_norm) = Self::category_from_input(kind, id, input)?;
        self.ensure_name_free(kind, &category.name, &name_norm, Some(id))
            .await?;
        self.save_category(kind, &category, name_norm, false).await?;
        tracing::info!(kind = kind.as_str(), %id, "category updated");
        Ok(category)
    }

    /// Deletes a category no record points to.
    pub async fn delete_category(&self, kind: CategoryKind, id: Uuid) -> ResultEngine<()> {
        self.require_category(kind, id).await?;

        let references = match kind {
            CategoryKind::ProductType => {
                sales::Entity::find()
                    .filter(sales::Column::ProductTypeId.eq(id))
                    .count(&self.database)
                    .await?
            }
            CategoryKind::ExpenseCategory => {
                expenses::Entity::find()
                    .filter(expenses::Column::ExpenseCategoryId.eq(id))
                    .count(&self.database)
                    .await?
            }
        };
        if references > 0 {
            return Err(EngineError::InUse(format!(
                "{} {id} ({references} records)",
                kind.as_str()
            )));
        }

        match kind {
            CategoryKind::ProductType => {
                product_types::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?;
            }
            CategoryKind::ExpenseCategory => {
                expense_categories::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?;
            }
        }
        tracing::info!(kind = kind.as_str(), %id, "category deleted");
        Ok(())
    }

    async fn save_category(
        &self,
        kind: CategoryKind,
        category: &Category,
        name_norm: String,
        insert: bool,
    ) -> ResultEngine<()> {
        match kind {
            CategoryKind::ProductType => {
                let model = product_types::ActiveModel {
                    id: ActiveValue::Set(category.id),
                    name: ActiveValue::Set(category.name.clone()),
                    name_norm: ActiveValue::Set(name_norm),
                    description: ActiveValue::Set(category.description.clone()),
                };
                if insert {
                    model.insert(&self.database).await?;
                } else {
                    model.update(&self.database).await?;
                }
            }
            CategoryKind::ExpenseCategory => {
                let model = expense_categories::ActiveModel {
                    id: ActiveValue::Set(category.id),
                    name: ActiveValue::Set(category.name.clone()),
                    name_norm: ActiveValue::Set(name_norm),
                    description: ActiveValue::Set(category.description.clone()),
                };
                if insert {
                    model.insert(&self.database).await?;
                } else {
                    model.update(&self.database).await?;
                }
            }
        }
        Ok(())
    }
}
