use async_trait::async_trait;
use seller_contracts::{ProductRepo, ProductUseCases};
use seller_core::{ErrorContext, RequestContext, StoreResult};
use seller_models::{Attribute, Category, Order, OrderProducts, Product};
use tracing::instrument;

use crate::UseCase;

#[async_trait]
impl ProductUseCases for UseCase {
    #[instrument(skip_all)]
    async fn create_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()> {
        self.product
            .create_product(ctx, product)
            .await
            .context("ProductUseCase.create_product")
    }

    #[instrument(skip(self, ctx))]
    async fn get_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<Product> {
        self.product
            .get_product(ctx, id)
            .await
            .context("ProductUseCase.get_product")
    }

    #[instrument(skip_all)]
    async fn update_product(&self, ctx: &RequestContext, product: &mut Product) -> StoreResult<()> {
        self.product
            .update_product(ctx, product)
            .await
            .context("ProductUseCase.update_product")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_product(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.product
            .delete_product(ctx, id)
            .await
            .context("ProductUseCase.delete_product")
    }

    #[instrument(skip_all)]
    async fn create_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()> {
        self.product
            .create_category(ctx, category)
            .await
            .context("ProductUseCase.create_category")
    }

    #[instrument(skip(self, ctx))]
    async fn get_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<Category> {
        self.product
            .get_category(ctx, id)
            .await
            .context("ProductUseCase.get_category")
    }

    #[instrument(skip_all)]
    async fn update_category(
        &self,
        ctx: &RequestContext,
        category: &mut Category,
    ) -> StoreResult<()> {
        self.product
            .update_category(ctx, category)
            .await
            .context("ProductUseCase.update_category")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_category(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.product
            .delete_category(ctx, id)
            .await
            .context("ProductUseCase.delete_category")
    }

    #[instrument(skip_all)]
    async fn create_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()> {
        self.product
            .create_attribute(ctx, attribute)
            .await
            .context("ProductUseCase.create_attribute")
    }

    #[instrument(skip(self, ctx))]
    async fn get_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<Attribute> {
        self.product
            .get_attribute(ctx, id)
            .await
            .context("ProductUseCase.get_attribute")
    }

    #[instrument(skip_all)]
    async fn update_attribute(
        &self,
        ctx: &RequestContext,
        attribute: &mut Attribute,
    ) -> StoreResult<()> {
        self.product
            .update_attribute(ctx, attribute)
            .await
            .context("ProductUseCase.update_attribute")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_attribute(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.product
            .delete_attribute(ctx, id)
            .await
            .context("ProductUseCase.delete_attribute")
    }

    #[instrument(skip_all)]
    async fn create_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()> {
        self.product
            .create_order(ctx, order)
            .await
            .context("ProductUseCase.create_order")
    }

    #[instrument(skip(self, ctx))]
    async fn get_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<Order> {
        self.product
            .get_order(ctx, id)
            .await
            .context("ProductUseCase.get_order")
    }

    #[instrument(skip_all)]
    async fn update_order(&self, ctx: &RequestContext, order: &mut Order) -> StoreResult<()> {
        self.product
            .update_order(ctx, order)
            .await
            .context("ProductUseCase.update_order")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_order(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.product
            .delete_order(ctx, id)
            .await
            .context("ProductUseCase.delete_order")
    }

    #[instrument(skip_all)]
    async fn create_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()> {
        self.product
            .create_order_products(ctx, order_products)
            .await
            .context("ProductUseCase.create_order_products")
    }

    #[instrument(skip(self, ctx))]
    async fn get_order_products(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> StoreResult<OrderProducts> {
        self.product
            .get_order_products(ctx, id)
            .await
            .context("ProductUseCase.get_order_products")
    }

    #[instrument(skip_all)]
    async fn update_order_products(
        &self,
        ctx: &RequestContext,
        order_products: &mut OrderProducts,
    ) -> StoreResult<()> {
        self.product
            .update_order_products(ctx, order_products)
            .await
            .context("ProductUseCase.update_order_products")
    }

    #[instrument(skip(self, ctx))]
    async fn delete_order_products(&self, ctx: &RequestContext, id: &str) -> StoreResult<()> {
        self.product
            .delete_order_products(ctx, id)
            .await
            .context("ProductUseCase.delete_order_products")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::use_case;
    use seller_contracts::mock::{MockAuthRepo, MockIntegrationRepo, MockProductRepo};
    use seller_core::{ErrorKind, Stage, StoreError};

    #[tokio::test]
    async fn test_get_product_passes_value_through() {
        let mut product = MockProductRepo::new();
        product
            .expect_get_product()
            .withf(|_, id| id == "p1")
            .times(1)
            .returning(|_, id| {
                Ok(Product {
                    id: Some(id.to_string()),
                    name: "Widget".to_string(),
                    cost: 500,
                    ..Default::default()
                })
            });

        let uc = use_case(MockAuthRepo::new(), MockIntegrationRepo::new(), product);
        let found = uc.get_product(&RequestContext::new(), "p1").await.unwrap();
        assert_eq!(found.name, "Widget");
        assert_eq!(found.cost, 500);
    }

    #[tokio::test]
    async fn test_constraint_violation_keeps_kind() {
        let mut product = MockProductRepo::new();
        product.expect_create_order_products().times(1).returning(|_, _| {
            Err(
                StoreError::new(ErrorKind::ConstraintViolation, Stage::Execute, "fk violation")
                    .context("ProductRepo.create_order_products"),
            )
        });

        let uc = use_case(MockAuthRepo::new(), MockIntegrationRepo::new(), product);
        let mut line = OrderProducts {
            order_id: "o1".to_string(),
            product_id: "missing".to_string(),
            count: 1,
            cost: 100,
            ..Default::default()
        };
        let err = uc
            .create_order_products(&RequestContext::new(), &mut line)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(
            err.trace().collect::<Vec<_>>(),
            vec!["ProductUseCase.create_order_products", "ProductRepo.create_order_products"]
        );
        assert!(line.id.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_context_reaches_repository() {
        let mut product = MockProductRepo::new();
        product
            .expect_update_category()
            .withf(|ctx, _| ctx.is_cancelled())
            .times(1)
            .returning(|_, _| Err(StoreError::cancelled().context("ProductRepo.update_category")));

        let uc = use_case(MockAuthRepo::new(), MockIntegrationRepo::new(), product);
        let ctx = RequestContext::new();
        ctx.cancel();

        let mut category = Category::default();
        let err = uc.update_category(&ctx, &mut category).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }
}
