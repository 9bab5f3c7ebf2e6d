use diesel::prelude::*;

use crate::{
    domain::{product::Product, types::ProductId},
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    repository::{
        DieselRepository, ProductReader, ProductWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        db_product
            .map(|row| Product::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        products::table
            .order(products::product_id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(|row| Product::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &mut Product) -> RepositoryResult<ProductId> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let insertable: DbNewProduct = (&*product).into();

        let raw_id = diesel::insert_into(products::table)
            .values(&insertable)
            .returning(products::product_id)
            .get_result::<i32>(&mut conn)?;

        let id = ProductId::try_from(raw_id)?;
        product.id = Some(id);
        Ok(id)
    }

    fn delete_product(&self, product_id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(products::table.find(product_id.get())).execute(&mut conn)?;
        Ok(affected)
    }
}
