use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::{
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        supplier_products::{
            ActiveModel as ProductActive, Column as ProductCol, Entity as SupplierProducts,
            Model as ProductModel,
        },
        suppliers::{ActiveModel as SupplierActive, Column as SupplierCol, Entity as Suppliers, Model as SupplierModel},
    },
    models::{Order, OrderLine, OrderWithSupplier, Supplier, SupplierProduct, SupplierSummary},
    workflow::Transition,
};

/// Ids bound per `IN (...)` lookup. Postgres rejects statements with more than
/// 65535 bind parameters, so larger id lists are queried in chunks.
const MAX_BIND_IDS: usize = 10_000;

/// Postgres-backed store. Suppliers and orders live in their own tables, with
/// catalogs and line items in child tables ordered by `position`.
#[derive(Clone)]
pub struct PgStore {
    conn: DatabaseConnection,
}

impl PgStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn catalogs(&self, supplier_ids: Vec<Uuid>) -> StoreResult<HashMap<Uuid, Vec<SupplierProduct>>> {
        let mut catalogs: HashMap<Uuid, Vec<SupplierProduct>> = HashMap::new();
        for chunk in supplier_ids.chunks(MAX_BIND_IDS) {
            let rows = SupplierProducts::find()
                .filter(ProductCol::SupplierId.is_in(chunk.iter().copied()))
                .order_by_asc(ProductCol::Position)
                .all(&self.conn)
                .await?;
            for row in rows {
                catalogs
                    .entry(row.supplier_id)
                    .or_default()
                    .push(product_from_entity(row));
            }
        }
        Ok(catalogs)
    }

    async fn lines(&self, order_ids: Vec<Uuid>) -> StoreResult<HashMap<Uuid, Vec<OrderLine>>> {
        let mut lines: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
        for chunk in order_ids.chunks(MAX_BIND_IDS) {
            let rows = OrderItems::find()
                .filter(OrderItemCol::OrderId.is_in(chunk.iter().copied()))
                .order_by_asc(OrderItemCol::Position)
                .all(&self.conn)
                .await?;
            for row in rows {
                lines.entry(row.order_id).or_default().push(line_from_entity(row));
            }
        }
        Ok(lines)
    }

    async fn hydrate_suppliers(&self, models: Vec<SupplierModel>) -> StoreResult<Vec<Supplier>> {
        let mut catalogs = self.catalogs(models.iter().map(|m| m.id).collect()).await?;
        Ok(models
            .into_iter()
            .map(|model| {
                let products = catalogs.remove(&model.id).unwrap_or_default();
                supplier_from_entity(model, products)
            })
            .collect())
    }

    async fn hydrate_orders(&self, models: Vec<OrderModel>) -> StoreResult<Vec<Order>> {
        let mut lines = self.lines(models.iter().map(|m| m.id).collect()).await?;
        models
            .into_iter()
            .map(|model| {
                let products = lines.remove(&model.id).unwrap_or_default();
                order_from_entity(model, products)
            })
            .collect()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        let txn = self.conn.begin().await?;

        SupplierActive {
            id: Set(supplier.id),
            company_name: Set(supplier.company_name.clone()),
            phone: Set(supplier.phone.clone()),
            representative: Set(supplier.representative.clone()),
            password_hash: Set(supplier.password_hash.clone()),
            created_at: Set(Utc::now().into()),
            seq: NotSet,
        }
        .insert(&txn)
        .await?;

        if !supplier.products.is_empty() {
            let rows = supplier
                .products
                .iter()
                .enumerate()
                .map(|(position, product)| ProductActive {
                    id: Set(Uuid::new_v4()),
                    supplier_id: Set(supplier.id),
                    position: Set(position as i32),
                    name: Set(product.name.clone()),
                    price: Set(product.price),
                    min_order_qty: Set(product.min_order_qty),
                });
            SupplierProducts::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(supplier)
    }

    async fn find_supplier_by_phone(&self, phone: &str) -> StoreResult<Option<Supplier>> {
        let model = Suppliers::find()
            .filter(SupplierCol::Phone.eq(phone))
            .order_by_asc(SupplierCol::Seq)
            .one(&self.conn)
            .await?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.hydrate_suppliers(vec![model]).await?.pop())
    }

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let models = Suppliers::find()
            .order_by_asc(SupplierCol::Seq)
            .all(&self.conn)
            .await?;
        self.hydrate_suppliers(models).await
    }

    async fn insert_order(&self, order: Order) -> StoreResult<Order> {
        let txn = self.conn.begin().await?;

        OrderActive {
            id: Set(order.id),
            supplier_id: Set(order.supplier_id),
            status: Set(order.status.as_str().to_string()),
            created_at: Set(order.created_at.into()),
            updated_at: Set(order.updated_at.into()),
            seq: NotSet,
        }
        .insert(&txn)
        .await?;

        if !order.products.is_empty() {
            let rows = order
                .products
                .iter()
                .enumerate()
                .map(|(position, line)| OrderItemActive {
                    id: Set(Uuid::new_v4()),
                    order_id: Set(order.id),
                    position: Set(position as i32),
                    name: Set(line.name.clone()),
                    quantity: Set(line.quantity),
                });
            OrderItems::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderWithSupplier>> {
        #[derive(Debug, FromQueryResult)]
        struct SupplierSummaryRow {
            id: Uuid,
            company_name: String,
            representative: String,
        }

        let models = Orders::find()
            .order_by_asc(OrderCol::Seq)
            .all(&self.conn)
            .await?;
        let orders = self.hydrate_orders(models).await?;

        let mut supplier_ids: Vec<Uuid> = orders.iter().map(|o| o.supplier_id).collect();
        supplier_ids.sort();
        supplier_ids.dedup();

        let mut summaries: HashMap<Uuid, SupplierSummary> = HashMap::new();
        for chunk in supplier_ids.chunks(MAX_BIND_IDS) {
            let rows = Suppliers::find()
                .select_only()
                .column(SupplierCol::Id)
                .column(SupplierCol::CompanyName)
                .column(SupplierCol::Representative)
                .filter(SupplierCol::Id.is_in(chunk.iter().copied()))
                .into_model::<SupplierSummaryRow>()
                .all(&self.conn)
                .await?;
            for row in rows {
                summaries.insert(
                    row.id,
                    SupplierSummary {
                        company_name: row.company_name,
                        representative: row.representative,
                    },
                );
            }
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let summary = summaries.get(&order.supplier_id).cloned();
                order.with_supplier(summary)
            })
            .collect())
    }

    async fn list_orders_for_supplier(&self, supplier_id: Uuid) -> StoreResult<Vec<Order>> {
        let models = Orders::find()
            .filter(OrderCol::SupplierId.eq(supplier_id))
            .order_by_asc(OrderCol::Seq)
            .all(&self.conn)
            .await?;
        self.hydrate_orders(models).await
    }

    async fn transition_order(
        &self,
        id: Uuid,
        transition: Transition,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Order>> {
        let Some(model) = Orders::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut order = match self.hydrate_orders(vec![model.clone()]).await?.pop() {
            Some(order) => order,
            None => return Ok(None),
        };
        order.apply(transition, now);

        let mut active: OrderActive = model.into();
        active.status = Set(order.status.as_str().to_string());
        active.updated_at = Set(order.updated_at.into());
        active.update(&self.conn).await?;

        Ok(Some(order))
    }

    async fn close(&self) -> StoreResult<()> {
        self.conn.clone().close().await?;
        Ok(())
    }
}

fn supplier_from_entity(model: SupplierModel, products: Vec<SupplierProduct>) -> Supplier {
    Supplier {
        id: model.id,
        company_name: model.company_name,
        phone: model.phone,
        representative: model.representative,
        password_hash: model.password_hash,
        products,
    }
}

fn product_from_entity(model: ProductModel) -> SupplierProduct {
    SupplierProduct {
        name: model.name,
        price: model.price,
        min_order_qty: model.min_order_qty,
    }
}

fn order_from_entity(model: OrderModel, products: Vec<OrderLine>) -> StoreResult<Order> {
    Ok(Order {
        id: model.id,
        supplier_id: model.supplier_id,
        products,
        status: model.status.parse()?,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn line_from_entity(model: OrderItemModel) -> OrderLine {
    OrderLine {
        name: model.name,
        quantity: model.quantity,
    }
}
