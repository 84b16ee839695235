//! Entity-agnostic CRUD service.
//!
//! A `Service` borrows the connection pool for the duration of one request.
//! Each write opens its own transaction; dropping it on an error path rolls
//! the work back.
use std::marker::PhantomData;

use sea_orm::{
    sea_query::IntoValueTuple, ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection,
    EntityName, EntityTrait, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::{errors::ServiceError, key::PrimaryKey};

/// Key type accepted by a `Service<E, ..>`.
pub trait EntityKey<E: EntityTrait>: Send + Sync {
    /// Value handed to `find_by_id` / `delete_by_id`.
    fn value(&self) -> <E::PrimaryKey as PrimaryKeyTrait>::ValueType;
    /// Printable form used in errors and logs.
    fn primary_key(&self) -> PrimaryKey;
}

impl<E> EntityKey<E> for i32
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    fn value(&self) -> <E::PrimaryKey as PrimaryKeyTrait>::ValueType {
        (*self).into()
    }

    fn primary_key(&self) -> PrimaryKey {
        PrimaryKey::from(*self)
    }
}

/// Partial update. Implementations set only the columns they carry.
pub trait Patch<A: ActiveModelTrait> {
    fn apply(self, am: &mut A);
}

pub struct Service<'db, E, C, U, K> {
    db: &'db DatabaseConnection,
    _types: PhantomData<fn() -> (E, C, U, K)>,
}

impl<'db, E, C, U, K> Service<'db, E, C, U, K> {
    pub fn new(db: &'db DatabaseConnection) -> Self {
        Self { db, _types: PhantomData }
    }

    pub fn db(&self) -> &'db DatabaseConnection {
        self.db
    }
}

impl<'db, E, C, U, K> Service<'db, E, C, U, K>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    C: IntoActiveModel<E::ActiveModel> + Send,
    U: Patch<E::ActiveModel> + Send,
    K: EntityKey<E>,
{
    fn entity_name() -> String {
        E::default().table_name().to_owned()
    }

    fn not_found(key: &K) -> ServiceError {
        match key.primary_key().format() {
            Ok(label) => ServiceError::not_found(Self::entity_name(), label),
            Err(e) => e.into(),
        }
    }

    fn label(key: &K) -> String {
        key.primary_key().format().unwrap_or_default()
    }

    /// Inserts `data` and returns the stored row with server-assigned fields.
    pub async fn create(&self, data: C) -> Result<E::Model, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::unavailable)?;
        let created = data.into_active_model().insert(&txn).await.map_err(ServiceError::commit)?;
        txn.commit().await.map_err(ServiceError::commit)?;
        info!(entity = %Self::entity_name(), "created");
        Ok(created)
    }

    /// All rows in store order.
    pub async fn get_all(&self) -> Result<Vec<E::Model>, ServiceError> {
        E::find().all(self.db).await.map_err(ServiceError::db)
    }

    /// `None` when no row has this key.
    pub async fn get_by_key(&self, key: K) -> Result<Option<E::Model>, ServiceError> {
        E::find_by_id(key.value()).one(self.db).await.map_err(ServiceError::db)
    }

    /// Applies the fields present in `data`. A patch that sets nothing
    /// returns the current row without writing.
    ///
    /// The UPDATE is the first statement of its transaction: SQLite takes the
    /// write lock before any read, so concurrent writers wait on the busy
    /// timeout rather than failing a lock upgrade.
    pub async fn update(&self, key: K, data: U) -> Result<E::Model, ServiceError> {
        let mut am = <E::ActiveModel as ActiveModelBehavior>::new();
        data.apply(&mut am);
        if !am.is_changed() {
            debug!(entity = %Self::entity_name(), key = %Self::label(&key), "empty patch");
            return self.get_by_key_or_not_found(&key).await;
        }

        let mut query = E::update_many().set(am);
        let mut columns = E::PrimaryKey::iter();
        for value in key.value().into_value_tuple() {
            if let Some(pk) = columns.next() {
                query = query.filter(pk.into_column().eq(value));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::unavailable)?;
        let res = query.exec(&txn).await.map_err(ServiceError::commit)?;
        if res.rows_affected == 0 {
            return Err(Self::not_found(&key));
        }
        let updated = E::find_by_id(key.value())
            .one(&txn)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| Self::not_found(&key))?;
        txn.commit().await.map_err(ServiceError::commit)?;
        info!(entity = %Self::entity_name(), key = %Self::label(&key), "updated");
        Ok(updated)
    }

    async fn get_by_key_or_not_found(&self, key: &K) -> Result<E::Model, ServiceError> {
        E::find_by_id(key.value())
            .one(self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| Self::not_found(key))
    }

    pub async fn delete_by_key(&self, key: K) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::unavailable)?;
        let res = E::delete_by_id(key.value()).exec(&txn).await.map_err(ServiceError::commit)?;
        if res.rows_affected == 0 {
            return Err(Self::not_found(&key));
        }
        txn.commit().await.map_err(ServiceError::commit)?;
        info!(entity = %Self::entity_name(), key = %Self::label(&key), "deleted");
        Ok(())
    }
}
