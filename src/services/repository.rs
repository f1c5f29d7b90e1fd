use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{bson::doc, Collection, Database, IndexModel};

use crate::error::AppError;
use crate::models::{Parcel, Payment, PAYMENT_STATUS_PAID};

/// Storage gateway over the `parcels` and `payments` collections. Every
/// operation is a single round trip against the shared driver connection.
#[derive(Clone)]
pub struct ParcelRepository {
    parcel_collection: Collection<Parcel>,
    payment_collection: Collection<Payment>,
}

impl ParcelRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            parcel_collection: db.collection("parcels"),
            payment_collection: db.collection("payments"),
        }
    }

    /// Initialize database indexes.
    pub async fn init_indexes(&self) -> Result<(), AppError> {
        // Compound index on (user.email, createdAt) for owner-scoped listing
        let owner_index = IndexModel::builder()
            .keys(doc! { "user.email": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_created_idx".to_string())
                    .build(),
            )
            .build();

        self.parcel_collection
            .create_index(owner_index, None)
            .await?;

        // Unique index on transactionId: the idempotency guard for replayed
        // payment confirmations
        let transaction_index = IndexModel::builder()
            .keys(doc! { "transactionId": 1 })
            .options(
                IndexOptions::builder()
                    .name("transaction_id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        // Compound index on (user.email, createdAt) for payment history
        let payer_index = IndexModel::builder()
            .keys(doc! { "user.email": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("payer_created_idx".to_string())
                    .build(),
            )
            .build();

        self.payment_collection
            .create_indexes([transaction_index, payer_index], None)
            .await?;

        tracing::info!("Parcel service indexes initialized");
        Ok(())
    }

    /// List parcels, newest first, optionally scoped to an owner email.
    pub async fn list_parcels(&self, owner_email: Option<&str>) -> Result<Vec<Parcel>, AppError> {
        let filter = match owner_email {
            Some(email) => doc! { "user.email": email },
            None => doc! {},
        };

        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self.parcel_collection.find(filter, Some(options)).await?;
        let parcels: Vec<Parcel> = cursor.try_collect().await?;
        Ok(parcels)
    }

    pub async fn get_parcel(&self, id: ObjectId) -> Result<Option<Parcel>, AppError> {
        let parcel = self
            .parcel_collection
            .find_one(doc! { "_id": id }, None)
            .await?;
        Ok(parcel)
    }

    pub async fn insert_parcel(&self, parcel: Parcel) -> Result<ObjectId, AppError> {
        let result = self.parcel_collection.insert_one(parcel, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("Inserted parcel id is not an ObjectId")))
    }

    /// Delete a parcel by id. Returns false when no document matched.
    pub async fn delete_parcel(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .parcel_collection
            .delete_one(doc! { "_id": id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    /// Mark a parcel paid. Returns false when no document matched, so the
    /// caller can distinguish "updated" from "parcel never existed".
    pub async fn mark_parcel_paid(&self, id: ObjectId) -> Result<bool, AppError> {
        let update = doc! { "$set": { "paymentStatus": PAYMENT_STATUS_PAID } };
        let result = self
            .parcel_collection
            .update_one(doc! { "_id": id }, update, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn insert_payment(&self, payment: Payment) -> Result<ObjectId, AppError> {
        let result = self.payment_collection.insert_one(payment, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("Inserted payment id is not an ObjectId")))
    }

    pub async fn find_payment_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Payment>, AppError> {
        let payment = self
            .payment_collection
            .find_one(doc! { "transactionId": transaction_id }, None)
            .await?;
        Ok(payment)
    }

    /// List payments, newest first, optionally scoped to the payer's email.
    pub async fn list_payments(&self, email: Option<&str>) -> Result<Vec<Payment>, AppError> {
        let filter = match email {
            Some(email) => doc! { "user.email": email },
            None => doc! {},
        };

        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self.payment_collection.find(filter, Some(options)).await?;
        let payments: Vec<Payment> = cursor.try_collect().await?;
        Ok(payments)
    }
}
