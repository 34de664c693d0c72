use super::{
    entity::{UserFindEntity, UserInsertEntity, UserSummaryFindEntity},
    NewUser, User, UserChanges, UserSummary, UsersQuery, UsersRepository,
};
use crate::{dto::input::Pagination, repository::Error};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::ErrorKind,
    options::{IndexOptions, ReturnDocument},
    Database, IndexModel,
};
use std::sync::Arc;
use time::OffsetDateTime;

const USERS: &str = "users";
const INDEX_NAME_UNIQUE_EMAIL: &str = "unique_email";

pub struct UsersRepositoryImpl {
    database: Database,
}

impl UsersRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        tracing::debug!(collection = USERS, "creating collection");
        database.create_collection(USERS).await?;

        let collection = database.collection::<Document>(USERS);

        tracing::debug!("fetching index names");
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_UNIQUE_EMAIL.to_string()) {
            collection
                .create_index(
                    IndexModel::builder()
                        .keys(doc! {
                            "email": 1,
                        })
                        .options(
                            IndexOptions::builder()
                                .name(INDEX_NAME_UNIQUE_EMAIL.to_string())
                                .unique(true)
                                .build(),
                        )
                        .build(),
                )
                .await?;
            tracing::debug!(
                collection = USERS,
                index = INDEX_NAME_UNIQUE_EMAIL,
                "created index"
            );
        }

        Ok(Self { database })
    }
}

fn users_filter(query: &UsersQuery) -> Document {
    let mut filter = Document::new();

    if let Some(role) = query.role {
        filter.insert("role", role.as_ref());
    }

    if let Some(search) = query.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let pattern = regex::escape(search);
            let condition = |field: &str| {
                let mut condition = Document::new();
                condition.insert(
                    field,
                    doc! {
                        "$regex": pattern.as_str(),
                        "$options": "i",
                    },
                );
                condition
            };
            filter.insert(
                "$or",
                vec![
                    condition("name"),
                    condition("email"),
                    condition("department"),
                ],
            );
        }
    }

    filter
}

fn changes_update(changes: UserChanges, now: OffsetDateTime) -> Document {
    let mut set = doc! {
        "updated_at": DateTime::from(now),
    };

    if let Some(name) = changes.name {
        set.insert("name", name);
    }
    if let Some(email) = changes.email {
        set.insert("email", email);
    }
    if let Some(department) = changes.department {
        set.insert("department", department);
    }
    if let Some(role) = changes.role {
        set.insert("role", role.as_ref());
    }

    doc! {
        "$set": set,
    }
}

#[async_trait]
impl UsersRepository for UsersRepositoryImpl {
    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        let now = OffsetDateTime::now_utc();
        let insert_entity = UserInsertEntity {
            name: &user.name,
            email: &user.email,
            password_hash: &user.password_hash,
            role: user.role,
            department: &user.department,
            assigned_tickets: Vec::new(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let insert_result = self
            .database
            .collection::<UserInsertEntity>(USERS)
            .insert_one(insert_entity)
            .await
            .map_err(Error::from_write)?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            department: user.department,
            assigned_tickets: Vec::new(),
            last_login: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find(&self, id: ObjectId) -> Result<Option<User>, Error> {
        let user = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one(doc! {
                "_id": id,
            })
            .await?
            .map(User::from);

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one(doc! {
                "email": email,
            })
            .await?
            .map(User::from);

        Ok(user)
    }

    async fn find_summaries(&self, ids: Vec<ObjectId>) -> Result<Vec<UserSummary>, Error> {
        let summaries = self
            .database
            .collection::<UserSummaryFindEntity>(USERS)
            .find(doc! {
                "_id": {
                    "$in": ids,
                },
            })
            .projection(doc! {
                "name": 1,
                "email": 1,
            })
            .await?
            .map_ok(UserSummary::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(summaries)
    }

    async fn find_many(
        &self,
        query: UsersQuery,
        pagination: Pagination,
    ) -> Result<Vec<User>, Error> {
        let users = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find(users_filter(&query))
            .sort(doc! {
                "created_at": -1,
                "_id": -1,
            })
            .skip(pagination.skip())
            .limit(pagination.limit as i64)
            .await?
            .map_ok(User::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(users)
    }

    async fn count(&self, query: UsersQuery) -> Result<u64, Error> {
        let count = self
            .database
            .collection::<Document>(USERS)
            .count_documents(users_filter(&query))
            .await?;

        Ok(count)
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<Option<User>, Error> {
        let update = changes_update(changes, OffsetDateTime::now_utc());

        let user = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(Error::from_write)?
            .map(User::from);

        Ok(user)
    }

    async fn update_password(&self, id: ObjectId, password_hash: String) -> Result<(), Error> {
        let now = DateTime::from(OffsetDateTime::now_utc());

        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! {
                    "_id": id,
                },
                doc! {
                    "$set": {
                        "password_hash": password_hash,
                        "updated_at": now,
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn update_last_login(
        &self,
        id: ObjectId,
        last_login: OffsetDateTime,
    ) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! {
                    "_id": id,
                },
                doc! {
                    "$set": {
                        "last_login": DateTime::from(last_login),
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, Error> {
        let delete_result = self
            .database
            .collection::<Document>(USERS)
            .delete_one(doc! {
                "_id": id,
            })
            .await?;

        Ok(delete_result.deleted_count == 1)
    }

    async fn add_assigned_ticket(
        &self,
        user_id: ObjectId,
        ticket_id: ObjectId,
    ) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! {
                    "_id": user_id,
                },
                doc! {
                    "$addToSet": {
                        "assigned_tickets": ticket_id,
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }

    async fn remove_assigned_ticket(
        &self,
        user_id: ObjectId,
        ticket_id: ObjectId,
    ) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(USERS)
            .update_one(
                doc! {
                    "_id": user_id,
                },
                doc! {
                    "$pull": {
                        "assigned_tickets": ticket_id,
                    }
                },
            )
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}
