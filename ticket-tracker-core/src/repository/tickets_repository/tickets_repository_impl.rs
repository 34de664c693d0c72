use super::{
    entity::{
        CommentEntity, TaskEntity, TicketFindEntity, TicketInsertEntity, TicketSummaryFindEntity,
    },
    Comment, NewTicket, Task, Ticket, TicketChanges, TicketSummary, TicketsQuery,
    TicketsRepository, TicketsSort,
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

const TICKETS: &str = "tickets";
const INDEX_NAME_TEXT_SEARCH: &str = "text_title_description_customer";
const INDEX_NAME_CREATED_BY: &str = "index_created_by";
const INDEX_NAME_ASSIGNED_TO: &str = "index_assigned_to";

pub struct TicketsRepositoryImpl {
    database: Database,
}

impl TicketsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        tracing::debug!(collection = TICKETS, "creating collection");
        database.create_collection(TICKETS).await?;

        let collection = database.collection::<Document>(TICKETS);

        tracing::debug!("fetching index names");
        let index_names = collection.list_index_names().await?;

        let indexes = [
            (
                INDEX_NAME_TEXT_SEARCH,
                doc! {
                    "title": "text",
                    "description": "text",
                    "customer": "text",
                },
            ),
            (INDEX_NAME_CREATED_BY, doc! { "created_by": 1 }),
            (INDEX_NAME_ASSIGNED_TO, doc! { "assigned_to": 1 }),
        ];

        for (name, keys) in indexes {
            if index_names.iter().any(|index_name| index_name == name) {
                continue;
            }

            collection
                .create_index(
                    IndexModel::builder()
                        .keys(keys)
                        .options(IndexOptions::builder().name(name.to_string()).build())
                        .build(),
                )
                .await?;
            tracing::debug!(collection = TICKETS, index = name, "created index");
        }

        Ok(Self { database })
    }

    async fn update_one_matched(&self, filter: Document, update: Document) -> Result<(), Error> {
        let update_result = self
            .database
            .collection::<Document>(TICKETS)
            .update_one(filter, update)
            .await?;

        match update_result.matched_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}

fn tickets_filter(query: &TicketsQuery) -> Document {
    let mut filter = Document::new();

    if let Some(status) = query.status {
        filter.insert("status", status.as_ref());
    }
    if let Some(priority) = query.priority {
        filter.insert("priority", priority.as_ref());
    }
    if let Some(assigned_to) = query.assigned_to {
        filter.insert("assigned_to", assigned_to);
    }
    if let Some(user_id) = query.visible_to {
        filter.insert(
            "$or",
            vec![
                doc! { "created_by": user_id },
                doc! { "assigned_to": user_id },
            ],
        );
    }
    if let Some(search) = query.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            filter.insert("$text", doc! { "$search": search });
        }
    }

    filter
}

fn changes_update(changes: TicketChanges, now: OffsetDateTime) -> Document {
    let mut set = doc! {
        "updated_at": DateTime::from(now),
    };
    let mut unset = Document::new();

    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(customer) = changes.customer {
        set.insert("customer", customer);
    }
    if let Some(description) = changes.description {
        set.insert("description", description);
    }
    if let Some(status) = changes.status {
        set.insert("status", status.as_ref());
    }
    if let Some(priority) = changes.priority {
        set.insert("priority", priority.as_ref());
    }
    match changes.assigned_to {
        Some(Some(assigned_to)) => {
            set.insert("assigned_to", assigned_to);
        }
        Some(None) => {
            unset.insert("assigned_to", "");
        }
        None => {}
    }
    if let Some((closed_at, closed_by)) = changes.closed {
        set.insert("closed_at", DateTime::from(closed_at));
        set.insert("closed_by", closed_by);
    }

    let mut update = doc! {
        "$set": set,
    };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }

    update
}

#[async_trait]
impl TicketsRepository for TicketsRepositoryImpl {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket, Error> {
        let insert_entity = TicketInsertEntity {
            title: &ticket.title,
            customer: &ticket.customer,
            status: ticket.status,
            priority: ticket.priority,
            description: &ticket.description,
            created_by: ticket.created_by,
            tasks: ticket.tasks.iter().cloned().map(TaskEntity::from).collect(),
            comments: Vec::new(),
            closed_at: ticket.closed_at.map(DateTime::from),
            closed_by: ticket.closed_by,
            created_at: ticket.created_at.into(),
            updated_at: ticket.created_at.into(),
        };

        let insert_result = self
            .database
            .collection::<TicketInsertEntity>(TICKETS)
            .insert_one(insert_entity)
            .await?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(Ticket {
            id,
            title: ticket.title,
            customer: ticket.customer,
            status: ticket.status,
            priority: ticket.priority,
            description: ticket.description,
            created_by: ticket.created_by,
            assigned_to: None,
            tasks: ticket.tasks,
            comments: Vec::new(),
            closed_at: ticket.closed_at,
            closed_by: ticket.closed_by,
            created_at: ticket.created_at,
            updated_at: ticket.created_at,
        })
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Ticket>, Error> {
        let ticket = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find_one(doc! {
                "_id": id,
            })
            .await?
            .map(Ticket::from);

        Ok(ticket)
    }

    async fn find_many(
        &self,
        query: TicketsQuery,
        sort: TicketsSort,
        pagination: Pagination,
    ) -> Result<Vec<Ticket>, Error> {
        let tickets = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find(tickets_filter(&query))
            .sort(sort.to_document())
            .skip(pagination.skip())
            .limit(pagination.limit as i64)
            .await?
            .map_ok(Ticket::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(tickets)
    }

    async fn find_summaries(&self, ids: Vec<ObjectId>) -> Result<Vec<TicketSummary>, Error> {
        let summaries = self
            .database
            .collection::<TicketSummaryFindEntity>(TICKETS)
            .find(doc! {
                "_id": {
                    "$in": ids,
                },
            })
            .projection(doc! {
                "title": 1,
                "customer": 1,
                "status": 1,
                "priority": 1,
            })
            .await?
            .map_ok(TicketSummary::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(summaries)
    }

    async fn count(&self, query: TicketsQuery) -> Result<u64, Error> {
        let count = self
            .database
            .collection::<Document>(TICKETS)
            .count_documents(tickets_filter(&query))
            .await?;

        Ok(count)
    }

    async fn update(&self, id: ObjectId, changes: TicketChanges) -> Result<Option<Ticket>, Error> {
        let update = changes_update(changes, OffsetDateTime::now_utc());

        let ticket = self
            .database
            .collection::<TicketFindEntity>(TICKETS)
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .map(Ticket::from);

        Ok(ticket)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, Error> {
        let delete_result = self
            .database
            .collection::<Document>(TICKETS)
            .delete_one(doc! {
                "_id": id,
            })
            .await?;

        Ok(delete_result.deleted_count == 1)
    }

    async fn push_task(&self, id: ObjectId, task: Task) -> Result<(), Error> {
        let now = DateTime::from(task.created_at);
        let task = bson::to_bson(&TaskEntity::from(task))
            .map_err(|err| Error::Mongo(err.into()))?;

        self.update_one_matched(
            doc! {
                "_id": id,
            },
            doc! {
                "$push": {
                    "tasks": task,
                },
                "$set": {
                    "updated_at": now,
                }
            },
        )
        .await
    }

    async fn update_task(&self, id: ObjectId, task: Task) -> Result<(), Error> {
        let task_id = task.id;
        let now = DateTime::from(task.updated_at);
        let task = bson::to_bson(&TaskEntity::from(task))
            .map_err(|err| Error::Mongo(err.into()))?;

        self.update_one_matched(
            doc! {
                "_id": id,
                "tasks._id": task_id,
            },
            doc! {
                "$set": {
                    "tasks.$": task,
                    "updated_at": now,
                }
            },
        )
        .await
    }

    async fn pull_task(&self, id: ObjectId, task_id: ObjectId) -> Result<(), Error> {
        let now = DateTime::from(OffsetDateTime::now_utc());

        self.update_one_matched(
            doc! {
                "_id": id,
                "tasks._id": task_id,
            },
            doc! {
                "$pull": {
                    "tasks": {
                        "_id": task_id,
                    }
                },
                "$set": {
                    "updated_at": now,
                }
            },
        )
        .await
    }

    async fn push_comment(&self, id: ObjectId, comment: Comment) -> Result<(), Error> {
        let now = DateTime::from(comment.created_at);
        let comment = bson::to_bson(&CommentEntity::from(comment))
            .map_err(|err| Error::Mongo(err.into()))?;

        self.update_one_matched(
            doc! {
                "_id": id,
            },
            doc! {
                "$push": {
                    "comments": comment,
                },
                "$set": {
                    "updated_at": now,
                }
            },
        )
        .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dto::{TicketPriority, TicketStatus},
        repository::test::{create_test_database, destroy_test_database},
    };

    fn new_ticket(created_by: ObjectId) -> NewTicket {
        NewTicket {
            title: "Laptop won't boot".to_string(),
            customer: "Marketing".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            description: "Black screen after BIOS logo".to_string(),
            created_by,
            tasks: vec![Task::new("Check power supply".to_string(), OffsetDateTime::now_utc())],
            closed_at: None,
            closed_by: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn tickets_filter_visible_to() {
        let user_id = ObjectId::new();
        let filter = tickets_filter(&TicketsQuery {
            visible_to: Some(user_id),
            ..Default::default()
        });

        assert_eq!(
            filter,
            doc! {
                "$or": [
                    { "created_by": user_id },
                    { "assigned_to": user_id },
                ]
            }
        );
    }

    #[test]
    fn tickets_filter_all_visible() {
        let filter = tickets_filter(&TicketsQuery::default());

        assert!(filter.is_empty());
    }

    #[test]
    fn tickets_filter_combined() {
        let assignee = ObjectId::new();
        let filter = tickets_filter(&TicketsQuery {
            visible_to: None,
            status: Some(TicketStatus::InProgress),
            priority: Some(TicketPriority::Low),
            assigned_to: Some(assignee),
            search: Some("printer".to_string()),
        });

        assert_eq!(
            filter,
            doc! {
                "status": "in-progress",
                "priority": "low",
                "assigned_to": assignee,
                "$text": { "$search": "printer" },
            }
        );
    }

    #[test]
    fn changes_update_unassign() {
        let update = changes_update(
            TicketChanges {
                assigned_to: Some(None),
                ..Default::default()
            },
            OffsetDateTime::now_utc(),
        );

        assert_eq!(
            update.get_document("$unset").unwrap(),
            &doc! { "assigned_to": "" }
        );
        assert!(!update
            .get_document("$set")
            .unwrap()
            .contains_key("assigned_to"));
    }

    #[test]
    fn changes_update_assigned_to_untouched() {
        let update = changes_update(
            TicketChanges {
                title: Some("New title".to_string()),
                ..Default::default()
            },
            OffsetDateTime::now_utc(),
        );

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "New title");
        assert!(!set.contains_key("assigned_to"));
        assert!(!update.contains_key("$unset"));
    }

    #[test]
    fn changes_update_close_stamp() {
        let closed_by = ObjectId::new();
        let closed_at = OffsetDateTime::now_utc();
        let update = changes_update(
            TicketChanges {
                status: Some(TicketStatus::Closed),
                closed: Some((closed_at, closed_by)),
                ..Default::default()
            },
            closed_at,
        );

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("status").unwrap(), "closed");
        assert_eq!(set.get_object_id("closed_by").unwrap(), closed_by);
        assert!(set.contains_key("closed_at"));
    }

    #[test]
    fn changes_update_without_close_stamp_keeps_closed_at() {
        let update = changes_update(
            TicketChanges {
                status: Some(TicketStatus::Open),
                ..Default::default()
            },
            OffsetDateTime::now_utc(),
        );

        let set = update.get_document("$set").unwrap();
        assert!(!set.contains_key("closed_at"));
        assert!(!update.contains_key("$unset"));
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn insert_and_find() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let inserted = repository.insert(new_ticket(ObjectId::new())).await.unwrap();
        let found = repository.find(inserted.id).await.unwrap();

        destroy_test_database(database).await;

        let found = found.unwrap();
        assert_eq!(found.title, inserted.title);
        assert_eq!(found.tasks.len(), 1);
        assert_eq!(found.tasks[0].id, inserted.tasks[0].id);
        assert_eq!(found.closed_at, None);
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn find_many_visible_to_creator_or_assignee() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let user_id = ObjectId::new();
        let created = repository.insert(new_ticket(user_id)).await.unwrap();
        let assigned = repository.insert(new_ticket(ObjectId::new())).await.unwrap();
        repository.insert(new_ticket(ObjectId::new())).await.unwrap();
        repository
            .update(
                assigned.id,
                TicketChanges {
                    assigned_to: Some(Some(user_id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let query = TicketsQuery {
            visible_to: Some(user_id),
            ..Default::default()
        };
        let tickets = repository
            .find_many(query.clone(), TicketsSort::default(), Pagination::new(None, None))
            .await
            .unwrap();
        let count = repository.count(query).await.unwrap();

        destroy_test_database(database).await;

        let mut ids = tickets.iter().map(|ticket| ticket.id).collect::<Vec<_>>();
        ids.sort();
        let mut expected = vec![created.id, assigned.id];
        expected.sort();
        assert_eq!(ids, expected);
        assert_eq!(count, 2);
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn find_summaries_skips_missing() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let ticket = repository.insert(new_ticket(ObjectId::new())).await.unwrap();
        let summaries = repository
            .find_summaries(vec![ObjectId::new(), ticket.id])
            .await
            .unwrap();

        destroy_test_database(database).await;

        assert_eq!(
            summaries,
            vec![TicketSummary {
                id: ticket.id,
                title: "Laptop won't boot".to_string(),
                customer: "Marketing".to_string(),
                status: TicketStatus::Open,
                priority: TicketPriority::High,
            }]
        );
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn update_task_toggles() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let user_id = ObjectId::new();
        let ticket = repository.insert(new_ticket(user_id)).await.unwrap();
        let mut task = ticket.tasks[0].clone();
        task.completed = true;
        task.completed_at = Some(OffsetDateTime::now_utc());
        task.completed_by = Some(user_id);

        repository.update_task(ticket.id, task.clone()).await.unwrap();
        let found = repository.find(ticket.id).await.unwrap().unwrap();

        destroy_test_database(database).await;

        assert!(found.tasks[0].completed);
        assert_eq!(found.tasks[0].completed_by, Some(user_id));
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn pull_task_nonexistent() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let ticket = repository.insert(new_ticket(ObjectId::new())).await.unwrap();
        let result = repository.pull_task(ticket.id, ObjectId::new()).await;

        destroy_test_database(database).await;

        assert!(matches!(result, Err(Error::NoDocumentUpdated)));
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn push_comment_nonexistent_ticket() {
        let database = create_test_database().await;
        let repository = TicketsRepositoryImpl::new(database.clone()).await.unwrap();

        let comment = Comment {
            id: ObjectId::new(),
            text: "On it".to_string(),
            user: ObjectId::new(),
            created_at: OffsetDateTime::now_utc(),
        };
        let result = repository.push_comment(ObjectId::new(), comment).await;

        destroy_test_database(database).await;

        assert!(matches!(result, Err(Error::NoDocumentUpdated)));
    }
}
