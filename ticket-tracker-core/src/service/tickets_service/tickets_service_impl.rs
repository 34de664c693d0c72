use super::{lifecycle, TicketsService};
use crate::{
    auth::{access_policy, Caller},
    dto::{
        input::{self, Pagination},
        output, TicketStatus,
    },
    error::Error,
    repository::{
        self, Comment, NewTicket, Task, Ticket, TicketChanges, TicketsQuery, TicketsRepository,
        TicketsSort, UsersRepository,
    },
    service::{references, validation},
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::{collections::BTreeSet, sync::Arc};
use time::OffsetDateTime;

const TICKET_NOT_FOUND: &str = "ticket not found";
const TASK_NOT_FOUND: &str = "task not found";

pub struct TicketsServiceImpl {
    tickets_repository: Arc<dyn TicketsRepository>,
    users_repository: Arc<dyn UsersRepository>,
}

impl TicketsServiceImpl {
    pub fn new(
        tickets_repository: Arc<dyn TicketsRepository>,
        users_repository: Arc<dyn UsersRepository>,
    ) -> Self {
        Self {
            tickets_repository,
            users_repository,
        }
    }

    async fn find_existing(&self, id: ObjectId) -> Result<Ticket, Error> {
        self.tickets_repository
            .find(id)
            .await?
            .ok_or(Error::NotFound(TICKET_NOT_FOUND))
    }

    async fn find_modifiable(&self, caller: &Caller, id: ObjectId) -> Result<Ticket, Error> {
        let ticket = self.find_existing(id).await?;

        match access_policy::can_modify(caller, &ticket) {
            true => Ok(ticket),
            false => Err(Error::Forbidden("not allowed to modify this ticket")),
        }
    }

    async fn validate_assignee(
        &self,
        assigned_to: Option<Option<String>>,
    ) -> Result<Option<Option<ObjectId>>, Error> {
        let assigned_to = match assigned_to {
            Some(Some(assigned_to)) => assigned_to,
            Some(None) => return Ok(Some(None)),
            None => return Ok(None),
        };

        let assigned_to = ObjectId::parse_str(assigned_to)
            .map_err(|_| Error::Validation("assigned user not found"))?;
        if self.users_repository.find(assigned_to).await?.is_none() {
            return Err(Error::Validation("assigned user not found"));
        }

        Ok(Some(Some(assigned_to)))
    }

    fn tickets_query(caller: &Caller, filters: &input::TicketFilters) -> Result<TicketsQuery, Error> {
        let assigned_to = filters
            .assigned_to
            .as_deref()
            .map(ObjectId::parse_str)
            .transpose()
            .map_err(|_| Error::Validation("invalid assignedTo"))?;

        Ok(TicketsQuery {
            visible_to: lifecycle::visible_to(caller),
            status: filters.status,
            priority: filters.priority,
            assigned_to,
            search: filters.search.clone(),
        })
    }

    fn map_no_document(err: repository::Error, message: &'static str) -> Error {
        match err {
            repository::Error::NoDocumentUpdated => Error::NotFound(message),
            err => Error::Database(err),
        }
    }
}

#[async_trait]
impl TicketsService for TicketsServiceImpl {
    async fn find_tickets(
        &self,
        caller: Caller,
        filters: input::TicketFilters,
    ) -> Result<output::TicketPage, Error> {
        tracing::info!("finding tickets");
        tracing::trace!(?filters);

        let query = Self::tickets_query(&caller, &filters)?;
        let sort = match filters.sort_by.as_deref() {
            Some(sort_by) => {
                TicketsSort::parse(sort_by).ok_or(Error::Validation("invalid sortBy"))?
            }
            None => TicketsSort::default(),
        };
        let pagination = Pagination::new(filters.page, filters.limit);

        let tickets = self
            .tickets_repository
            .find_many(query.clone(), sort, pagination)
            .await?;
        let total = self.tickets_repository.count(query).await?;
        tracing::info!(count = tickets.len(), total, "found tickets");

        let tickets = references::tickets_output(self.users_repository.as_ref(), tickets).await?;

        Ok(output::TicketPage {
            page: output::Page::new(tickets.len(), total, pagination),
            tickets,
        })
    }

    async fn find_ticket(&self, caller: Caller, id: ObjectId) -> Result<output::Ticket, Error> {
        tracing::info!(%id, "finding ticket");

        let ticket = self.find_existing(id).await?;
        if !access_policy::can_view(&caller, &ticket) {
            return Err(Error::Forbidden("not allowed to view this ticket"));
        }

        references::ticket_output(self.users_repository.as_ref(), ticket).await
    }

    async fn create_ticket(
        &self,
        caller: Caller,
        ticket: input::TicketCreate,
    ) -> Result<output::Ticket, Error> {
        tracing::info!("creating ticket");
        tracing::trace!(?ticket);

        let now = OffsetDateTime::now_utc();
        let title = validation::title(&ticket.title)?;
        let customer = validation::customer(&ticket.customer)?;
        let description = validation::description(&ticket.description)?;
        let tasks = ticket
            .tasks
            .iter()
            .map(|task| validation::task_text(&task.text).map(|text| Task::new(text, now)))
            .collect::<Result<Vec<_>, _>>()?;
        let status = ticket.status.unwrap_or_default();
        let closed =
            lifecycle::closing_stamp(TicketStatus::Open, None, Some(status), caller.id, now);

        let ticket = self
            .tickets_repository
            .insert(NewTicket {
                title,
                customer,
                status,
                priority: ticket.priority.unwrap_or_default(),
                description,
                created_by: caller.id,
                tasks,
                closed_at: closed.map(|(closed_at, _)| closed_at),
                closed_by: closed.map(|(_, closed_by)| closed_by),
                created_at: now,
            })
            .await?;
        tracing::info!(id = %ticket.id, "created ticket");

        references::ticket_output(self.users_repository.as_ref(), ticket).await
    }

    async fn update_ticket(
        &self,
        caller: Caller,
        id: ObjectId,
        ticket: input::TicketUpdate,
    ) -> Result<output::Ticket, Error> {
        tracing::info!(%id, "updating ticket");
        tracing::trace!(?ticket);

        let stored = self.find_modifiable(&caller, id).await?;

        let changes = TicketChanges {
            title: ticket.title.as_deref().map(validation::title).transpose()?,
            customer: ticket
                .customer
                .as_deref()
                .map(validation::customer)
                .transpose()?,
            description: ticket
                .description
                .as_deref()
                .map(validation::description)
                .transpose()?,
            status: ticket.status,
            priority: ticket.priority,
            assigned_to: self.validate_assignee(ticket.assigned_to).await?,
            closed: lifecycle::closing_stamp(
                stored.status,
                stored.closed_at,
                ticket.status,
                caller.id,
                OffsetDateTime::now_utc(),
            ),
        };
        let newly_assigned = lifecycle::newly_assigned(stored.assigned_to, changes.assigned_to);

        let updated = self
            .tickets_repository
            .update(id, changes)
            .await?
            .ok_or(Error::NotFound(TICKET_NOT_FOUND))?;
        tracing::info!("updated ticket");

        if let Some(assignee) = newly_assigned {
            match self
                .users_repository
                .add_assigned_ticket(assignee, updated.id)
                .await
            {
                Ok(()) => tracing::info!(%assignee, "added ticket to assigned tickets"),
                Err(err) => {
                    tracing::error!(%assignee, %err, "failed to add ticket to assigned tickets")
                }
            }
        }

        references::ticket_output(self.users_repository.as_ref(), updated).await
    }

    async fn delete_ticket(&self, caller: Caller, id: ObjectId) -> Result<(), Error> {
        tracing::info!(%id, "deleting ticket");

        let ticket = self.find_existing(id).await?;
        if !access_policy::can_delete(&caller, &ticket) {
            return Err(Error::Forbidden(
                "only admin, manager or creator can delete the ticket",
            ));
        }

        if !self.tickets_repository.delete(id).await? {
            return Err(Error::NotFound(TICKET_NOT_FOUND));
        }
        tracing::info!("deleted ticket");

        if let Some(assignee) = ticket.assigned_to {
            match self
                .users_repository
                .remove_assigned_ticket(assignee, id)
                .await
            {
                Ok(()) => tracing::info!(%assignee, "removed ticket from assigned tickets"),
                Err(err) => {
                    tracing::error!(%assignee, %err, "failed to remove ticket from assigned tickets")
                }
            }
        }

        Ok(())
    }

    async fn add_task(
        &self,
        caller: Caller,
        id: ObjectId,
        task: input::TaskCreate,
    ) -> Result<output::Task, Error> {
        tracing::info!(%id, "adding task");

        let text = validation::task_text(&task.text)?;
        self.find_modifiable(&caller, id).await?;

        let task = Task::new(text, OffsetDateTime::now_utc());
        self.tickets_repository
            .push_task(id, task.clone())
            .await
            .map_err(|err| Self::map_no_document(err, TICKET_NOT_FOUND))?;
        tracing::info!(task_id = %task.id, "added task");

        Ok(output::Task::new(task, &output::UserReferences::default()))
    }

    async fn update_task(
        &self,
        caller: Caller,
        id: ObjectId,
        task_id: ObjectId,
        task: input::TaskUpdate,
    ) -> Result<output::Task, Error> {
        tracing::info!(%id, %task_id, "updating task");
        tracing::trace!(?task);

        let text = task.text.as_deref().map(validation::task_text).transpose()?;
        let ticket = self.find_modifiable(&caller, id).await?;
        let mut stored = ticket
            .task(task_id)
            .cloned()
            .ok_or(Error::NotFound(TASK_NOT_FOUND))?;

        lifecycle::apply_task_update(
            &mut stored,
            text,
            task.completed,
            caller.id,
            OffsetDateTime::now_utc(),
        );

        self.tickets_repository
            .update_task(id, stored.clone())
            .await
            .map_err(|err| Self::map_no_document(err, TASK_NOT_FOUND))?;
        tracing::info!("updated task");

        let users = references::user_references(
            self.users_repository.as_ref(),
            stored.completed_by.into_iter().collect(),
        )
        .await?;

        Ok(output::Task::new(stored, &users))
    }

    async fn delete_task(
        &self,
        caller: Caller,
        id: ObjectId,
        task_id: ObjectId,
    ) -> Result<(), Error> {
        tracing::info!(%id, %task_id, "deleting task");

        self.find_modifiable(&caller, id).await?;

        self.tickets_repository
            .pull_task(id, task_id)
            .await
            .map_err(|err| Self::map_no_document(err, TASK_NOT_FOUND))?;
        tracing::info!("deleted task");

        Ok(())
    }

    async fn add_comment(
        &self,
        caller: Caller,
        id: ObjectId,
        comment: input::CommentCreate,
    ) -> Result<output::Comment, Error> {
        tracing::info!(%id, "adding comment");

        let text = validation::comment_text(&comment.text)?;
        self.find_modifiable(&caller, id).await?;

        let comment = Comment {
            id: ObjectId::new(),
            text,
            user: caller.id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tickets_repository
            .push_comment(id, comment.clone())
            .await
            .map_err(|err| Self::map_no_document(err, TICKET_NOT_FOUND))?;
        tracing::info!(comment_id = %comment.id, "added comment");

        let users = references::user_references(
            self.users_repository.as_ref(),
            BTreeSet::from([comment.user]),
        )
        .await?;

        Ok(output::Comment::new(comment, &users))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        auth::Role,
        dto::TicketPriority,
        repository::{MockTicketsRepository, MockUsersRepository, User, UserSummary},
    };

    fn caller(role: Role) -> Caller {
        Caller {
            id: ObjectId::new(),
            role,
        }
    }

    fn stored_ticket(created_by: ObjectId, assigned_to: Option<ObjectId>) -> Ticket {
        let now = OffsetDateTime::now_utc();
        Ticket {
            id: ObjectId::new(),
            title: "Monitor flickers".to_string(),
            customer: "Finance".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            description: "Second monitor flickers randomly".to_string(),
            created_by,
            assigned_to,
            tasks: vec![Task::new("Swap cable".to_string(), now)],
            comments: Vec::new(),
            closed_at: None,
            closed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_user(id: ObjectId) -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "hashed".to_string(),
            role: Role::User,
            department: "IT Support".to_string(),
            assigned_tickets: Vec::new(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn user_summary(id: ObjectId) -> UserSummary {
        UserSummary {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    fn users_known(users_repository: &mut MockUsersRepository) {
        users_repository
            .expect_find_summaries()
            .returning(|ids| Ok(ids.into_iter().map(user_summary).collect()));
    }

    fn users_repository_known() -> MockUsersRepository {
        let mut users_repository = MockUsersRepository::new();
        users_known(&mut users_repository);
        users_repository
    }

    fn apply(mut ticket: Ticket, changes: TicketChanges) -> Ticket {
        if let Some(status) = changes.status {
            ticket.status = status;
        }
        if let Some(assigned_to) = changes.assigned_to {
            ticket.assigned_to = assigned_to;
        }
        if let Some((closed_at, closed_by)) = changes.closed {
            ticket.closed_at = Some(closed_at);
            ticket.closed_by = Some(closed_by);
        }
        ticket
    }

    fn service(
        tickets_repository: MockTicketsRepository,
        users_repository: MockUsersRepository,
    ) -> TicketsServiceImpl {
        TicketsServiceImpl::new(Arc::new(tickets_repository), Arc::new(users_repository))
    }

    fn any_database_error() -> repository::Error {
        repository::Error::Mongo(
            mongodb::error::ErrorKind::Custom(Arc::new("any database error")).into(),
        )
    }

    #[tokio::test]
    async fn find_tickets_user_restricted_to_own() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find_many()
            .withf(move |query, _, _| query.visible_to == Some(caller_id))
            .returning(|_, _, _| Ok(Vec::new()));
        tickets_repository
            .expect_count()
            .withf(move |query| query.visible_to == Some(caller_id))
            .returning(|_| Ok(0));

        let page = service(tickets_repository, MockUsersRepository::new())
            .find_tickets(caller, input::TicketFilters::default())
            .await
            .unwrap();

        assert_eq!(page.page.total, 0);
        assert_eq!(page.page.current_page, 1);
    }

    #[tokio::test]
    async fn find_tickets_manager_sees_all() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find_many()
            .withf(|query, sort, _| query.visible_to.is_none() && *sort == TicketsSort::default())
            .returning(|_, _, _| Ok(Vec::new()));
        tickets_repository.expect_count().returning(|_| Ok(0));

        let result = service(tickets_repository, MockUsersRepository::new())
            .find_tickets(caller(Role::Manager), input::TicketFilters::default())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn find_tickets_invalid_sort_by() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository.expect_find_many().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .find_tickets(
                caller(Role::Admin),
                input::TicketFilters {
                    sort_by: Some("password:desc".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn find_ticket_forbidden() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));

        let result = service(tickets_repository, MockUsersRepository::new())
            .find_ticket(caller(Role::User), ObjectId::new())
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn find_ticket_not_exist() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository.expect_find().returning(|_| Ok(None));

        let result = service(tickets_repository, MockUsersRepository::new())
            .find_ticket(caller(Role::Admin), ObjectId::new())
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn find_tickets_references_loaded_once() {
        let creator = ObjectId::new();
        let assignee = ObjectId::new();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository.expect_find_many().returning(move |_, _, _| {
            Ok(vec![
                stored_ticket(creator, Some(assignee)),
                stored_ticket(creator, None),
            ])
        });
        tickets_repository.expect_count().returning(|_| Ok(2));
        let mut users_repository = MockUsersRepository::new();
        users_repository
            .expect_find_summaries()
            .withf(move |ids| ids.len() == 2 && ids.contains(&creator) && ids.contains(&assignee))
            .times(1)
            .returning(|ids| Ok(ids.into_iter().map(user_summary).collect()));

        let page = service(tickets_repository, users_repository)
            .find_tickets(caller(Role::Admin), input::TicketFilters::default())
            .await
            .unwrap();

        assert_eq!(page.tickets.len(), 2);
        assert_eq!(
            page.tickets[0].assigned_to.as_ref().map(|user| user.name.as_str()),
            Some("John Doe")
        );
        assert_eq!(page.tickets[1].assigned_to, None);
    }

    #[tokio::test]
    async fn find_ticket_deleted_creator_rendered_empty() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_ticket(ObjectId::new(), Some(caller_id)))));
        let mut users_repository = MockUsersRepository::new();
        users_repository
            .expect_find_summaries()
            .returning(move |_| Ok(vec![user_summary(caller_id)]));

        let ticket = service(tickets_repository, users_repository)
            .find_ticket(caller, ObjectId::new())
            .await
            .unwrap();

        assert_eq!(ticket.created_by, None);
        assert_eq!(
            ticket.assigned_to.map(|user| user.email),
            Some("john@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn create_ticket_defaults() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_insert()
            .withf(move |ticket| {
                ticket.created_by == caller_id
                    && ticket.status == TicketStatus::Open
                    && ticket.priority == TicketPriority::Medium
                    && ticket.closed_at.is_none()
                    && ticket.title == "Printer jammed"
            })
            .returning(|ticket| {
                let mut stored = stored_ticket(ticket.created_by, None);
                stored.title = ticket.title;
                stored.tasks = ticket.tasks;
                Ok(stored)
            });

        let ticket = service(tickets_repository, users_repository_known())
            .create_ticket(
                caller,
                input::TicketCreate {
                    title: "  Printer jammed ".to_string(),
                    customer: "Accounting".to_string(),
                    description: "Paper stuck in tray 2".to_string(),
                    status: None,
                    priority: None,
                    tasks: vec![input::TaskCreate {
                        text: "Open tray".to_string(),
                    }],
                },
            )
            .await
            .unwrap();

        assert_eq!(
            ticket.created_by.map(|user| user.id),
            Some(caller_id.to_hex())
        );
        assert_eq!(ticket.tasks.len(), 1);
        assert_eq!(ticket.task_completion_percentage, 0);
    }

    #[tokio::test]
    async fn create_ticket_short_title() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository.expect_insert().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .create_ticket(
                caller(Role::User),
                input::TicketCreate {
                    title: "ab".to_string(),
                    customer: "Accounting".to_string(),
                    description: "Paper stuck in tray 2".to_string(),
                    status: None,
                    priority: None,
                    tasks: Vec::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_ticket_close_stamps_once() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let stored = stored_ticket(caller.id, None);
        let stored_clone = stored.clone();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_clone.clone())));
        tickets_repository
            .expect_update()
            .withf(move |_, changes| {
                matches!(changes.closed, Some((_, closed_by)) if closed_by == caller_id)
            })
            .returning(move |_, changes| Ok(Some(apply(stored.clone(), changes))));

        let ticket = service(tickets_repository, users_repository_known())
            .update_ticket(
                caller,
                ObjectId::new(),
                input::TicketUpdate {
                    status: Some(TicketStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(ticket.status, TicketStatus::Closed);
        assert!(ticket.closed_at.is_some());
        assert_eq!(
            ticket.closed_by.map(|user| user.id),
            Some(caller_id.to_hex())
        );
    }

    #[tokio::test]
    async fn update_ticket_already_closed_keeps_stamp() {
        let caller = caller(Role::Admin);
        let mut stored = stored_ticket(ObjectId::new(), None);
        stored.status = TicketStatus::Closed;
        stored.closed_at = Some(OffsetDateTime::now_utc());
        stored.closed_by = Some(ObjectId::new());
        let stored_clone = stored.clone();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_clone.clone())));
        tickets_repository
            .expect_update()
            .withf(|_, changes| changes.closed.is_none())
            .returning(move |_, changes| Ok(Some(apply(stored.clone(), changes))));

        let result = service(tickets_repository, users_repository_known())
            .update_ticket(
                caller,
                ObjectId::new(),
                input::TicketUpdate {
                    status: Some(TicketStatus::Closed),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_ticket_forbidden() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository.expect_update().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .update_ticket(
                caller(Role::User),
                ObjectId::new(),
                input::TicketUpdate::default(),
            )
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_ticket_assignee_not_exist() {
        let caller = caller(Role::Manager);
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository.expect_update().never();
        let mut users_repository = MockUsersRepository::new();
        users_repository.expect_find().returning(|_| Ok(None));

        let result = service(tickets_repository, users_repository)
            .update_ticket(
                caller,
                ObjectId::new(),
                input::TicketUpdate {
                    assigned_to: Some(Some(ObjectId::new().to_hex())),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_ticket_assigns_and_adds_to_assigned_tickets() {
        let assignee = ObjectId::new();
        let stored = stored_ticket(ObjectId::new(), None);
        let ticket_id = stored.id;
        let stored_clone = stored.clone();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_clone.clone())));
        tickets_repository
            .expect_update()
            .returning(move |_, changes| Ok(Some(apply(stored.clone(), changes))));
        let mut users_repository = MockUsersRepository::new();
        users_repository
            .expect_find()
            .returning(|id| Ok(Some(stored_user(id))));
        users_repository
            .expect_add_assigned_ticket()
            .withf(move |user_id, id| *user_id == assignee && *id == ticket_id)
            .times(1)
            .returning(|_, _| Ok(()));
        users_known(&mut users_repository);

        let ticket = service(tickets_repository, users_repository)
            .update_ticket(
                caller(Role::Manager),
                ticket_id,
                input::TicketUpdate {
                    assigned_to: Some(Some(assignee.to_hex())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(
            ticket.assigned_to.map(|user| user.id),
            Some(assignee.to_hex())
        );
    }

    #[tokio::test]
    async fn update_ticket_assigned_tickets_failure_still_succeeds() {
        let assignee = ObjectId::new();
        let stored = stored_ticket(ObjectId::new(), None);
        let stored_clone = stored.clone();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_clone.clone())));
        tickets_repository
            .expect_update()
            .times(1)
            .returning(move |_, changes| Ok(Some(apply(stored.clone(), changes))));
        let mut users_repository = MockUsersRepository::new();
        users_repository
            .expect_find()
            .returning(|id| Ok(Some(stored_user(id))));
        users_repository
            .expect_add_assigned_ticket()
            .returning(|_, _| Err(any_database_error()));
        users_known(&mut users_repository);

        let result = service(tickets_repository, users_repository)
            .update_ticket(
                caller(Role::Admin),
                ObjectId::new(),
                input::TicketUpdate {
                    assigned_to: Some(Some(assignee.to_hex())),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn update_ticket_unassign() {
        let stored = stored_ticket(ObjectId::new(), Some(ObjectId::new()));
        let stored_clone = stored.clone();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_clone.clone())));
        tickets_repository
            .expect_update()
            .withf(|_, changes| changes.assigned_to == Some(None))
            .returning(move |_, changes| Ok(Some(apply(stored.clone(), changes))));
        let mut users_repository = MockUsersRepository::new();
        users_repository.expect_add_assigned_ticket().never();
        users_known(&mut users_repository);

        let ticket = service(tickets_repository, users_repository)
            .update_ticket(
                caller(Role::Admin),
                ObjectId::new(),
                input::TicketUpdate {
                    assigned_to: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(ticket.assigned_to, None);
    }

    #[tokio::test]
    async fn delete_ticket_assignee_forbidden() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_ticket(ObjectId::new(), Some(caller_id)))));
        tickets_repository.expect_delete().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .delete_ticket(caller, ObjectId::new())
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn delete_ticket_creator_removes_from_assigned_tickets() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let assignee = ObjectId::new();
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_ticket(caller_id, Some(assignee)))));
        tickets_repository.expect_delete().returning(|_| Ok(true));
        let mut users_repository = MockUsersRepository::new();
        users_repository
            .expect_remove_assigned_ticket()
            .withf(move |user_id, _| *user_id == assignee)
            .times(1)
            .returning(|_, _| Err(any_database_error()));

        let result = service(tickets_repository, users_repository)
            .delete_ticket(caller, ObjectId::new())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn add_task_ok() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored_ticket(caller_id, None))));
        tickets_repository
            .expect_push_task()
            .withf(|_, task| task.text == "Order new cable" && !task.completed)
            .returning(|_, _| Ok(()));

        let task = service(tickets_repository, MockUsersRepository::new())
            .add_task(
                caller,
                ObjectId::new(),
                input::TaskCreate {
                    text: " Order new cable ".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(task.text, "Order new cable");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn update_task_complete() {
        let caller = caller(Role::User);
        let caller_id = caller.id;
        let stored = stored_ticket(ObjectId::new(), Some(caller.id));
        let task_id = stored.tasks[0].id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(move |_| Ok(Some(stored.clone())));
        tickets_repository
            .expect_update_task()
            .withf(move |_, task| task.completed && task.completed_by == Some(caller_id))
            .returning(|_, _| Ok(()));

        let task = service(tickets_repository, users_repository_known())
            .update_task(
                caller,
                ObjectId::new(),
                task_id,
                input::TaskUpdate {
                    text: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap();

        assert!(task.completed);
        assert!(task.completed_at.is_some());
        assert_eq!(
            task.completed_by.map(|user| user.id),
            Some(caller_id.to_hex())
        );
    }

    #[tokio::test]
    async fn update_task_not_exist() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository.expect_update_task().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .update_task(
                caller(Role::Admin),
                ObjectId::new(),
                ObjectId::new(),
                input::TaskUpdate::default(),
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(TASK_NOT_FOUND))));
    }

    #[tokio::test]
    async fn delete_task_not_exist() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository
            .expect_pull_task()
            .returning(|_, _| Err(repository::Error::NoDocumentUpdated));

        let result = service(tickets_repository, MockUsersRepository::new())
            .delete_task(caller(Role::Manager), ObjectId::new(), ObjectId::new())
            .await;

        assert!(matches!(result, Err(Error::NotFound(TASK_NOT_FOUND))));
    }

    #[tokio::test]
    async fn add_comment_authored_by_caller() {
        let caller = caller(Role::Manager);
        let caller_id = caller.id;
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository
            .expect_push_comment()
            .withf(move |_, comment| comment.user == caller_id)
            .returning(|_, _| Ok(()));

        let comment = service(tickets_repository, users_repository_known())
            .add_comment(
                caller,
                ObjectId::new(),
                input::CommentCreate {
                    text: "Replacement ordered".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(comment.user.map(|user| user.id), Some(caller_id.to_hex()));
        assert_eq!(comment.text, "Replacement ordered");
    }

    #[tokio::test]
    async fn add_comment_forbidden() {
        let mut tickets_repository = MockTicketsRepository::new();
        tickets_repository
            .expect_find()
            .returning(|_| Ok(Some(stored_ticket(ObjectId::new(), None))));
        tickets_repository.expect_push_comment().never();

        let result = service(tickets_repository, MockUsersRepository::new())
            .add_comment(
                caller(Role::User),
                ObjectId::new(),
                input::CommentCreate {
                    text: "Any update?".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
    }
}
