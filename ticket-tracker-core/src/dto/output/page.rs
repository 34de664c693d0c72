use super::{Ticket, User};
use crate::dto::input::Pagination;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub count: usize,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

impl Page {
    pub fn new(count: usize, total: u64, pagination: Pagination) -> Self {
        Self {
            count,
            total,
            total_pages: pagination.total_pages(total),
            current_page: pagination.page,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,

    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,

    #[serde(flatten)]
    pub page: Page,
}
