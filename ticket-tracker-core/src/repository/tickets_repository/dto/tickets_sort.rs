use bson::{doc, Document};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, strum::EnumString)]
pub enum TicketSortField {
    #[default]
    #[strum(serialize = "createdAt")]
    CreatedAt,
    #[strum(serialize = "updatedAt")]
    UpdatedAt,
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "priority")]
    Priority,
    #[strum(serialize = "customer")]
    Customer,
}

impl TicketSortField {
    fn document_field(&self) -> &'static str {
        match self {
            TicketSortField::CreatedAt => "created_at",
            TicketSortField::UpdatedAt => "updated_at",
            TicketSortField::Title => "title",
            TicketSortField::Status => "status",
            TicketSortField::Priority => "priority",
            TicketSortField::Customer => "customer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TicketsSort {
    pub field: TicketSortField,
    pub descending: bool,
}

impl Default for TicketsSort {
    fn default() -> Self {
        Self {
            field: TicketSortField::CreatedAt,
            descending: true,
        }
    }
}

impl TicketsSort {
    ///
    /// Parses `field`, `field:asc` or `field:desc`.
    /// Direction defaults to ascending when omitted.
    ///
    pub fn parse(value: &str) -> Option<Self> {
        let (field, direction) = match value.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (value, None),
        };

        let field = TicketSortField::from_str(field).ok()?;
        let descending = match direction {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(_) => return None,
        };

        Some(Self { field, descending })
    }

    pub fn to_document(&self) -> Document {
        let order = match self.descending {
            true => -1,
            false => 1,
        };

        let mut document = Document::new();
        document.insert(self.field.document_field(), order);
        document.insert("_id", order);

        document
    }
}
