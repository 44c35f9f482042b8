//! Ticket Service
//!
//! Tickets are private to the account that raised them: another caller gets
//! `NotFound`, exactly as if the ticket did not exist.

use std::sync::Arc;

use auth::CallerIdentity;
use auth::domain::repository::AccountRepository;
use kernel::id::{IncidentTypeId, TechnicianId, TicketId};
use kernel::text;
use platform::mail::Mailer;

use crate::application::notifications::Notifier;
use crate::domain::entity::Ticket;
use crate::domain::entity::ticket::TicketChanges;
use crate::domain::repository::{IncidentTypeRepository, TechnicianRepository, TicketRepository};
use crate::domain::value_object::ticket_status::TicketStatus;
use crate::error::{HelpdeskError, HelpdeskResult};

const TITLE_MAX_LENGTH: usize = 200;
const DESCRIPTION_MAX_LENGTH: usize = 10_000;

#[derive(Debug, Clone, Default)]
pub struct TicketInput {
    pub title: String,
    pub description: String,
    pub incident_type_id: Option<IncidentTypeId>,
}

#[derive(Debug, Clone, Default)]
pub struct TicketUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub technician_id: Option<TechnicianId>,
}

pub struct TicketService<R, A, M>
where
    R: TicketRepository + TechnicianRepository + IncidentTypeRepository,
    A: AccountRepository,
    M: Mailer + Sync,
{
    repo: Arc<R>,
    accounts: Arc<A>,
    notifier: Notifier<M>,
}

impl<R, A, M> TicketService<R, A, M>
where
    R: TicketRepository + TechnicianRepository + IncidentTypeRepository + Sync,
    A: AccountRepository + Sync,
    M: Mailer + Sync,
{
    pub fn new(repo: Arc<R>, accounts: Arc<A>, notifier: Notifier<M>) -> Self {
        Self {
            repo,
            accounts,
            notifier,
        }
    }

    /// Open a ticket for the caller and mail them a confirmation.
    pub async fn create(&self, caller: &CallerIdentity, input: TicketInput) -> HelpdeskResult<Ticket> {
        let title = text::required("title", &input.title, TITLE_MAX_LENGTH)?;
        let description = text::required("description", &input.description, DESCRIPTION_MAX_LENGTH)?;

        if let Some(incident_type_id) = &input.incident_type_id
            && self.repo.find_incident_type(incident_type_id).await?.is_none()
        {
            return Err(HelpdeskError::UnknownReference("incident type"));
        }

        let ticket = Ticket::open(caller.user_id, title, description, input.incident_type_id);
        self.repo.create_ticket(&ticket).await?;

        tracing::info!(
            ticket_id = %ticket.ticket_id,
            identifier = %ticket.identifier,
            owner_id = %caller.user_id,
            "Ticket created"
        );

        let owner_name = match self.accounts.find_by_id(&caller.user_id).await {
            Ok(Some(account)) => account
                .profile
                .first_name
                .clone()
                .unwrap_or_else(|| account.display_name()),
            Ok(None) => caller.email.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Owner lookup failed, using token email");
                caller.email.clone()
            }
        };
        self.notifier
            .ticket_created(&caller.email, &owner_name, &ticket)
            .await;

        Ok(ticket)
    }

    pub async fn list(&self, caller: &CallerIdentity) -> HelpdeskResult<Vec<Ticket>> {
        self.repo.list_tickets_for_owner(&caller.user_id).await
    }

    pub async fn update(
        &self,
        caller: &CallerIdentity,
        id: &TicketId,
        input: TicketUpdateInput,
    ) -> HelpdeskResult<Ticket> {
        let mut ticket = self.owned_ticket(caller, id).await?;

        let status = match input.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<TicketStatus>()?),
        };

        if let Some(technician_id) = &input.technician_id
            && self.repo.find_technician(technician_id).await?.is_none()
        {
            return Err(HelpdeskError::UnknownReference("technician"));
        }

        ticket.apply_changes(TicketChanges {
            title: text::optional("title", input.title.as_deref(), TITLE_MAX_LENGTH)?,
            description: text::optional(
                "description",
                input.description.as_deref(),
                DESCRIPTION_MAX_LENGTH,
            )?,
            status,
            technician_id: input.technician_id,
        });
        self.repo.update_ticket(&ticket).await?;

        tracing::info!(ticket_id = %ticket.ticket_id, status = %ticket.status, "Ticket updated");
        Ok(ticket)
    }

    pub async fn delete(&self, caller: &CallerIdentity, id: &TicketId) -> HelpdeskResult<()> {
        let ticket = self.owned_ticket(caller, id).await?;
        self.repo.delete_ticket(&ticket.ticket_id).await?;

        tracing::info!(ticket_id = %ticket.ticket_id, "Ticket deleted");
        Ok(())
    }

    async fn owned_ticket(&self, caller: &CallerIdentity, id: &TicketId) -> HelpdeskResult<Ticket> {
        match self.repo.find_ticket(id).await? {
            Some(ticket) if ticket.is_owned_by(&caller.user_id) => Ok(ticket),
            Some(_) => {
                tracing::debug!(ticket_id = %id, caller = %caller.user_id, "Ticket owned by another account");
                Err(HelpdeskError::NotFound("Ticket"))
            }
            None => Err(HelpdeskError::NotFound("Ticket")),
        }
    }
}
