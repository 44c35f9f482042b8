//! Mail Notifications
//!
//! Composes the plain-text notices and hands them to a [`Mailer`]. Delivery
//! problems are logged and swallowed: a ticket or request is never rejected
//! because mail is down.

use std::sync::Arc;

use platform::mail::{Mailer, OutgoingMail};

use crate::application::config::HelpdeskConfig;
use crate::domain::entity::{RequestType, ServiceRequest, Ticket};

pub struct Notifier<M>
where
    M: Mailer + Sync,
{
    mailer: Arc<M>,
    config: Arc<HelpdeskConfig>,
}

impl<M> Notifier<M>
where
    M: Mailer + Sync,
{
    pub fn new(mailer: Arc<M>, config: Arc<HelpdeskConfig>) -> Self {
        Self { mailer, config }
    }

    /// Confirmation to the ticket owner.
    pub async fn ticket_created(&self, owner_email: &str, owner_name: &str, ticket: &Ticket) {
        let mail = ticket_created_mail(owner_email, owner_name, ticket);
        self.deliver(mail).await;
    }

    /// Confirmation to the requester (if an address was given) and a notice
    /// to the administrator (if one is configured).
    pub async fn request_submitted(&self, request: &ServiceRequest, request_type: &RequestType) {
        if let Some(email) = &request.requester_email {
            let mail = request_confirmation_mail(email.as_str(), request, request_type);
            self.deliver(mail).await;
        }

        match &self.config.admin_email {
            Some(admin) => self.deliver(request_admin_mail(admin, request, request_type)).await,
            None => tracing::debug!("No administrator address configured, notice skipped"),
        }
    }

    async fn deliver(&self, mail: OutgoingMail) {
        let to = mail.to.clone();
        if let Err(e) = self.mailer.send(mail).await {
            tracing::warn!(error = %e, to = %to, "Notification not delivered");
        }
    }
}

fn ticket_created_mail(owner_email: &str, owner_name: &str, ticket: &Ticket) -> OutgoingMail {
    OutgoingMail::new(
        owner_email,
        format!("New ticket created: {}", ticket.title),
        format!(
            "Hello {owner_name},\n\n\
             We have received your ticket with the following details:\n\n\
             Title: {}\n\
             Description: {}\n\
             Ticket number: {}\n\n\
             Thank you for contacting us.",
            ticket.title, ticket.description, ticket.identifier
        ),
    )
}

fn request_confirmation_mail(
    to: &str,
    request: &ServiceRequest,
    request_type: &RequestType,
) -> OutgoingMail {
    OutgoingMail::new(
        to,
        format!("Request submitted: {}", request_type.name),
        format!(
            "Hello {},\n\n\
             Your request has been registered with the following details:\n\n\
             Type: {}\n\
             National ID: {}\n\
             Position: {}\n\n\
             Thank you.",
            request.requester_name, request_type.name, request.national_id, request.position
        ),
    )
}

fn request_admin_mail(to: &str, request: &ServiceRequest, request_type: &RequestType) -> OutgoingMail {
    OutgoingMail::new(
        to,
        "New request submitted",
        format!(
            "A new request has been submitted:\n\n\
             Name: {}\n\
             National ID: {}\n\
             Position: {}\n\
             Type: {}",
            request.requester_name, request.national_id, request.position, request_type.name
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::AccountId;

    #[test]
    fn test_ticket_mail_mentions_identifier() {
        let ticket = Ticket::open(AccountId::new(), "VPN down".into(), "No tunnel".into(), None);
        let mail = ticket_created_mail("a@x.com", "Ana", &ticket);

        assert_eq!(mail.to, "a@x.com");
        assert_eq!(mail.subject, "New ticket created: VPN down");
        assert!(mail.body.starts_with("Hello Ana,"));
        assert!(mail.body.contains(ticket.identifier.as_str()));
        assert!(mail.body.contains("No tunnel"));
    }
}
