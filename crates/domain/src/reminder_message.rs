use crate::{
    notification::{Notification, NotificationSeverity},
    reminder::{RelatedType, Reminder, ReminderStep},
    shared::entity::ID,
};

/// Title, body and severity of one reminder notification.
///
/// `entity_title` is the human readable name of the watched entity. When it
/// could not be looked up the messages fall back to the generic noun of the
/// `RelatedType`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub title: String,
    pub message: String,
    pub severity: NotificationSeverity,
}

fn quoted(entity_title: Option<&str>) -> String {
    match entity_title {
        Some(title) if !title.trim().is_empty() => format!(" \"{}\"", title.trim()),
        _ => String::new(),
    }
}

fn hours_pending(count: i64) -> i64 {
    count * Reminder::INTERVAL_MILLIS / (1000 * 60 * 60)
}

impl ReminderMessage {
    /// Message for the `User` that has to act
    pub fn for_client(
        step: &ReminderStep,
        related_type: RelatedType,
        entity_title: Option<&str>,
    ) -> Self {
        let noun = related_type.noun();
        let entity = quoted(entity_title);
        match step {
            ReminderStep::Remind { count, severity } if *count <= 1 => Self {
                title: format!("Recordatorio: {} pendiente de confirmación", noun),
                message: format!("Tu {}{} está esperando tu confirmación.", noun, entity),
                severity: *severity,
            },
            ReminderStep::Remind { count, severity } => Self {
                title: format!("Urgente: {} sigue pendiente", noun),
                message: format!(
                    "Han pasado más de {} horas y tu {}{} sigue esperando tu confirmación.",
                    hours_pending(*count),
                    noun,
                    entity
                ),
                severity: *severity,
            },
            ReminderStep::Escalate { count } => Self {
                title: format!("Último aviso: {} sin confirmar", noun),
                message: format!(
                    "Tu {}{} lleva más de {} horas sin confirmación. Hemos avisado al equipo para que se ponga en contacto contigo.",
                    noun,
                    entity,
                    hours_pending(*count)
                ),
                severity: NotificationSeverity::Error,
            },
        }
    }

    /// Message for every active admin when a `Reminder` escalates
    pub fn for_admins(
        count: i64,
        related_type: RelatedType,
        entity_title: Option<&str>,
        client_name: &str,
    ) -> Self {
        Self {
            title: "Cliente sin respuesta".into(),
            message: format!(
                "{} no ha respondido a {} recordatorios sobre {}{}.",
                client_name,
                count,
                related_type.noun_with_article(),
                quoted(entity_title)
            ),
            severity: NotificationSeverity::Error,
        }
    }

    pub fn into_notification(self, user_id: ID, now: i64) -> Notification {
        Notification::new(user_id, self.title, self.message, self.severity, now)
    }
}
