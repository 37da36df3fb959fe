use serde::{Deserialize, Serialize};

/// The appointment types a visitor can book online.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    #[default]
    Consultation,
    FollowUp,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Consultation, Service::FollowUp];

    pub fn title(&self) -> &'static str {
        match self {
            Service::Consultation => "In-Person Consultation",
            Service::FollowUp => "Follow-up Session",
        }
    }

    pub fn duration_minutes(&self) -> i32 {
        match self {
            Service::Consultation => 50,
            Service::FollowUp => 30,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Service::Consultation => {
                "Full assessment with a physiotherapist and a personalised treatment plan."
            }
            Service::FollowUp => "Progress review and continued treatment for existing patients.",
        }
    }

    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            id: *self,
            title: self.title(),
            duration_minutes: self.duration_minutes(),
            description: self.description(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub id: Service,
    pub title: &'static str,
    pub duration_minutes: i32,
    pub description: &'static str,
}
