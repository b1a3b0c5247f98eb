// src/db/seed.rs

// Dados de demonstração para o painel funcionar sem backend real.
// Datas relativas a "now" para que as regras de acompanhamento disparem.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::guest::{FollowUpStatus, Guest, GuestSource, GuestStatus, GuestVisit};

struct DemoGuest {
    name: &'static str,
    phone: &'static str,
    email: Option<&'static str>,
    source: GuestSource,
    first_visit_days_ago: i64,
    last_visit_days_ago: i64,
    visit_count: u32,
    status: GuestStatus,
    follow_up_status: FollowUpStatus,
}

const DEMO_GUESTS: &[DemoGuest] = &[
    DemoGuest {
        name: "Adaeze Okafor",
        phone: "+2348031234567",
        email: Some("adaeze.okafor@email.com"),
        source: GuestSource::WalkIn,
        first_visit_days_ago: 1,
        last_visit_days_ago: 1,
        visit_count: 1,
        status: GuestStatus::New,
        follow_up_status: FollowUpStatus::Pending,
    },
    DemoGuest {
        name: "Tunde Bakare",
        phone: "+2348059876543",
        email: None,
        source: GuestSource::Invitation,
        first_visit_days_ago: 35,
        last_visit_days_ago: 12,
        visit_count: 3,
        status: GuestStatus::Returning,
        follow_up_status: FollowUpStatus::Contacted,
    },
    DemoGuest {
        name: "Ngozi Eze",
        phone: "+2348024455667",
        email: Some("ngozi.eze@email.com"),
        source: GuestSource::Online,
        first_visit_days_ago: 90,
        last_visit_days_ago: 41,
        visit_count: 5,
        status: GuestStatus::Returning,
        follow_up_status: FollowUpStatus::Scheduled,
    },
    DemoGuest {
        name: "Ibrahim Musa",
        phone: "+2348067788990",
        email: None,
        source: GuestSource::Event,
        first_visit_days_ago: 120,
        last_visit_days_ago: 5,
        visit_count: 9,
        status: GuestStatus::Member,
        follow_up_status: FollowUpStatus::Completed,
    },
];

/// Visitantes de demonstração e uma visita (a última) para cada um.
pub fn demo_data(now: DateTime<Utc>) -> (Vec<Guest>, Vec<GuestVisit>) {
    let mut guests = Vec::with_capacity(DEMO_GUESTS.len());
    let mut visits = Vec::with_capacity(DEMO_GUESTS.len());

    for demo in DEMO_GUESTS {
        let guest = Guest {
            id: Uuid::new_v4(),
            name: demo.name.to_string(),
            phone: demo.phone.to_string(),
            email: demo.email.map(str::to_string),
            first_visit: now - Duration::days(demo.first_visit_days_ago),
            last_visit: now - Duration::days(demo.last_visit_days_ago),
            visit_count: demo.visit_count,
            status: demo.status,
            source: demo.source,
            follow_up_status: demo.follow_up_status,
            assigned_to: None,
            notes: None,
        };

        visits.push(GuestVisit {
            id: Uuid::new_v4(),
            guest_id: guest.id,
            event_id: "sunday-service".to_string(),
            event_name: "Sunday Service".to_string(),
            visit_date: guest.last_visit,
            checked_in_by: "usher-desk".to_string(),
        });
        guests.push(guest);
    }

    (guests, visits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::guest_service::generate_follow_up_tasks;

    #[test]
    fn test_demo_data_exercises_every_rule() {
        let now = Utc::now();
        let (guests, visits) = demo_data(now);

        assert_eq!(guests.len(), visits.len());
        assert!(guests.iter().all(|g| g.visit_count >= 1 && g.last_visit >= g.first_visit));

        let tasks = generate_follow_up_tasks(&guests, now);
        let types: Vec<&str> = tasks.iter().map(|t| t.task_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["Welcome Call/Message", "Membership Invitation", "Membership Invitation", "Re-engagement"]
        );
    }
}
