use chrono::{Duration, Utc};

use crate::{
    domain::{
        chat::Chat,
        expert::{Expert, ExpertId, Gender},
        message::Message,
    },
    infra::error::AppError,
    usecases::contracts::{SeedData, SeedSource},
};

/// Built-in roster used when no seed file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSeedSource;

impl SeedSource for FixtureSeedSource {
    fn load(&self) -> Result<SeedData, AppError> {
        let experts = fixture_experts();
        let chats = fixture_chats(&experts);

        Ok(SeedData { experts, chats })
    }
}

fn expert(
    name: &str,
    gender: Gender,
    specialties: &[&str],
    bio: &str,
    rate_per_minute: f64,
    image: &str,
) -> Expert {
    Expert {
        id: ExpertId::new(),
        name: name.to_owned(),
        gender,
        specialties: specialties.iter().map(|s| (*s).to_owned()).collect(),
        bio: bio.to_owned(),
        rate_per_minute,
        image: Some(image.to_owned()),
    }
}

fn fixture_experts() -> Vec<Expert> {
    vec![
        expert(
            "Dr. Kavin Guleria",
            Gender::Male,
            &["Psychiatry", "Anxiety", "Depression"],
            "Experienced psychiatrist focusing on anxiety and mood disorders.",
            220.0,
            "kavin",
        ),
        expert(
            "Dr. Aisha Verma",
            Gender::Female,
            &["Psychiatry", "Anxiety", "Depression"],
            "Board-certified psychiatrist with over a decade helping adults manage mood and anxiety disorders.",
            200.0,
            "expert_aisha",
        ),
        expert(
            "Dr. Rohan Mehta",
            Gender::Male,
            &["Child Psychiatry", "ADHD"],
            "Child and adolescent psychiatrist focused on ADHD and behavioural health.",
            180.0,
            "expert_rohan",
        ),
        expert(
            "Dr. Neha Kapoor",
            Gender::Female,
            &["Therapy", "CBT", "Trauma"],
            "Therapist specialising in CBT and trauma-informed care.",
            150.0,
            "expert_neha",
        ),
        expert(
            "Dr. Vikram Singh",
            Gender::Male,
            &["Addiction", "Recovery"],
            "Addiction specialist supporting recovery journeys.",
            220.0,
            "expert_vikram",
        ),
        expert(
            "Dr. Sara Kaur",
            Gender::Female,
            &["Relationship", "Family Therapy"],
            "Helps couples and families improve communication and resilience.",
            160.0,
            "expert_sara",
        ),
    ]
}

fn fixture_chats(experts: &[Expert]) -> Vec<Chat> {
    let Some(expert) = experts.first() else {
        return Vec::new();
    };

    let now = Utc::now();
    vec![Chat::seeded(
        expert.clone(),
        vec![
            Message::from_expert(
                "Hello, how can I help you today?",
                now - Duration::seconds(3600),
            ),
            Message::from_user(
                "I have been feeling anxious lately.",
                now - Duration::seconds(3500),
            ),
            Message::from_expert(
                "Thank you for sharing. Can you describe when it started?",
                now - Duration::seconds(3400),
            ),
        ],
    )]
}
