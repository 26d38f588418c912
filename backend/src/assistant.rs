use chrono::{DateTime, Utc};
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("message must not be empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Deals,
    Trivia,
    Local,
    Charging,
    General,
}

const KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Deals, &["deal", "food", "shop", "discount"]),
    (Category::Trivia, &["trivia", "fact", "question", "game"]),
    (Category::Local, &["area", "local", "nearby", "around here"]),
    (Category::Charging, &["charging", "battery", "optimize", "tip"]),
];

impl Category {
    fn responses(self) -> &'static [&'static str] {
        match self {
            Category::Deals => &[
                "Great choice! There are deals within walking distance. The sandwich shop is a favourite: grab lunch and be back before your car is done charging.",
                "Those deals refresh every day! Partner businesses love EV drivers because charging leaves time to shop.",
                "Pro tip: stack the store deal with their loyalty rewards. Plenty of drivers do their weekly shopping while they charge.",
            ],
            Category::Trivia => &[
                "Fun fact: this district was one of the first planned shopping areas in America, and now it is leading the charge on EV infrastructure. Question: what year was the first Supercharger installed?",
                "Did you know? Public charging stations in the state have grown 40% year over year. Ready for another question?",
                "The average EV driver saves about $1,500 a year on fuel. This session costs roughly $7 versus $25 of gas for the same miles. Want to work out your annual savings?",
            ],
            Category::Local => &[
                "There is a walking trail right behind the plaza, perfect for stretching your legs during a charge.",
                "Within five minutes you have a grocery store, a local ice cream favourite and the public library with free WiFi. The area is very walkable.",
                "Local secret: the coffee shop around the corner gives 15% off if you mention you are charging next door.",
            ],
            Category::Charging => &[
                "At 150kW you will add about 200 miles of range in 25 minutes. For battery health, charge to 80% for daily driving and save 100% for long trips.",
                "Pro tip: precondition the battery by navigating to the charger in your car. Charging is fastest between 10% and 50%.",
                "You are getting the full charging rate. Charging slows after 80% to protect the battery, so if you only need 200 miles you could leave in 15 minutes.",
            ],
            Category::General => &[
                "I'm here to make your charging time productive and fun! Ask me about the area, EVs, or just chat.",
                "Charging time is perfect for a quick break. A 15-minute stop every 2 hours of driving improves safety.",
                "Most drivers find charging breaks make road trips more enjoyable: they force healthy stops and you discover places you would drive past.",
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatContext {
    /// Minutes of charging left in the session.
    #[serde(default)]
    pub charging_time: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub context: Option<ChatContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub business: String,
    pub offer: String,
    pub distance: String,
    pub category: String,
    pub valid_until: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseContext {
    pub category: Category,
    pub charging_time_remaining: Option<u32>,
    pub station_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals: Option<Vec<Deal>>,
    pub context: ResponseContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub service: String,
    pub status: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

pub fn categorize(message: &str) -> Category {
    let lower = message.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

pub fn respond<R: Rng + ?Sized>(
    request: &ChatRequest,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<ChatResponse, AssistantError> {
    if request.message.trim().is_empty() {
        return Err(AssistantError::EmptyMessage);
    }

    let category = categorize(&request.message);
    let message = category
        .responses()
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string();
    let deals = (category == Category::Deals).then(|| nearby_deals(now));

    Ok(ChatResponse {
        message,
        deals,
        context: ResponseContext {
            category,
            charging_time_remaining: request.context.as_ref().and_then(|c| c.charging_time),
            station_id: request.station_id.clone(),
        },
    })
}

fn nearby_deals(now: DateTime<Utc>) -> Vec<Deal> {
    let stamp = now.timestamp_millis();
    [
        ("Chipotle", "Free chips & guac with entree", "0.4 mi", "food", "2 hours"),
        ("Whole Foods", "10% off prepared foods", "0.3 mi", "grocery", "3 hours"),
        ("Dave & Busters", "$10 free game play", "0.5 mi", "entertainment", "4 hours"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (business, offer, distance, category, valid_until))| Deal {
        id: format!("deal-{stamp}-{}", i + 1),
        business: business.to_string(),
        offer: offer.to_string(),
        distance: distance.to_string(),
        category: category.to_string(),
        valid_until: valid_until.to_string(),
    })
    .collect()
}

pub fn status() -> ServiceStatus {
    ServiceStatus {
        service: "ChargePal Assistant".to_string(),
        status: "operational".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec!["POST /api/chargepal - send a message to ChargePal".to_string()],
    }
}
