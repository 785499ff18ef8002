//! Sample workshop data loaded into a fresh database at startup.

use std::path::Path;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    domain::models::{OrderStatus, ToyOrder},
    infrastructure::{
        config::SeedConfig,
        db::SqlitePool,
        storage::KeyValueStore,
        store::{self, NewElf},
    },
};

/// Key prefix under which failed profile image loads are recorded.
pub const IMAGE_FAILURE_PREFIX: &str = "seed.image_failures.";

const SEED_DUE_DATE: &str = "2024-12-24";
const TRAIN_ELF: &str = "Jingleberry Sparkletoes";
const TRAIN_CATEGORY: &str = "Wooden Trains";
const FIRST_GENERATED_ID: usize = 7;

const FIRST_NAMES: [&str; 20] = [
    "Tommy", "Sarah", "Jake", "Emma", "Noah", "Olivia", "Liam", "Ava", "Mason", "Sophia", "Ethan",
    "Isabella", "Logan", "Mia", "Lucas", "Charlotte", "Jack", "Amelia", "Ryan", "Harper",
];

const LAST_NAMES: [&str; 20] = [
    "Anderson", "Wilson", "Garcia", "Martinez", "Brown", "Davis", "Miller", "Taylor", "Thomas",
    "Moore", "Jackson", "White", "Harris", "Clark", "Lewis", "Walker", "Hall", "Young", "King",
    "Wright",
];

const LOCATIONS: [&str; 18] = [
    "Boston, USA",
    "Chicago, USA",
    "Seattle, USA",
    "Denver, USA",
    "Toronto, Canada",
    "Vancouver, Canada",
    "Sydney, Australia",
    "Melbourne, Australia",
    "London, UK",
    "Manchester, UK",
    "Berlin, Germany",
    "Munich, Germany",
    "Tokyo, Japan",
    "Osaka, Japan",
    "Seoul, South Korea",
    "Stockholm, Sweden",
    "Oslo, Norway",
    "Copenhagen, Denmark",
];

const TRAIN_TYPES: [&str; 8] = [
    "Classic Wooden Train with 8 Cars",
    "Deluxe Wooden Train Set",
    "Vintage Steam Engine Train",
    "Express Wooden Train",
    "Mountain Railway Train Set",
    "Cargo Wooden Train",
    "Passenger Express Train",
    "Wooden Freight Train",
];

const GREETINGS: [&str; 4] = ["Deer Santa", "Dear Santa", "Hi Santa", "Hello Santa"];
const WANTS: [&str; 4] = ["I realy want", "I would luv", "Can I plees have", "I wish for"];
const PROMISES: [&str; 4] = [
    "I promis Ive been good",
    "Ive been realy good this yeer",
    "I did all my homwork",
    "I helped mom and dad",
];
const EXTRAS: [&str; 10] = [
    "Can it have red and blue colors?",
    "Can you make the wheels spin reel fast?",
    "I want lots of cars!",
    "Can it have a caboose?",
    "Make it go choo choo!",
    "I love tranes so much!",
    "Can it carry cargo?",
    "I want to be a trane driver!",
    "Tranes are the best!",
    "Can you add extra track?",
];
const CLOSINGS: [&str; 4] = ["Thank you", "Thanks Santa", "Love", "Your frend"];

struct ElfSeed {
    name: &'static str,
    specialty: &'static str,
    years_of_service: i32,
    month: u32,
    day: u32,
    image: &'static str,
}

const ELVES: [ElfSeed; 3] = [
    ElfSeed {
        name: "Jingleberry Sparkletoes",
        specialty: "Wooden Trains",
        years_of_service: 127,
        month: 12,
        day: 1,
        image: "Jingleberry.jpeg",
    },
    ElfSeed {
        name: "Snowflake Tinselwhisk",
        specialty: "Teddy Bears",
        years_of_service: 43,
        month: 12,
        day: 15,
        image: "Snowflake.jpeg",
    },
    ElfSeed {
        name: "Peppermint Candycane",
        specialty: "Video Games",
        years_of_service: 15,
        month: 1,
        day: 10,
        image: "Peppermint.jpeg",
    },
];

struct OrderSeed {
    id: &'static str,
    child_name: &'static str,
    age: i32,
    location: &'static str,
    toy: &'static str,
    category: &'static str,
    assigned_elf: &'static str,
    status: OrderStatus,
    notes: &'static str,
    nice_list_score: i32,
}

const ORDERS: [OrderSeed; 5] = [
    OrderSeed {
        id: "1",
        child_name: "Emily Johnson",
        age: 7,
        location: "New York, USA",
        toy: "Deluxe Teddy Bear",
        category: "Teddy Bears",
        assigned_elf: "Snowflake Tinselwhisk",
        status: OrderStatus::ToDo,
        notes: "Deer Santa, I realy want a Delux Teddy Bear! I promis Ive been realy good this yeer. Can you make it extra soft and hugable? Love, Emily",
        nice_list_score: 98,
    },
    OrderSeed {
        id: "2",
        child_name: "Marcus Chen",
        age: 10,
        location: "San Francisco, USA",
        toy: "MagicBox Game Console",
        category: "Video Games",
        assigned_elf: "Peppermint Candycane",
        status: OrderStatus::InProgress,
        notes: "Hi Santa! I would love a MagicBox Game Console for Christmas! If possible, could you include extra controlers so I can play with my freinds? And maybe 3 game cartridges? Thanks! Marcus",
        nice_list_score: 85,
    },
    OrderSeed {
        id: "4",
        child_name: "Oliver Smith",
        age: 8,
        location: "London, UK",
        toy: "Builder Blocks Mega Set",
        category: "Puzzles",
        assigned_elf: "Jingleberry Sparkletoes",
        status: OrderStatus::ReadyToDeliver,
        notes: "Dear Santa, I would realy like the Builder Blocks Mega Set with 1000 peices! I want to build a huge castle. Can you include the instrution booklet so I know how to make cool things? Oliver",
        nice_list_score: 92,
    },
    OrderSeed {
        id: "5",
        child_name: "Aisha Patel",
        age: 6,
        location: "Mumbai, India",
        toy: "Enchanted Dollhouse",
        category: "Dolls",
        assigned_elf: "Snowflake Tinselwhisk",
        status: OrderStatus::ToDo,
        notes: "Deer Santa, I dreem of haveing an Enchanted Dollhowse! I want one with three flors and lites that reely work. It would be so majical! Love, Aisha",
        nice_list_score: 96,
    },
    OrderSeed {
        id: "6",
        child_name: "Lucas Dubois",
        age: 9,
        location: "Paris, France",
        toy: "Turbo Racer RC Car",
        category: "Electronics",
        assigned_elf: "Peppermint Candycane",
        status: OrderStatus::InProgress,
        notes: "Hello Santa! I realy want a Turbo Racer RC Car this year! It would be amazeing if it comes with a rechargable battery so I can race it all the time. Merci! Lucas",
        nice_list_score: 78,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub elves: usize,
    pub orders: usize,
    pub image_failures: usize,
}

/// Loads the sample roster and orders in one transaction.
///
/// A profile image that cannot be read leaves the elf without a picture; the
/// failure is logged and recorded under [`IMAGE_FAILURE_PREFIX`].
pub async fn seed(
    pool: &SqlitePool,
    kv: &dyn KeyValueStore,
    config: &SeedConfig,
) -> anyhow::Result<SeedReport> {
    let now = Utc::now();
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    for elf in &ELVES {
        let service_start_date = NaiveDate::from_ymd_opt(
            now.year() - elf.years_of_service,
            elf.month,
            elf.day,
        )
        .with_context(|| format!("invalid service start date for {}", elf.name))?;

        let profile_image = match load_profile_image(&config.images_dir, elf.image) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!(elf = elf.name, image = elf.image, error = %err, "failed to load profile image");
                kv.put(
                    &format!("{IMAGE_FAILURE_PREFIX}{}", elf.image),
                    json!({ "elf": elf.name, "error": err.to_string() }),
                )
                .await?;
                report.image_failures += 1;
                None
            }
        };

        store::insert_elf(
            &mut tx,
            &NewElf {
                name: elf.name.to_string(),
                specialty: elf.specialty.to_string(),
                service_start_date,
                profile_image,
                created_at: now,
            },
        )
        .await?;
        report.elves += 1;
    }

    for order in &ORDERS {
        store::insert_order(&mut tx, &fixed_order(order, now)).await?;
        report.orders += 1;
    }

    for index in 0..config.generated_orders {
        store::insert_order(&mut tx, &generated_order(index, now)).await?;
        report.orders += 1;
    }

    tx.commit().await?;
    info!(
        elves = report.elves,
        orders = report.orders,
        image_failures = report.image_failures,
        "sample data loaded"
    );
    Ok(report)
}

/// Reads an image from disk as a JPEG data URI.
pub fn load_profile_image(dir: &Path, file_name: &str) -> anyhow::Result<String> {
    let path = dir.join(file_name);
    let bytes =
        std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
}

fn fixed_order(seed: &OrderSeed, created_at: DateTime<Utc>) -> ToyOrder {
    ToyOrder {
        id: seed.id.to_string(),
        child_name: seed.child_name.to_string(),
        age: seed.age,
        location: seed.location.to_string(),
        toy: seed.toy.to_string(),
        category: seed.category.to_string(),
        assigned_elf: seed.assigned_elf.to_string(),
        status: seed.status,
        due_date: SEED_DUE_DATE.to_string(),
        notes: Some(seed.notes.to_string()),
        nice_list_score: seed.nice_list_score,
        created_at,
    }
}

/// Wooden train order number `index`; every field cycles through the word lists.
fn generated_order(index: usize, created_at: DateTime<Utc>) -> ToyOrder {
    let first_name = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last_name = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    let toy = TRAIN_TYPES[index % TRAIN_TYPES.len()];
    let notes = format!(
        "{}, {} a {}! {}. {} {}, {}",
        GREETINGS[index % GREETINGS.len()],
        WANTS[index % WANTS.len()],
        toy,
        PROMISES[index % PROMISES.len()],
        EXTRAS[index % EXTRAS.len()],
        CLOSINGS[index % CLOSINGS.len()],
        first_name,
    );

    ToyOrder {
        id: (FIRST_GENERATED_ID + index).to_string(),
        child_name: format!("{first_name} {last_name}"),
        age: 4 + (index % 5) as i32,
        location: LOCATIONS[index % LOCATIONS.len()].to_string(),
        toy: toy.to_string(),
        category: TRAIN_CATEGORY.to_string(),
        assigned_elf: TRAIN_ELF.to_string(),
        status: OrderStatus::QualityCheck,
        due_date: SEED_DUE_DATE.to_string(),
        notes: Some(notes),
        nice_list_score: 88 + (index % 13) as i32,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn first_generated_order_uses_the_head_of_every_list() {
        let order = generated_order(0, Utc::now());

        assert_eq!(order.id, "7");
        assert_eq!(order.child_name, "Tommy Anderson");
        assert_eq!(order.age, 4);
        assert_eq!(order.location, "Boston, USA");
        assert_eq!(order.toy, "Classic Wooden Train with 8 Cars");
        assert_eq!(order.nice_list_score, 88);
        assert_eq!(order.status, OrderStatus::QualityCheck);
        assert_eq!(order.assigned_elf, TRAIN_ELF);
        assert_eq!(order.category, TRAIN_CATEGORY);
        assert_eq!(
            order.notes.as_deref(),
            Some("Deer Santa, I realy want a Classic Wooden Train with 8 Cars! I promis Ive been good. Can it have red and blue colors? Thank you, Tommy")
        );
    }

    #[test]
    fn generated_orders_cycle_names_and_scores() {
        let order = generated_order(20, Utc::now());
        assert_eq!(order.id, "27");
        assert_eq!(order.child_name, "Tommy Wilson");
        assert_eq!(order.age, 4);
        assert_eq!(order.location, "Seattle, USA");
        assert_eq!(order.nice_list_score, 88 + 7);

        let order = generated_order(13, Utc::now());
        assert_eq!(order.nice_list_score, 88);
        assert_eq!(order.toy, "Cargo Wooden Train");
    }

    #[test]
    fn profile_image_is_encoded_as_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("Snowflake.jpeg")).unwrap();
        file.write_all(b"elf").unwrap();

        let image = load_profile_image(dir.path(), "Snowflake.jpeg").unwrap();

        assert_eq!(image, "data:image/jpeg;base64,ZWxm");
    }

    #[test]
    fn missing_profile_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_profile_image(dir.path(), "Nobody.jpeg").unwrap_err();
        assert!(err.to_string().contains("Nobody.jpeg"));
    }
}
