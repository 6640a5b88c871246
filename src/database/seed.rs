//! Sample data seeding
//!
//! Populates an empty database with generated sample residents so a fresh
//! installation has something to look at. Seeding is skipped entirely when
//! residents already exist.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::SeedConfig;
use crate::database::repositories::ResidentRepository;
use crate::models::resident::{CreateResidentRequest, GradeLevel};
use crate::utils::errors::Result;

const FIRST_NAMES: &[&str] = &["John", "Mary", "James", "Patricia", "Robert", "Jennifer"];
const LAST_NAMES: &[&str] = &["Smith", "Johnson", "Williams", "Jones", "Brown", "Davis"];
const STRANDS: &[&str] = &["Instrumentation", "Mechatronics", "Machining"];
const ROOM_PREFIXES: &[&str] = &["A", "B", "C", "D", "E"];

/// Seed sample residents into an empty database.
///
/// Returns the number of residents inserted (zero when the database already
/// holds residents).
pub async fn seed_sample_residents(
    residents: &ResidentRepository,
    config: &SeedConfig,
) -> Result<u32> {
    if !config.enabled {
        return Ok(0);
    }

    if residents.count().await? > 0 {
        info!("Residents already present, skipping sample data seeding");
        return Ok(0);
    }

    let mut rng = rand::thread_rng();
    let mut inserted = 0u32;

    for i in 1..=config.sample_residents {
        let request = CreateResidentRequest {
            first_name: pick(&mut rng, FIRST_NAMES),
            last_name: pick(&mut rng, LAST_NAMES),
            student_id: format!("S{:05}", i),
            strand: pick(&mut rng, STRANDS),
            grade_level: if rng.gen_bool(0.5) {
                GradeLevel::Grade11
            } else {
                GradeLevel::Grade12
            },
            contact_number: generate_contact_number(&mut rng),
            room_number: generate_room_number(&mut rng),
        };

        residents.create(request).await?;
        inserted += 1;
    }

    info!(count = inserted, "Seeded sample residents");
    Ok(inserted)
}

fn pick(rng: &mut impl Rng, values: &[&str]) -> String {
    values
        .choose(rng)
        .copied()
        .unwrap_or(values[0])
        .to_string()
}

/// Room numbers look like `B204`: wing prefix, floor 1-4, room 01-25
fn generate_room_number(rng: &mut impl Rng) -> String {
    let prefix = ROOM_PREFIXES.choose(rng).copied().unwrap_or("A");
    let floor = rng.gen_range(1..=4);
    let room = rng.gen_range(1..=25);
    format!("{}{}{:02}", prefix, floor, room)
}

/// Local mobile numbers: `09` followed by nine digits
fn generate_contact_number(rng: &mut impl Rng) -> String {
    let digits: String = (0..9).map(|_| rng.gen_range(0..10).to_string()).collect();
    format!("09{}", digits)
}
