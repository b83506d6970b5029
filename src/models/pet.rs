use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PetSpecies {
    #[default]
    #[display("dog")]
    Dog,
    #[display("cat")]
    Cat,
    #[display("bird")]
    Bird,
    #[display("rabbit")]
    Rabbit,
    #[display("hamster")]
    Hamster,
    #[display("fish")]
    Fish,
    #[display("reptile")]
    Reptile,
    #[display("other")]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PetGender {
    #[display("male")]
    Male,
    #[display("female")]
    Female,
    #[default]
    #[display("unknown")]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: PetSpecies,
    pub breed: String,
    pub birth_date: NaiveDate,
    /// base64 encoded image or URL
    pub photo: Option<String>,
    pub color: Option<String>,
    pub gender: Option<PetGender>,
    pub weight: Option<f64>,
    pub microchip_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-settable fields of a [Pet]; id and timestamps are assigned by
/// the domain service at creation time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    pub species: PetSpecies,
    pub breed: String,
    pub birth_date: NaiveDate,
    pub photo: Option<String>,
    pub color: Option<String>,
    pub gender: Option<PetGender>,
    pub weight: Option<f64>,
    pub microchip_number: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a [Pet]. `Some(None)` on an optional field clears
/// the stored value.
#[derive(Debug, Clone, Default)]
pub struct PetPatch {
    pub name: Option<String>,
    pub species: Option<PetSpecies>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub gender: Option<Option<PetGender>>,
    pub weight: Option<Option<f64>>,
    pub microchip_number: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pet {
    pub fn create(data: NewPet, now: DateTime<Utc>) -> Self {
        Pet {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            species: data.species,
            breed: data.breed,
            birth_date: data.birth_date,
            photo: data.photo,
            color: data.color,
            gender: data.gender,
            weight: data.weight,
            microchip_number: data.microchip_number,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
