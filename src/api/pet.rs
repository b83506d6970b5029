//! # Pet API Module
//!
//! Pet projections for list views. Only display-oriented derivations
//! live here; the records themselves come from the domain service
//! mirror.

use crate::api::service::PetManagerService;
use crate::models::pet::{Pet, PetGender, PetSpecies};
use crate::utils;
use chrono::Utc;
use serde::Serialize;

/// Schema for displaying pets in a list format.
///
/// Essential pet information for card views, including the formatted
/// age and the breed falling back to the species when unset.
#[derive(Debug, Serialize)]
pub struct PetCardSchema {
    pub id: String,
    pub name: String,
    pub species: PetSpecies,
    /// breed when given, species name otherwise
    pub breed_label: String,
    /// Human-readable formatted age string
    pub fmt_age: String,
    pub gender: Option<PetGender>,
    pub has_photo: bool,
}

impl From<&Pet> for PetCardSchema {
    fn from(pet: &Pet) -> Self {
        let breed_label = if pet.breed.is_empty() {
            pet.species.to_string()
        } else {
            pet.breed.clone()
        };

        PetCardSchema {
            id: pet.id.clone(),
            name: pet.name.clone(),
            species: pet.species,
            breed_label,
            fmt_age: utils::fmt_age(pet.birth_date, Utc::now().date_naive()),
            gender: pet.gender,
            has_photo: pet.photo.is_some(),
        }
    }
}

/// Card projections for every pet in the mirror, in mirror order.
pub fn get_pet_cards(service: &PetManagerService) -> Vec<PetCardSchema> {
    service.pets().iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_pet(breed: &str) -> Pet {
        Pet {
            id: "pet-1".to_string(),
            name: "Rex".to_string(),
            species: PetSpecies::Dog,
            breed: breed.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_card_uses_breed_when_present() {
        let card = PetCardSchema::from(&create_test_pet("beagle"));

        assert_eq!(card.breed_label, "beagle");
        assert!(!card.has_photo);
    }

    #[test]
    fn test_card_falls_back_to_species_label() {
        let card = PetCardSchema::from(&create_test_pet(""));

        assert_eq!(card.breed_label, "dog");
    }
}
