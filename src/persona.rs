//! Persona sampling.

use crate::core::data::{PersonaSample, TraitCatalog};
use crate::utils::error::{AppError, AppResult};
use rand::Rng;
use rand::seq::SliceRandom;

/// Draw one option per category, uniformly and independently.
pub fn sample_persona<R: Rng + ?Sized>(catalog: &TraitCatalog, rng: &mut R) -> AppResult<PersonaSample> {
    let mut traits = Vec::with_capacity(catalog.len());
    let mut descriptions = Vec::with_capacity(catalog.len());

    for category in catalog.categories() {
        let selected = category.options.choose(rng).ok_or_else(|| {
            AppError::Configuration(format!("trait category '{}' has no options", category.name))
        })?;
        traits.push((category.name.clone(), selected.value.clone()));
        descriptions.push(selected.description.clone());
    }

    Ok(PersonaSample {
        traits,
        descriptions,
    })
}

/// The persona preamble sentence used at the top of every prompt.
pub fn describe_persona(descriptions: &[String]) -> String {
    format!("You are someone {}.", descriptions.join(", "))
}
