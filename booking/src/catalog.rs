//! Static ticket catalog.
//!
//! The catalog is fixed for a wizard session: the wizard reads `available` and
//! `total` for display and for the sold-out rule but never decrements them.

use crate::error::CatalogError;
use crate::types::{Money, TicketCategoryId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One purchasable ticket category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCategory {
    /// Category id
    pub id: TicketCategoryId,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: Money,
    /// Short description
    pub description: String,
    /// Included perks, in display order
    pub perks: Vec<String>,
    /// Seats still available
    pub available: u32,
    /// Seats in total
    pub total: u32,
}

impl TicketCategory {
    /// A category with no seats left cannot be selected
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available == 0
    }

    /// `available/total`, shown next to each option
    #[must_use]
    pub fn remaining_label(&self) -> String {
        format!("{}/{}", self.available, self.total)
    }
}

/// Validated, ordered list of categories
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<TicketCategory>,
}

impl Catalog {
    /// Builds a catalog
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`] if `categories` is empty
    /// - [`CatalogError::AvailabilityExceedsTotal`] if a category breaks `available <= total`
    /// - [`CatalogError::DuplicateCategory`] if two categories share an id
    pub fn new(categories: Vec<TicketCategory>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if category.available > category.total {
                return Err(CatalogError::AvailabilityExceedsTotal {
                    id: category.id.clone(),
                    available: category.available,
                    total: category.total,
                });
            }
            if !seen.insert(&category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self { categories })
    }

    /// The three-entry catalog used by the event pages
    ///
    /// # Errors
    ///
    /// Never fails in practice; the entries satisfy every catalog rule.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::new(vec![
            TicketCategory {
                id: TicketCategoryId::new("cat1"),
                name: "Standard".to_string(),
                price: Money::from_units(75),
                description: "Accès général à l'événement".to_string(),
                perks: vec![
                    "Accès à la fosse".to_string(),
                    "Vestiaire inclus".to_string(),
                ],
                available: 120,
                total: 300,
            },
            TicketCategory {
                id: TicketCategoryId::new("cat2"),
                name: "VIP".to_string(),
                price: Money::from_units(150),
                description: "Placement privilégié et espace lounge".to_string(),
                perks: vec![
                    "Places assises numérotées".to_string(),
                    "Accès au lounge VIP".to_string(),
                    "Boisson de bienvenue".to_string(),
                ],
                available: 18,
                total: 100,
            },
            TicketCategory {
                id: TicketCategoryId::new("cat3"),
                name: "Carré Or".to_string(),
                price: Money::from_units(300),
                description: "Premier rang et rencontre avec les artistes".to_string(),
                perks: vec![
                    "Premier rang".to_string(),
                    "Rencontre avec les artistes".to_string(),
                    "Cadeau souvenir".to_string(),
                ],
                available: 0,
                total: 40,
            },
        ])
    }

    /// Categories in display order
    #[must_use]
    pub fn categories(&self) -> &[TicketCategory] {
        &self.categories
    }

    /// Looks a category up by id
    #[must_use]
    pub fn get(&self, id: &TicketCategoryId) -> Option<&TicketCategory> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// True if `id` names a category that still has seats
    #[must_use]
    pub fn is_selectable(&self, id: &TicketCategoryId) -> bool {
        self.get(id).is_some_and(|category| !category.is_sold_out())
    }

    /// First category that still has seats
    #[must_use]
    pub fn first_available(&self) -> Option<&TicketCategory> {
        self.categories.iter().find(|category| !category.is_sold_out())
    }

    /// Initial selection: `preferred` when selectable, else the first available category
    ///
    /// `None` only when every category is sold out.
    #[must_use]
    pub fn default_selection(&self, preferred: Option<&TicketCategoryId>) -> Option<TicketCategoryId> {
        preferred
            .filter(|id| self.is_selectable(id))
            .cloned()
            .or_else(|| self.first_available().map(|category| category.id.clone()))
    }
}
