//! Step 1: ticket category and quantity.

use crate::catalog::Catalog;
use crate::types::{Money, Quantity, TicketCategoryId};
use event_place_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use serde::{Deserialize, Serialize};

/// Category and quantity picked by the buyer
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSelection {
    /// Selected category, `None` only when everything is sold out
    pub category: Option<TicketCategoryId>,
    /// Number of tickets
    pub quantity: Quantity,
}

/// State of the ticket step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketsState {
    /// Catalog shown for this session
    pub catalog: Catalog,
    /// Current selection
    pub selection: BookingSelection,
}

impl TicketsState {
    /// Opens the step with the default selection
    #[must_use]
    pub fn new(catalog: Catalog, preferred: Option<&TicketCategoryId>) -> Self {
        let category = catalog.default_selection(preferred);
        Self {
            catalog,
            selection: BookingSelection {
                category,
                quantity: Quantity::default(),
            },
        }
    }

    /// A category is selected and the quantity is at least one
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selection
            .category
            .as_ref()
            .is_some_and(|id| self.catalog.is_selectable(id))
    }
}

/// Intents of the ticket step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketsAction {
    /// Radio click on a category
    SelectCategory(TicketCategoryId),
    /// `+` on the stepper
    IncrementQuantity,
    /// `-` on the stepper
    DecrementQuantity,
    /// Quantity typed in directly, clamped to `[1, 10]`
    SetQuantity(u32),
}

/// Reducer for the ticket step
#[derive(Clone, Debug, Default)]
pub struct TicketsReducer;

impl Reducer for TicketsReducer {
    type State = TicketsState;
    type Action = TicketsAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut TicketsState,
        action: TicketsAction,
        _env: &(),
    ) -> SmallVec<[Effect<TicketsAction>; 4]> {
        match action {
            TicketsAction::SelectCategory(id) => {
                if state.catalog.is_selectable(&id) {
                    tracing::debug!(category = %id, "Category selected");
                    state.selection.category = Some(id);
                } else {
                    tracing::debug!(category = %id, "Ignored selection of unavailable category");
                }
            },
            TicketsAction::IncrementQuantity => {
                state.selection.quantity = state.selection.quantity.incremented();
            },
            TicketsAction::DecrementQuantity => {
                state.selection.quantity = state.selection.quantity.decremented();
            },
            TicketsAction::SetQuantity(requested) => {
                state.selection.quantity = Quantity::clamped(requested);
            },
        }

        smallvec![Effect::None]
    }
}

/// One category option
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketOptionView {
    /// Category id
    pub id: TicketCategoryId,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Perks list
    pub perks: Vec<String>,
    /// Unit price
    pub price: Money,
    /// `available/total` hint
    pub remaining: String,
    /// Disabled option
    pub sold_out: bool,
    /// Radio state
    pub selected: bool,
}

/// View model of the ticket step
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketsView {
    /// Options in catalog order
    pub options: Vec<TicketOptionView>,
    /// Current quantity
    pub quantity: Quantity,
    /// `-` enabled
    pub can_decrement: bool,
    /// `+` enabled
    pub can_increment: bool,
}

impl TicketsView {
    /// Builds the view from the step state
    #[must_use]
    pub fn build(state: &TicketsState) -> Self {
        let options = state
            .catalog
            .categories()
            .iter()
            .map(|category| TicketOptionView {
                id: category.id.clone(),
                name: category.name.clone(),
                description: category.description.clone(),
                perks: category.perks.clone(),
                price: category.price,
                remaining: category.remaining_label(),
                sold_out: category.is_sold_out(),
                selected: state.selection.category.as_ref() == Some(&category.id),
            })
            .collect();

        Self {
            options,
            quantity: state.selection.quantity,
            can_decrement: state.selection.quantity.can_decrement(),
            can_increment: state.selection.quantity.can_increment(),
        }
    }
}
