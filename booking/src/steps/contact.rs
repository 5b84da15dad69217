//! Step 2: buyer identity.
//!
//! Controlled inputs only. Errors are written by the orchestrator when the
//! buyer tries to advance; editing a field leaves them untouched.

use crate::types::{ContactField, FieldErrors};
use event_place_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use serde::{Deserialize, Serialize};

/// Buyer identity fields
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// E-mail address
    pub email: String,
}

impl ContactForm {
    /// Current value of a field
    #[must_use]
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
        }
    }

    fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
        }
    }

    /// `"Jean Dupont"`, trimmed
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// State of the contact step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    /// Field values
    pub form: ContactForm,
    /// Errors of the last validation pass
    pub errors: FieldErrors<ContactField>,
}

/// Intents of the contact step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactAction {
    /// A field changed
    Edit {
        /// Field edited
        field: ContactField,
        /// New raw value
        value: String,
    },
}

/// Reducer for the contact step
#[derive(Clone, Debug, Default)]
pub struct ContactReducer;

impl Reducer for ContactReducer {
    type State = ContactState;
    type Action = ContactAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut ContactState,
        action: ContactAction,
        _env: &(),
    ) -> SmallVec<[Effect<ContactAction>; 4]> {
        match action {
            ContactAction::Edit { field, value } => {
                *state.form.value_mut(field) = value;
            },
        }
        smallvec![Effect::None]
    }
}

/// One input of the contact form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactFieldView {
    /// Which field
    pub field: ContactField,
    /// Input label
    pub label: &'static str,
    /// Current value
    pub value: String,
    /// Inline error, if the last validation flagged the field
    pub error: Option<String>,
}

/// View model of the contact step
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactView {
    /// Inputs in display order
    pub fields: Vec<ContactFieldView>,
}

impl ContactView {
    /// Builds the view from the step state
    #[must_use]
    pub fn build(state: &ContactState) -> Self {
        let fields = ContactField::ALL
            .into_iter()
            .map(|field| ContactFieldView {
                field,
                label: field.label(),
                value: state.form.value(field).to_string(),
                error: state.errors.get(&field).map(str::to_string),
            })
            .collect();

        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FIRST_NAME_REQUIRED;
    use event_place_testing::ReducerTest;

    #[test]
    fn test_edit_updates_only_that_field() {
        ReducerTest::new(ContactReducer)
            .with_env(())
            .given_state(ContactState::default())
            .given_actions(vec![ContactAction::Edit {
                field: ContactField::FirstName,
                value: "Jean".to_string(),
            }])
            .when_action(ContactAction::Edit {
                field: ContactField::Email,
                value: "jean@exemple.fr".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.form.first_name, "Jean");
                assert_eq!(state.form.last_name, "");
                assert_eq!(state.form.email, "jean@exemple.fr");
            })
            .run();
    }

    #[test]
    fn test_edit_keeps_previous_errors() {
        let mut state = ContactState::default();
        state.errors.insert(ContactField::FirstName, FIRST_NAME_REQUIRED);

        ReducerTest::new(ContactReducer)
            .with_env(())
            .given_state(state)
            .when_action(ContactAction::Edit {
                field: ContactField::FirstName,
                value: "J".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.errors.get(&ContactField::FirstName), Some(FIRST_NAME_REQUIRED));
            })
            .run();
    }

    #[test]
    fn test_view_shows_inline_errors() {
        let mut state = ContactState::default();
        state.form.last_name = "Martin".to_string();
        state.errors.insert(ContactField::FirstName, FIRST_NAME_REQUIRED);

        let view = ContactView::build(&state);

        assert_eq!(view.fields.len(), 3);
        assert_eq!(view.fields[0].error.as_deref(), Some(FIRST_NAME_REQUIRED));
        assert_eq!(view.fields[1].value, "Martin");
        assert_eq!(view.fields[1].error, None);
        assert_eq!(view.fields[2].label, "E-mail");
    }

    #[test]
    fn test_full_name_is_trimmed() {
        let form = ContactForm {
            first_name: " Jean ".to_string(),
            last_name: "Dupont\n".to_string(),
            email: String::new(),
        };
        assert_eq!(form.full_name(), "Jean Dupont");
    }
}
