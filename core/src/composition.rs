//! Reducer composition utilities
//!
//! A parent flow is usually assembled from smaller reducers, each owning one
//! slice of the parent state and speaking its own action type. [`scope_reducer`]
//! focuses such a child reducer onto its slice:
//!
//! - **state**: a lens from the parent state to the child state
//! - **environment**: a projection from the parent environment to the child's
//! - **actions**: `extract` picks the child action out of a parent action,
//!   `embed` wraps child actions (including those produced by effects) back up
//!
//! # Examples
//!
//! ```
//! use event_place_core::{composition::scope_reducer, effect::Effect, reducer::Reducer};
//! use event_place_core::{smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct QuantityState {
//!     quantity: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum QuantityAction {
//!     Increment,
//! }
//!
//! struct QuantityReducer;
//!
//! impl Reducer for QuantityReducer {
//!     type State = QuantityState;
//!     type Action = QuantityAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Self::State,
//!         action: Self::Action,
//!         _env: &Self::Environment,
//!     ) -> SmallVec<[Effect<Self::Action>; 4]> {
//!         match action {
//!             QuantityAction::Increment => state.quantity += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Clone, Default)]
//! struct PageState {
//!     tickets: QuantityState,
//!     title: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum PageAction {
//!     Tickets(QuantityAction),
//!     Rename(String),
//! }
//!
//! let scoped = scope_reducer(
//!     QuantityReducer,
//!     |page: &mut PageState| &mut page.tickets,
//!     |_env: &()| &(),
//!     |action| match action {
//!         PageAction::Tickets(inner) => Some(inner),
//!         PageAction::Rename(_) => None,
//!     },
//!     PageAction::Tickets,
//! );
//!
//! let mut state = PageState::default();
//! let _ = scoped.reduce(&mut state, PageAction::Tickets(QuantityAction::Increment), &());
//! assert_eq!(state.tickets.quantity, 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Focuses a child reducer onto a slice of a parent state.
///
/// See the [module documentation](self) for the meaning of each projection.
pub fn scope_reducer<S, A, E, R>(
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    environment: fn(&E) -> &R::Environment,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
) -> ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        environment,
        extract,
        embed,
    }
}

/// A reducer focused onto part of a larger state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> &mut R::State,
    environment: fn(&E) -> &R::Environment,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
}

impl<S, A, E, R> ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    /// The wrapped child reducer
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.reducer
    }
}

impl<S, A, E, R> Clone for ScopedReducer<S, A, E, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state: self.state,
            environment: self.environment,
            extract: self.extract,
            embed: self.embed,
        }
    }
}

impl<S, A, E, R> std::fmt::Debug for ScopedReducer<S, A, E, R>
where
    R: Reducer + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, A, E, R> Reducer for ScopedReducer<S, A, E, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        // Actions addressed to someone else leave the slice untouched
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        let child_env = (self.environment)(env);

        self.reducer
            .reduce(child_state, child_action, child_env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{smallvec, SmallVec};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SubState {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum SubAction {
        Add(i32),
        AddLater(i32),
    }

    #[derive(Clone, Debug)]
    struct SubEnv {
        factor: i32,
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = SubEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SubAction::Add(n) => {
                    state.value += n * env.factor;
                    smallvec![Effect::None]
                },
                SubAction::AddLater(n) => smallvec![Effect::Delay {
                    duration: Duration::from_millis(10),
                    action: Box::new(SubAction::Add(n)),
                }],
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        sub: SubState,
        other: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Sub(SubAction),
        Rename(String),
    }

    struct ParentEnv {
        sub: SubEnv,
    }

    fn scoped() -> ScopedReducer<ParentState, ParentAction, ParentEnv, SubReducer> {
        scope_reducer(
            SubReducer,
            |parent: &mut ParentState| &mut parent.sub,
            |env: &ParentEnv| &env.sub,
            |action| match action {
                ParentAction::Sub(inner) => Some(inner),
                ParentAction::Rename(_) => None,
            },
            ParentAction::Sub,
        )
    }

    #[test]
    fn test_scope_reducer_updates_slice() {
        let reducer = scoped();
        let env = ParentEnv {
            sub: SubEnv { factor: 2 },
        };
        let mut state = ParentState {
            sub: SubState { value: 5 },
            other: "test".to_string(),
        };

        let _ = reducer.reduce(&mut state, ParentAction::Sub(SubAction::Add(3)), &env);
        assert_eq!(state.sub.value, 11);
        assert_eq!(state.other, "test"); // Other state unchanged
    }

    #[test]
    fn test_scope_reducer_ignores_foreign_actions() {
        let reducer = scoped();
        let env = ParentEnv {
            sub: SubEnv { factor: 1 },
        };
        let mut state = ParentState::default();

        let effects = reducer.reduce(&mut state, ParentAction::Rename("x".into()), &env);
        assert!(effects.is_empty());
        assert_eq!(state.sub.value, 0);
    }

    #[test]
    fn test_scope_reducer_embeds_effect_actions() {
        let reducer = scoped();
        let env = ParentEnv {
            sub: SubEnv { factor: 1 },
        };
        let mut state = ParentState::default();

        let effects = reducer.reduce(&mut state, ParentAction::Sub(SubAction::AddLater(4)), &env);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Delay { action, .. } => {
                assert_eq!(**action, ParentAction::Sub(SubAction::Add(4)));
            },
            other => unreachable!("unexpected effect {other:?}"),
        }
    }
}
