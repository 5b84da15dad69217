//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use event_place_core::async_effect;
///
/// async_effect! {
///     let outcome = gateway.submit(request).await;
///     Some(BookingAction::from_outcome(submission, outcome))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Future` that performs fire-and-forget work
///
/// The block runs on the runtime but never feeds an action back.
///
/// # Example
///
/// ```rust,ignore
/// use event_place_core::fire_and_forget;
///
/// let navigator = Arc::clone(&env.navigator);
/// fire_and_forget! {
///     navigator.scroll_to_top();
/// }
/// ```
#[macro_export]
macro_rules! fire_and_forget {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move {
                $($body)*
                ::std::option::Option::None
            })
        )
    };
}
