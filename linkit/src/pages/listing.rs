//! Listing screens
//!
//! Gating for the product and collection overviews. The order of checks
//! matters: no session wins over everything, then an in-flight fetch,
//! then the empty call-to-action, and only then the content itself.

use crate::store::{AppStore, Collection, LoadState, Product};

/// What a listing screen should show, in priority order.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    /// No session: prompt to sign in or use the device library
    SignedOut,
    /// First fetch still in flight
    Loading,
    /// Session active, fetch finished, nothing saved yet
    Empty,
    /// Items to render
    Content(&'a [T]),
}

/// Resolve the products overview from the store. With a session but no
/// completed fetch yet, the screen spins rather than prompting sign-in.
pub fn products_view(store: &AppStore) -> ListView<'_, Product> {
    match store.products_state() {
        LoadState::Uninitialized if !store.signed_in() => ListView::SignedOut,
        LoadState::Uninitialized | LoadState::Loading => ListView::Loading,
        LoadState::Loaded if store.products().is_empty() => ListView::Empty,
        LoadState::Loaded => ListView::Content(store.products()),
    }
}

/// Resolve the collections overview from the store.
pub fn collections_view(store: &AppStore) -> ListView<'_, Collection> {
    match store.collections_state() {
        LoadState::Uninitialized if !store.signed_in() => ListView::SignedOut,
        LoadState::Uninitialized | LoadState::Loading => ListView::Loading,
        LoadState::Loaded if store.collections().is_empty() => ListView::Empty,
        LoadState::Loaded => ListView::Content(store.collections()),
    }
}
