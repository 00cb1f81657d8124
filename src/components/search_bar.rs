use leptos::prelude::*;

use crate::search::outcome::{SearchOutcome, SearchResult};
use crate::search::sequencer::{SearchSequencer, DEBOUNCE};

/// Search the catalog for brands, models and dealers.
#[server]
pub async fn global_search(search: String) -> Result<SearchOutcome, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::search::service::process_search(state.catalog_repo.as_ref(), Some(&search))
        .await
        .map_err(server_error)
}

const PARSE_ERROR: &str = "There was an error parsing the results";
const UNAVAILABLE: &str = "Search is unavailable right now, please try again.";

/// Split a finished request into the outcome to present and whether the
/// request itself failed. A failed request leaves no results on screen.
fn settle(response: Result<SearchOutcome, ServerFnError>) -> (SearchOutcome, bool) {
    match response {
        Ok(outcome) => (outcome, false),
        Err(e) => {
            tracing::warn!("Search request failed: {e}");
            (SearchOutcome::idle(), true)
        }
    }
}

/// Message replacing the result list, if any.
fn error_message(outcome: &SearchOutcome, failed: bool) -> Option<&'static str> {
    if failed {
        Some(UNAVAILABLE)
    } else if *outcome == SearchOutcome::Error {
        Some(PARSE_ERROR)
    } else {
        None
    }
}

/// Header button plus the full-screen search overlay.
///
/// Typing is debounced by [`DEBOUNCE`]; every dispatched query takes a
/// ticket from a [`SearchSequencer`] and its response is dropped unless the
/// ticket is still the latest one, so results never arrive out of order.
#[component]
pub fn GlobalSearch() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (term, set_term) = signal(String::new());
    let (outcome, set_outcome) = signal(SearchOutcome::idle());
    let (failed, set_failed) = signal(false);
    // Results of the last completed query, kept on screen while a newer one runs.
    let (shown, set_shown) = signal(Option::<Vec<SearchResult>>::None);
    let timer = StoredValue::new(Option::<TimeoutHandle>::None);
    let sequencer = SearchSequencer::new();

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        set_term.set(value.clone());

        if let Some(handle) = timer.get_value() {
            handle.clear();
        }

        let sequencer = sequencer.clone();
        let ticket = sequencer.issue();
        let handle = set_timeout_with_handle(
            move || {
                if !sequencer.is_current(ticket) {
                    return;
                }
                if value.trim().is_empty() {
                    set_failed.set(false);
                    set_outcome.set(SearchOutcome::idle());
                    set_shown.set(None);
                    return;
                }

                set_outcome.set(SearchOutcome::Pending);
                leptos::task::spawn_local(async move {
                    let (next, request_failed) = settle(global_search(value).await);
                    if !sequencer.is_current(ticket) {
                        return;
                    }
                    set_shown.set(next.results().map(<[SearchResult]>::to_vec));
                    set_failed.set(request_failed);
                    set_outcome.set(next);
                });
            },
            DEBOUNCE,
        )
        .ok();
        timer.set_value(handle);
    };

    let close = move |_: leptos::ev::MouseEvent| set_open.set(false);

    view! {
        <button class="search-toggle" on:click=move |_: leptos::ev::MouseEvent| set_open.update(|o| *o = !*o)>
            "Search"
        </button>
        <Show when=move || open.get()>
            <div class="search-overlay">
                <div class="search-backdrop" on:click=close></div>
                <div class="search-panel">
                    <button class="search-close" aria-label="Close search" on:click=close>
                        "×"
                    </button>
                    <label class="sr-only" for="global-search">"Search"</label>
                    <input
                        id="global-search"
                        type="search"
                        name="search"
                        placeholder="find your car"
                        prop:value=move || term.get()
                        on:input=on_input.clone()
                    />
                    <SearchResults outcome=outcome failed=failed shown=shown term=term />
                </div>
            </div>
        </Show>
    }
}

#[component]
fn SearchResults(
    outcome: ReadSignal<SearchOutcome>,
    failed: ReadSignal<bool>,
    shown: ReadSignal<Option<Vec<SearchResult>>>,
    term: ReadSignal<String>,
) -> impl IntoView {
    move || {
        if let Some(message) = error_message(&outcome.get(), failed.get()) {
            return view! {
                <ul class="error-list">
                    <li>{message}</li>
                </ul>
            }
            .into_any();
        }

        let pending = outcome.get() == SearchOutcome::Pending;
        match shown.get() {
            Some(results) if !results.is_empty() => view! {
                <ul class="search-results" class:pending=pending>
                    {results
                        .into_iter()
                        .map(|result| {
                            view! {
                                <li>
                                    <a href=result.href()>{result.label()}</a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_any(),
            Some(_) if !pending => view! {
                <p class="search-empty">
                    {move || format!("No results for \"{}\" found.", term.get().trim())}
                </p>
            }
            .into_any(),
            _ => ().into_any(),
        }
    }
}
