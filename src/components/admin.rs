use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::db::models::{Brand, BrandEditorRequest, EditorResponse, Page, PageEditorRequest};

/// Load a brand for editing, hidden ones included.
#[server]
pub async fn get_brand_for_edit(id: String) -> Result<Option<Brand>, ServerFnError> {
    use crate::db::repository::CatalogRepository;
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    state
        .catalog_repo
        .find_brand_by_id(&id)
        .await
        .map_err(server_error)
}

#[server]
pub async fn save_brand(request: BrandEditorRequest) -> Result<EditorResponse, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::brands::process_brand_upsert(
        state.catalog_repo.as_ref(),
        request,
        &state.service_token,
    )
    .await
    .map_err(server_error)
}

#[server]
pub async fn get_page_for_edit(id: String) -> Result<Option<Page>, ServerFnError> {
    use crate::db::page_repository::PageRepository;
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    state.page_repo.find_by_id(&id).await.map_err(server_error)
}

#[server]
pub async fn save_page(request: PageEditorRequest) -> Result<EditorResponse, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::pages::process_page_upsert(state.page_repo.as_ref(), request, &state.service_token)
        .await
        .map_err(server_error)
}

fn edit_id() -> Memo<Option<String>> {
    let params = use_params_map();
    Memo::new(move |_| params.get().get("id").filter(|id| id != "new"))
}

#[component]
pub fn BrandEditorPage() -> impl IntoView {
    let id = edit_id();
    let existing = Resource::new(
        move || id.get(),
        |id| async move {
            match id {
                Some(id) => get_brand_for_edit(id).await,
                None => Ok(None),
            }
        },
    );

    view! {
        <h1>"Brand editor"</h1>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || existing.get().map(|res| match res {
                Ok(brand) => view! { <BrandForm brand=brand /> }.into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn BrandForm(brand: Option<Brand>) -> impl IntoView {
    let id = brand.as_ref().map(|b| b.id.clone());

    let token = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let country = RwSignal::new(String::new());
    let logo_icon = RwSignal::new(String::new());
    let seo = RwSignal::new(String::new());
    let visible = RwSignal::new(false);

    if let Some(brand) = brand {
        url.set(brand.url);
        title.set(brand.title);
        description.set(brand.description);
        country.set(brand.country_of_origin);
        logo_icon.set(brand.logo_icon.unwrap_or_default());
        seo.set(brand.seo.unwrap_or_default());
        visible.set(brand.visible);
    }

    let save = Action::new(move |request: &BrandEditorRequest| save_brand(request.clone()));
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(Ok(response)) = save.value().get() {
            navigate(&response.redirect, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        save.dispatch(BrandEditorRequest {
            service_token: token.get(),
            id: id.clone(),
            url: url.get(),
            title: title.get(),
            description: description.get(),
            country_of_origin: country.get(),
            logo_icon: Some(logo_icon.get()),
            seo: Some(seo.get()),
            visible: visible.get(),
        });
    };

    view! {
        <form class="editor" on:submit=on_submit>
            <label>"Service token" <input type="password" bind:value=token /></label>
            <label>"URL" <input type="text" bind:value=url /></label>
            <label>"Title" <input type="text" bind:value=title /></label>
            <label>"Country of origin" <input type="text" bind:value=country /></label>
            <label>"Logo icon" <input type="text" bind:value=logo_icon /></label>
            <label>"SEO description" <input type="text" bind:value=seo /></label>
            <label>"Description" <textarea bind:value=description></textarea></label>
            <label>"Visible" <input type="checkbox" bind:checked=visible /></label>
            <button type="submit" disabled=move || save.pending().get()>"Save"</button>
            <EditorStatus result=save.value() />
        </form>
    }
}

#[component]
pub fn PageEditorPage() -> impl IntoView {
    let id = edit_id();
    let existing = Resource::new(
        move || id.get(),
        |id| async move {
            match id {
                Some(id) => get_page_for_edit(id).await,
                None => Ok(None),
            }
        },
    );

    view! {
        <h1>"Page editor"</h1>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || existing.get().map(|res| match res {
                Ok(page) => view! { <PageForm page=page /> }.into_any(),
                Err(e) => view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn PageForm(page: Option<Page>) -> impl IntoView {
    let id = page.as_ref().map(|p| p.id.clone());
    let (initial_url, initial_title, initial_content, initial_seo) = match page {
        Some(p) => (p.url, p.title, p.content, p.seo.unwrap_or_default()),
        None => Default::default(),
    };

    let token = RwSignal::new(String::new());
    let url = RwSignal::new(initial_url);
    let title = RwSignal::new(initial_title);
    let content = RwSignal::new(initial_content);
    let seo = RwSignal::new(initial_seo);

    let save = Action::new(move |request: &PageEditorRequest| save_page(request.clone()));
    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(Ok(response)) = save.value().get() {
            navigate(&response.redirect, Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        save.dispatch(PageEditorRequest {
            service_token: token.get(),
            id: id.clone(),
            url: url.get(),
            title: title.get(),
            content: content.get(),
            seo: Some(seo.get()),
        });
    };

    view! {
        <form class="editor" on:submit=on_submit>
            <label>"Service token" <input type="password" bind:value=token /></label>
            <label>"URL" <input type="text" bind:value=url /></label>
            <label>"Title" <input type="text" bind:value=title /></label>
            <label>"SEO description" <input type="text" bind:value=seo /></label>
            <label>"Content (Markdown)" <textarea bind:value=content></textarea></label>
            <button type="submit" disabled=move || save.pending().get()>"Save"</button>
            <EditorStatus result=save.value() />
        </form>
    }
}

#[component]
fn EditorStatus(
    result: MappedSignal<Option<Result<EditorResponse, ServerFnError>>>,
) -> impl IntoView {
    move || match result.get() {
        Some(Ok(response)) => view! { <p class="success">{response.message}</p> }.into_any(),
        Some(Err(e)) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
        None => ().into_any(),
    }
}
