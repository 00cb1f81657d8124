use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::catalog::{BrandDetail, ModelDetail, PageView};
use crate::db::models::{Brand, Dealer};

#[server]
pub async fn get_brands() -> Result<Vec<Brand>, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_brands(state.catalog_repo.as_ref())
        .await
        .map_err(server_error)
}

#[server]
pub async fn get_brand(url: String) -> Result<BrandDetail, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_brand(state.catalog_repo.as_ref(), &url)
        .await
        .map_err(server_error)
}

#[server]
pub async fn get_model(brand: String, model: String) -> Result<ModelDetail, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_model(state.catalog_repo.as_ref(), &brand, &model)
        .await
        .map_err(server_error)
}

#[server]
pub async fn get_dealers() -> Result<Vec<Dealer>, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_dealers(state.catalog_repo.as_ref())
        .await
        .map_err(server_error)
}

#[server]
pub async fn get_dealer(url: String) -> Result<Dealer, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_dealer(state.catalog_repo.as_ref(), &url)
        .await
        .map_err(server_error)
}

#[server]
pub async fn get_page(url: String) -> Result<PageView, ServerFnError> {
    use crate::state::{server_error, use_app_state};

    let state = use_app_state()?;
    crate::api::catalog::load_page(state.page_repo.as_ref(), &url)
        .await
        .map_err(server_error)
}

fn param(name: &'static str) -> Memo<String> {
    let params = use_params_map();
    Memo::new(move |_| params.get().get(name).unwrap_or_default())
}

fn error_view(e: ServerFnError) -> AnyView {
    view! { <p class="error">"Error: " {e.to_string()}</p> }.into_any()
}

#[component]
pub fn BrandsPage() -> impl IntoView {
    let brands = Resource::new(|| (), |_| get_brands());

    view! {
        <h1>"Brands"</h1>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || brands.get().map(|res| match res {
                Ok(brands) => view! {
                    <ul class="card-list">
                        {brands.into_iter().map(|b| view! {
                            <li>
                                <a href=format!("/brands/{}", b.url)>{b.title}</a>
                                <span class="muted">{b.country_of_origin}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_any(),
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}

#[component]
pub fn BrandPage() -> impl IntoView {
    let url = param("brand");
    let detail = Resource::new(move || url.get(), get_brand);

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || detail.get().map(|res| match res {
                Ok(BrandDetail { brand, models }) => {
                    let brand_url = brand.url.clone();
                    view! {
                        <h1>{brand.title}</h1>
                        <p class="muted">{brand.country_of_origin}</p>
                        <p>{brand.description}</p>
                        <h2>"Models"</h2>
                        <ul class="card-list">
                            {models.into_iter().map(|m| view! {
                                <li>
                                    <a href=format!("/brands/{}/{}", brand_url, m.url)>{m.title}</a>
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}

#[component]
pub fn ModelPage() -> impl IntoView {
    let brand = param("brand");
    let model = param("model");
    let detail = Resource::new(
        move || (brand.get(), model.get()),
        |(brand, model)| get_model(brand, model),
    );

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || detail.get().map(|res| match res {
                Ok(ModelDetail { brand, model }) => view! {
                    <p class="breadcrumb">
                        <a href=format!("/brands/{}", brand.url)>{brand.title.clone()}</a>
                    </p>
                    <h1>{format!("{} {}", brand.title, model.title)}</h1>
                    <p>{model.description}</p>
                }.into_any(),
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}

#[component]
pub fn DealersPage() -> impl IntoView {
    let dealers = Resource::new(|| (), |_| get_dealers());

    view! {
        <h1>"Dealers"</h1>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || dealers.get().map(|res| match res {
                Ok(dealers) => view! {
                    <ul class="card-list">
                        {dealers.into_iter().map(|d| view! {
                            <li>
                                <a href=format!("/dealers/{}", d.url)>{d.name}</a>
                                <span class="muted">{d.city.unwrap_or_default()}</span>
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_any(),
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}

#[component]
pub fn DealerPage() -> impl IntoView {
    let url = param("dealer");
    let dealer = Resource::new(move || url.get(), get_dealer);

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || dealer.get().map(|res| match res {
                Ok(d) => view! {
                    <h1>{d.name}</h1>
                    <p class="muted">{d.city.unwrap_or_default()}</p>
                    <p>{d.description}</p>
                }.into_any(),
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}

/// A static content page rendered from Markdown.
#[component]
pub fn ContentPage() -> impl IntoView {
    let url = param("page");
    let page = Resource::new(move || url.get(), get_page);

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || page.get().map(|res| match res {
                Ok(page) => view! {
                    <leptos_meta::Title text=page.title.clone()/>
                    <leptos_meta::Meta name="description" content=page.seo.unwrap_or_default()/>
                    <article class="content" inner_html=page.html></article>
                }.into_any(),
                Err(e) => error_view(e),
            })}
        </Suspense>
    }
}
