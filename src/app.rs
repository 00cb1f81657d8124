use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::admin::{BrandEditorPage, PageEditorPage};
use crate::components::catalog::{
    BrandPage, BrandsPage, ContentPage, DealerPage, DealersPage, ModelPage,
};
use crate::components::search_bar::GlobalSearch;

/// HTML document wrapper rendered by the server around [`App`].
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/chaos-escape.css"/>
        <Title text="Welcome To Chaos Escape"/>

        <Router>
            <nav class="top-nav">
                <a class="logo" href="/">"Chaos Escape"</a>
                <a href="/brands">"Brands"</a>
                <a href="/dealers">"Dealers"</a>
                <GlobalSearch/>
            </nav>
            <main>
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/brands") view=BrandsPage/>
                    <Route path=path!("/brands/:brand") view=BrandPage/>
                    <Route path=path!("/brands/:brand/:model") view=ModelPage/>
                    <Route path=path!("/dealers") view=DealersPage/>
                    <Route path=path!("/dealers/:dealer") view=DealerPage/>
                    <Route path=path!("/pages/:page") view=ContentPage/>
                    <Route path=path!("/admin/brands/:id") view=BrandEditorPage/>
                    <Route path=path!("/admin/pages/:id") view=PageEditorPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <h1>"Welcome to Chaos Escape"</h1>
        <p>"Find your next car: browse brands and dealers, or search for a model."</p>
    }
}
