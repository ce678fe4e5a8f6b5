use leptos::prelude::*;
use thaw::ConfigProvider;

use crate::routes::routes::AppRoutes;
use crate::shared::api_client::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::query_cache::QueryCache;
use crate::shared::toast::ToastService;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();

    provide_context(ApiClient::new(config.api_base.clone()));
    provide_context(QueryCache::new());
    provide_context(ToastService::new(config.toast_timeout_ms));
    provide_context(config);

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
