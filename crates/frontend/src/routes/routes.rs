use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

use crate::dashboards::SurveyAnalyticsDashboard;
use crate::domain::a001_survey::ui::builder::SurveyBuilder;
use crate::domain::a001_survey::ui::details::SurveyDetails;
use crate::domain::a001_survey::ui::list::SurveyList;
use crate::domain::a003_distribution::ui::list::DistributionList;
use crate::domain::a004_response::ui::list::ResponseList;
use crate::domain::a004_response::ui::take::TakeSurvey;
use crate::layout::Shell;
use crate::shared::navigation::SURVEYS_PATH;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h1 class="page__title">"Page not found"</h1>
            <p>"The page you are looking for does not exist."</p>
            <A href=SURVEYS_PATH>"Back to surveys"</A>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=SurveyList />
                    <Route path=path!("/surveys/new") view=SurveyBuilder />
                    <Route path=path!("/survey-builder") view=SurveyBuilder />
                    <Route path=path!("/surveys/:id") view=SurveyDetails />
                    <Route path=path!("/surveys/:id/distributions") view=DistributionList />
                    <Route path=path!("/surveys/:id/responses") view=ResponseList />
                    <Route path=path!("/surveys/:id/take") view=TakeSurvey />
                    <Route path=path!("/surveys/:id/analytics") view=SurveyAnalyticsDashboard />
                </Routes>
            </Shell>
        </Router>
    }
}
