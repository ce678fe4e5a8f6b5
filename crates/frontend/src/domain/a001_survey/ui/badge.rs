use contracts::domain::a001_survey::aggregate::{SurveyStatus, SurveyType};
use leptos::prelude::*;
use thaw::*;

pub fn status_color(status: SurveyStatus) -> BadgeColor {
    match status {
        SurveyStatus::Draft => BadgeColor::Warning,
        SurveyStatus::Published => BadgeColor::Success,
    }
}

pub fn type_color(survey_type: SurveyType) -> BadgeColor {
    match survey_type {
        SurveyType::Internal => BadgeColor::Brand,
        SurveyType::External => BadgeColor::Informative,
    }
}

#[component]
pub fn SurveyStatusBadge(status: SurveyStatus) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
            {status.display_name()}
        </Badge>
    }
}

/// Type code in capitals, e.g. `INTERNAL`
#[component]
pub fn SurveyTypeBadge(survey_type: SurveyType) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Outline color=type_color(survey_type)>
            {survey_type.code().to_uppercase()}
        </Badge>
    }
}
