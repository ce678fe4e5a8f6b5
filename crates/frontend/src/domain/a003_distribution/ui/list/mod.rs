use contracts::domain::a003_distribution::aggregate::{Distribution, DistributionStatus};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::a001_survey::api::{detail_key, fetch_survey};
use crate::domain::a003_distribution::api::{fetch_distributions, list_key};
use crate::domain::a003_distribution::ui::form::DistributionForm;
use crate::shared::components::data_table::{CellValue, Column, DataTable, TableRow};
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::navigation::survey_path;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::use_query;

/// Shown in the schedule column for invitations sent right away
pub const IMMEDIATE: &str = "Immediate";

impl TableRow for Distribution {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "recipient_email" => self.recipient_email.as_str().into(),
            "subject" => self.subject.as_str().into(),
            "message" => self.message.as_deref().into(),
            "scheduled_at" => self
                .scheduled_at
                .as_ref()
                .map(format_datetime)
                .unwrap_or_else(|| IMMEDIATE.to_string())
                .into(),
            "status" => self.status_label().into(),
            "created_at" => format_datetime(&self.created_at).into(),
            _ => CellValue::Null,
        }
    }
}

fn status_color(status: Option<DistributionStatus>) -> BadgeColor {
    match status {
        Some(DistributionStatus::Sent) | Some(DistributionStatus::Opened) => BadgeColor::Success,
        Some(DistributionStatus::Clicked) => BadgeColor::Brand,
        Some(DistributionStatus::Pending) => BadgeColor::Warning,
        Some(DistributionStatus::Failed) => BadgeColor::Danger,
        Some(DistributionStatus::Unknown) | None => BadgeColor::Subtle,
    }
}

pub fn distribution_columns() -> Vec<Column<Distribution>> {
    vec![
        Column::new("recipient_email", "Recipient"),
        Column::new("subject", "Subject").class("data-table__cell--truncate"),
        Column::new("message", "Message").class("data-table__cell--truncate"),
        Column::new("scheduled_at", "Scheduled at"),
        Column::new("status", "Status").render_view(|value, row: &Distribution| {
            let label = value.to_string();
            view! {
                <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                    {label}
                </Badge>
            }
            .into_any()
        }),
        Column::new("created_at", "Created"),
    ]
}

#[component]
pub fn DistributionList() -> impl IntoView {
    let params = use_params_map();
    let show_send = RwSignal::new(false);

    let survey_id = Signal::derive(move || params.with(|p| p.get("id").unwrap_or_default()));

    let survey_query = use_query(
        Signal::derive(move || detail_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_survey(&api, &id).await }
        },
    );
    let query = use_query(
        Signal::derive(move || list_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_distributions(&api, &id).await }
        },
    );

    let title = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().map(|s| format!("Distributions: {}", s.title)))
            .unwrap_or_else(|| "Distributions".to_string())
    });
    let subtitle = Signal::derive(move || {
        query
            .data
            .with(|d| d.as_ref().map(|rows| format!("{} invitations", rows.len())))
    });

    let close = Callback::new(move |_: ()| show_send.set(false));
    let sent = Callback::new(move |_: usize| show_send.set(false));

    view! {
        <PageFrame page_id="a003_distribution--list" category=PAGE_CAT_LIST>
            <PageHeader
                title=title
                subtitle=subtitle
                back_href=survey_path(&survey_id.get_untracked())
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || survey_query.data.with(Option::is_none))
                    on_click=move |_| show_send.set(true)
                >
                    {icon("send")}
                    " Distribute"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || query.error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                <DataTable
                    data=Signal::derive(move || query.data.get().unwrap_or_default())
                    columns=distribution_columns()
                    loading=Signal::derive(move || query.is_loading.get())
                    empty_message="This survey has not been sent yet"
                />
            </div>

            {move || {
                let survey = survey_query.data.get()?;
                show_send.get().then(|| view! {
                    <Modal title="Distribute survey" on_close=close>
                        <DistributionForm
                            survey_id=survey.id
                            on_sent=sent
                            on_cancel=close
                            cancel_label="Cancel"
                        />
                    </Modal>
                })
            }}
        </PageFrame>
    }
}
