use contracts::domain::a001_survey::aggregate::SurveyId;
use contracts::domain::a003_distribution::aggregate::{
    is_email_valid, parse_recipients, CreateDistributionDto, DistributionMethod,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_distribution::api::{create_distributions, CACHE_PREFIX};
use crate::shared::api_client::use_api;
use crate::shared::date_utils::{local_input_now, local_input_to_utc};
use crate::shared::icons::icon;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

/// Recipients added one address at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientList {
    emails: Vec<String>,
}

impl RecipientList {
    pub fn items(&self) -> &[String] {
        &self.emails
    }

    /// An address already in the list is accepted and ignored.
    /// A pasted list separated by commas, semicolons or line breaks is added whole.
    pub fn add(&mut self, input: &str) -> Result<(), String> {
        let input = input.trim();
        if input.contains([',', ';', '\n']) {
            for email in parse_recipients(input)? {
                self.push(&email);
            }
            return Ok(());
        }
        if !is_email_valid(input) {
            return Err("Please enter a valid email address".to_string());
        }
        self.push(input);
        Ok(())
    }

    fn push(&mut self, email: &str) {
        if !self.emails.iter().any(|e| e.eq_ignore_ascii_case(email)) {
            self.emails.push(email.to_string());
        }
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.emails.len() {
            self.emails.remove(index);
        }
    }
}

/// Validates the send form and builds the request.
///
/// `schedule` is the raw `datetime-local` value in the browser's zone;
/// blank sends immediately.
pub fn build_distribution(
    survey_id: SurveyId,
    recipients: &RecipientList,
    subject: &str,
    message: &str,
    schedule: &str,
) -> Result<CreateDistributionDto, String> {
    let dto = CreateDistributionDto {
        survey_id,
        recipient_emails: recipients.items().to_vec(),
        subject: subject.trim().to_string(),
        message: message.trim().to_string(),
        scheduled_at: local_input_to_utc(schedule)?,
        method: DistributionMethod::Email,
    };
    dto.validate()?;
    Ok(dto)
}

/// Invitation form shared by the builder's last step and the distributions page
#[component]
pub fn DistributionForm(
    survey_id: SurveyId,
    /// Called with the number of invitations created
    on_sent: Callback<usize>,
    on_cancel: Callback<()>,
    #[prop(into)] cancel_label: String,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let cache = use_query_cache();
    let toast = use_toast();

    let recipients = RwSignal::new(RecipientList::default());
    let new_email = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let schedule = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let sending = RwSignal::new(false);

    let add_email = move || {
        let email = new_email.get_untracked();
        match recipients.try_update(|r| r.add(&email)) {
            Some(Ok(())) => {
                new_email.set(String::new());
                error.set(None);
            }
            Some(Err(e)) => error.set(Some(e)),
            None => {}
        }
    };

    let send = move || {
        let dto = recipients.with_untracked(|r| {
            build_distribution(
                survey_id,
                r,
                &subject.get_untracked(),
                &message.get_untracked(),
                &schedule.get_untracked(),
            )
        });
        let dto = match dto {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        sending.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match create_distributions(&api, &dto).await {
                Ok(count) => {
                    log::info!("Created {} invitations for survey {}", count, dto.survey_id);
                    cache.invalidate(CACHE_PREFIX);
                    toast.success(match dto.scheduled_at {
                        Some(_) => format!("Scheduled {} invitations", count),
                        None => format!("Sent {} invitations", count),
                    });
                    on_sent.run(count);
                }
                Err(e) => {
                    toast.error(format!("Error creating distribution: {}", e));
                    let _ = sending.try_set(false);
                }
            }
        });
    };

    let recipient_rows = move || {
        recipients
            .get()
            .items()
            .iter()
            .enumerate()
            .map(|(index, email)| {
                view! {
                    <div class="recipient">
                        <span class="recipient__email">{email.clone()}</span>
                        <button
                            class="button button--icon"
                            title="Remove"
                            on:click=move |_| recipients.update(|r| r.remove(index))
                        >
                            {icon("x")}
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="form">
            <div class="form__group">
                <Label>"Recipient emails"</Label>
                <Flex gap=FlexGap::Small>
                    <Input
                        value=new_email
                        placeholder="Enter email address"
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                add_email();
                            }
                        }
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || !new_email.with(|e| is_email_valid(e.trim())))
                        on_click=move |_| add_email()
                    >
                        "Add"
                    </Button>
                </Flex>
                <div class="recipient-list">{recipient_rows}</div>
            </div>
            <div class="form__group">
                <Label>"Email subject"</Label>
                <Input value=subject placeholder="Enter email subject" />
            </div>
            <div class="form__group">
                <Label>"Email message"</Label>
                <Textarea value=message placeholder="Enter your email message..." attr:rows=6 />
            </div>
            <div class="form__group">
                <Label>"Schedule send (optional)"</Label>
                <input
                    class="input"
                    type="datetime-local"
                    min=local_input_now()
                    bind:value=schedule
                />
                <div class="form__hint">"Leave empty to send immediately"</div>
            </div>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            <Flex justify=FlexJustify::End gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=sending
                    on_click=move |_| on_cancel.run(())
                >
                    {cancel_label}
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=sending
                    on_click=move |_| send()
                >
                    {icon("send")}
                    " Distribute"
                </Button>
            </Flex>
        </div>
    }
}
