use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Form for one new question.
///
/// `on_submit` receives the text and the required flag and decides whether
/// they are accepted; the form is cleared on `Ok` and the error is shown
/// inline on `Err`.
#[component]
pub fn QuestionEditor(
    on_submit: Callback<(String, bool), Result<(), String>>,
    #[prop(optional, into)] busy: Signal<bool>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let required = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let submit = move || {
        match on_submit.run((text.get_untracked(), required.get_untracked())) {
            Ok(()) => {
                text.set(String::new());
                required.set(false);
                error.set(None);
            }
            Err(e) => error.set(Some(e)),
        }
    };

    view! {
        <div class="question-editor">
            <Flex gap=FlexGap::Medium align=FlexAlign::End>
                <div class="form__group form__group--grow">
                    <Label>"Question"</Label>
                    <Input value=text placeholder="What would you like to ask?" />
                </div>
                <Checkbox checked=required label="Required" />
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=busy
                    on_click=move |_| submit()
                >
                    {icon("plus")}
                    " Add question"
                </Button>
            </Flex>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
