//! Builder wizard state, kept free of signals so every transition is testable.
//!
//! The survey is created on the server when the first step is left and the
//! later steps attach questions and invitations to it, so there is no way
//! back once a step is done.

use contracts::domain::a001_survey::aggregate::{CreateSurveyDto, Survey, SurveyType};
use contracts::domain::a002_question::aggregate::{renumber, BulkQuestionsDto, NewQuestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Survey,
    Questions,
    Distribution,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Survey,
            WizardStep::Questions,
            WizardStep::Distribution,
        ]
    }

    /// 1-based number shown in the step indicator
    pub fn number(&self) -> usize {
        match self {
            WizardStep::Survey => 1,
            WizardStep::Questions => 2,
            WizardStep::Distribution => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Survey => "Survey details",
            WizardStep::Questions => "Questions",
            WizardStep::Distribution => "Distribution",
        }
    }
}

/// External surveys keep their questions elsewhere
pub fn step_after_survey(survey_type: SurveyType) -> WizardStep {
    match survey_type {
        SurveyType::Internal => WizardStep::Questions,
        SurveyType::External => WizardStep::Distribution,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    step: WizardStep,
    survey: Option<Survey>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Survey,
            survey: None,
        }
    }
}

impl Wizard {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn survey(&self) -> Option<&Survey> {
        self.survey.as_ref()
    }

    pub fn survey_created(&mut self, survey: Survey) -> WizardStep {
        self.step = step_after_survey(survey.survey_type);
        self.survey = Some(survey);
        self.step
    }

    /// Only valid once the survey exists
    pub fn questions_saved(&mut self) -> Result<WizardStep, String> {
        if self.step != WizardStep::Questions || self.survey.is_none() {
            return Err("Questions can only be saved for a new internal survey".to_string());
        }
        self.step = WizardStep::Distribution;
        Ok(self.step)
    }
}

/// Fields of the first step as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyForm {
    pub title: String,
    pub description: String,
    pub survey_type: SurveyType,
    pub external_url: String,
    pub is_draft: bool,
}

impl SurveyForm {
    pub fn to_dto(&self) -> Result<CreateSurveyDto, String> {
        let dto = CreateSurveyDto {
            title: self.title.clone(),
            description: self.description.clone(),
            survey_type: self.survey_type,
            external_url: Some(self.external_url.clone()),
            is_draft: self.is_draft,
        }
        .normalized();
        dto.validate()?;
        Ok(dto)
    }
}

/// Questions collected before they are sent in one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionList {
    questions: Vec<NewQuestion>,
}

impl QuestionList {
    pub fn items(&self) -> &[NewQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn add(&mut self, text: &str, required: bool) -> Result<(), String> {
        let order = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let question = NewQuestion::new(text, required, order);
        question.validate()?;
        self.questions.push(question);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
            renumber(&mut self.questions);
        }
    }

    pub fn set_required(&mut self, index: usize, required: bool) {
        if let Some(question) = self.questions.get_mut(index) {
            question.required = required;
        }
    }

    /// Swaps with the neighbour above (`up`) or below; false at the edges
    pub fn move_question(&mut self, index: usize, up: bool) -> bool {
        let target = if up {
            index.checked_sub(1)
        } else {
            index.checked_add(1)
        };
        match target {
            Some(target) if index < self.questions.len() && target < self.questions.len() => {
                self.questions.swap(index, target);
                renumber(&mut self.questions);
                true
            }
            _ => false,
        }
    }

    pub fn bulk_dto(&self, survey: &Survey) -> Result<BulkQuestionsDto, String> {
        let dto = BulkQuestionsDto {
            survey_id: survey.id,
            questions: self.questions.clone(),
        };
        dto.validate()?;
        Ok(dto)
    }
}
