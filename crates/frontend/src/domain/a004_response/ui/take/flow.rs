//! Conversational answering flow.
//!
//! `Intro -> Starting -> Asking(0) -> ... -> Asking(n-1) -> Review ->
//! Submitting -> Done`. The response is opened on the server while
//! `Starting`; answers are kept locally and sent together from `Review`.

use contracts::domain::a001_survey::aggregate::SurveyId;
use contracts::domain::a002_question::aggregate::Question;
use contracts::domain::a003_distribution::aggregate::DistributionId;
use contracts::domain::a004_response::aggregate::{
    answer_for, CreateResponseDto, NewAnswer, RespondentData, ResponseId, SubmitAnswersDto,
};
use contracts::domain::common::AggregateId;

/// Transcript text for skipped questions
pub const SKIPPED: &str = "[Skipped]";

#[derive(Debug, Clone, PartialEq)]
pub enum FlowStage {
    Intro,
    Starting,
    /// Index into the ordered questions
    Asking(usize),
    Review,
    Submitting,
    Done,
    Failed(String),
}

/// Invitation link parameters: `?distribution_id=...&clicked_at=...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attribution {
    pub distribution_id: Option<DistributionId>,
    pub clicked: bool,
}

impl Attribution {
    /// A malformed id is treated as a walk-in visit
    pub fn from_query(distribution_id: Option<&str>, clicked_at: Option<&str>) -> Self {
        Self {
            distribution_id: distribution_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .and_then(|id| DistributionId::from_string(id).ok()),
            clicked: clicked_at.is_some_and(|c| !c.trim().is_empty()),
        }
    }

    /// The click is reported once per page load, only for invitation links
    pub fn should_count_click(&self) -> bool {
        self.clicked && self.distribution_id.is_some()
    }

    /// Invited respondents skip the name form
    pub fn respondent(&self) -> Option<RespondentData> {
        self.distribution_id.map(RespondentData::invited)
    }
}

/// One exchange shown in the chat transcript
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TakeFlow {
    questions: Vec<Question>,
    answers: Vec<Option<NewAnswer>>,
    response_id: Option<ResponseId>,
    stage: FlowStage,
}

impl TakeFlow {
    pub fn new(mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| q.order);
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            response_id: None,
            stage: FlowStage::Intro,
        }
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    pub fn response_id(&self) -> Option<ResponseId> {
        self.response_id
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.stage {
            FlowStage::Asking(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// `(answered so far, total)`
    pub fn progress(&self) -> (usize, usize) {
        let done = match self.stage {
            FlowStage::Intro | FlowStage::Starting => 0,
            FlowStage::Asking(index) => index,
            FlowStage::Failed(_) if self.response_id.is_none() => 0,
            _ => self.questions.len(),
        };
        (done, self.questions.len())
    }

    /// Moves from `Intro` to `Starting` and returns the body that opens the response
    pub fn begin_start(
        &mut self,
        survey_id: SurveyId,
        respondent: RespondentData,
    ) -> Result<CreateResponseDto, String> {
        if self.stage != FlowStage::Intro {
            return Err("The survey has already started".to_string());
        }
        if self.questions.is_empty() {
            return Err("This survey has no questions".to_string());
        }
        self.stage = FlowStage::Starting;
        Ok(CreateResponseDto {
            survey_id,
            respondent_data: respondent,
        })
    }

    /// Outcome of opening the response; ignored unless starting
    pub fn started(&mut self, result: Result<ResponseId, String>) {
        if self.stage != FlowStage::Starting {
            return;
        }
        self.stage = match result {
            Ok(id) => {
                self.response_id = Some(id);
                FlowStage::Asking(0)
            }
            Err(message) => FlowStage::Failed(message),
        };
    }

    /// Records the answer to the current question and moves on.
    /// `None` or blank input skips, which only optional questions allow.
    pub fn answer(&mut self, input: Option<&str>) -> Result<(), String> {
        let FlowStage::Asking(index) = self.stage else {
            return Err("No question is waiting for an answer".to_string());
        };
        let question = self
            .questions
            .get(index)
            .ok_or_else(|| "No question is waiting for an answer".to_string())?;
        let answer = answer_for(question, input)?;

        self.answers[index] = Some(answer);
        self.stage = if index + 1 < self.questions.len() {
            FlowStage::Asking(index + 1)
        } else {
            FlowStage::Review
        };
        Ok(())
    }

    /// Steps back one question; the stored answer is kept for editing.
    /// The first question is as far back as it goes once the response exists.
    pub fn back(&mut self) {
        self.stage = match self.stage {
            FlowStage::Asking(index) if index > 0 => FlowStage::Asking(index - 1),
            FlowStage::Review if !self.questions.is_empty() => {
                FlowStage::Asking(self.questions.len() - 1)
            }
            ref other => other.clone(),
        };
    }

    /// Value previously given for the current question
    pub fn current_answer(&self) -> Option<&str> {
        match self.stage {
            FlowStage::Asking(index) => self
                .answers
                .get(index)
                .and_then(Option::as_ref)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Questions already passed, with their answers
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        let (done, _) = self.progress();
        self.questions
            .iter()
            .zip(&self.answers)
            .take(done)
            .map(|(question, answer)| TranscriptEntry {
                question: question.text.clone(),
                answer: answer
                    .as_ref()
                    .map(|a| a.value.clone())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| SKIPPED.to_string()),
            })
            .collect()
    }

    /// Moves from `Review` to `Submitting`; skipped questions are sent as `""`
    pub fn begin_submit(&mut self) -> Result<(ResponseId, SubmitAnswersDto), String> {
        if self.stage != FlowStage::Review {
            return Err("Answer all questions before submitting".to_string());
        }
        let response_id = self
            .response_id
            .ok_or_else(|| "The response has not been started".to_string())?;
        let answers = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| {
                answer.clone().unwrap_or_else(|| NewAnswer {
                    question_id: question.id,
                    value: String::new(),
                })
            })
            .collect();
        self.stage = FlowStage::Submitting;
        Ok((response_id, SubmitAnswersDto { answers }))
    }

    /// Outcome of the submit request; ignored unless submitting
    pub fn finish(&mut self, result: Result<(), String>) {
        if self.stage != FlowStage::Submitting {
            return;
        }
        self.stage = match result {
            Ok(()) => FlowStage::Done,
            Err(message) => FlowStage::Failed(message),
        };
    }

    /// A failed start goes back to the intro, a failed submit to the review
    pub fn retry(&mut self) {
        if matches!(self.stage, FlowStage::Failed(_)) {
            self.stage = match self.response_id {
                Some(_) => FlowStage::Review,
                None => FlowStage::Intro,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a002_question::aggregate::QuestionId;

    fn question(text: &str, required: bool, order: u32) -> Question {
        Question {
            id: QuestionId::new_v4(),
            text: text.to_string(),
            required,
            order,
            question_type: None,
            created_at: Utc::now(),
        }
    }

    fn flow() -> TakeFlow {
        TakeFlow::new(vec![
            question("How was onboarding?", true, 1),
            question("Your team?", true, 0),
            question("Anything else?", false, 2),
        ])
    }

    fn walk_in() -> RespondentData {
        RespondentData::from_form("Ann", "").unwrap()
    }

    fn started() -> (TakeFlow, ResponseId) {
        let mut flow = flow();
        flow.begin_start(SurveyId::new_v4(), walk_in()).unwrap();
        let id = ResponseId::new_v4();
        flow.started(Ok(id));
        (flow, id)
    }

    #[test]
    fn test_questions_are_asked_in_order() {
        let (flow, _) = started();
        assert_eq!(flow.current_question().unwrap().text, "Your team?");
    }

    #[test]
    fn test_happy_path() {
        let mut flow = flow();
        assert_eq!(flow.stage(), &FlowStage::Intro);
        let survey_id = SurveyId::new_v4();
        let create = flow.begin_start(survey_id, walk_in()).unwrap();
        assert_eq!(create.survey_id, survey_id);
        assert_eq!(create.respondent_data.name.as_deref(), Some("Ann"));
        assert_eq!(flow.stage(), &FlowStage::Starting);

        let response_id = ResponseId::new_v4();
        flow.started(Ok(response_id));
        assert_eq!(flow.stage(), &FlowStage::Asking(0));

        flow.answer(Some(" Platform ")).unwrap();
        flow.answer(Some("Smooth")).unwrap();
        assert_eq!(flow.progress(), (2, 3));
        flow.answer(None).unwrap();
        assert_eq!(flow.stage(), &FlowStage::Review);

        let (id, dto) = flow.begin_submit().unwrap();
        assert_eq!(id, response_id);
        assert_eq!(flow.stage(), &FlowStage::Submitting);
        let values: Vec<&str> = dto.answers.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(values, vec!["Platform", "Smooth", ""]);

        flow.finish(Ok(()));
        assert_eq!(flow.stage(), &FlowStage::Done);
    }

    #[test]
    fn test_required_question_cannot_be_skipped() {
        let (mut flow, _) = started();
        assert_eq!(flow.answer(None).unwrap_err(), "This question requires an answer");
        assert_eq!(flow.answer(Some("   ")).unwrap_err(), "This question requires an answer");
        assert_eq!(flow.stage(), &FlowStage::Asking(0));
    }

    #[test]
    fn test_start_needs_questions() {
        let mut empty = TakeFlow::new(vec![]);
        assert_eq!(
            empty.begin_start(SurveyId::new_v4(), walk_in()).unwrap_err(),
            "This survey has no questions"
        );
        assert_eq!(empty.stage(), &FlowStage::Intro);
    }

    #[test]
    fn test_failed_start_retries_from_intro() {
        let mut flow = flow();
        flow.begin_start(SurveyId::new_v4(), walk_in()).unwrap();
        assert!(flow.begin_start(SurveyId::new_v4(), walk_in()).is_err());
        flow.started(Err("Network error: offline".to_string()));
        assert_eq!(flow.stage(), &FlowStage::Failed("Network error: offline".to_string()));
        assert_eq!(flow.progress(), (0, 3));

        flow.retry();
        assert_eq!(flow.stage(), &FlowStage::Intro);
        assert!(flow.response_id().is_none());
    }

    #[test]
    fn test_failed_submit_retries_from_review() {
        let (mut flow, _) = started();
        flow.answer(Some("Platform")).unwrap();
        flow.answer(Some("Smooth")).unwrap();
        flow.answer(None).unwrap();
        flow.begin_submit().unwrap();

        flow.finish(Err("Request failed".to_string()));
        flow.retry();
        assert_eq!(flow.stage(), &FlowStage::Review);
        assert!(flow.begin_submit().is_ok());
    }

    #[test]
    fn test_outcomes_outside_their_stage_are_ignored() {
        let mut flow = flow();
        assert!(flow.begin_submit().is_err());
        flow.finish(Ok(()));
        flow.started(Ok(ResponseId::new_v4()));
        assert_eq!(flow.stage(), &FlowStage::Intro);
        assert!(flow.response_id().is_none());
    }

    #[test]
    fn test_back_and_transcript() {
        let (mut flow, _) = started();
        flow.answer(Some("Platform")).unwrap();
        flow.answer(Some("Smooth")).unwrap();
        flow.answer(None).unwrap();

        let transcript = flow.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].answer, SKIPPED);

        flow.back();
        assert_eq!(flow.stage(), &FlowStage::Asking(2));
        flow.back();
        assert_eq!(flow.current_answer(), Some("Smooth"));
        flow.back();
        flow.back();
        assert_eq!(flow.stage(), &FlowStage::Asking(0));
    }

    #[test]
    fn test_invitation_link_attribution() {
        let id = DistributionId::new_v4();
        let attribution = Attribution::from_query(Some(&id.as_string()), Some("1717171717"));
        assert_eq!(attribution.distribution_id, Some(id));
        assert!(attribution.should_count_click());
        assert_eq!(attribution.respondent(), Some(RespondentData::invited(id)));
    }

    #[test]
    fn test_click_needs_both_parameters() {
        let id = DistributionId::new_v4().as_string();
        assert!(!Attribution::from_query(Some(&id), None).should_count_click());
        assert!(!Attribution::from_query(None, Some("1717171717")).should_count_click());
        assert_eq!(
            Attribution::from_query(Some("not-a-uuid"), Some("1")),
            Attribution {
                distribution_id: None,
                clicked: true
            }
        );
        assert_eq!(Attribution::from_query(None, None).respondent(), None);
    }
}
