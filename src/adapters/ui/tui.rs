//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Login -> session menu -> three survey pages -> result and term sheet download.

use crate::adapters::documents::save_download;
use crate::adapters::ui::progress::spinner;
use crate::domain::{
    Classification, Document, DocumentLookup, DomainError, LtipTool, Question, QuestionKind,
    RawAnswer, SurveyData, SurveyPages, User,
};
use crate::ports::InputPort;
use crate::usecases::{AuthService, SubmitOutcome, Submission, SurveyService};
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::MaxLengthValidator;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

const MENU_START: &str = "Start survey";
const MENU_LOGOUT: &str = "Logout";
const MENU_QUIT: &str = "Quit";

const NAV_PREVIOUS: &str = "Previous";
const NAV_NEXT: &str = "Next";
const NAV_SUBMIT: &str = "Submit";
const NAV_CANCEL: &str = "Cancel survey";

/// Apply the prompt theme globally.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightYellow))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

/// Ctrl-C / Esc end the current flow instead of erroring.
fn ask<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Prompt(e.to_string())),
    }
}

/// Current value of a question, if answered.
fn value_of(data: &SurveyData, question_id: &str) -> Option<String> {
    data.get(question_id).and_then(|a| a.value.clone())
}

/// Navigation choices for the current page.
fn nav_options(pages: &SurveyPages) -> Vec<&'static str> {
    let mut options = Vec::with_capacity(3);
    if !pages.is_first() {
        options.push(NAV_PREVIOUS);
    }
    options.push(if pages.is_last() { NAV_SUBMIT } else { NAV_NEXT });
    options.push(NAV_CANCEL);
    options
}

/// What the result screen shows for a submission.
#[derive(Debug, PartialEq, Eq)]
enum ResultView<'a> {
    Undetermined,
    /// Tool known but no lookup was made.
    ToolOnly(LtipTool),
    SheetMissing(LtipTool),
    Offer(LtipTool, &'a Document),
}

fn result_view(submission: &Submission) -> ResultView<'_> {
    match (submission.classification, &submission.document) {
        (Classification::Undetermined, _) => ResultView::Undetermined,
        (Classification::Tool(tool), DocumentLookup::Found(doc)) => ResultView::Offer(tool, doc),
        (Classification::Tool(tool), DocumentLookup::NotFound) => ResultView::SheetMissing(tool),
        (Classification::Tool(tool), DocumentLookup::NotApplicable) => ResultView::ToolOnly(tool),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    auth_service: Arc<AuthService>,
    survey_service: Arc<SurveyService>,
    downloads_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(
        auth_service: Arc<AuthService>,
        survey_service: Arc<SurveyService>,
        downloads_dir: PathBuf,
    ) -> Self {
        Self {
            auth_service,
            survey_service,
            downloads_dir,
        }
    }

    /// Prompt until login succeeds. `None` when the user aborts.
    fn login(&self) -> Result<Option<User>, DomainError> {
        loop {
            let Some(username) = ask(Text::new("Username:").prompt())? else {
                return Ok(None);
            };
            let Some(password) = ask(
                Password::new("Password:")
                    .without_confirmation()
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .prompt(),
            )?
            else {
                return Ok(None);
            };
            match self.auth_service.login(&username, &password) {
                Ok(user) => return Ok(Some(user)),
                Err(DomainError::Auth(msg)) => println!("{}", msg.red()),
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask a single question, preselecting any earlier answer.
    fn ask_question(
        &self,
        question: &Question,
        data: &SurveyData,
    ) -> Result<Option<String>, DomainError> {
        let previous = value_of(data, question.id);
        match question.kind {
            QuestionKind::Radio(options) => {
                let cursor = previous
                    .as_deref()
                    .or(question.default_option())
                    .and_then(|p| options.iter().position(|o| *o == p))
                    .unwrap_or(0);
                let picked = ask(
                    Select::new(question.prompt, options.to_vec())
                        .with_starting_cursor(cursor)
                        .prompt(),
                )?;
                Ok(picked.map(str::to_string))
            }
            QuestionKind::Text { max_chars } => ask(
                Text::new(question.prompt)
                    .with_initial_value(previous.as_deref().unwrap_or(""))
                    .with_validator(MaxLengthValidator::new(max_chars))
                    .prompt(),
            ),
        }
    }

    /// Walk the pages. Returns the collected answers, or `None` if cancelled.
    fn run_pages(&self) -> Result<Option<SurveyData>, DomainError> {
        let mut data = SurveyData::new();
        let mut pages = SurveyPages::new();
        loop {
            println!(
                "\n{}",
                format!("Page {}/{}", pages.current() + 1, SurveyPages::count()).bold()
            );
            for question in pages.questions() {
                if !question.is_shown(|id| value_of(&data, id)) {
                    continue;
                }
                let Some(value) = self.ask_question(question, &data)? else {
                    return Ok(None);
                };
                data.insert(
                    question.id.to_string(),
                    RawAnswer {
                        label: Some(question.id.to_string()),
                        value: Some(value),
                    },
                );
            }
            SurveyPages::prune_hidden(&mut data);

            let Some(choice) = ask(Select::new("Continue:", nav_options(&pages)).prompt())? else {
                return Ok(None);
            };
            match choice {
                NAV_PREVIOUS => pages.previous(),
                NAV_NEXT => pages.next(),
                NAV_SUBMIT => return Ok(Some(data)),
                _ => return Ok(None),
            }
        }
    }

    async fn take_survey(&self, user: &User) -> Result<(), DomainError> {
        println!("{}", "Please complete the following questions".dim());
        let Some(data) = self.run_pages()? else {
            println!("Survey cancelled.");
            return Ok(());
        };

        let pb = spinner("Recording your responses...");
        let outcome = self.survey_service.submit(&data, &user.name).await;
        pb.finish_and_clear();

        match outcome? {
            SubmitOutcome::Incomplete { missing } => {
                println!(
                    "{}",
                    format!(
                        "Please answer every question before submitting (missing: {}).",
                        missing.join(", ")
                    )
                    .yellow()
                );
                Ok(())
            }
            SubmitOutcome::Submitted(submission) => self.present(submission).await,
        }
    }

    async fn present(&self, submission: Submission) -> Result<(), DomainError> {
        if let Ok(json) = serde_json::to_string_pretty(&submission.record) {
            println!("{}", json);
        }
        println!("{}", "Your responses have been recorded!".green());

        let (tool, doc) = match result_view(&submission) {
            ResultView::Undetermined => {
                println!(
                    "The suitable LTIP tool for you could not be determined based on your responses."
                );
                return Ok(());
            }
            ResultView::ToolOnly(tool) => {
                println!("The suitable LTIP tool for you is: {}", tool.name().bold());
                return Ok(());
            }
            ResultView::SheetMissing(tool) => {
                println!("The suitable LTIP tool for you is: {}", tool.name().bold());
                println!("{}", format!("Term sheet for {} not found.", tool).red());
                return Ok(());
            }
            ResultView::Offer(tool, doc) => {
                println!("The suitable LTIP tool for you is: {}", tool.name().bold());
                (tool, doc)
            }
        };
        let wants = ask(
            Confirm::new(&format!("Download {} Term Sheet?", tool))
                .with_default(true)
                .prompt(),
        )?;
        if wants == Some(true) {
            match save_download(doc, &self.downloads_dir).await {
                Ok(path) => println!("Saved {} ({})", path.display(), doc.mime),
                Err(e) => {
                    error!(error = %e, "term sheet download failed");
                    println!("{}", e.to_string().red());
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(user) = self.login()? else {
                return Ok(());
            };
            println!("Welcome {}", user.name.as_str().italic());
            println!("{}", "Long-Term Incentive Design Tool".bold());

            loop {
                let Some(choice) =
                    ask(Select::new("Menu:", vec![MENU_START, MENU_LOGOUT, MENU_QUIT]).prompt())?
                else {
                    return Ok(());
                };
                match choice {
                    MENU_START => {
                        if let Err(e) = self.take_survey(&user).await {
                            warn!(error = %e, "survey submission failed");
                            println!("{}", e.to_string().red());
                        }
                    }
                    MENU_LOGOUT => break,
                    _ => return Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_options_per_page() {
        let mut pages = SurveyPages::new();
        assert_eq!(nav_options(&pages), vec![NAV_NEXT, NAV_CANCEL]);
        pages.next();
        assert_eq!(nav_options(&pages), vec![NAV_PREVIOUS, NAV_NEXT, NAV_CANCEL]);
        pages.next();
        assert_eq!(
            nav_options(&pages),
            vec![NAV_PREVIOUS, NAV_SUBMIT, NAV_CANCEL]
        );
    }

    #[test]
    fn test_ask_maps_cancel_to_none() {
        let canceled: Result<String, InquireError> = Err(InquireError::OperationCanceled);
        assert!(ask(canceled).unwrap().is_none());
        let ok: Result<u8, InquireError> = Ok(3);
        assert_eq!(ask(ok).unwrap(), Some(3));
    }

    #[test]
    fn test_value_of() {
        let mut data = SurveyData::new();
        data.insert("q1".into(), RawAnswer::with_value("A. Yes"));
        data.insert("q2".into(), RawAnswer::default());
        assert_eq!(value_of(&data, "q1").as_deref(), Some("A. Yes"));
        assert_eq!(value_of(&data, "q2"), None);
        assert_eq!(value_of(&data, "q9"), None);
    }

    fn submission(classification: Classification, document: DocumentLookup) -> Submission {
        Submission {
            record: crate::domain::normalize(&SurveyData::new(), "Jane Doe", "t"),
            classification,
            document,
        }
    }

    #[test]
    fn test_result_view_per_outcome() {
        let undetermined = submission(Classification::Undetermined, DocumentLookup::NotApplicable);
        assert_eq!(result_view(&undetermined), ResultView::Undetermined);

        let tool = Classification::Tool(LtipTool::ShareOption);
        let missing = submission(tool, DocumentLookup::NotFound);
        assert_eq!(
            result_view(&missing),
            ResultView::SheetMissing(LtipTool::ShareOption)
        );

        let skipped = submission(tool, DocumentLookup::NotApplicable);
        assert_eq!(
            result_view(&skipped),
            ResultView::ToolOnly(LtipTool::ShareOption)
        );

        let doc = Document {
            file_name: LtipTool::ShareOption.term_sheet_file_name(),
            mime: crate::domain::DOCX_MIME,
            bytes: b"sheet".to_vec(),
        };
        let found = submission(tool, DocumentLookup::Found(doc.clone()));
        assert_eq!(
            result_view(&found),
            ResultView::Offer(LtipTool::ShareOption, &doc)
        );
    }
}
