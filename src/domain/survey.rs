//! Static questionnaire and linear page sequencing.

use super::entities::SurveyData;

/// Default answer options for the two purpose questions.
const FOCUS_OPTIONS: &[&str] = &["A. Retention-Focused", "B. Performance-Focused"];
const YES_NO_OPTIONS: &[&str] = &["A. Yes", "B. No"];

/// Max length of free-text follow-up answers.
pub const FOLLOW_UP_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// One of the listed options; the first one is preselected.
    Radio(&'static [&'static str]),
    /// Free text, bounded length.
    Text { max_chars: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    /// Asked only when the question `.0` was answered with `.1`.
    pub shown_when: Option<(&'static str, &'static str)>,
}

impl Question {
    /// Whether this question is shown given the answers so far.
    pub fn is_shown(&self, answer_of: impl Fn(&str) -> Option<String>) -> bool {
        match self.shown_when {
            None => true,
            Some((question, expected)) => answer_of(question).as_deref() == Some(expected),
        }
    }

    pub fn default_option(&self) -> Option<&'static str> {
        match self.kind {
            QuestionKind::Radio(options) => options.first().copied(),
            QuestionKind::Text { .. } => None,
        }
    }
}

const PAGE_0: &[Question] = &[Question {
    id: "q1",
    prompt: "What is the key purpose of your company's equity plan?",
    kind: QuestionKind::Radio(FOCUS_OPTIONS),
    shown_when: None,
}];

const PAGE_1: &[Question] = &[Question {
    id: "q2",
    prompt: "Who do you want to reward?",
    kind: QuestionKind::Radio(FOCUS_OPTIONS),
    shown_when: None,
}];

const PAGE_2: &[Question] = &[
    Question {
        id: "q3",
        prompt: "Is your company publicly listed?",
        kind: QuestionKind::Radio(YES_NO_OPTIONS),
        shown_when: None,
    },
    Question {
        id: "q3_1",
        prompt: "Do you plan to go IPO? Can you elaborate more?",
        kind: QuestionKind::Text {
            max_chars: FOLLOW_UP_MAX_CHARS,
        },
        shown_when: Some(("q3", "B. No")),
    },
    Question {
        id: "q4",
        prompt: "How does your company want to reward?",
        kind: QuestionKind::Radio(YES_NO_OPTIONS),
        shown_when: None,
    },
];

const PAGES: &[&[Question]] = &[PAGE_0, PAGE_1, PAGE_2];

/// Page cursor over the questionnaire. Moves one page at a time and clamps
/// at both ends; submitting is only offered on the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyPages {
    current: usize,
}

impl SurveyPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count() -> usize {
        PAGES.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn questions(&self) -> &'static [Question] {
        PAGES[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == PAGES.len()
    }

    pub fn next(&mut self) {
        if !self.is_last() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// All questions across every page, in display order.
    pub fn all_questions() -> impl Iterator<Item = &'static Question> {
        PAGES.iter().flat_map(|page| page.iter())
    }

    /// Drop answers to conditional questions whose condition no longer holds,
    /// e.g. the IPO follow-up once q3 is changed back to "A. Yes".
    pub fn prune_hidden(data: &mut SurveyData) {
        for question in Self::all_questions() {
            let shown =
                question.is_shown(|id| data.get(id).and_then(|answer| answer.value.clone()));
            if !shown {
                data.remove(question.id);
            }
        }
    }
}
