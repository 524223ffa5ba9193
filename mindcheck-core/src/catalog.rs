//! The fixed survey question catalog.
//!
//! The catalog is a `'static` ordered slice, so render loops iterate it
//! directly and answers can be stored by position. The order here is the
//! order the questions appear on screen; keys and option strings are the
//! exact values the prediction service's label encoders expect.

/// One multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Feature name sent to the prediction service.
    pub key: &'static str,
    /// Text shown to the user.
    pub prompt: &'static str,
    /// Allowed answers in display order.
    pub options: &'static [&'static str],
}

impl Question {
    /// Returns the position of `value` in this question's options.
    pub fn option_index(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| *o == value)
    }
}

const YES_NO_MAYBE: &[&str] = &["Yes", "No", "Maybe"];
const NO_YES: &[&str] = &["No", "Yes"];

/// All survey questions, in display order.
pub const CATALOG: &[Question] = &[
    Question {
        key: "Gender",
        prompt: "What is your gender?",
        options: &["Female", "Male"],
    },
    Question {
        key: "self_employed",
        prompt: "Are you self-employed?",
        options: NO_YES,
    },
    Question {
        key: "family_history",
        prompt: "Do you have a family history of mental health issues?",
        options: NO_YES,
    },
    Question {
        key: "treatment",
        prompt: "Have you ever received mental health treatment?",
        options: NO_YES,
    },
    Question {
        key: "Days_Indoors",
        prompt: "How frequently do you go outdoors?",
        options: &[
            "Go out Every day",
            "1-14 days",
            "15-30 days",
            "31-60 days",
            "More than 2 months",
        ],
    },
    Question {
        key: "Growing_Stress",
        prompt: "Do you feel that your stress levels are increasing?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "Changes_Habits",
        prompt: "Have you experienced significant changes in your daily habits?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "Mental_Health_History",
        prompt: "Do you have a personal history of mental health issues?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "Coping_Struggles",
        prompt: "Do you find it difficult to cope with daily challenges?",
        options: &["Yes", "No"],
    },
    Question {
        key: "Work_Interest",
        prompt: "Are you interested in your current work or daily activities?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "Social_Weakness",
        prompt: "Do you face challenges in social situations?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "mental_health_interview",
        prompt: "Have you ever participated in a mental health assessment?",
        options: YES_NO_MAYBE,
    },
    Question {
        key: "care_options",
        prompt: "Are you aware of available mental health care options?",
        options: &["Yes", "Not sure", "No"],
    },
];

/// Returns the catalog position of the question with `key`.
pub fn position(key: &str) -> Option<usize> {
    CATALOG.iter().position(|q| q.key == key)
}
