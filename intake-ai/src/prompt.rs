//! Prompt construction for follow-up question synthesis and report writing.

use crate::types::interview::{HistoryEntry, ProjectInfo};
use std::fmt::Write;

/// Placeholder rendered for a question the client skipped.
pub const NO_ANSWER: &str = "[No answer provided]";

const REPORT_SECTIONS: [&str; 8] = [
    "Project overview",
    "Detailed functional requirements",
    "Technical requirements",
    "User stories",
    "Acceptance criteria",
    "Wireframe descriptions (text only)",
    "Database schema suggestions",
    "API endpoint list",
];

const REPORT_EXCLUSIONS: [&str; 3] = ["User flow diagrams", "Timeline", "Costing"];

/// Prompt asking for the follow-up questions still needed to complete
/// requirements gathering, answered as `{"questions": [...]}`.
pub fn question_prompt(project: &ProjectInfo, history: &[HistoryEntry]) -> String {
    let mut prompt = String::from(
        "You are an AI assistant gathering software project requirements from a client.\n\n",
    );
    prompt.push_str(&render_project(project));
    prompt.push_str("\nQuestions asked so far and the client's answers:\n\n");
    prompt.push_str(&render_history(history));
    prompt.push_str(
        r#"
Based on the information above, list the additional questions you still need
the client to answer so that the requirements are complete. Do not repeat
questions that were already asked. If nothing more is needed, return an empty
list.

Respond with a single JSON object and nothing else, in exactly this shape:
{"questions": ["first question", "second question"]}
Do not wrap the JSON in markdown code blocks."#,
    );
    prompt
}

/// Prompt asking for the full requirements document in HTML.
pub fn report_prompt(project: &ProjectInfo, history: &[HistoryEntry]) -> String {
    let mut prompt = String::from(
        "You are an AI assistant writing a software requirements document for a client project.\n\n",
    );
    prompt.push_str(&render_project(project));
    prompt.push_str("\nEverything the client told us:\n\n");
    prompt.push_str(&render_history(history));

    prompt.push_str("\nWrite a complete requirements document with these sections:\n");
    for (index, section) in REPORT_SECTIONS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", index + 1, section);
    }
    prompt.push_str("\nDo not include the following:\n");
    for exclusion in REPORT_EXCLUSIONS {
        let _ = writeln!(prompt, "- {exclusion}");
    }
    prompt.push_str(
        "\nFormat the document as HTML (headings, paragraphs, lists and tables only, \
         no <html>, <head> or <body> tags) and return only the HTML.",
    );
    prompt
}

fn render_project(project: &ProjectInfo) -> String {
    let mut rendered = String::from("Project information:\n");
    let _ = writeln!(rendered, "- Name: {}", project.name);
    if let Some(description) = non_blank(project.description.as_deref()) {
        let _ = writeln!(rendered, "- Description: {description}");
    }
    let _ = writeln!(rendered, "- Project type: {}", project.project_type);
    if let Some(description) = non_blank(project.project_type_description.as_deref()) {
        let _ = writeln!(rendered, "- Project type description: {description}");
    }
    rendered
}

/// Renders each entry as a Question / Answer / Asked by block separated by blank lines.
pub fn render_history(history: &[HistoryEntry]) -> String {
    let mut rendered = String::new();
    for entry in history {
        let answer = non_blank(entry.answer_text.as_deref()).unwrap_or(NO_ANSWER);
        let _ = writeln!(rendered, "Question: {}", entry.question_text.trim());
        let _ = writeln!(rendered, "Answer: {answer}");
        let _ = writeln!(rendered, "Asked by: {}", entry.asked_by);
        rendered.push('\n');
    }
    rendered
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::interview::AskedBy;

    fn project() -> ProjectInfo {
        ProjectInfo {
            name: "Bakery storefront".to_owned(),
            description: Some("Online ordering".to_owned()),
            project_type: "Web Application".to_owned(),
            project_type_description: None,
        }
    }

    #[test]
    fn history_renders_missing_answers_with_placeholder() {
        let history = vec![
            HistoryEntry::new("Who are the users?", Some("Walk-in customers".to_owned()), AskedBy::Predefined),
            HistoryEntry::new("Budget?", Some("   ".to_owned()), AskedBy::Ai),
            HistoryEntry::new("Deadline?", None, AskedBy::Predefined),
        ];

        let rendered = render_history(&history);

        assert!(rendered.contains("Question: Who are the users?\nAnswer: Walk-in customers\nAsked by: predefined\n"));
        assert!(rendered.contains("Question: Budget?\nAnswer: [No answer provided]\nAsked by: ai\n"));
        assert!(rendered.contains("Question: Deadline?\nAnswer: [No answer provided]\n"));
    }

    #[test]
    fn question_prompt_embeds_project_and_demands_json() {
        let prompt = question_prompt(&project(), &[]);

        assert!(prompt.contains("- Name: Bakery storefront"));
        assert!(prompt.contains("- Description: Online ordering"));
        assert!(prompt.contains("- Project type: Web Application"));
        assert!(!prompt.contains("Project type description"));
        assert!(prompt.contains(r#"{"questions": ["#));
    }

    #[test]
    fn report_prompt_lists_sections_and_exclusions() {
        let prompt = report_prompt(&project(), &[]);

        for section in REPORT_SECTIONS {
            assert!(prompt.contains(section), "missing section {section}");
        }
        assert!(prompt.contains("- Timeline"));
        assert!(prompt.contains("- Costing"));
        assert!(prompt.contains("HTML"));
    }
}
