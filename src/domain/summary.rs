//! Prompt and chat-message formatting for the summary report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::todo::Todo;

pub const REPORT_TITLE: &str = "📋 Todo Summary Report";

/// Numbered plain-text list in store order, completed items marked with ✅.
pub fn format_todo_list(todos: &[Todo]) -> String {
    todos
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}{}", i + 1, t.text, if t.completed { " ✅" } else { "" }))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(todos: &[Todo]) -> String {
    format!(
        "Please analyze and summarize the following todo list in a professional and organized manner:

{list}

Please provide:
1. A brief executive summary
2. Categorization of tasks (work, personal, learning, health, etc.)
3. Priority suggestions based on the nature of tasks
4. Any insights or recommendations

Format the response in a clear, structured way suitable for sharing in a team Slack channel. Use emojis to make it visually appealing but keep it professional.
",
        list = format_todo_list(todos)
    )
}

/// Slack Block Kit payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { text: TextObject },
    Context { elements: Vec<TextObject> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum TextObject {
    PlainText(String),
    Mrkdwn(String),
}

impl ChatMessage {
    pub fn summary_report(summary: &str, todo_count: usize, generated_at: DateTime<Utc>) -> Self {
        let footer = format!(
            "Generated on {} | Total todos: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            todo_count
        );
        Self {
            text: REPORT_TITLE.to_string(),
            blocks: vec![
                Block::Header { text: TextObject::PlainText(REPORT_TITLE.to_string()) },
                Block::Section { text: TextObject::Mrkdwn(summary.to_string()) },
                Block::Context { elements: vec![TextObject::Mrkdwn(footer)] },
            ],
        }
    }
}
