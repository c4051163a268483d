//! Scripted demo: answer the example questions, then offer a chat session

use std::io::{self, BufRead, Write};

use askbot_agent::Chatbot;
use console::style;
use tracing::info;

use crate::repl::{read_trimmed_line, rule, ChatRepl};

/// What the user chose after the examples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    Interactive,
    Declined,
}

/// Answer each example question, then ask whether to continue interactively.
///
/// Only `y` (any case) starts the chat loop; anything else, including end of
/// input, ends the demo.
pub async fn run_demo<R: BufRead, W: Write>(
    bot: &mut Chatbot,
    questions: &[String],
    mut input: R,
    mut output: W,
) -> io::Result<DemoOutcome> {
    writeln!(output, "{}", style("General Knowledge Chatbot Demo").bold())?;
    writeln!(output, "{}", rule('-'))?;
    writeln!(output, "\nExample Questions and Answers:")?;
    writeln!(output, "{}", rule('='))?;

    for question in questions {
        info!("Answering example question: {}", question);
        writeln!(output, "\n{} {}", style("You:").green().bold(), question)?;
        let answer = bot.answer_question(question).await;
        writeln!(output, "{} {}", style("Bot:").cyan().bold(), answer)?;
    }

    writeln!(output, "\n{}", rule('='))?;
    write!(
        output,
        "\nWould you like to start an interactive session? (y/n): "
    )?;
    output.flush()?;

    let reply = read_trimmed_line(&mut input)?.unwrap_or_default();
    if reply.eq_ignore_ascii_case("y") {
        ChatRepl::new(input, output).run(bot).await?;
        Ok(DemoOutcome::Interactive)
    } else {
        writeln!(
            output,
            "{}",
            style("Thank you for using the General Knowledge Chatbot!").green()
        )?;
        Ok(DemoOutcome::Declined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bot_with_answer, plain_output};
    use std::io::Cursor;

    fn questions() -> Vec<String> {
        vec![
            "Where is Taj Mahal?".to_string(),
            "Who was the first President of USA?".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_declined_demo() {
        plain_output();
        let mut bot = bot_with_answer(" somewhere");
        let mut out = Vec::new();

        let outcome = run_demo(&mut bot, &questions(), Cursor::new(b"n\n".to_vec()), &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(outcome, DemoOutcome::Declined);
        assert!(out.contains("You: Where is Taj Mahal?\nBot: somewhere"));
        assert!(out.contains("You: Who was the first President of USA?\nBot: somewhere"));
        assert!(out.contains("(y/n): Thank you for using the General Knowledge Chatbot!"));
        assert_eq!(bot.history().len(), 2);
    }

    #[tokio::test]
    async fn test_uppercase_y_enters_chat() {
        plain_output();
        let mut bot = bot_with_answer(" answer");
        let mut out = Vec::new();

        let outcome = run_demo(
            &mut bot,
            &questions(),
            Cursor::new(b"Y\nhistory\nEXIT\n".to_vec()),
            &mut out,
        )
        .await
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(outcome, DemoOutcome::Interactive);
        assert!(out.contains("General Knowledge Chatbot Started!"));
        // examples asked during the demo show up in the chat history
        assert!(out.contains("2. Q: Who was the first President of USA?"));
        assert!(out.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_closed_input_declines() {
        plain_output();
        let mut bot = bot_with_answer(" answer");
        let mut out = Vec::new();

        let outcome = run_demo(&mut bot, &[], Cursor::new(Vec::new()), &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, DemoOutcome::Declined);
        assert!(bot.history().is_empty());
    }
}
