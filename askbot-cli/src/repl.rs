//! Interactive question/answer loop

use std::io::{self, BufRead, Write};

use askbot_agent::Chatbot;
use console::style;
use tracing::debug;

const RULE_WIDTH: usize = 60;

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Where the loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Waiting for input
    Idle,
    /// A question is being answered
    Processing,
    Terminated,
}

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    History,
    Empty,
    Ask(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            ReplCommand::Exit
        } else if trimmed.eq_ignore_ascii_case("history") {
            ReplCommand::History
        } else if trimmed.is_empty() {
            ReplCommand::Empty
        } else {
            ReplCommand::Ask(trimmed.to_string())
        }
    }
}

/// Line-oriented chat loop over any reader/writer pair
pub struct ChatRepl<R, W> {
    input: R,
    output: W,
    state: ReplState,
}

impl<R: BufRead, W: Write> ChatRepl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: ReplState::Idle,
        }
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Print the banner and serve questions until `exit` or end of input
    pub async fn run(&mut self, bot: &mut Chatbot) -> io::Result<()> {
        self.print_banner()?;
        self.state = ReplState::Idle;

        while self.state != ReplState::Terminated {
            write!(self.output, "{}", style("You: ").green().bold())?;
            self.output.flush()?;

            match read_trimmed_line(&mut self.input)? {
                Some(line) => self.handle_line(bot, &line).await?,
                None => {
                    debug!("Input closed, leaving chat loop");
                    writeln!(self.output)?;
                    self.terminate()?;
                }
            }
        }
        Ok(())
    }

    /// Apply one line of input to the loop
    pub async fn handle_line(&mut self, bot: &mut Chatbot, line: &str) -> io::Result<()> {
        match ReplCommand::parse(line) {
            ReplCommand::Exit => self.terminate(),
            ReplCommand::History => self.print_history(bot),
            ReplCommand::Empty => Ok(()),
            ReplCommand::Ask(question) => {
                self.state = ReplState::Processing;
                let answer = bot.answer_question(&question).await;
                self.state = ReplState::Idle;
                writeln!(self.output, "{} {}\n", style("Bot:").cyan().bold(), answer)
            }
        }
    }

    /// Hand back the writer, mostly useful to inspect output
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", rule('='))?;
        writeln!(
            self.output,
            "{}",
            style("General Knowledge Chatbot Started!").bold().cyan()
        )?;
        writeln!(
            self.output,
            "Type 'exit' to quit, 'history' to see conversation history"
        )?;
        writeln!(self.output, "{}\n", rule('='))
    }

    fn print_history(&mut self, bot: &Chatbot) -> io::Result<()> {
        let history = bot.history();
        if history.is_empty() {
            return writeln!(
                self.output,
                "{}\n",
                style("No conversation history yet.").dim()
            );
        }

        writeln!(self.output, "\n{}", style("--- Conversation History ---").bold())?;
        for (i, record) in history.iter().enumerate() {
            writeln!(
                self.output,
                "{}. Q: {}\n   A: {}\n",
                i + 1,
                record.question(),
                record.answer()
            )?;
        }
        Ok(())
    }

    fn terminate(&mut self) -> io::Result<()> {
        self.state = ReplState::Terminated;
        writeln!(
            self.output,
            "\n{}",
            style("Thank you for using the General Knowledge Chatbot. Goodbye!").green()
        )
    }
}

/// Read one line, trimmed. `None` at end of input.
pub fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
