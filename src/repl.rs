//! Line-oriented chat loop
//!
//! Stands in for a chat window: reads questions from `input`, writes the
//! transcript to `output`, and on a miss offers to learn a new answer.

use crate::config::ChatConfig;
use crate::error::Result;
use crate::session::{is_quit, AskOutcome, Conversation, TeachOutcome};
use std::io::{BufRead, Write};

/// Run the chat until `quit` or end of input
pub fn run<R: BufRead, W: Write>(
    conversation: &mut Conversation,
    chat: &ChatConfig,
    mut input: R,
    mut output: W,
) -> Result<()> {
    loop {
        write!(output, "{}: ", chat.user_label)?;
        output.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if is_quit(question) {
            break;
        }

        match conversation.submit(question)? {
            AskOutcome::Answer { answer } => {
                writeln!(output, "{}: {}", chat.bot_label, answer)?;
            }
            AskOutcome::Unknown { .. } => {
                writeln!(output, "{}: {}", chat.bot_label, chat.fallback_answer)?;
                if !offer_teach(conversation, chat, &mut input, &mut output)? {
                    break;
                }
            }
        }
    }

    tracing::debug!("Chat ended");
    Ok(())
}

/// Ask whether to learn an answer for the pending question.
///
/// Returns `false` when input ran out.
fn offer_teach<R: BufRead, W: Write>(
    conversation: &mut Conversation,
    chat: &ChatConfig,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "Do you want to add a new answer? (yes/no) ")?;
    output.flush()?;
    let Some(reply) = read_line(input)? else {
        conversation.decline()?;
        return Ok(false);
    };
    if !is_yes(&reply) {
        conversation.decline()?;
        return Ok(true);
    }

    write!(output, "Enter the answer: ")?;
    output.flush()?;
    let Some(answer) = read_line(input)? else {
        conversation.decline()?;
        return Ok(false);
    };
    let answer = answer.trim();
    if answer.is_empty() {
        conversation.decline()?;
        return Ok(true);
    }

    match conversation.teach(answer)? {
        TeachOutcome::Learned => {
            writeln!(output, "{}: {}", chat.bot_label, chat.learned_message)?;
        }
        TeachOutcome::LearnedUnsaved(e) => {
            writeln!(output, "{}: {}", chat.bot_label, chat.learned_message)?;
            writeln!(
                output,
                "Warning: the answer is kept for this session only ({})",
                e
            )?;
        }
    }
    Ok(true)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn is_yes(reply: &str) -> bool {
    matches!(reply.trim().to_lowercase().as_str(), "y" | "yes")
}
